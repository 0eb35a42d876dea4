//! GATT service layout for the Active Hub peripheral.
//!
//! A single primary service carries two characteristics. The central
//! writes request frames to "Receive" and the hub answers with
//! notifications on "Transmit".
//!
//! | Characteristic | UUID                                   | Props        | Perms          |
//! |----------------|----------------------------------------|--------------|----------------|
//! | Receive        | `8CED9D9F-9EAD-4CE8-964C-0EAC13467236` | Write        | Read + Write   |
//! | Transmit       | `C9D7271A-1B8C-4F17-9756-F7EB36B18A2B` | Notify + Read| Read + Write   |
//!
//! Service UUID: `64B777E4-1F94-4388-B098-665DC9F26881`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Constants ────────────────────────────────────────────────

pub const SERVICE_UUID: Uuid = Uuid::from_u128(0x64B777E4_1F94_4388_B098_665DC9F26881);
/// Central → peripheral. The central writes request frames here.
pub const CHAR_RECEIVE: Uuid = Uuid::from_u128(0x8CED9D9F_9EAD_4CE8_964C_0EAC13467236);
/// Peripheral → central. Responses are notified here.
pub const CHAR_TRANSMIT: Uuid = Uuid::from_u128(0xC9D7271A_1B8C_4F17_9756_F7EB36B18A2B);

/// Advertised local name.
pub const LOCAL_NAME: &str = "Hive Active Hub";

/// Characteristic property bits (Core Spec Vol 3, Part G, 3.3.1.1).
pub const PROP_READ: u8 = 0x02;
pub const PROP_WRITE: u8 = 0x08;
pub const PROP_NOTIFY: u8 = 0x10;

/// Attribute permission bits.
pub const PERM_READABLE: u8 = 0x01;
pub const PERM_WRITEABLE: u8 = 0x02;

// ── Service descriptor ───────────────────────────────────────

/// Identifies the hub service and its two characteristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    pub service_id: Uuid,
    pub receive_characteristic_id: Uuid,
    pub transmit_characteristic_id: Uuid,
}

impl ServiceDescriptor {
    pub const ACTIVE_HUB: Self = Self {
        service_id: SERVICE_UUID,
        receive_characteristic_id: CHAR_RECEIVE,
        transmit_characteristic_id: CHAR_TRANSMIT,
    };

    /// Characteristics in registration order: receive, then transmit.
    pub fn characteristics(&self) -> [CharacteristicSpec; 2] {
        [
            CharacteristicSpec {
                uuid: self.receive_characteristic_id,
                properties: PROP_WRITE,
                permissions: PERM_READABLE | PERM_WRITEABLE,
            },
            CharacteristicSpec {
                uuid: self.transmit_characteristic_id,
                properties: PROP_NOTIFY | PROP_READ,
                permissions: PERM_READABLE | PERM_WRITEABLE,
            },
        ]
    }

    pub fn is_receive(&self, characteristic: Uuid) -> bool {
        characteristic == self.receive_characteristic_id
    }

    /// True when service and characteristic identifiers are pairwise distinct.
    pub fn ids_distinct(&self) -> bool {
        self.service_id != self.receive_characteristic_id
            && self.service_id != self.transmit_characteristic_id
            && self.receive_characteristic_id != self.transmit_characteristic_id
    }
}

impl Default for ServiceDescriptor {
    fn default() -> Self {
        Self::ACTIVE_HUB
    }
}

/// One characteristic as handed to the transport for registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacteristicSpec {
    pub uuid: Uuid,
    pub properties: u8,
    pub permissions: u8,
}

impl CharacteristicSpec {
    pub fn can_write(&self) -> bool {
        self.properties & PROP_WRITE != 0
    }

    pub fn can_notify(&self) -> bool {
        self.properties & PROP_NOTIFY != 0
    }
}

// ── Advertisement ────────────────────────────────────────────

/// Advertising payload: the service UUID plus a human-readable name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advertisement {
    pub service_uuid: Uuid,
    pub local_name: String,
}
