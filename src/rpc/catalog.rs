//! Message catalog: canned responses for every known request type.
//!
//! | Request                             | Response `messageType`               |
//! |-------------------------------------|--------------------------------------|
//! | `BT_APP_STATUS`                     | `BT_APP_STATUS`                      |
//! | `WIFI_INTERFACE_STATUS_REQUEST`     | `WIFI_INTERFACE_STATUS_RESPONSE`     |
//! | `WIFI_INTERFACES_AVAILABLE_REQUEST` | `WIFI_INTERFACES_AVAILABLE_RESPONSE` |
//! | `SET_ACTIVE_SSID_REQUEST`           | `WIFI_INTERFACES_AVAILABLE_RESPONSE` |
//!
//! The last row is what deployed hubs send. It is very likely a copy/paste
//! slip (`SET_ACTIVE_SSID_RESPONSE` exists but is never produced); it is
//! kept as-is until product owners confirm a change.
//!
//! Response types themselves have no catalog entry. Lookup is exact and
//! case-sensitive, and the catalog holds no state.

use core::fmt;
use core::str::FromStr;

use serde::{Serialize, Serializer};

use super::codec::{Frame, encode_frame};

// ── Message types ────────────────────────────────────────────

/// Closed set of `messageType` tags understood on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    BtAppStatus,
    WifiInterfaceStatusRequest,
    WifiInterfaceStatusResponse,
    WifiInterfacesAvailableRequest,
    WifiInterfacesAvailableResponse,
    SetActiveSsidRequest,
    SetActiveSsidResponse,
}

impl MessageType {
    pub const ALL: [Self; 7] = [
        Self::BtAppStatus,
        Self::WifiInterfaceStatusRequest,
        Self::WifiInterfaceStatusResponse,
        Self::WifiInterfacesAvailableRequest,
        Self::WifiInterfacesAvailableResponse,
        Self::SetActiveSsidRequest,
        Self::SetActiveSsidResponse,
    ];

    /// Wire tag.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BtAppStatus => "BT_APP_STATUS",
            Self::WifiInterfaceStatusRequest => "WIFI_INTERFACE_STATUS_REQUEST",
            Self::WifiInterfaceStatusResponse => "WIFI_INTERFACE_STATUS_RESPONSE",
            Self::WifiInterfacesAvailableRequest => "WIFI_INTERFACES_AVAILABLE_REQUEST",
            Self::WifiInterfacesAvailableResponse => "WIFI_INTERFACES_AVAILABLE_RESPONSE",
            Self::SetActiveSsidRequest => "SET_ACTIVE_SSID_REQUEST",
            Self::SetActiveSsidResponse => "SET_ACTIVE_SSID_RESPONSE",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised `messageType` tag (carries the tag as received).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMessageType(pub String);

impl fmt::Display for UnknownMessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown message type {:?}", self.0)
    }
}

impl std::error::Error for UnknownMessageType {}

impl FromStr for MessageType {
    type Err = UnknownMessageType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownMessageType(s.to_owned()))
    }
}

impl Serialize for MessageType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ── Response bodies ──────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppState {
    Initialising,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NoError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandStatus {
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppStatus {
    pub message_type: MessageType,
    pub app_state: AppState,
    pub error_code: ErrorCode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WifiInterfaceStatus {
    pub message_type: MessageType,
    pub adapter_name: String,
    pub adapter_mac_address: String,
    pub interface_up: bool,
    pub ip_address: String,
    pub status_dump: String,
    #[serde(rename = "currentSSID")]
    pub current_ssid: String,
    pub current_security_type: String,
    pub has_internet: bool,
}

/// One entry of `availableSSIDs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableSsid {
    pub psk_type: String,
    pub ssid: String,
    pub psk: String,
    pub signal_level: u8,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WifiInterfacesAvailable {
    pub message_type: MessageType,
    #[serde(rename = "availableSSIDs")]
    pub available_ssids: Vec<AvailableSsid>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetActiveSsidResult {
    pub message_type: MessageType,
    pub status: CommandStatus,
    pub status_message: String,
}

/// Any outbound message. Serialises as the inner body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Response {
    AppStatus(AppStatus),
    WifiInterfaceStatus(WifiInterfaceStatus),
    WifiInterfacesAvailable(WifiInterfacesAvailable),
    SetActiveSsid(SetActiveSsidResult),
}

impl Response {
    /// The `messageType` tag this response carries on the wire.
    pub fn message_type(&self) -> MessageType {
        match self {
            Self::AppStatus(r) => r.message_type,
            Self::WifiInterfaceStatus(r) => r.message_type,
            Self::WifiInterfacesAvailable(r) => r.message_type,
            Self::SetActiveSsid(r) => r.message_type,
        }
    }
}

// ── Catalog ──────────────────────────────────────────────────

fn available_ssid(ssid: &str, signal_level: u8) -> AvailableSsid {
    AvailableSsid {
        psk_type: String::new(),
        ssid: ssid.to_owned(),
        psk: String::new(),
        signal_level,
        enabled: true,
    }
}

/// Canned response for `request`, or `None` when the type has no entry.
pub fn response_for(request: MessageType) -> Option<Response> {
    let response = match request {
        MessageType::BtAppStatus => Response::AppStatus(AppStatus {
            message_type: MessageType::BtAppStatus,
            app_state: AppState::Initialising,
            error_code: ErrorCode::NoError,
        }),
        MessageType::WifiInterfaceStatusRequest => {
            Response::WifiInterfaceStatus(WifiInterfaceStatus {
                message_type: MessageType::WifiInterfaceStatusResponse,
                adapter_name: "Active Hub Device".into(),
                adapter_mac_address: "aa:bb:cc:dd".into(),
                interface_up: true,
                ip_address: "10.1.1.2".into(),
                status_dump: "BK Example".into(),
                current_ssid: "BGCH".into(),
                current_security_type: "WEP".into(),
                has_internet: false,
            })
        }
        MessageType::WifiInterfacesAvailableRequest => {
            Response::WifiInterfacesAvailable(WifiInterfacesAvailable {
                message_type: MessageType::WifiInterfacesAvailableResponse,
                available_ssids: vec![
                    available_ssid("BGCH", 100),
                    available_ssid("BGCH 1", 80),
                    available_ssid("BGCH 1", 80),
                ],
            })
        }
        // Tag preserved from deployed hubs; see module docs.
        MessageType::SetActiveSsidRequest => Response::SetActiveSsid(SetActiveSsidResult {
            message_type: MessageType::WifiInterfacesAvailableResponse,
            status: CommandStatus::Success,
            status_message: "ALL GOOD".into(),
        }),
        MessageType::WifiInterfaceStatusResponse
        | MessageType::WifiInterfacesAvailableResponse
        | MessageType::SetActiveSsidResponse => return None,
    };
    Some(response)
}

/// Exact-match lookup by wire tag.
pub fn lookup(tag: &str) -> Option<Response> {
    tag.parse().ok().and_then(response_for)
}

// ── Encoding ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The structured value could not be serialised.
    Encode(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encode(msg) => write!(f, "encode failed: {}", msg),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Serialise a response to JSON bytes.
pub fn encode_message(response: &Response, pretty: bool) -> Result<Vec<u8>, CatalogError> {
    let encoded = if pretty {
        serde_json::to_vec_pretty(response)
    } else {
        serde_json::to_vec(response)
    };
    encoded.map_err(|e| CatalogError::Encode(e.to_string()))
}

/// Serialise and frame a response, ready for the transmit characteristic.
pub fn frame_response(response: &Response, pretty: bool) -> crate::error::Result<Frame> {
    let payload = encode_message(response, pretty)?;
    Ok(encode_frame(&payload)?)
}

// ── Tests ────────────────────────────────────────────────────
