//! Function-pointer finite state machine for the peripheral lifecycle.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  StateTable                                                  │
//! │  ┌───────────────┬──────────┬──────────┬──────────────────┐  │
//! │  │ StateId       │ on_enter │ on_exit  │ on_event         │  │
//! │  ├───────────────┼──────────┼──────────┼──────────────────┤  │
//! │  │ Unknown       │ -        │ -        │ fn(ctx, ev)->Opt │  │
//! │  │ PoweredOff    │ -        │ -        │ fn(ctx, ev)->Opt │  │
//! │  │ NoService     │ fn(ctx)  │ -        │ fn(ctx, ev)->Opt │  │
//! │  │ ServiceAdded  │ fn(ctx)  │ -        │ fn(ctx, ev)->Opt │  │
//! │  │ Advertising   │ -        │ fn(ctx)  │ fn(ctx, ev)->Opt │  │
//! │  └───────────────┴──────────┴──────────┴──────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The machine is driven by transport events, not ticks. For each
//! [`LifecycleEvent`] the engine calls `on_event` for the current state.
//! `Some(next)` runs `on_exit(current)` then `on_enter(next)`; returning
//! the current state re-enters it. Handlers only queue requests on the
//! [`FsmContext`]; the machine itself performs no I/O.

pub mod context;
pub mod states;

use context::{FsmContext, TransportRequest};
use log::info;

use crate::app::ports::TransportError;
use crate::events::RadioState;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Lifecycle states. Must stay in sync with [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    Unknown = 0,
    PoweredOff = 1,
    PoweredOnNoService = 2,
    PoweredOnServiceAdded = 3,
    Advertising = 4,
}

impl StateId {
    pub const COUNT: usize = 5;

    /// Convert a table index back to `StateId`. Out-of-range indices
    /// assert in debug builds and fall back to `Unknown`.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Unknown,
            1 => Self::PoweredOff,
            2 => Self::PoweredOnNoService,
            3 => Self::PoweredOnServiceAdded,
            4 => Self::Advertising,
            _ => {
                debug_assert!(false, "invalid state index: {idx}");
                Self::Unknown
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// The subset of transport events that can move the lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    Readiness(RadioState),
    ServiceAdded(Result<(), TransportError>),
    AdvertisingStarted(Result<(), TransportError>),
}

impl LifecycleEvent {
    /// The completion event for a request the transport refused
    /// synchronously. `StopAdvertising` has no completion.
    pub fn failed(request: TransportRequest, error: TransportError) -> Option<Self> {
        match request {
            TransportRequest::AddService => Some(Self::ServiceAdded(Err(error))),
            TransportRequest::StartAdvertising => Some(Self::AdvertisingStarted(Err(error))),
            TransportRequest::StopAdvertising => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// `on_enter` / `on_exit`: run once per transition.
pub type StateActionFn = fn(&mut FsmContext);

/// Event handler. `Some(next)` triggers a transition, `None` stays put.
pub type StateEventFn = fn(&mut FsmContext, &LifecycleEvent) -> Option<StateId>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

pub struct StateDescriptor {
    pub id: StateId,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_event: StateEventFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

pub struct Fsm {
    /// Fixed-size table indexed by `StateId as usize`.
    table: [StateDescriptor; StateId::COUNT],
    current: usize,
}

impl Fsm {
    pub fn new(table: [StateDescriptor; StateId::COUNT], initial: StateId) -> Self {
        Self {
            table,
            current: initial as usize,
        }
    }

    /// Run the initial `on_enter`. Call once before the first event.
    pub fn start(&mut self, ctx: &mut FsmContext) {
        info!("FSM starting in state: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Feed one event. Returns the state entered, if any.
    pub fn handle(&mut self, event: &LifecycleEvent, ctx: &mut FsmContext) -> Option<StateId> {
        let next = (self.table[self.current].on_event)(ctx, event)?;
        self.transition(next, ctx);
        Some(next)
    }

    /// Jump straight to `next`, skipping the event handler. No-op when
    /// already there.
    pub fn force_transition(&mut self, next: StateId, ctx: &mut FsmContext) {
        if next as usize != self.current {
            self.transition(next, ctx);
        }
    }

    pub fn current_state(&self) -> StateId {
        StateId::from_index(self.current)
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next_id: StateId, ctx: &mut FsmContext) {
        let next_idx = next_id as usize;

        info!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        self.current = next_idx;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}
