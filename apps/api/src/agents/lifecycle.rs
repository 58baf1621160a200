//! Per-(user, agent) generation lifecycle.
//!
//! ```text
//! Idle ──submit──▶ Loading{seq} ──ok──▶ Success{seq}
//!                       │        └─err─▶ Error{seq}
//! Success|Error ──submit──▶ Loading{seq+1}
//! ```
//!
//! Every submit takes the next sequence number for its slot. A response
//! carrying an older number is stale: it leaves the slot untouched and
//! its result must not be persisted.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use serde::Serialize;
use uuid::Uuid;

use crate::agents::catalog::AgentKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GenerationState {
    Idle,
    Loading { seq: u64 },
    Success { seq: u64 },
    Error { seq: u64 },
}

/// Anonymous callers share no slot; they get a fresh key per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotKey {
    pub owner: Uuid,
    pub agent: AgentKind,
}

impl SlotKey {
    pub fn new(owner: Uuid, agent: AgentKind) -> Self {
        Self { owner, agent }
    }
}

/// Proof of a submit. Hand it back to `finish`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub seq: u64,
}

#[derive(Debug, Default)]
pub struct GenerationSlots {
    states: DashMap<SlotKey, GenerationState>,
    counter: AtomicU64,
}

impl GenerationSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, key: &SlotKey) -> GenerationState {
        self.states
            .get(key)
            .map(|s| *s)
            .unwrap_or(GenerationState::Idle)
    }

    /// Moves the slot to `Loading` with a fresh sequence number.
    pub fn begin(&self, key: SlotKey) -> Ticket {
        let seq = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        self.states.insert(key, GenerationState::Loading { seq });
        Ticket { seq }
    }

    /// Records the outcome of `ticket`. Returns `false` when the ticket is
    /// stale, in which case the slot is left unchanged.
    pub fn finish(&self, key: SlotKey, ticket: Ticket, ok: bool) -> bool {
        let Some(mut entry) = self.states.get_mut(&key) else {
            return false;
        };
        if *entry != (GenerationState::Loading { seq: ticket.seq }) {
            return false;
        }
        *entry = if ok {
            GenerationState::Success { seq: ticket.seq }
        } else {
            GenerationState::Error { seq: ticket.seq }
        };
        true
    }

    /// Drops the slot. Used for one-shot anonymous keys.
    pub fn release(&self, key: &SlotKey) {
        self.states.remove(key);
    }
}

#[cfg(test)]
impl GenerationState {
    pub fn is_loading(self) -> bool {
        matches!(self, GenerationState::Loading { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> SlotKey {
        SlotKey::new(Uuid::new_v4(), AgentKind::CareerCoach)
    }

    #[test]
    fn test_unknown_slot_is_idle() {
        let slots = GenerationSlots::new();
        assert_eq!(slots.state(&key()), GenerationState::Idle);
    }

    #[test]
    fn test_submit_then_success() {
        let slots = GenerationSlots::new();
        let k = key();
        let ticket = slots.begin(k);
        assert!(slots.state(&k).is_loading());
        assert!(slots.finish(k, ticket, true));
        assert_eq!(slots.state(&k), GenerationState::Success { seq: ticket.seq });
    }

    #[test]
    fn test_failure_moves_to_error() {
        let slots = GenerationSlots::new();
        let k = key();
        let ticket = slots.begin(k);
        assert!(slots.finish(k, ticket, false));
        assert_eq!(slots.state(&k), GenerationState::Error { seq: ticket.seq });
    }

    #[test]
    fn test_sequence_numbers_increase() {
        let slots = GenerationSlots::new();
        let k = key();
        let first = slots.begin(k);
        let second = slots.begin(k);
        assert!(second.seq > first.seq);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let slots = GenerationSlots::new();
        let k = key();
        let first = slots.begin(k);
        let second = slots.begin(k);

        assert!(!slots.finish(k, first, true));
        assert_eq!(slots.state(&k), GenerationState::Loading { seq: second.seq });

        assert!(slots.finish(k, second, true));
        assert_eq!(slots.state(&k), GenerationState::Success { seq: second.seq });
    }

    #[test]
    fn test_finish_twice_is_rejected() {
        let slots = GenerationSlots::new();
        let k = key();
        let ticket = slots.begin(k);
        assert!(slots.finish(k, ticket, true));
        assert!(!slots.finish(k, ticket, false));
        assert_eq!(slots.state(&k), GenerationState::Success { seq: ticket.seq });
    }

    #[test]
    fn test_state_serializes_with_tag() {
        let json = serde_json::to_value(GenerationState::Loading { seq: 7 }).unwrap();
        assert_eq!(json["state"], "loading");
        assert_eq!(json["seq"], 7);
    }
}
