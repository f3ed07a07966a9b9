//! State shared between the button interrupt and the main loop
//!
//! Each transition has exactly one writer:
//!
//! | transition                  | writer            |
//! |-----------------------------|-------------------|
//! | `Idle → Pressed`            | interrupt handler |
//! | `Released → CooldownActive` | interrupt handler |
//! | `Pressed → Released`        | main loop         |
//! | `CooldownActive → Idle`     | main loop         |
//!
//! A transition is committed with a single compare-exchange against the
//! state it was computed from, so neither side can overwrite a change
//! made by the other. The interrupt side is a load plus one
//! compare-exchange and never blocks.

use portable_atomic::{AtomicU8, Ordering};

use super::events::Event;
use super::machine::ControllerState;

/// Process-wide controller state cell
pub struct SharedState {
    raw: AtomicU8,
}

impl SharedState {
    /// Create a cell in [`ControllerState::Idle`]
    pub const fn new() -> Self {
        Self {
            raw: AtomicU8::new(ControllerState::Idle.as_u8()),
        }
    }

    /// Current state
    pub fn load(&self) -> ControllerState {
        // Only valid encodings are ever stored
        ControllerState::from_u8(self.raw.load(Ordering::Acquire)).unwrap_or_default()
    }

    /// Record a button edge (interrupt context)
    ///
    /// Returns `true` if the edge advanced the state.
    pub fn on_edge(&self) -> bool {
        self.advance(Event::ButtonEdge)
    }

    /// Acknowledge a press seen by the main loop
    pub fn acknowledge_press(&self) -> bool {
        self.advance(Event::PressAcknowledged)
    }

    /// Return to idle after the countdown
    pub fn finish_cooldown(&self) -> bool {
        self.advance(Event::CooldownFinished)
    }

    /// Apply an event, returning `true` if the state changed
    pub fn advance(&self, event: Event) -> bool {
        let current = self.load();
        let next = current.transition(event);
        if next == current {
            return false;
        }

        self.raw
            .compare_exchange(
                current.as_u8(),
                next.as_u8(),
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle() {
        assert_eq!(SharedState::new().load(), ControllerState::Idle);
    }

    #[test]
    fn test_edge_tick_edge_sequence() {
        let state = SharedState::new();

        assert!(state.on_edge());
        assert_eq!(state.load(), ControllerState::Pressed);

        // Bounce before the loop has run
        assert!(!state.on_edge());
        assert_eq!(state.load(), ControllerState::Pressed);

        assert!(state.acknowledge_press());
        assert_eq!(state.load(), ControllerState::Released);

        assert!(state.on_edge());
        assert_eq!(state.load(), ControllerState::CooldownActive);

        // Third edge is a no-op
        assert!(!state.on_edge());
        assert_eq!(state.load(), ControllerState::CooldownActive);

        assert!(state.finish_cooldown());
        assert_eq!(state.load(), ControllerState::Idle);
    }

    #[test]
    fn test_loop_events_cannot_skip_ahead() {
        let state = SharedState::new();

        assert!(!state.acknowledge_press());
        assert!(!state.finish_cooldown());
        assert_eq!(state.load(), ControllerState::Idle);

        state.on_edge();
        assert!(!state.finish_cooldown());
        assert_eq!(state.load(), ControllerState::Pressed);
    }

    #[test]
    fn test_usable_as_static() {
        static STATE: SharedState = SharedState::new();

        STATE.on_edge();
        assert_eq!(STATE.load(), ControllerState::Pressed);
    }
}
