//! State machine definition
//!
//! The only valid cycle is
//! `Idle → Pressed → Released → CooldownActive → Idle`.

use super::events::Event;

/// Controller states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ControllerState {
    /// Waiting for the first press
    #[default]
    Idle = 0,
    /// First edge seen, main loop has not acknowledged it yet
    Pressed = 1,
    /// Press acknowledged, waiting for the second edge
    Released = 2,
    /// Countdown pending or running; motor control is off
    CooldownActive = 3,
}

impl ControllerState {
    /// Process an event and return the next state
    ///
    /// Events that do not apply to the current state leave it unchanged.
    pub fn transition(self, event: Event) -> Self {
        use ControllerState::*;
        use Event::*;

        match (self, event) {
            (Idle, ButtonEdge) => Pressed,
            (Pressed, PressAcknowledged) => Released,
            (Released, ButtonEdge) => CooldownActive,
            (CooldownActive, CooldownFinished) => Idle,

            // Bounce and out-of-order events
            _ => self,
        }
    }

    /// Encode for atomic storage
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Decode from atomic storage
    pub const fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(ControllerState::Idle),
            1 => Some(ControllerState::Pressed),
            2 => Some(ControllerState::Released),
            3 => Some(ControllerState::CooldownActive),
            _ => None,
        }
    }
}
