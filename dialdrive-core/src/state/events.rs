//! Events that trigger state transitions

/// Events that can advance the button state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Edge on the button interrupt pin
    ButtonEdge,
    /// Main loop has seen the press and settled
    PressAcknowledged,
    /// Main loop has finished the countdown
    CooldownFinished,
}
