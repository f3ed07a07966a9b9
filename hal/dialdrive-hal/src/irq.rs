//! Edge interrupt gating
//!
//! The button is serviced from an interrupt context. The control loop needs
//! to hold that context off while the countdown runs, without losing the
//! pin configuration.

/// Mask and unmask the single edge-triggered interrupt source
pub trait EdgeInterruptGate {
    /// Stop the handler from running
    fn mask(&mut self);

    /// Allow the handler to run again
    fn unmask(&mut self);

    /// Check whether the source is currently masked
    fn is_masked(&self) -> bool;
}
