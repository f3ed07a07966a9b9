//! One-shot analog converter abstraction
//!
//! Models a converter that has already been set up for a single input
//! channel: software starts a conversion, hardware clears a busy flag when
//! the result is ready.

/// Software-triggered, single-channel analog-to-digital converter
pub trait OneShotAdc {
    /// Number of significant bits in a raw result
    const RESOLUTION_BITS: u8;

    /// Begin one conversion on the configured channel
    fn start_conversion(&mut self);

    /// Check whether the conversion started last is still running
    fn is_converting(&mut self) -> bool;

    /// Read the raw, right-adjusted result of the last finished conversion
    fn read_result(&mut self) -> u16;
}
