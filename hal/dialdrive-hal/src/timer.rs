//! Compare-match counter abstraction
//!
//! A free-running counter that raises a completion flag once it has counted
//! `threshold` prescaled ticks. Blocking delays are built on top of this
//! in `dialdrive-core`; the trait itself never blocks.

/// Prescaled counter with a compare threshold and a hardware-set flag
///
/// The expected lifecycle for one wait is
/// `start` → poll `is_matched` → `clear_match` → `stop`.
/// Implementations must leave the counter stopped after `stop` so that
/// successive waits do not interfere with each other.
pub trait CompareTimer {
    /// Counter input clock before prescaling, in Hz
    fn clock_hz(&self) -> u32;

    /// Available prescale divisors, finest first
    fn prescalers(&self) -> &[u32];

    /// Largest compare threshold the counter can hold
    fn max_threshold(&self) -> u32;

    /// Configure prescaler and threshold, zero the count and start counting
    fn start(&mut self, prescaler: u32, threshold: u32);

    /// Zero the count, keeping the current configuration
    fn restart(&mut self);

    /// Read the compare-match flag
    fn is_matched(&mut self) -> bool;

    /// Clear the compare-match flag
    fn clear_match(&mut self);

    /// Switch the counter off
    fn stop(&mut self);
}

impl<T: CompareTimer + ?Sized> CompareTimer for &mut T {
    fn clock_hz(&self) -> u32 {
        (**self).clock_hz()
    }

    fn prescalers(&self) -> &[u32] {
        (**self).prescalers()
    }

    fn max_threshold(&self) -> u32 {
        (**self).max_threshold()
    }

    fn start(&mut self, prescaler: u32, threshold: u32) {
        (**self).start(prescaler, threshold)
    }

    fn restart(&mut self) {
        (**self).restart()
    }

    fn is_matched(&mut self) -> bool {
        (**self).is_matched()
    }

    fn clear_match(&mut self) {
        (**self).clear_match()
    }

    fn stop(&mut self) {
        (**self).stop()
    }
}
