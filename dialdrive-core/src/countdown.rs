//! Seven-segment countdown
//!
//! Shows a descending run of digits, each held for a fixed interval, then
//! blanks the display. The run is blocking and always completes.

use dialdrive_hal::CompareTimer;

use crate::config::{ControlConfig, MAX_COUNTDOWN_DIGIT};
use crate::timing::{Interval, TimingService};
use crate::traits::{DisplayError, SegmentDisplay, SegmentPattern};

/// Digit to segment mask, common-cathode, bit 0 = `a`
pub const SEGMENT_MAP: [SegmentPattern; 10] = [
    SegmentPattern(0x3F), // 0
    SegmentPattern(0x06), // 1
    SegmentPattern(0x5B), // 2
    SegmentPattern(0x4F), // 3
    SegmentPattern(0x66), // 4
    SegmentPattern(0x6D), // 5
    SegmentPattern(0x7D), // 6
    SegmentPattern(0x07), // 7
    SegmentPattern(0x7F), // 8
    SegmentPattern(0x6F), // 9
];

/// Segment mask for a single decimal digit
pub const fn digit_pattern(digit: u8) -> Option<SegmentPattern> {
    if digit <= MAX_COUNTDOWN_DIGIT {
        Some(SEGMENT_MAP[digit as usize])
    } else {
        None
    }
}

/// Descending digit sequence on a segment display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CountdownSequencer {
    start_digit: u8,
    hold: Interval,
}

impl CountdownSequencer {
    /// Count from `start_digit` down to zero, holding each for `hold`
    ///
    /// Start digits above 9 are clamped to 9.
    pub const fn new(start_digit: u8, hold: Interval) -> Self {
        let start_digit = if start_digit > MAX_COUNTDOWN_DIGIT {
            MAX_COUNTDOWN_DIGIT
        } else {
            start_digit
        };
        Self { start_digit, hold }
    }

    pub const fn from_config(config: &ControlConfig) -> Self {
        Self::new(config.countdown_start, config.countdown_hold)
    }

    /// Number of digits one run shows
    pub const fn steps(&self) -> u8 {
        self.start_digit + 1
    }

    /// Show every digit, then clear the display
    ///
    /// A write error does not shorten the run: every digit is still held
    /// for its interval and the display is still cleared. The first error
    /// seen is returned at the end.
    pub fn run<D, T>(
        &self,
        display: &mut D,
        timing: &mut TimingService<T>,
    ) -> Result<(), DisplayError>
    where
        D: SegmentDisplay,
        T: CompareTimer,
    {
        let mut first_error = None;

        for digit in (0..=self.start_digit).rev() {
            let pattern = SEGMENT_MAP[digit as usize];
            if let Err(e) = display.show(pattern) {
                first_error.get_or_insert(e);
            }
            timing.wait(self.hold);
        }

        if let Err(e) = display.clear() {
            first_error.get_or_insert(e);
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for CountdownSequencer {
    fn default() -> Self {
        Self::from_config(&ControlConfig::new())
    }
}
