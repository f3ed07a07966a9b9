//! Parallel seven-segment display
//!
//! One GPIO per segment, `a` through `g` plus the decimal point. Bit `n`
//! of a [`SegmentPattern`] drives pin `n`.

use dialdrive_core::traits::{DisplayError, SegmentDisplay, SegmentPattern};
use embedded_hal::digital::{OutputPin, PinState};

/// Number of segment lines, decimal point included
pub const SEGMENT_LINES: usize = 8;

/// Seven-segment display on eight output pins
///
/// Common-cathode displays light a segment with a high pin; common-anode
/// displays with a low one.
pub struct ParallelSegmentDisplay<P> {
    pins: [P; SEGMENT_LINES],
    /// If true, segment lit = pin LOW
    common_anode: bool,
    shown: SegmentPattern,
}

impl<P: OutputPin> ParallelSegmentDisplay<P> {
    /// Take the segment pins and blank the display
    pub fn new(pins: [P; SEGMENT_LINES], common_anode: bool) -> Result<Self, DisplayError> {
        let mut display = Self {
            pins,
            common_anode,
            shown: SegmentPattern::BLANK,
        };
        display.clear()?;
        Ok(display)
    }

    /// Create a display for a common-cathode part
    pub fn new_common_cathode(pins: [P; SEGMENT_LINES]) -> Result<Self, DisplayError> {
        Self::new(pins, false)
    }

    /// Pattern currently on the pins
    pub fn shown(&self) -> SegmentPattern {
        self.shown
    }

    pub fn release(self) -> [P; SEGMENT_LINES] {
        self.pins
    }
}

impl<P: OutputPin> SegmentDisplay for ParallelSegmentDisplay<P> {
    fn show(&mut self, pattern: SegmentPattern) -> Result<(), DisplayError> {
        for (index, pin) in self.pins.iter_mut().enumerate() {
            let lit = pattern.is_lit(index as u8);
            pin.set_state(PinState::from(lit != self.common_anode))
                .map_err(|_| DisplayError::SegmentPin)?;
        }
        self.shown = pattern;
        Ok(())
    }
}
