//! Seven-segment display trait

/// Errors that can occur with display output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// A segment line could not be written
    SegmentPin,
}

/// Bit mask of lit segments
///
/// Bit 0 is segment `a`, bit 6 is segment `g`, bit 7 is the decimal point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SegmentPattern(pub u8);

impl SegmentPattern {
    /// All segments off
    pub const BLANK: Self = Self(0);

    /// Raw bit mask
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Check whether segment `index` (0 = `a`) is lit
    pub const fn is_lit(self, index: u8) -> bool {
        index < 8 && self.0 & (1 << index) != 0
    }
}

/// 8-bit parallel segment output
pub trait SegmentDisplay {
    /// Light exactly the segments set in `pattern`
    fn show(&mut self, pattern: SegmentPattern) -> Result<(), DisplayError>;

    /// Turn every segment off
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.show(SegmentPattern::BLANK)
    }
}

impl<T: SegmentDisplay + ?Sized> SegmentDisplay for &mut T {
    fn show(&mut self, pattern: SegmentPattern) -> Result<(), DisplayError> {
        (**self).show(pattern)
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        (**self).clear()
    }
}
