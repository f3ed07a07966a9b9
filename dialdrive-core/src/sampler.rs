//! Blocking analog sampler
//!
//! Wraps a [`OneShotAdc`] that the chip HAL has already pointed at the
//! potentiometer channel (floating input, full-scale reference, sampling
//! clock in the 50-200 kHz band). Every call performs a fresh conversion;
//! nothing is cached.

use dialdrive_hal::OneShotAdc;

/// 10-bit, right-adjusted potentiometer reading
///
/// 0 is the low reference, [`AnalogMagnitude::MAX`] the high reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnalogMagnitude(u16);

impl AnalogMagnitude {
    /// Number of significant bits
    pub const BITS: u8 = 10;

    /// Full-scale reading
    pub const MAX: u16 = (1 << Self::BITS) - 1;

    /// Create a magnitude, rejecting values above full scale
    pub const fn new(value: u16) -> Option<Self> {
        if value <= Self::MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Create a magnitude, clamping values above full scale
    pub const fn saturating(value: u16) -> Self {
        if value <= Self::MAX {
            Self(value)
        } else {
            Self(Self::MAX)
        }
    }

    /// Right-adjust a raw converter result of any resolution to 10 bits
    pub const fn from_raw(raw: u16, resolution_bits: u8) -> Self {
        let scaled = if resolution_bits >= Self::BITS {
            raw >> (resolution_bits - Self::BITS)
        } else {
            raw << (Self::BITS - resolution_bits)
        };
        Self::saturating(scaled)
    }

    /// Raw 10-bit value
    pub const fn get(self) -> u16 {
        self.0
    }
}

impl From<AnalogMagnitude> for u16 {
    fn from(magnitude: AnalogMagnitude) -> Self {
        magnitude.0
    }
}

/// One-conversion-per-call sampler
pub struct AnalogSampler<A> {
    adc: A,
}

impl<A: OneShotAdc> AnalogSampler<A> {
    /// Take the converter and run one throw-away conversion
    ///
    /// The first conversion after the converter is enabled is not
    /// trusted; it is discarded here so every [`sample`](Self::sample)
    /// returns a settled value.
    pub fn new(adc: A) -> Self {
        let mut sampler = Self { adc };
        let _ = sampler.convert();
        sampler
    }

    /// Convert once and return the 10-bit magnitude
    ///
    /// Blocks until the converter reports completion.
    pub fn sample(&mut self) -> AnalogMagnitude {
        AnalogMagnitude::from_raw(self.convert(), A::RESOLUTION_BITS)
    }

    /// Give the converter back
    pub fn release(self) -> A {
        self.adc
    }

    fn convert(&mut self) -> u16 {
        self.adc.start_conversion();
        while self.adc.is_converting() {
            core::hint::spin_loop();
        }
        self.adc.read_result()
    }
}
