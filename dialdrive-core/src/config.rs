//! Control configuration
//!
//! Tunables for the control loop. The defaults reproduce the reference
//! hardware behavior; the firmware overrides them from `control.toml`
//! at build time.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::sampler::AnalogMagnitude;
use crate::timing::Interval;

/// Highest digit a single seven-segment position can show
pub const MAX_COUNTDOWN_DIGIT: u8 = 9;

/// Control loop configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControlConfig {
    /// Magnitude treated as "stopped" (half of full scale)
    pub center: u16,
    /// Half-width of the band around `center` that maps to brake
    pub dead_zone: u16,
    /// Settle delay after the main loop acknowledges a press
    pub press_settle: Interval,
    /// Settle delay after the countdown returns the loop to idle
    pub cooldown_settle: Interval,
    /// How long each countdown digit stays on the display
    pub countdown_hold: Interval,
    /// First digit of the countdown (counts down to zero)
    pub countdown_start: u8,
}

impl ControlConfig {
    /// Default configuration, usable in const context
    pub const fn new() -> Self {
        Self {
            center: AnalogMagnitude::MAX / 2,
            dead_zone: 0,
            press_settle: Interval::Millisecond,
            cooldown_settle: Interval::TenMilliseconds,
            countdown_hold: Interval::OneSecond,
            countdown_start: MAX_COUNTDOWN_DIGIT,
        }
    }

    /// Check that the configuration describes a usable controller
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.center > AnalogMagnitude::MAX {
            return Err(ConfigError::CenterOutOfRange);
        }
        if self.dead_zone > self.center || self.center + self.dead_zone > AnalogMagnitude::MAX {
            return Err(ConfigError::DeadZoneTooWide);
        }
        if self.countdown_start > MAX_COUNTDOWN_DIGIT {
            return Err(ConfigError::CountdownStartOutOfRange);
        }
        Ok(())
    }
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Center lies outside the 10-bit magnitude range
    CenterOutOfRange,
    /// Dead zone extends past either end of the magnitude range
    DeadZoneTooWide,
    /// Countdown cannot start above a single digit
    CountdownStartOutOfRange,
}
