//! Potentiometer to motor command mapping
//!
//! The magnitude range is split around a center value. Below center the
//! motor runs in reverse, above it runs forward, and inside the dead zone
//! it brakes. Each half is stretched ×2 onto the duty range, so a full
//! deflection either way gives a duty of 1022.
//!
//! The two halves are deliberately not mirror images: reverse measures
//! from `center`, forward from `center + 1`. With the default center of
//! 511 this gives `apply(510) = Reverse @ 2` and `apply(512) = Forward @ 0`.

use crate::config::ControlConfig;
use crate::sampler::AnalogMagnitude;
use crate::traits::{MotorError, MotorOutput};

/// Motor direction as seen by the H-bridge direction lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorDirection {
    /// Forward line high, reverse line low
    Forward,
    /// Reverse line high, forward line low
    Reverse,
    /// Both lines low
    Brake,
}

/// Direction and duty for one control loop iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DutyCommand {
    /// Direction line state
    pub direction: MotorDirection,
    /// Duty on the 10-bit scale (0..=1023)
    pub duty: u16,
}

impl DutyCommand {
    /// Largest duty value a command can carry
    pub const DUTY_MAX: u16 = AnalogMagnitude::MAX;

    /// Both direction lines low, no duty
    pub const BRAKE: Self = Self {
        direction: MotorDirection::Brake,
        duty: 0,
    };

    /// Check whether this command brakes the motor
    pub fn is_brake(&self) -> bool {
        self.direction == MotorDirection::Brake
    }
}

impl Default for DutyCommand {
    fn default() -> Self {
        Self::BRAKE
    }
}

/// Piecewise-linear magnitude to command mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DutyCycleMapper {
    center: u16,
    dead_zone: u16,
}

impl DutyCycleMapper {
    /// Create a mapper around `center` with a brake band of `±dead_zone`
    pub const fn new(center: u16, dead_zone: u16) -> Self {
        Self { center, dead_zone }
    }

    /// Create a mapper from the control configuration
    pub const fn from_config(config: &ControlConfig) -> Self {
        Self::new(config.center, config.dead_zone)
    }

    /// Center value
    pub const fn center(&self) -> u16 {
        self.center
    }

    /// Dead zone half-width
    pub const fn dead_zone(&self) -> u16 {
        self.dead_zone
    }

    /// Compute the command for a magnitude without touching hardware
    pub fn map(&self, magnitude: AnalogMagnitude) -> DutyCommand {
        let m = magnitude.get() as u32;
        let center = self.center as u32;
        let dead_zone = self.dead_zone as u32;

        if m + dead_zone < center {
            DutyCommand {
                direction: MotorDirection::Reverse,
                duty: Self::clamp_duty((center - m) * 2),
            }
        } else if m > center + dead_zone {
            DutyCommand {
                direction: MotorDirection::Forward,
                duty: Self::clamp_duty((m - center - 1) * 2),
            }
        } else {
            DutyCommand::BRAKE
        }
    }

    /// Compute the command and write it to the motor driver
    ///
    /// The duty is written even when braking.
    pub fn apply<M: MotorOutput>(
        &self,
        magnitude: AnalogMagnitude,
        motor: &mut M,
    ) -> Result<DutyCommand, MotorError> {
        let command = self.map(magnitude);
        motor.drive(command)?;
        Ok(command)
    }

    fn clamp_duty(duty: u32) -> u16 {
        duty.min(DutyCommand::DUTY_MAX as u32) as u16
    }
}

impl Default for DutyCycleMapper {
    fn default() -> Self {
        Self::from_config(&ControlConfig::new())
    }
}
