//! Motor driver trait
//!
//! A single brushed DC motor behind an H-bridge: two direction lines and
//! one PWM speed line.

use crate::mapping::DutyCommand;

/// Errors that can occur while driving motor outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorError {
    /// A direction line could not be written
    DirectionPin,
    /// The PWM speed output rejected the duty cycle
    SpeedOutput,
}

/// Motor driver consumed by the control loop
///
/// Motor control can be switched off at the hardware level. While it is
/// off, the outputs stay braked with zero duty and `drive` is ignored.
/// `enable` reconnects the outputs still braked at zero duty; nothing
/// moves until the next `drive`.
pub trait MotorOutput {
    /// Set direction lines and duty for a command
    fn drive(&mut self, command: DutyCommand) -> Result<(), MotorError>;

    /// Disconnect the speed output and brake
    fn disable(&mut self) -> Result<(), MotorError>;

    /// Reconnect the speed output at zero duty
    fn enable(&mut self) -> Result<(), MotorError>;

    /// Check whether motor control is currently connected
    fn is_enabled(&self) -> bool;
}

impl<T: MotorOutput + ?Sized> MotorOutput for &mut T {
    fn drive(&mut self, command: DutyCommand) -> Result<(), MotorError> {
        (**self).drive(command)
    }

    fn disable(&mut self) -> Result<(), MotorError> {
        (**self).disable()
    }

    fn enable(&mut self) -> Result<(), MotorError> {
        (**self).enable()
    }

    fn is_enabled(&self) -> bool {
        (**self).is_enabled()
    }
}
