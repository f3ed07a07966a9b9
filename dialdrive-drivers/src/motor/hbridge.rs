//! H-bridge DC motor driver
//!
//! Drives one brushed DC motor through an L293D-style bridge:
//!
//! | forward | reverse | motor       |
//! |---------|---------|-------------|
//! | low     | low     | brake       |
//! | high    | low     | forward     |
//! | low     | high    | reverse     |
//! | high    | high    | brake       |
//!
//! The enable input of the bridge is fed by a PWM channel. Duty values are
//! on a 10-bit scale and are rescaled to whatever resolution the channel
//! has.
//!
//! # Usage
//!
//! ```ignore
//! let mut motor = HBridgeMotor::new(in2, in1, pwm)?;
//! motor.drive(DutyCommand { direction: MotorDirection::Forward, duty: 512 })?;
//!
//! motor.disable()?; // brake, PWM held at zero
//! motor.drive(command)?; // ignored
//! motor.enable()?; // still braked at zero duty
//! motor.drive(command)?; // applied
//! ```

use dialdrive_core::traits::{MotorError, MotorOutput};
use dialdrive_core::{DutyCommand, MotorDirection};
use embedded_hal::digital::{OutputPin, PinState};
use embedded_hal::pwm::SetDutyCycle;

/// H-bridge motor driver
pub struct HBridgeMotor<F, R, S> {
    forward: F,
    reverse: R,
    speed: S,
    enabled: bool,
    /// Command currently on the outputs
    last: DutyCommand,
}

impl<F, R, S> HBridgeMotor<F, R, S>
where
    F: OutputPin,
    R: OutputPin,
    S: SetDutyCycle,
{
    /// Take the bridge lines and put the motor in a safe state
    ///
    /// Both direction lines go low and the duty goes to zero before this
    /// returns. Motor control starts enabled.
    pub fn new(forward: F, reverse: R, speed: S) -> Result<Self, MotorError> {
        let mut motor = Self {
            forward,
            reverse,
            speed,
            enabled: true,
            last: DutyCommand::BRAKE,
        };
        motor.write(DutyCommand::BRAKE)?;
        Ok(motor)
    }

    /// Command currently on the bridge lines
    pub fn last_command(&self) -> DutyCommand {
        self.last
    }

    /// Give the pins back
    pub fn release(self) -> (F, R, S) {
        (self.forward, self.reverse, self.speed)
    }

    fn write(&mut self, command: DutyCommand) -> Result<(), MotorError> {
        self.last = command;
        self.set_direction(command.direction)?;
        self.set_duty(command.duty)
    }

    fn set_direction(&mut self, direction: MotorDirection) -> Result<(), MotorError> {
        let (forward, reverse) = match direction {
            MotorDirection::Forward => (PinState::High, PinState::Low),
            MotorDirection::Reverse => (PinState::Low, PinState::High),
            MotorDirection::Brake => (PinState::Low, PinState::Low),
        };

        self.forward
            .set_state(forward)
            .map_err(|_| MotorError::DirectionPin)?;
        self.reverse
            .set_state(reverse)
            .map_err(|_| MotorError::DirectionPin)
    }

    fn set_duty(&mut self, duty: u16) -> Result<(), MotorError> {
        let duty = duty.min(DutyCommand::DUTY_MAX);
        self.speed
            .set_duty_cycle_fraction(duty, DutyCommand::DUTY_MAX)
            .map_err(|_| MotorError::SpeedOutput)
    }
}

impl<F, R, S> MotorOutput for HBridgeMotor<F, R, S>
where
    F: OutputPin,
    R: OutputPin,
    S: SetDutyCycle,
{
    fn drive(&mut self, command: DutyCommand) -> Result<(), MotorError> {
        if self.enabled {
            self.write(command)
        } else {
            Ok(())
        }
    }

    fn disable(&mut self) -> Result<(), MotorError> {
        self.enabled = false;
        self.last = DutyCommand::BRAKE;
        // Speed first so the bridge is never driven while directions change
        self.set_duty(0)?;
        self.set_direction(MotorDirection::Brake)
    }

    fn enable(&mut self) -> Result<(), MotorError> {
        self.enabled = true;
        self.write(DutyCommand::BRAKE)
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::{ErrorKind, ErrorType};

    /// Mock GPIO pin for testing
    struct MockPin {
        high: bool,
        writes: u32,
    }

    impl MockPin {
        fn new() -> Self {
            Self {
                high: true,
                writes: 0,
            }
        }
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            self.writes += 1;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            self.writes += 1;
            Ok(())
        }
    }

    /// Pin whose writes always fail
    struct BrokenPin;

    impl ErrorType for BrokenPin {
        type Error = ErrorKind;
    }

    impl OutputPin for BrokenPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            Err(ErrorKind::Other)
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            Err(ErrorKind::Other)
        }
    }

    /// Mock PWM channel
    struct MockPwm {
        duty: u16,
        max: u16,
    }

    impl MockPwm {
        fn new(max: u16) -> Self {
            Self { duty: max, max }
        }
    }

    impl embedded_hal::pwm::ErrorType for MockPwm {
        type Error = Infallible;
    }

    impl SetDutyCycle for MockPwm {
        fn max_duty_cycle(&self) -> u16 {
            self.max
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
            self.duty = duty;
            Ok(())
        }
    }

    type TestMotor = HBridgeMotor<MockPin, MockPin, MockPwm>;

    fn motor() -> TestMotor {
        HBridgeMotor::new(MockPin::new(), MockPin::new(), MockPwm::new(1023)).unwrap()
    }

    fn lines(motor: &TestMotor) -> (bool, bool, u16) {
        (motor.forward.high, motor.reverse.high, motor.speed.duty)
    }

    fn command(direction: MotorDirection, duty: u16) -> DutyCommand {
        DutyCommand { direction, duty }
    }

    #[test]
    fn test_power_on_is_braked() {
        let motor = motor();

        assert_eq!(lines(&motor), (false, false, 0));
        assert!(motor.is_enabled());
        assert_eq!(motor.last_command(), DutyCommand::BRAKE);
    }

    #[test]
    fn test_direction_lines() {
        let mut motor = motor();

        motor.drive(command(MotorDirection::Forward, 100)).unwrap();
        assert_eq!(lines(&motor), (true, false, 100));

        motor.drive(command(MotorDirection::Reverse, 1022)).unwrap();
        assert_eq!(lines(&motor), (false, true, 1022));

        motor.drive(DutyCommand::BRAKE).unwrap();
        assert_eq!(lines(&motor), (false, false, 0));
    }

    #[test]
    fn test_brake_rewrites_outputs() {
        let mut motor = motor();
        let writes = motor.forward.writes;

        motor.drive(DutyCommand::BRAKE).unwrap();
        motor.drive(DutyCommand::BRAKE).unwrap();

        assert_eq!(motor.forward.writes, writes + 2);
    }

    #[test]
    fn test_duty_rescaled_to_channel_resolution() {
        let mut motor =
            HBridgeMotor::new(MockPin::new(), MockPin::new(), MockPwm::new(4095)).unwrap();

        motor.drive(command(MotorDirection::Forward, 1023)).unwrap();
        assert_eq!(motor.speed.duty, 4095);

        motor.drive(command(MotorDirection::Forward, 1022)).unwrap();
        assert_eq!(motor.speed.duty, 4090);

        // Out-of-range duty is clamped
        motor.drive(command(MotorDirection::Forward, 5000)).unwrap();
        assert_eq!(motor.speed.duty, 4095);
    }

    #[test]
    fn test_disable_brakes_and_ignores_commands() {
        let mut motor = motor();
        motor.drive(command(MotorDirection::Forward, 800)).unwrap();

        motor.disable().unwrap();
        assert!(!motor.is_enabled());
        assert_eq!(lines(&motor), (false, false, 0));

        motor.drive(command(MotorDirection::Reverse, 300)).unwrap();
        assert_eq!(lines(&motor), (false, false, 0));
        assert_eq!(motor.last_command(), DutyCommand::BRAKE);
    }

    #[test]
    fn test_enable_reconnects_at_zero_duty() {
        let mut motor = motor();
        motor.drive(command(MotorDirection::Forward, 1022)).unwrap();

        motor.disable().unwrap();
        motor.drive(command(MotorDirection::Forward, 640)).unwrap();
        motor.enable().unwrap();

        // Neither the command from before the disable nor the one sent
        // while disabled comes back
        assert!(motor.is_enabled());
        assert_eq!(lines(&motor), (false, false, 0));
        assert_eq!(motor.last_command(), DutyCommand::BRAKE);

        motor.drive(command(MotorDirection::Reverse, 200)).unwrap();
        assert_eq!(lines(&motor), (false, true, 200));
    }

    #[test]
    fn test_direction_pin_error() {
        let result = HBridgeMotor::new(BrokenPin, MockPin::new(), MockPwm::new(1023));
        assert!(matches!(result, Err(MotorError::DirectionPin)));
    }

    #[test]
    fn test_motor_trait() {
        let mut motor = motor();

        fn check_motor<M: MotorOutput>(m: &mut M) {
            assert!(m.is_enabled());
            m.disable().unwrap();
            assert!(!m.is_enabled());
        }

        check_motor(&mut motor);
    }
}
