//! Control loop
//!
//! One [`Controller::step`] is one pass of the main loop:
//!
//! 1. Look at the shared button state and handle it:
//!    - `Pressed`: acknowledge the press and settle for a short interval
//!    - `CooldownActive`: mask the button interrupt, switch motor control
//!      off, run the countdown, return to `Idle`, switch motor control back
//!      on at zero duty, unmask and settle
//!    - anything else: nothing
//! 2. Sample the potentiometer and drive the motor from it.
//!
//! Step 2 runs on every pass whatever the state was. After a countdown it
//! is the first thing to move the motor again, from a fresh reading.

use dialdrive_hal::{CompareTimer, EdgeInterruptGate, OneShotAdc};

use crate::config::ControlConfig;
use crate::countdown::CountdownSequencer;
use crate::mapping::{DutyCommand, DutyCycleMapper};
use crate::sampler::{AnalogMagnitude, AnalogSampler};
use crate::state::{ControllerState, SharedState};
use crate::timing::{Interval, TimingService};
use crate::traits::{DisplayError, MotorError, MotorOutput, SegmentDisplay};

/// Errors reported by a control loop pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlError {
    /// Motor driver output failed
    Motor(MotorError),
    /// Display output failed during the countdown
    Display(DisplayError),
}

impl From<MotorError> for ControlError {
    fn from(e: MotorError) -> Self {
        ControlError::Motor(e)
    }
}

impl From<DisplayError> for ControlError {
    fn from(e: DisplayError) -> Self {
        ControlError::Display(e)
    }
}

/// What a successful pass saw and did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepReport {
    /// Button state at the start of the pass
    pub observed: ControllerState,
    /// Potentiometer reading taken this pass
    pub magnitude: AnalogMagnitude,
    /// Command written to the motor driver
    pub command: DutyCommand,
}

/// The main loop and everything it owns
pub struct Controller<T, A, M, D, G> {
    timing: TimingService<T>,
    sampler: AnalogSampler<A>,
    mapper: DutyCycleMapper,
    countdown: CountdownSequencer,
    motor: M,
    display: D,
    gate: G,
    press_settle: Interval,
    cooldown_settle: Interval,
}

impl<T, A, M, D, G> Controller<T, A, M, D, G>
where
    T: CompareTimer,
    A: OneShotAdc,
    M: MotorOutput,
    D: SegmentDisplay,
    G: EdgeInterruptGate,
{
    /// Assemble a controller from already-initialized parts
    pub fn new(
        config: &ControlConfig,
        timing: TimingService<T>,
        sampler: AnalogSampler<A>,
        motor: M,
        display: D,
        gate: G,
    ) -> Self {
        Self {
            timing,
            sampler,
            mapper: DutyCycleMapper::from_config(config),
            countdown: CountdownSequencer::from_config(config),
            motor,
            display,
            gate,
            press_settle: config.press_settle,
            cooldown_settle: config.cooldown_settle,
        }
    }

    /// Run one pass of the main loop
    ///
    /// An error from the countdown is reported only after motor control,
    /// the button state and the interrupt gate have all been restored and
    /// the motor has been driven for this pass. If motor control cannot be
    /// switched off the countdown does not start; the state stays
    /// `CooldownActive` and the next pass tries again.
    pub fn step(&mut self, state: &SharedState) -> Result<StepReport, ControlError> {
        let observed = state.load();

        let deferred = match observed {
            ControllerState::Pressed => {
                state.acknowledge_press();
                self.timing.wait(self.press_settle);
                Ok(())
            }
            ControllerState::CooldownActive => {
                self.gate.mask();
                if let Err(e) = self.motor.disable() {
                    self.gate.unmask();
                    return Err(e.into());
                }
                self.countdown_and_restore(state)
            }
            ControllerState::Idle | ControllerState::Released => Ok(()),
        };

        let magnitude = self.sampler.sample();
        let command = self.mapper.apply(magnitude, &mut self.motor)?;
        deferred?;

        Ok(StepReport {
            observed,
            magnitude,
            command,
        })
    }

    /// Run [`step`](Self::step) forever, handing each result to `on_step`
    pub fn run<F>(&mut self, state: &SharedState, mut on_step: F) -> !
    where
        F: FnMut(Result<StepReport, ControlError>),
    {
        loop {
            let result = self.step(state);
            on_step(result);
        }
    }

    /// Countdown with motor control off, then hand control back
    fn countdown_and_restore(&mut self, state: &SharedState) -> Result<(), ControlError> {
        let shown = self.countdown.run(&mut self.display, &mut self.timing);

        state.finish_cooldown();
        let restored = self.motor.enable();
        self.gate.unmask();
        self.timing.wait(self.cooldown_settle);

        restored?;
        shown?;
        Ok(())
    }

    pub fn timing(&self) -> &TimingService<T> {
        &self.timing
    }

    pub fn motor(&self) -> &M {
        &self.motor
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn gate(&self) -> &G {
        &self.gate
    }

    pub fn mapper(&self) -> &DutyCycleMapper {
        &self.mapper
    }
}
