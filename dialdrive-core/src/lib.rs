//! Board-agnostic core logic for the dialdrive motor controller
//!
//! This crate contains the real-time control loop and everything it is
//! built from, independent of any particular chip:
//!
//! - Busy-wait timing on a compare-match counter
//! - Blocking analog sampling
//! - Potentiometer to direction/duty mapping
//! - Button state machine shared with the interrupt handler
//! - Seven-segment countdown sequencing
//! - Output traits for the motor driver and the display
//! - Control configuration

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod countdown;
pub mod mapping;
pub mod sampler;
pub mod state;
pub mod timing;
pub mod traits;

#[cfg(test)]
mod test_support;

pub use controller::{ControlError, Controller, StepReport};
pub use mapping::{DutyCommand, DutyCycleMapper, MotorDirection};
pub use sampler::{AnalogMagnitude, AnalogSampler};
pub use state::{ControllerState, Event, SharedState};
pub use timing::{Interval, TimingService};
