//! Output traits
//!
//! These traits define the interface between the control loop and the
//! motor driver and display implementations in `dialdrive-drivers`.

pub mod display;
pub mod motor;

pub use display::{DisplayError, SegmentDisplay, SegmentPattern};
pub use motor::{MotorError, MotorOutput};
