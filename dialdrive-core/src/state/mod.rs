//! Button state machine
//!
//! Decides whether the potentiometer drives the motor or the countdown
//! runs. The machine is a fixed four-state cycle; anything out of
//! sequence is ignored.

pub mod events;
pub mod machine;
pub mod shared;

pub use events::Event;
pub use machine::ControllerState;
pub use shared::SharedState;
