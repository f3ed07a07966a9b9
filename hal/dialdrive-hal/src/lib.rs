//! dialdrive Hardware Abstraction Layer
//!
//! This crate defines the peripheral traits the control loop needs beyond
//! what `embedded-hal` already covers. Digital pins and PWM outputs use the
//! `embedded-hal` traits directly; the pieces here are the ones with
//! busy-wait or interrupt-masking semantics that `embedded-hal` does not model.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  dialdrive-firmware                     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  dialdrive-core (control loop)          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  dialdrive-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ dialdrive-hal-│
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`timer::CompareTimer`] - Prescaled counter with a compare-match flag
//! - [`adc::OneShotAdc`] - Single-channel, software-triggered converter
//! - [`irq::EdgeInterruptGate`] - Mask/unmask for the button interrupt source

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod irq;
pub mod timer;

pub use adc::OneShotAdc;
pub use irq::EdgeInterruptGate;
pub use timer::CompareTimer;
