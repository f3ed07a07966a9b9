//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the output traits
//! defined in dialdrive-core on top of `embedded-hal` 1.0 pins and PWM
//! channels:
//!
//! - Motor drivers (L293D-style H-bridge)
//! - Displays (parallel seven-segment)

#![no_std]
#![deny(unsafe_code)]

pub mod display;
pub mod motor;
