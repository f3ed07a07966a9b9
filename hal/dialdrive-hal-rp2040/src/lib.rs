//! RP2040-specific HAL for the dialdrive motor controller
//!
//! This crate provides RP2040 implementations of the `dialdrive-hal`
//! traits, plus the board wiring:
//!
//! - SysTick compare counter (`CompareTimer`)
//! - One-shot ADC on the potentiometer channel (`OneShotAdc`)
//! - Button interrupt gate (`EdgeInterruptGate`)
//! - 10-bit PWM for the H-bridge enable line
//! - Board pin map

#![no_std]

pub mod adc;
pub mod irq;
pub mod pins;
pub mod pwm;
pub mod systick;

pub use adc::PotentiometerAdc;
pub use irq::ButtonGate;
pub use pins::Board;
pub use systick::SysTickTimer;
