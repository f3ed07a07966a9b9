//! H-bridge enable PWM
//!
//! The enable line runs from one PWM slice output with a 10-bit top, so a
//! duty of 1023 holds the line fully on. With the default 125 MHz system
//! clock and a divider of 8 the carrier sits near 15.3 kHz.

use embassy_rp::pwm::Config as PwmConfig;

/// Counter top; the slice counts `0..=MOTOR_PWM_TOP`
pub const MOTOR_PWM_TOP: u16 = 1023;

/// Integer clock divider applied to `clk_sys`
pub const MOTOR_PWM_DIVIDER: u8 = 8;

/// Slice configuration for the enable line, starting at zero duty
pub fn motor_pwm_config() -> PwmConfig {
    let mut config = PwmConfig::default();
    config.top = MOTOR_PWM_TOP;
    config.divider = MOTOR_PWM_DIVIDER.into();
    config.compare_a = 0;
    config.compare_b = 0;
    config
}

/// Carrier frequency for a given system clock
pub const fn carrier_hz(clk_sys_hz: u32) -> u32 {
    clk_sys_hz / (MOTOR_PWM_DIVIDER as u32 * (MOTOR_PWM_TOP as u32 + 1))
}
