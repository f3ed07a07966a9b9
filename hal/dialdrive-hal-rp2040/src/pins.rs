//! Board pin map
//!
//! | GPIO  | function                          |
//! |-------|-----------------------------------|
//! | 2     | H-bridge forward line (L293D IN2) |
//! | 3     | H-bridge reverse line (L293D IN1) |
//! | 4     | H-bridge enable, PWM2 A           |
//! | 6-13  | display segments `a`-`g`, `dp`    |
//! | 14    | button, pulled up, any edge       |
//! | 26    | potentiometer wiper, ADC0         |

use embassy_rp::gpio::AnyPin;
use embassy_rp::peripherals::{ADC, PIN_26, PIN_4, PWM_SLICE2};
use embassy_rp::{Peri, Peripherals};

pub const MOTOR_FORWARD_GPIO: u8 = 2;
pub const MOTOR_REVERSE_GPIO: u8 = 3;
pub const MOTOR_ENABLE_GPIO: u8 = 4;
/// First segment line; segments occupy eight consecutive pins
pub const SEGMENT_BASE_GPIO: u8 = 6;
pub const BUTTON_GPIO: u8 = 14;
pub const POTENTIOMETER_GPIO: u8 = 26;

/// PWM slice that drives `gpio`
pub const fn pwm_slice(gpio: u8) -> u8 {
    (gpio / 2) % 8
}

/// Peripherals wired to the controller, taken out of [`Peripherals`]
pub struct Board {
    pub adc: Peri<'static, ADC>,
    pub potentiometer: Peri<'static, PIN_26>,
    pub motor_pwm_slice: Peri<'static, PWM_SLICE2>,
    pub motor_enable: Peri<'static, PIN_4>,
    pub motor_forward: Peri<'static, AnyPin>,
    pub motor_reverse: Peri<'static, AnyPin>,
    pub button: Peri<'static, AnyPin>,
    /// Segment lines, `a` first
    pub segments: [Peri<'static, AnyPin>; 8],
}

impl Board {
    /// Split the peripherals into the board's functions
    pub fn split(p: Peripherals) -> Self {
        Self {
            adc: p.ADC,
            potentiometer: p.PIN_26,
            motor_pwm_slice: p.PWM_SLICE2,
            motor_enable: p.PIN_4,
            motor_forward: p.PIN_2.into(),
            motor_reverse: p.PIN_3.into(),
            button: p.PIN_14.into(),
            segments: [
                p.PIN_6.into(),
                p.PIN_7.into(),
                p.PIN_8.into(),
                p.PIN_9.into(),
                p.PIN_10.into(),
                p.PIN_11.into(),
                p.PIN_12.into(),
                p.PIN_13.into(),
            ],
        }
    }
}
