//! One-shot ADC on the potentiometer channel
//!
//! RP2040 has a single ADC with 5 channels:
//! - ADC0: GPIO26
//! - ADC1: GPIO27
//! - ADC2: GPIO28
//! - ADC3: GPIO29
//!
//! embassy-rp powers the converter and configures the pad (digital input
//! off, no pulls). Conversions are then started and polled directly on
//! the `CS` register so the control loop can spin on the busy flag itself.
//! The converter runs from the 48 MHz ADC clock, 96 cycles per sample.

use dialdrive_hal::OneShotAdc;
use embassy_rp::adc::{Adc, Blocking, Channel};
use embassy_rp::pac;

/// ADC channel identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcChannel {
    /// ADC0 on GPIO26
    Adc0,
    /// ADC1 on GPIO27
    Adc1,
    /// ADC2 on GPIO28
    Adc2,
    /// ADC3 on GPIO29
    Adc3,
}

impl AdcChannel {
    /// Get ADC channel from GPIO pin
    pub fn from_gpio(gpio: u8) -> Option<Self> {
        match gpio {
            26 => Some(AdcChannel::Adc0),
            27 => Some(AdcChannel::Adc1),
            28 => Some(AdcChannel::Adc2),
            29 => Some(AdcChannel::Adc3),
            _ => None,
        }
    }

    /// Value for the `CS.AINSEL` field
    pub fn ainsel(&self) -> u8 {
        *self as u8
    }
}

/// Potentiometer input as a [`OneShotAdc`]
pub struct PotentiometerAdc<'d> {
    _adc: Adc<'d, Blocking>,
    _channel: Channel<'d>,
    channel: AdcChannel,
}

impl<'d> PotentiometerAdc<'d> {
    /// Wrap an enabled converter and the pin channel it samples
    ///
    /// `gpio` must be the pin `channel` was created from.
    pub fn new(adc: Adc<'d, Blocking>, channel: Channel<'d>, gpio: u8) -> Option<Self> {
        let index = AdcChannel::from_gpio(gpio)?;
        Some(Self {
            _adc: adc,
            _channel: channel,
            channel: index,
        })
    }
}

impl OneShotAdc for PotentiometerAdc<'_> {
    const RESOLUTION_BITS: u8 = 12;

    fn start_conversion(&mut self) {
        let ainsel = self.channel.ainsel();
        pac::ADC.cs().modify(|w| {
            w.set_ainsel(ainsel);
            w.set_start_once(true);
            w.set_err_sticky(true);
        });
    }

    fn is_converting(&mut self) -> bool {
        !pac::ADC.cs().read().ready()
    }

    fn read_result(&mut self) -> u16 {
        pac::ADC.result().read().result()
    }
}
