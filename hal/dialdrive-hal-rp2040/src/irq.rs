//! Button interrupt gate
//!
//! Button edges reach the firmware through the `IO_IRQ_BANK0` handler that
//! embassy-rp installs. Masking that line at the NVIC holds edges off;
//! before it is unmasked again the pin's edge latch and any pending NVIC
//! request are cleared, so an edge that happened while masked is dropped
//! instead of being delivered late.

use dialdrive_hal::EdgeInterruptGate;
use embassy_rp::interrupt::{self, InterruptExt};
use embassy_rp::pac;

/// Mask control for the button's GPIO bank interrupt
pub struct ButtonGate {
    gpio: u8,
}

impl ButtonGate {
    /// Gate for the button on `gpio`
    ///
    /// The pin must already be configured as an input; no other pin may
    /// rely on GPIO interrupts while the gate is in use.
    pub fn new(gpio: u8) -> Self {
        Self { gpio }
    }

    fn clear_edge_latch(&self) {
        let pin = self.gpio as usize;
        pac::IO_BANK0.intr(pin / 8).write(|w| {
            w.set_edge_high(pin % 8, true);
            w.set_edge_low(pin % 8, true);
        });
    }
}

impl EdgeInterruptGate for ButtonGate {
    fn mask(&mut self) {
        interrupt::IO_IRQ_BANK0.disable();
    }

    fn unmask(&mut self) {
        self.clear_edge_latch();
        interrupt::IO_IRQ_BANK0.unpend();
        // SAFETY: the handler is the one embassy-rp bound at init and only
        // touches GPIO wakers.
        unsafe { interrupt::IO_IRQ_BANK0.enable() };
    }

    fn is_masked(&self) -> bool {
        !interrupt::IO_IRQ_BANK0.is_enabled()
    }
}
