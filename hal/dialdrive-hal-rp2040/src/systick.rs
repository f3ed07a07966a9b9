//! SysTick compare counter
//!
//! The Cortex-M0+ SysTick is a 24-bit down-counter with a wrap flag. It
//! can be clocked from the core clock or from the 1 MHz watchdog tick
//! that embassy-rp sets up for the system timer, which gives two
//! prescale choices:
//!
//! | prescaler              | source     | tick at 125 MHz |
//! |------------------------|------------|-----------------|
//! | 1                      | core clock | 8 ns            |
//! | `clk_sys / 1 MHz`      | tick       | 1 µs            |
//!
//! `COUNTFLAG` clears when read, so a wrap is latched in software until
//! `clear_match`.

use cortex_m::peripheral::syst::SystClkSource;
use cortex_m::peripheral::SYST;
use dialdrive_hal::CompareTimer;

/// Frequency of the reference tick fed to SysTick's external source
pub const REFERENCE_TICK_HZ: u32 = 1_000_000;

/// Largest reload value SysTick can hold
pub const MAX_RELOAD: u32 = 0x00FF_FFFF;

/// Prescale divisors for a given core clock, finest first
pub const fn prescalers_for(clock_hz: u32) -> [u32; 2] {
    let reference = clock_hz / REFERENCE_TICK_HZ;
    if reference > 1 {
        [1, reference]
    } else {
        [1, 1]
    }
}

/// SysTick driven as a [`CompareTimer`]
pub struct SysTickTimer {
    syst: SYST,
    clock_hz: u32,
    prescalers: [u32; 2],
    matched: bool,
}

impl SysTickTimer {
    /// Take SysTick, stopped and with its interrupt off
    pub fn new(mut syst: SYST, clock_hz: u32) -> Self {
        syst.disable_interrupt();
        syst.disable_counter();
        syst.clear_current();

        Self {
            syst,
            clock_hz,
            prescalers: prescalers_for(clock_hz),
            matched: false,
        }
    }

    /// Give SysTick back
    pub fn release(self) -> SYST {
        self.syst
    }
}

impl CompareTimer for SysTickTimer {
    fn clock_hz(&self) -> u32 {
        self.clock_hz
    }

    fn prescalers(&self) -> &[u32] {
        &self.prescalers
    }

    fn max_threshold(&self) -> u32 {
        MAX_RELOAD + 1
    }

    fn start(&mut self, prescaler: u32, threshold: u32) {
        let source = if prescaler <= 1 {
            SystClkSource::Core
        } else {
            SystClkSource::External
        };

        self.syst.disable_counter();
        self.syst.set_clock_source(source);
        self.syst.set_reload(threshold.clamp(1, MAX_RELOAD + 1) - 1);
        self.syst.clear_current();
        self.matched = false;
        self.syst.enable_counter();
    }

    fn restart(&mut self) {
        self.syst.clear_current();
    }

    fn is_matched(&mut self) -> bool {
        if self.syst.has_wrapped() {
            self.matched = true;
        }
        self.matched
    }

    fn clear_match(&mut self) {
        self.matched = false;
    }

    fn stop(&mut self) {
        self.syst.disable_counter();
    }
}
