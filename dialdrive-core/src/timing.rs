//! Busy-wait timing service
//!
//! Blocking delays built on a [`CompareTimer`]. Every wait programs the
//! counter, spins on the compare-match flag, then clears the flag and
//! switches the counter off again, so consecutive waits never see each
//! other's state.
//!
//! There is no timeout and no cancellation: a wait always runs to
//! completion.

use core::time::Duration;

use dialdrive_hal::CompareTimer;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Named fixed-length delays used by the control loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Interval {
    /// 1 µs
    Microsecond,
    /// 1 ms
    Millisecond,
    /// 10 ms, run as ten back-to-back 1 ms waits
    TenMilliseconds,
    /// 1 s
    OneSecond,
}

impl Interval {
    /// Total length of the interval
    pub const fn duration(self) -> Duration {
        match self {
            Interval::Microsecond => Duration::from_micros(1),
            Interval::Millisecond => Duration::from_millis(1),
            Interval::TenMilliseconds => Duration::from_millis(10),
            Interval::OneSecond => Duration::from_secs(1),
        }
    }

    /// Counter period and number of periods this interval is made of
    pub const fn composition(self) -> (Duration, u32) {
        match self {
            Interval::TenMilliseconds => (Interval::Millisecond.duration(), 10),
            other => (other.duration(), 1),
        }
    }
}

/// Counter configuration for one blocking wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerPlan {
    /// Prescale divisor applied to the counter clock
    pub prescaler: u32,
    /// Compare threshold in prescaled ticks
    pub threshold: u32,
    /// Number of compare matches to wait for
    pub repeats: u32,
}

impl TimerPlan {
    /// Pick the finest prescaler whose threshold fits in the counter
    ///
    /// `threshold = round(micros × clock_hz / (prescaler × 10⁶))`.
    /// When no single configuration fits, the coarsest prescaler is used
    /// and the wait is split into equal repeats.
    pub fn for_micros(micros: u64, clock_hz: u32, prescalers: &[u32], max_threshold: u32) -> Self {
        if micros == 0 || max_threshold == 0 {
            return Self {
                prescaler: 1,
                threshold: 0,
                repeats: 0,
            };
        }

        let ticks_at = |prescaler: u32| -> u64 {
            let divisor = prescaler.max(1) as u128 * 1_000_000;
            let ticks = (micros as u128 * clock_hz as u128 + divisor / 2) / divisor;
            ticks.min(u64::MAX as u128) as u64
        };

        for &prescaler in prescalers {
            let ticks = ticks_at(prescaler);
            if ticks >= 1 && ticks <= max_threshold as u64 {
                return Self {
                    prescaler,
                    threshold: ticks as u32,
                    repeats: 1,
                };
            }
        }

        let prescaler = prescalers.last().copied().unwrap_or(1);
        let ticks = ticks_at(prescaler).max(1);
        let max = max_threshold as u64;
        let repeats = ticks.div_ceil(max);
        let threshold = ((ticks as u128 + repeats as u128 / 2) / repeats as u128) as u64;
        let threshold = threshold.clamp(1, max);

        Self {
            prescaler,
            threshold: threshold as u32,
            repeats: repeats.min(u32::MAX as u64) as u32,
        }
    }
}

/// Blocking delays on a compare-match counter
pub struct TimingService<T> {
    timer: T,
}

impl<T: CompareTimer> TimingService<T> {
    /// Take ownership of the counter and make sure it starts switched off
    pub fn new(mut timer: T) -> Self {
        timer.stop();
        timer.clear_match();
        Self { timer }
    }

    /// Block for one of the named intervals
    pub fn wait(&mut self, interval: Interval) {
        let (period, count) = interval.composition();
        self.block_repeated(period, count);
    }

    /// Block for an arbitrary duration
    pub fn block_for(&mut self, duration: Duration) {
        self.block_repeated(duration, 1);
    }

    /// Counter configuration used for a single period of `duration`
    pub fn plan(&self, duration: Duration) -> TimerPlan {
        let micros = duration.as_micros().min(u64::MAX as u128) as u64;
        TimerPlan::for_micros(
            micros,
            self.timer.clock_hz(),
            self.timer.prescalers(),
            self.timer.max_threshold(),
        )
    }

    /// Borrow the underlying counter
    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Give the counter back
    pub fn release(self) -> T {
        self.timer
    }

    fn block_repeated(&mut self, period: Duration, count: u32) {
        let plan = self.plan(period);
        let matches = plan.repeats.saturating_mul(count);
        if matches == 0 {
            return;
        }

        self.timer.start(plan.prescaler, plan.threshold);
        for _ in 0..matches {
            while !self.timer.is_matched() {
                core::hint::spin_loop();
            }
            self.timer.clear_match();
            self.timer.restart();
        }
        self.timer.stop();
        self.timer.clear_match();
    }
}
