//! Simulated hardware for unit tests

#![allow(dead_code)] // Not every test module uses every simulated peripheral

use core::cell::{Cell, RefCell};

use dialdrive_hal::{CompareTimer, EdgeInterruptGate, OneShotAdc};

use crate::mapping::DutyCommand;
use crate::state::{ControllerState, SharedState};
use crate::traits::{DisplayError, MotorError, MotorOutput, SegmentDisplay, SegmentPattern};

const SIM_CLOCK_HZ: u32 = 1_000_000;
const SIM_PRESCALERS: [u32; 2] = [1, 1_000];
const SIM_MAX_THRESHOLD: u32 = 65_535;

/// Everything the simulated outputs did, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trace {
    Drive(DutyCommand),
    DriveWhileDisabled(DutyCommand),
    /// Bridge lines changed, with the button state at that moment
    Output {
        command: DutyCommand,
        state: ControllerState,
        at_us: u64,
    },
    MotorDisabled,
    MotorEnabled,
    Show { pattern: SegmentPattern, at_us: u64 },
    Masked,
    Unmasked,
}

/// Shared clock and output log
pub struct Bench {
    pub clock_us: Cell<u64>,
    pub log: RefCell<heapless::Vec<Trace, 256>>,
}

impl Bench {
    pub fn new() -> Self {
        Self {
            clock_us: Cell::new(0),
            log: RefCell::new(heapless::Vec::new()),
        }
    }

    pub fn record(&self, trace: Trace) {
        self.log.borrow_mut().push(trace).expect("trace log full");
    }

    pub fn traces(&self) -> heapless::Vec<Trace, 256> {
        self.log.borrow().clone()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }
}

/// Counter that advances one prescaled tick per flag poll
pub struct SimTimer<'a> {
    clock: Option<&'a Cell<u64>>,
    elapsed_us: u64,
    running: bool,
    matched: bool,
    count: u32,
    prescaler: u32,
    threshold: u32,
    starts: u32,
    stops: u32,
    restarts: u32,
    last_plan: Option<(u32, u32)>,
}

impl SimTimer<'static> {
    pub fn new() -> Self {
        Self::with_clock(None)
    }
}

impl<'a> SimTimer<'a> {
    pub fn on(bench: &'a Bench) -> Self {
        Self::with_clock(Some(&bench.clock_us))
    }

    fn with_clock(clock: Option<&'a Cell<u64>>) -> Self {
        Self {
            clock,
            elapsed_us: 0,
            running: false,
            matched: false,
            count: 0,
            prescaler: 1,
            threshold: 0,
            starts: 0,
            stops: 0,
            restarts: 0,
            last_plan: None,
        }
    }

    pub fn elapsed_micros(&self) -> u64 {
        self.elapsed_us
    }

    pub fn starts(&self) -> u32 {
        self.starts
    }

    pub fn stops(&self) -> u32 {
        self.stops
    }

    pub fn restarts(&self) -> u32 {
        self.restarts
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn flag(&self) -> bool {
        self.matched
    }

    pub fn last_plan(&self) -> Option<(u32, u32)> {
        self.last_plan
    }
}

impl CompareTimer for SimTimer<'_> {
    fn clock_hz(&self) -> u32 {
        SIM_CLOCK_HZ
    }

    fn prescalers(&self) -> &[u32] {
        &SIM_PRESCALERS
    }

    fn max_threshold(&self) -> u32 {
        SIM_MAX_THRESHOLD
    }

    fn start(&mut self, prescaler: u32, threshold: u32) {
        self.prescaler = prescaler;
        self.threshold = threshold;
        self.count = 0;
        self.running = true;
        self.starts += 1;
        self.last_plan = Some((prescaler, threshold));
    }

    fn restart(&mut self) {
        self.count = 0;
        self.restarts += 1;
    }

    fn is_matched(&mut self) -> bool {
        if self.running && !self.matched {
            self.count += 1;
            let step = self.prescaler as u64 * 1_000_000 / SIM_CLOCK_HZ as u64;
            self.elapsed_us += step;
            if let Some(clock) = self.clock {
                clock.set(clock.get() + step);
            }
            if self.count >= self.threshold {
                self.matched = true;
                self.count = 0;
            }
        }
        self.matched
    }

    fn clear_match(&mut self) {
        self.matched = false;
    }

    fn stop(&mut self) {
        self.running = false;
        self.stops += 1;
    }
}

/// Converter returning queued readings, repeating the last one
pub struct SimAdc<const BITS: u8> {
    readings: heapless::Deque<u16, 32>,
    last: u16,
    busy_polls: u8,
    remaining: u8,
    pub conversions: u32,
}

impl<const BITS: u8> SimAdc<BITS> {
    pub fn new(readings: &[u16]) -> Self {
        let mut queue = heapless::Deque::new();
        for &r in readings {
            queue.push_back(r).expect("too many readings");
        }
        Self {
            readings: queue,
            last: 0,
            busy_polls: 3,
            remaining: 0,
            conversions: 0,
        }
    }

    pub fn push(&mut self, reading: u16) {
        self.readings.push_back(reading).expect("too many readings");
    }
}

impl<const BITS: u8> OneShotAdc for SimAdc<BITS> {
    const RESOLUTION_BITS: u8 = BITS;

    fn start_conversion(&mut self) {
        self.remaining = self.busy_polls;
        self.conversions += 1;
        if let Some(next) = self.readings.pop_front() {
            self.last = next;
        }
    }

    fn is_converting(&mut self) -> bool {
        if self.remaining > 0 {
            self.remaining -= 1;
            true
        } else {
            false
        }
    }

    fn read_result(&mut self) -> u16 {
        self.last
    }
}

/// Motor output that logs every call
pub struct RecordingMotor<'a> {
    bench: &'a Bench,
    enabled: bool,
    pub fail_disable: bool,
}

impl<'a> RecordingMotor<'a> {
    pub fn new(bench: &'a Bench) -> Self {
        Self {
            bench,
            enabled: true,
            fail_disable: false,
        }
    }
}

impl MotorOutput for RecordingMotor<'_> {
    fn drive(&mut self, command: DutyCommand) -> Result<(), MotorError> {
        if self.enabled {
            self.bench.record(Trace::Drive(command));
        } else {
            self.bench.record(Trace::DriveWhileDisabled(command));
        }
        Ok(())
    }

    fn disable(&mut self) -> Result<(), MotorError> {
        if self.fail_disable {
            return Err(MotorError::SpeedOutput);
        }
        self.enabled = false;
        self.bench.record(Trace::MotorDisabled);
        Ok(())
    }

    fn enable(&mut self) -> Result<(), MotorError> {
        self.enabled = true;
        self.bench.record(Trace::MotorEnabled);
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Motor that behaves like the H-bridge driver and logs every change of
/// its outputs together with the shared button state
pub struct BridgeMotor<'a> {
    bench: &'a Bench,
    state: &'a SharedState,
    enabled: bool,
}

impl<'a> BridgeMotor<'a> {
    pub fn new(bench: &'a Bench, state: &'a SharedState) -> Self {
        Self {
            bench,
            state,
            enabled: true,
        }
    }

    fn output(&self, command: DutyCommand) {
        self.bench.record(Trace::Output {
            command,
            state: self.state.load(),
            at_us: self.bench.clock_us.get(),
        });
    }
}

impl MotorOutput for BridgeMotor<'_> {
    fn drive(&mut self, command: DutyCommand) -> Result<(), MotorError> {
        if self.enabled {
            self.output(command);
        }
        Ok(())
    }

    fn disable(&mut self) -> Result<(), MotorError> {
        self.enabled = false;
        self.output(DutyCommand::BRAKE);
        Ok(())
    }

    fn enable(&mut self) -> Result<(), MotorError> {
        self.enabled = true;
        self.output(DutyCommand::BRAKE);
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Display that logs every pattern with the simulated time it was shown
pub struct RecordingDisplay<'a> {
    bench: &'a Bench,
    pub fail_after: Option<usize>,
    shown: usize,
}

impl<'a> RecordingDisplay<'a> {
    pub fn new(bench: &'a Bench) -> Self {
        Self {
            bench,
            fail_after: None,
            shown: 0,
        }
    }
}

impl SegmentDisplay for RecordingDisplay<'_> {
    fn show(&mut self, pattern: SegmentPattern) -> Result<(), DisplayError> {
        if self.fail_after.is_some_and(|limit| self.shown >= limit) {
            return Err(DisplayError::SegmentPin);
        }
        self.shown += 1;
        self.bench.record(Trace::Show {
            pattern,
            at_us: self.bench.clock_us.get(),
        });
        Ok(())
    }
}

/// Interrupt gate that logs mask changes
pub struct RecordingGate<'a> {
    bench: &'a Bench,
    masked: bool,
}

impl<'a> RecordingGate<'a> {
    pub fn new(bench: &'a Bench) -> Self {
        Self {
            bench,
            masked: false,
        }
    }
}

impl EdgeInterruptGate for RecordingGate<'_> {
    fn mask(&mut self) {
        self.masked = true;
        self.bench.record(Trace::Masked);
    }

    fn unmask(&mut self) {
        self.masked = false;
        self.bench.record(Trace::Unmasked);
    }

    fn is_masked(&self) -> bool {
        self.masked
    }
}
