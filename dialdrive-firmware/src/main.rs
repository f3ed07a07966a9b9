//! dialdrive - potentiometer motor controller firmware
//!
//! A potentiometer sets the speed and direction of a DC motor behind an
//! H-bridge. Pressing and releasing the button suspends motor control and
//! counts down from 9 on a seven-segment display.
//!
//! The control loop runs in thread mode and blocks with busy-waits. Button
//! edges are handled by a task on a high-priority interrupt executor, which
//! only ever moves the shared state along.

#![no_std]
#![no_main]

use cortex_m_rt::entry;
use defmt::*;
use embassy_executor::InterruptExecutor;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::pwm::Pwm;
use {defmt_rtt as _, panic_probe as _};

use dialdrive_core::{AnalogSampler, Controller, ControllerState, SharedState, TimingService};
use dialdrive_drivers::display::ParallelSegmentDisplay;
use dialdrive_drivers::motor::HBridgeMotor;
use dialdrive_hal_rp2040::pins::{self, Board};
use dialdrive_hal_rp2040::{pwm, ButtonGate, PotentiometerAdc, SysTickTimer};

mod button;
mod config;

/// Button state, written by the button task and the control loop
static STATE: SharedState = SharedState::new();

/// Executor for the button task
static EXECUTOR_BUTTON: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_BUTTON.on_interrupt()
}

/// Main entry point
#[entry]
fn main() -> ! {
    info!("dialdrive firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    let core = unwrap!(cortex_m::Peripherals::take());
    let board = Board::split(p);
    let clk_sys = embassy_rp::clocks::clk_sys_freq();
    info!("Peripherals initialized, clk_sys={} Hz", clk_sys);

    let control = config::load();

    // Timing
    let timing = TimingService::new(SysTickTimer::new(core.SYST, clk_sys));
    info!("SysTick timing initialized");

    // Sampler (potentiometer on ADC0, floating input)
    let adc = Adc::new_blocking(board.adc, AdcConfig::default());
    let channel = Channel::new_pin(board.potentiometer, Pull::None);
    let adc = unwrap!(PotentiometerAdc::new(adc, channel, pins::POTENTIOMETER_GPIO));
    let sampler = AnalogSampler::new(adc);
    info!("Potentiometer sampler initialized");

    // Motor (direction lines low, zero duty)
    let enable = Pwm::new_output_a(
        board.motor_pwm_slice,
        board.motor_enable,
        pwm::motor_pwm_config(),
    );
    let forward = Output::new(board.motor_forward, Level::Low);
    let reverse = Output::new(board.motor_reverse, Level::Low);
    let motor = unwrap!(HBridgeMotor::new(forward, reverse, enable));
    info!("H-bridge initialized, PWM carrier {} Hz", pwm::carrier_hz(clk_sys));

    // Interrupt pin (pull-up, both edges)
    let button = Input::new(board.button, Pull::Up);
    let gate = ButtonGate::new(pins::BUTTON_GPIO);

    // Display (all segments off)
    let segments = board.segments.map(|pin| Output::new(pin, Level::Low));
    let display = unwrap!(ParallelSegmentDisplay::new_common_cathode(segments));
    info!("Display initialized");

    // Enable interrupts
    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let spawner = EXECUTOR_BUTTON.start(interrupt::SWI_IRQ_1);
    spawner.spawn(button::button_task(button, &STATE)).unwrap();
    info!("Button interrupt enabled");

    let mut controller = Controller::new(&control, timing, sampler, motor, display, gate);
    let mut last_state = ControllerState::Idle;

    info!("Entering control loop");
    controller.run(&STATE, |result| match result {
        Ok(report) => {
            if report.observed != last_state {
                debug!(
                    "State {} -> {}, command {}",
                    last_state, report.observed, report.command
                );
                last_state = report.observed;
            }
        }
        Err(e) => warn!("Control step failed: {}", e),
    })
}
