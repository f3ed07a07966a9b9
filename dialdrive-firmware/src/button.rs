//! Button edge task
//!
//! Runs on the interrupt executor, so each edge is handled in interrupt
//! context while the main loop busy-waits in thread mode. The only work
//! done per edge is one state transition attempt; no I/O, no delays.

use embassy_rp::gpio::Input;

use dialdrive_core::SharedState;

/// Advance the shared button state on every edge of the button pin
///
/// Both edges count: pressing gives `Idle → Pressed`, releasing (after the
/// main loop has acknowledged the press) gives `Released → CooldownActive`.
#[embassy_executor::task]
pub async fn button_task(mut button: Input<'static>, state: &'static SharedState) {
    loop {
        button.wait_for_any_edge().await;
        state.on_edge();
    }
}
