//! Control configuration
//!
//! `build.rs` validates control.toml and generates `CONTROL_CONFIG` from
//! it. The generated values are checked again here; if they are rejected
//! the firmware falls back to the built-in defaults.

use defmt::*;

use dialdrive_core::config::ControlConfig;
use dialdrive_core::Interval;

include!(concat!(env!("OUT_DIR"), "/control_config.rs"));

/// Configuration the controller runs with
pub fn load() -> ControlConfig {
    match CONTROL_CONFIG.validate() {
        Ok(()) => {
            info!(
                "Control config: center={}, dead_zone={}, countdown from {}",
                CONTROL_CONFIG.center, CONTROL_CONFIG.dead_zone, CONTROL_CONFIG.countdown_start
            );
            CONTROL_CONFIG
        }
        Err(e) => {
            error!("Embedded control config rejected: {}", e);
            error!("Using default control configuration");
            ControlConfig::default()
        }
    }
}
