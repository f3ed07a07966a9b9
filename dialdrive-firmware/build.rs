//! Build script for dialdrive-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates control.toml and turns it into a `ControlConfig` constant

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Magnitude range of the 10-bit potentiometer reading
const MAGNITUDE_MAX: i64 = 1023;

/// Highest digit a single seven-segment position can show
const MAX_DIGIT: i64 = 9;

fn main() {
    setup_linker();
    let config = validate_config();
    generate_config(&config);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // cortex-m-rt, embassy-rp boot2 and defmt linker scripts
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Settings read from control.toml, already range-checked
struct ControlSettings {
    center: i64,
    dead_zone: i64,
    press_settle: &'static str,
    cooldown_settle: &'static str,
    countdown_hold: &'static str,
    countdown_start: i64,
}

/// Validate control.toml configuration at compile time
fn validate_config() -> ControlSettings {
    // Re-run if control.toml changes
    println!("cargo:rerun-if-changed=control.toml");

    let config_path = Path::new("control.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: control.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a control.toml configuration file.        ║\n\
            ║  Please create one in the dialdrive-firmware directory.          ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read control.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in control.toml                      ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();

    let center = integer(&config, "mapping", "center", 511, &mut errors);
    let dead_zone = integer(&config, "mapping", "dead_zone", 0, &mut errors);
    let press_settle = interval(&config, "timing", "press_settle", "1ms", &mut errors);
    let cooldown_settle = interval(&config, "timing", "cooldown_settle", "10ms", &mut errors);
    let countdown_hold = interval(&config, "countdown", "hold", "1s", &mut errors);
    let countdown_start = integer(&config, "countdown", "start", MAX_DIGIT, &mut errors);

    if !(0..=MAGNITUDE_MAX).contains(&center) {
        errors.push(format!("[mapping] center must be 0-{}", MAGNITUDE_MAX));
    }
    if dead_zone < 0 || dead_zone > center || center + dead_zone > MAGNITUDE_MAX {
        errors.push("[mapping] dead_zone must stay inside 0-1023 around center".to_string());
    }
    if !(0..=MAX_DIGIT).contains(&countdown_start) {
        errors.push(format!("[countdown] start must be 0-{}", MAX_DIGIT));
    }

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid control configuration                            ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=control.toml validated successfully");

    ControlSettings {
        center,
        dead_zone,
        press_settle,
        cooldown_settle,
        countdown_hold,
        countdown_start,
    }
}

/// Read an optional integer, recording a type error
fn integer(
    config: &toml::Value,
    section: &str,
    key: &str,
    default: i64,
    errors: &mut Vec<String>,
) -> i64 {
    match config.get(section).and_then(|s| s.get(key)) {
        None => default,
        Some(toml::Value::Integer(value)) => *value,
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            default
        }
    }
}

/// Read an optional interval name and map it to an `Interval` variant
fn interval(
    config: &toml::Value,
    section: &str,
    key: &str,
    default: &str,
    errors: &mut Vec<String>,
) -> &'static str {
    let name = match config.get(section).and_then(|s| s.get(key)) {
        None => default,
        Some(toml::Value::String(value)) => value.as_str(),
        Some(_) => {
            errors.push(format!("[{}] {} must be a string", section, key));
            default
        }
    };

    match name {
        "1us" => "Microsecond",
        "1ms" => "Millisecond",
        "10ms" => "TenMilliseconds",
        "1s" => "OneSecond",
        other => {
            errors.push(format!(
                "[{}] {} '{}' must be 1us, 1ms, 10ms or 1s",
                section, key, other
            ));
            "Millisecond"
        }
    }
}

/// Write the validated settings as a constant the firmware includes
fn generate_config(settings: &ControlSettings) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let source = format!(
        "/// Control configuration generated from control.toml\n\
         pub const CONTROL_CONFIG: ControlConfig = ControlConfig {{\n\
         \x20   center: {},\n\
         \x20   dead_zone: {},\n\
         \x20   press_settle: Interval::{},\n\
         \x20   cooldown_settle: Interval::{},\n\
         \x20   countdown_hold: Interval::{},\n\
         \x20   countdown_start: {},\n\
         }};\n",
        settings.center,
        settings.dead_zone,
        settings.press_settle,
        settings.cooldown_settle,
        settings.countdown_hold,
        settings.countdown_start,
    );

    let mut f = File::create(out_dir.join("control_config.rs")).unwrap();
    f.write_all(source.as_bytes()).unwrap();
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
