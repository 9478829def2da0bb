//! Build script for brachio-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates machine.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use brachio_core::axis::Axis;
use brachio_core::config::{parse_machine_config, MachineConfig};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate machine.toml configuration at compile time
///
/// The file is checked twice: by the `toml` crate against the serde
/// schema, and by the on-device reader that parses it again at boot. Both
/// must accept it and agree on every value.
fn validate_config() {
    println!("cargo:rerun-if-changed=machine.toml");

    let config_path = Path::new("machine.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: machine.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds machine.toml as its boot configuration.     ║\n\
            ║  Please create one in the brachio-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read machine.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: MachineConfig = match toml::from_str(&config_content) {
        Ok(config) => config,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid machine.toml                                     ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    let mut errors = Vec::new();
    validate_motion(&config, &mut errors);
    validate_axes(&config, &mut errors);
    report_errors("Invalid machine configuration", &errors);

    match parse_machine_config(&config_content) {
        Ok(device) if device == config => {}
        Ok(_) => report_errors(
            "machine.toml is read differently on the device",
            &["On-device reader disagrees with the toml crate".to_string()],
        ),
        Err(e) => report_errors(
            "machine.toml uses syntax the device cannot read",
            &[format!("line {}: {:?}", e.line, e.kind)],
        ),
    }

    println!("cargo:warning=machine.toml validated successfully");
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

fn report_errors(title: &str, errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

fn validate_motion(config: &MachineConfig, errors: &mut Vec<String>) {
    let feed = config.motion.default_feed_rate;
    if !feed.is_finite() || feed <= 0.0 {
        errors.push("[motion] default_feed_rate must be > 0".to_string());
    }

    let cal = &config.calibration;
    let values = [
        cal.base_zero_rad,
        cal.shoulder_zero_rad,
        cal.elbow_zero_rad,
        cal.offset_x,
        cal.offset_y,
        cal.offset_z,
    ];
    if values.iter().any(|v| !v.is_finite()) {
        errors.push("[calibration] values must be finite".to_string());
    }
}

fn validate_axes(config: &MachineConfig, errors: &mut Vec<String>) {
    for axis in Axis::ALL {
        let name = axis.name();
        let cfg = config.axes.get(axis);

        if !cfg.reduction_ratio.is_finite() || cfg.reduction_ratio == 0.0 {
            errors.push(format!("[axes.{}] reduction_ratio must be non-zero", name));
        }
        if cfg.steps_per_revolution == 0 {
            errors.push(format!("[axes.{}] steps_per_revolution must be > 0", name));
        }
        if cfg.step_interval_us > 1_000_000 {
            errors.push(format!("[axes.{}] step_interval_us must be <= 1s", name));
        }
        if axis == Axis::Slider
            && (!cfg.travel_per_revolution.is_finite() || cfg.travel_per_revolution == 0.0)
        {
            errors.push(format!("[axes.{}] travel_per_revolution must be non-zero", name));
        }
    }
}
