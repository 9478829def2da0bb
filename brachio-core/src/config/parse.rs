//! Minimal `machine.toml` reader
//!
//! Handles the subset the machine configuration needs, without an
//! allocator:
//! - `[section]` and `[section.subsection]` headers
//! - `key = value` with float, integer and boolean values
//! - `#` comments, whole-line or trailing
//!
//! Strings, arrays, inline tables and dotted keys are not supported. Any key
//! or section not known to [`MachineConfig`] is an error, matching the
//! `deny_unknown_fields` check the build script applies.

use super::{AxisConfig, MachineConfig};
use crate::axis::Axis;

/// Why a configuration line was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigErrorKind {
    /// Header names no known section
    UnknownSection,
    /// Key is not valid in the current section
    UnknownKey,
    /// Value does not parse as the key's type
    InvalidValue,
    /// Line is neither a header nor `key = value`
    Malformed,
}

/// Configuration parse failure, with the 1-based offending line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigError {
    pub line: usize,
    pub kind: ConfigErrorKind,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Section {
    Root,
    Kinematics,
    Calibration,
    Motion,
    Axes,
    Axis(Axis),
}

/// Parse `machine.toml` text, starting from defaults
///
/// Sections and keys that are absent keep their default values.
pub fn parse_machine_config(input: &str) -> Result<MachineConfig, ConfigError> {
    let mut config = MachineConfig::new();
    let mut section = Section::Root;

    for (index, raw) in input.lines().enumerate() {
        let fail = |kind| ConfigError {
            line: index + 1,
            kind,
        };

        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') {
            let header = line
                .strip_prefix('[')
                .and_then(|l| l.strip_suffix(']'))
                .ok_or(fail(ConfigErrorKind::Malformed))?;
            section = parse_section_header(header).ok_or(fail(ConfigErrorKind::UnknownSection))?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(fail(ConfigErrorKind::Malformed))?;
        apply_value(&mut config, section, key, value).map_err(fail)?;
    }

    Ok(config)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_section_header(header: &str) -> Option<Section> {
    let header = header.trim();
    match header.split_once('.') {
        Some(("axes", name)) => Axis::from_name(name.trim()).map(Section::Axis),
        Some(_) => None,
        None => match header {
            "kinematics" => Some(Section::Kinematics),
            "calibration" => Some(Section::Calibration),
            "motion" => Some(Section::Motion),
            "axes" => Some(Section::Axes),
            _ => None,
        },
    }
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

fn parse_bool(value: &str) -> Result<bool, ConfigErrorKind> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ConfigErrorKind::InvalidValue),
    }
}

fn parse_u32(value: &str) -> Result<u32, ConfigErrorKind> {
    value.parse().map_err(|_| ConfigErrorKind::InvalidValue)
}

fn parse_f32(value: &str) -> Result<f32, ConfigErrorKind> {
    let v: f32 = value.parse().map_err(|_| ConfigErrorKind::InvalidValue)?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ConfigErrorKind::InvalidValue)
    }
}

fn apply_value(
    config: &mut MachineConfig,
    section: Section,
    key: &str,
    value: &str,
) -> Result<(), ConfigErrorKind> {
    match section {
        Section::Root | Section::Axes => Err(ConfigErrorKind::UnknownKey),
        Section::Kinematics => match key {
            "elbow_down" => {
                config.kinematics.elbow_down = parse_bool(value)?;
                Ok(())
            }
            _ => Err(ConfigErrorKind::UnknownKey),
        },
        Section::Motion => match key {
            "default_feed_rate" => {
                let feed = parse_f32(value)?;
                if feed <= 0.0 {
                    return Err(ConfigErrorKind::InvalidValue);
                }
                config.motion.default_feed_rate = feed;
                Ok(())
            }
            _ => Err(ConfigErrorKind::UnknownKey),
        },
        Section::Calibration => {
            let cal = &mut config.calibration;
            let slot = match key {
                "base_zero_rad" => &mut cal.base_zero_rad,
                "shoulder_zero_rad" => &mut cal.shoulder_zero_rad,
                "elbow_zero_rad" => &mut cal.elbow_zero_rad,
                "offset_x" => &mut cal.offset_x,
                "offset_y" => &mut cal.offset_y,
                "offset_z" => &mut cal.offset_z,
                _ => return Err(ConfigErrorKind::UnknownKey),
            };
            *slot = parse_f32(value)?;
            Ok(())
        }
        Section::Axis(axis) => apply_axis_value(config.axes.get_mut(axis), key, value),
    }
}

fn apply_axis_value(axis: &mut AxisConfig, key: &str, value: &str) -> Result<(), ConfigErrorKind> {
    match key {
        "dir_high_to_home" => axis.dir_high_to_home = parse_bool(value)?,
        "reverse_direction" => axis.reverse_direction = parse_bool(value)?,
        "limit_active_low" => axis.limit_active_low = parse_bool(value)?,
        "enable_inverted" => axis.enable_inverted = parse_bool(value)?,
        "reduction_ratio" => {
            let ratio = parse_f32(value)?;
            if ratio == 0.0 {
                return Err(ConfigErrorKind::InvalidValue);
            }
            axis.reduction_ratio = ratio;
        }
        "steps_per_revolution" => {
            let steps = parse_u32(value)?;
            if steps == 0 {
                return Err(ConfigErrorKind::InvalidValue);
            }
            axis.steps_per_revolution = steps;
        }
        "step_interval_us" => axis.step_interval_us = parse_u32(value)?,
        "travel_per_revolution" => {
            let travel = parse_f32(value)?;
            if travel == 0.0 {
                return Err(ConfigErrorKind::InvalidValue);
            }
            axis.travel_per_revolution = travel;
        }
        _ => return Err(ConfigErrorKind::UnknownKey),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_gives_defaults() {
        let config = parse_machine_config("").unwrap();
        assert_eq!(config, MachineConfig::default());

        let config = parse_machine_config("# only a comment\n\n").unwrap();
        assert_eq!(config, MachineConfig::default());
    }

    #[test]
    fn test_overrides() {
        let input = r#"
# Reference arm
[kinematics]
elbow_down = true

[calibration]
offset_z = -12.5   # bed is below the base plate
shoulder_zero_rad = 0.05

[motion]
default_feed_rate = 1500

[axes.shoulder]
reduction_ratio = 4.5
dir_high_to_home = false

[axes.slider]
travel_per_revolution = 2.0
step_interval_us = 250
"#;
        let config = parse_machine_config(input).unwrap();
        assert!(config.kinematics.elbow_down);
        assert_eq!(config.calibration.offset_z, -12.5);
        assert_eq!(config.calibration.shoulder_zero_rad, 0.05);
        assert_eq!(config.motion.default_feed_rate, 1500.0);
        assert_eq!(config.axes.shoulder.reduction_ratio, 4.5);
        assert!(!config.axes.shoulder.dir_high_to_home);
        assert_eq!(config.axes.slider.travel_per_revolution, 2.0);
        assert_eq!(config.axes.slider.step_interval_us, 250);

        // Untouched axes keep defaults
        assert_eq!(config.axes.base, AxisConfig::default());
        assert_eq!(config.axes.elbow, AxisConfig::default());
    }

    #[test]
    fn test_unknown_section_reports_line() {
        let err = parse_machine_config("[kinematics]\n\n[heater]\n").unwrap_err();
        assert_eq!(
            err,
            ConfigError {
                line: 3,
                kind: ConfigErrorKind::UnknownSection
            }
        );

        let err = parse_machine_config("[axes.wrist]").unwrap_err();
        assert_eq!(err.kind, ConfigErrorKind::UnknownSection);
    }

    #[test]
    fn test_unknown_key() {
        let err = parse_machine_config("[motion]\nmax_feed = 10").unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.kind, ConfigErrorKind::UnknownKey);

        // Keys outside any section are rejected too
        let err = parse_machine_config("elbow_down = true").unwrap_err();
        assert_eq!(err.kind, ConfigErrorKind::UnknownKey);
    }

    #[test]
    fn test_invalid_values() {
        let cases = [
            "[kinematics]\nelbow_down = yes",
            "[motion]\ndefault_feed_rate = 0",
            "[motion]\ndefault_feed_rate = fast",
            "[axes.base]\nsteps_per_revolution = -200",
            "[axes.base]\nsteps_per_revolution = 0",
            "[axes.base]\nreduction_ratio = 0.0",
            "[calibration]\noffset_x = inf",
        ];
        for input in cases {
            let err = parse_machine_config(input).unwrap_err();
            assert_eq!(err.kind, ConfigErrorKind::InvalidValue, "{input}");
            assert_eq!(err.line, 2);
        }
    }

    #[test]
    fn test_malformed_lines() {
        let err = parse_machine_config("[kinematics\n").unwrap_err();
        assert_eq!(err.kind, ConfigErrorKind::Malformed);

        let err = parse_machine_config("[motion]\ndefault_feed_rate").unwrap_err();
        assert_eq!(err.kind, ConfigErrorKind::Malformed);
        assert_eq!(err.line, 2);
    }
}
