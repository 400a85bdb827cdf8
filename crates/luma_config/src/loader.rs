//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::RunConfig;
use luma_sim::time::{FS_PER_NS, FS_PER_PS, FS_PER_US};
use std::path::Path;

/// Loads and validates a `luma.toml` configuration file.
pub fn load_config(path: &Path) -> Result<RunConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `luma.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<RunConfig, ConfigError> {
    let config: RunConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &RunConfig) -> Result<(), ConfigError> {
    if config.image.input.is_empty() {
        return Err(ConfigError::MissingField("image.input".to_string()));
    }
    if config.image.scaling == 0 {
        return Err(ConfigError::InvalidValue {
            field: "image.scaling".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    if config.pipeline.latency == 0 {
        return Err(ConfigError::InvalidValue {
            field: "pipeline.latency".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    if config.pipeline.stall_limit == 0 {
        return Err(ConfigError::InvalidValue {
            field: "pipeline.stall_limit".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    let period_fs = parse_period(&config.clock.period)?;
    if period_fs == 0 {
        return Err(ConfigError::InvalidValue {
            field: "clock.period".to_string(),
            reason: "must be nonzero".to_string(),
        });
    }
    if period_fs % 2 != 0 {
        return Err(ConfigError::InvalidValue {
            field: "clock.period".to_string(),
            reason: "must divide into two equal half-periods".to_string(),
        });
    }
    Ok(())
}

/// Parses a human-readable clock period string into femtoseconds.
///
/// Supports units: `fs`, `ps`, `ns`, `us`. Examples: `"10ns"`, `"500ps"`.
pub fn parse_period(s: &str) -> Result<u64, ConfigError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(invalid_period("empty period string"));
    }

    // Find where digits end and unit begins
    let digit_end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());

    if digit_end == 0 {
        return Err(invalid_period(&format!("no numeric value in '{s}'")));
    }

    let number: u64 = s[..digit_end]
        .parse()
        .map_err(|_| invalid_period(&format!("invalid number in '{s}'")))?;

    let unit = s[digit_end..].trim();

    let multiplier = match unit {
        "fs" => 1,
        "ps" => FS_PER_PS,
        "ns" => FS_PER_NS,
        "us" => FS_PER_US,
        "" => {
            return Err(invalid_period(&format!(
                "missing unit in '{s}' (use fs, ps, ns, or us)"
            )))
        }
        _ => {
            return Err(invalid_period(&format!(
                "unknown unit '{unit}' (use fs, ps, ns, or us)"
            )))
        }
    };

    number
        .checked_mul(multiplier)
        .ok_or_else(|| invalid_period(&format!("period '{s}' overflows")))
}

fn invalid_period(reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: "clock.period".to_string(),
        reason: reason.to_string(),
    }
}
