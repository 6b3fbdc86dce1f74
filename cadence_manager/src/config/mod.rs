//! Run configuration for the `cadence` binary
//!
//! Simulation parameters come from, in order of precedence:
//! command-line flags, `CADENCE_*` environment variables, the params file,
//! and finally the built-in defaults.

use anyhow::{Context, Result};
use cadence_core::params::{DEFAULT_DEMO_UNITS, DEFAULT_HORIZON, PARAMS_FILE};
use cadence_core::scheduling::{DEFAULT_FRAME_LENGTH, DEFAULT_QUANTUM_LIMIT};
use cadence_core::SimParams;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

pub const ENV_HORIZON: &str = "CADENCE_HORIZON";
pub const ENV_QUANTUM: &str = "CADENCE_QUANTUM";
pub const ENV_FRAME: &str = "CADENCE_FRAME";

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub params_file: Option<PathBuf>,
    pub horizon: Option<u64>,
    pub frame_length: Option<u64>,
    pub quantum_limit: Option<u32>,
    pub demo_units: Option<u64>,
    pub demo_seed: Option<u64>,
    pub no_color: bool,
}

/// Configuration precedence for runtime values
/// 1. Command line or environment (highest)
/// 2. Params file
/// 3. Built-in defaults (lowest)
pub fn resolve_runtime_value<T>(override_value: Option<T>, file_value: Option<T>, default: T) -> T {
    override_value.or(file_value).unwrap_or(default)
}

/// Parse an environment variable; unset or empty means "not given"
pub fn env_value<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("Invalid value for {}: {:?}", name, raw)),
        _ => Ok(None),
    }
}

/// A command-line value, or else the environment variable `name`. The
/// variable is not read at all when the flag is given.
pub fn flag_or_env<T>(flag: Option<T>, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match flag {
        Some(value) => Ok(Some(value)),
        None => env_value(name),
    }
}

fn load_file(explicit: Option<&Path>) -> Result<Option<SimParams>> {
    if let Some(path) = explicit {
        let params = SimParams::load_from_disk(path)
            .with_context(|| format!("Failed to load params from {:?}", path))?;
        return Ok(Some(params));
    }

    if Path::new(PARAMS_FILE).exists() {
        debug!("using {}", PARAMS_FILE);
        return Ok(Some(SimParams::init()));
    }
    Ok(None)
}

/// Merge every configuration source into validated parameters
pub fn load_params(overrides: &Overrides) -> Result<SimParams> {
    let file = load_file(overrides.params_file.as_deref())?;

    let params = SimParams {
        horizon: resolve_runtime_value(
            flag_or_env(overrides.horizon, ENV_HORIZON)?,
            file.as_ref().map(|f| f.horizon),
            DEFAULT_HORIZON,
        ),
        frame_length: resolve_runtime_value(
            flag_or_env(overrides.frame_length, ENV_FRAME)?,
            file.as_ref().map(|f| f.frame_length),
            DEFAULT_FRAME_LENGTH,
        ),
        quantum_limit: resolve_runtime_value(
            flag_or_env(overrides.quantum_limit, ENV_QUANTUM)?,
            file.as_ref().map(|f| f.quantum_limit),
            DEFAULT_QUANTUM_LIMIT,
        ),
        demo_units: resolve_runtime_value(
            overrides.demo_units,
            file.as_ref().map(|f| f.demo_units),
            DEFAULT_DEMO_UNITS,
        ),
        demo_seed: overrides
            .demo_seed
            .or_else(|| file.as_ref().and_then(|f| f.demo_seed)),
        color: !overrides.no_color
            && std::env::var_os("NO_COLOR").is_none()
            && file.as_ref().map_or(true, |f| f.color),
    };

    params.validate().context("Invalid simulation parameters")?;
    debug!(?params, "resolved parameters");
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_precedence() {
        // Test override > file > default
        assert_eq!(resolve_runtime_value(Some(1), Some(2), 3), 1);
        assert_eq!(resolve_runtime_value(None, Some(2), 3), 2);
        assert_eq!(resolve_runtime_value::<i32>(None, None, 3), 3);
    }

    #[test]
    fn test_flags_override_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("params.yaml");
        std::fs::write(&path, "horizon: 96\nframe_length: 12\ndemo_seed: 5\n").unwrap();

        let params = load_params(&Overrides {
            params_file: Some(path),
            frame_length: Some(8),
            ..Overrides::default()
        })
        .unwrap();

        assert_eq!(params.horizon, 96);
        assert_eq!(params.frame_length, 8);
        assert_eq!(params.demo_seed, Some(5));
        assert_eq!(params.demo_units, DEFAULT_DEMO_UNITS);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = load_params(&Overrides {
            params_file: Some(dir.path().join("absent.yaml")),
            ..Overrides::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_flag_shadows_malformed_env() {
        let name = "CADENCE_TEST_MALFORMED_UNITS";
        std::env::set_var(name, "forty-eight");

        assert_eq!(flag_or_env(Some(48u64), name).unwrap(), Some(48));
        assert!(flag_or_env::<u64>(None, name).is_err());

        std::env::remove_var(name);
        assert_eq!(flag_or_env::<u64>(None, name).unwrap(), None);
    }

    #[test]
    fn test_zero_override_rejected() {
        let result = load_params(&Overrides {
            horizon: Some(0),
            ..Overrides::default()
        });
        assert!(result.is_err());
    }
}
