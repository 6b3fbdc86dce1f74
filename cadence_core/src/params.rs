//! Simulation parameters
//!
//! Loaded from `.cadence/params.yaml` in the current project when present,
//! otherwise the built-in defaults are used.

use crate::error::{CadenceError, CadenceResult};
use crate::scheduling::{DEFAULT_FRAME_LENGTH, DEFAULT_QUANTUM_LIMIT};
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default location of the parameter file, relative to the working directory
pub const PARAMS_FILE: &str = ".cadence/params.yaml";

/// Units simulated by a scheduler run (417 frames of 24)
pub const DEFAULT_HORIZON: u64 = 10_008;

/// Units simulated by a container demo
pub const DEFAULT_DEMO_UNITS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimParams {
    pub horizon: u64,
    pub frame_length: u64,
    pub quantum_limit: u32,
    pub demo_units: u64,
    /// Fixed demo seed; `None` draws from OS entropy
    pub demo_seed: Option<u64>,
    pub color: bool,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            horizon: DEFAULT_HORIZON,
            frame_length: DEFAULT_FRAME_LENGTH,
            quantum_limit: DEFAULT_QUANTUM_LIMIT,
            demo_units: DEFAULT_DEMO_UNITS,
            demo_seed: None,
            color: true,
        }
    }
}

impl SimParams {
    /// Parameters from `.cadence/params.yaml`, or defaults.
    ///
    /// A file that exists but cannot be read or parsed is reported and
    /// ignored.
    pub fn init() -> Self {
        let path = PathBuf::from(PARAMS_FILE);
        if !path.exists() {
            return Self::default();
        }

        match Self::load_from_disk(&path) {
            Ok(params) => params,
            Err(e) => {
                warn!("ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load and validate parameters from a YAML file. Missing keys take
    /// their default values.
    pub fn load_from_disk(path: &Path) -> CadenceResult<Self> {
        let yaml_str = std::fs::read_to_string(path)?;
        let params: SimParams = serde_yaml::from_str(&yaml_str)?;
        params.validate()?;
        Ok(params)
    }

    /// Save parameters as YAML, creating parent directories as needed
    pub fn save_to_disk(&self, path: &Path) -> CadenceResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    pub fn validate(&self) -> CadenceResult<()> {
        if self.horizon == 0 {
            return Err(CadenceError::config("horizon must be at least 1 unit"));
        }
        if self.frame_length == 0 {
            return Err(CadenceError::config("frame_length must be at least 1 unit"));
        }
        if self.quantum_limit == 0 {
            return Err(CadenceError::config("quantum_limit must be at least 1 unit"));
        }
        if self.demo_units == 0 {
            return Err(CadenceError::config("demo_units must be at least 1 unit"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let params = SimParams::default();
        assert_eq!(params.horizon, 10_008);
        assert_eq!(params.frame_length, 24);
        assert_eq!(params.quantum_limit, 4);
        assert_eq!(params.demo_units, 10_000);
        assert!(params.color);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".cadence").join("params.yaml");

        let params = SimParams {
            horizon: 480,
            demo_seed: Some(9),
            ..SimParams::default()
        };
        params.save_to_disk(&path).unwrap();

        assert_eq!(SimParams::load_from_disk(&path).unwrap(), params);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("params.yaml");
        std::fs::write(&path, "quantum_limit: 2\ncolor: false\n").unwrap();

        let params = SimParams::load_from_disk(&path).unwrap();
        assert_eq!(params.quantum_limit, 2);
        assert!(!params.color);
        assert_eq!(params.horizon, DEFAULT_HORIZON);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("params.yaml");
        std::fs::write(&path, "frame_length: 0\n").unwrap();

        assert!(matches!(
            SimParams::load_from_disk(&path),
            Err(CadenceError::Config(_))
        ));

        std::fs::write(&path, "horizon: [1, 2]\n").unwrap();
        assert!(matches!(
            SimParams::load_from_disk(&path),
            Err(CadenceError::Yaml(_))
        ));
    }
}
