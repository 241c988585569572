//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading regulation
//! configurations from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{ContributionParameters, RegulationConfig, RegulationMetadata};

/// Loads and provides access to regulation configuration.
///
/// # Directory Structure
///
/// ```text
/// config/pp58_2023/
/// ├── regulation.yaml     # Regulation metadata
/// └── contributions.yaml  # Insurance rates, salary caps, occupational expense
/// ```
///
/// # Example
///
/// ```no_run
/// use pph21_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/pp58_2023")?;
/// println!("Loaded regulation: {}", loader.regulation().name);
/// # Ok::<(), pph21_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: RegulationConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any rate lies outside 0..=1 or any cap is not positive
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<RegulationMetadata>(&path.join("regulation.yaml"))?;
        let contributions =
            Self::load_yaml::<ContributionParameters>(&path.join("contributions.yaml"))?;
        Self::validate(&contributions)?;

        Ok(Self {
            config: RegulationConfig::new(metadata, contributions),
        })
    }

    /// Returns a loader holding the built-in statutory configuration.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate(params: &ContributionParameters) -> EngineResult<()> {
        let rates = [
            ("employer.jkk_rate", Some(params.employer.jkk_rate)),
            ("employer.jkm_rate", Some(params.employer.jkm_rate)),
            ("employer.bpjskes_rate", Some(params.employer.bpjskes_rate)),
            ("employee.jht_rate", Some(params.employee.jht_rate)),
            ("employee.jp_rate", Some(params.employee.jp_rate)),
            ("employee.bpjskes_rate", params.employee.bpjskes_rate),
            (
                "occupational_expense.rate",
                Some(params.occupational_expense.rate),
            ),
        ];
        for (field, rate) in rates {
            if let Some(rate) = rate
                && (rate < Decimal::ZERO || rate > Decimal::ONE)
            {
                return Err(EngineError::InvalidConfig {
                    field: field.to_string(),
                    message: format!("rate {} must be between 0 and 1", rate),
                });
            }
        }

        let caps = [
            ("caps.bpjskes", params.caps.bpjskes),
            ("caps.jp", params.caps.jp),
            (
                "occupational_expense.monthly_cap",
                params.occupational_expense.monthly_cap,
            ),
        ];
        for (field, cap) in caps {
            if cap <= Decimal::ZERO {
                return Err(EngineError::InvalidConfig {
                    field: field.to_string(),
                    message: format!("cap {} must be positive", cap),
                });
            }
        }

        Ok(())
    }

    /// Returns the underlying regulation configuration.
    pub fn config(&self) -> &RegulationConfig {
        &self.config
    }

    /// Returns the regulation metadata.
    pub fn regulation(&self) -> &RegulationMetadata {
        self.config.regulation()
    }

    /// Returns the contribution parameters.
    pub fn contributions(&self) -> &ContributionParameters {
        self.config.contributions()
    }
}
