//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{ApplicationConfig, PayrollConfig, ValidationLimits};

/// Loads and provides access to payroll configuration.
///
/// # Directory Structure
///
/// ```text
/// config/payroll/
/// ├── application.yaml   # Service name, version, bind address
/// └── validation.yaml    # Validation limits and default overtime rate
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/payroll").unwrap();
/// println!("Binding to {}", loader.application().bind_address);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns `ConfigNotFound` if either file is missing and
    /// `ConfigParseError` if either file is not valid YAML for its type.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let application = Self::load_yaml::<ApplicationConfig>(&path.join("application.yaml"))?;
        let validation = Self::load_yaml::<ValidationLimits>(&path.join("validation.yaml"))?;

        if validation.default_overtime_rate.is_sign_negative() {
            return Err(EngineError::ConfigParseError {
                path: path.join("validation.yaml").display().to_string(),
                message: "default_overtime_rate must not be negative".to_string(),
            });
        }

        Ok(Self {
            config: PayrollConfig {
                application,
                validation,
            },
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: PayrollConfig) -> Self {
        Self { config }
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

    /// Returns the full configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the service settings.
    pub fn application(&self) -> &ApplicationConfig {
        &self.config.application
    }

    /// Returns the validation limits.
    pub fn limits(&self) -> &ValidationLimits {
        &self.config.validation
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> PayrollConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/payroll"
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.application().name, "Payroll Engine");
        assert_eq!(loader.application().bind_address, "127.0.0.1:3000");
    }

    #[test]
    fn test_shipped_limits_match_defaults() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.limits(), &ValidationLimits::default());
        assert_eq!(
            loader.limits().max_salary,
            Money::from_str("999999.99").unwrap()
        );
        assert_eq!(
            loader.limits().default_overtime_rate,
            Decimal::from_str("1.5").unwrap()
        );
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("application.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_default_loader_needs_no_files() {
        let loader = ConfigLoader::default();
        assert_eq!(loader.limits().max_name_length, 50);
    }
}
