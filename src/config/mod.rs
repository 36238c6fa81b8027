//! Configuration loading and management for the payroll engine.
//!
//! This module loads service settings and validation limits from YAML
//! files. Every value has a built-in default, so the engine also runs with
//! no configuration on disk.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/payroll").unwrap();
//! println!("Loaded: {} {}", config.application().name, config.application().version);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{ApplicationConfig, LengthRange, PayrollConfig, ValidationLimits};
