//! Configuration loading and management for the PPh21 Withholding Engine.
//!
//! This module loads regulation parameters (insurance rates, salary caps and
//! the occupational expense deduction) from YAML files. The TER rate tables,
//! PTKP amounts and progressive brackets are compiled into the
//! [`calculation`](crate::calculation) module instead.
//!
//! # Example
//!
//! ```no_run
//! use pph21_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/pp58_2023").unwrap();
//! println!("Loaded regulation: {}", config.regulation().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    ContributionParameters, EmployeeRates, EmployerRates, OccupationalExpenseConfig,
    RegulationConfig, RegulationMetadata, SalaryCaps,
};
