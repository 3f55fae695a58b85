//! Configuration loading functionality.
//!
//! This module provides the [`PayrollConfig`] type for loading payroll
//! policy and tax configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::calculation::BracketTaxPolicy;
use crate::error::{EngineError, EngineResult};

use super::types::{PayrollPolicy, TaxConfig};

/// Loaded payroll configuration: policy knobs plus the bracket tax policy.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/payroll/
/// ├── policy.yaml   # Attendance policy and statutory amounts
/// └── tax.yaml      # Tax bracket table
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::PayrollConfig;
///
/// let config = PayrollConfig::load("./config/payroll").unwrap();
/// println!("EOBI: {}", config.policy().statutory.eobi_amount);
/// ```
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    policy: PayrollPolicy,
    tax: BracketTaxPolicy,
}

impl PayrollConfig {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigNotFound` when a required file is missing and
    /// `ConfigParse` when a file contains invalid YAML or fields.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let policy = Self::load_yaml::<PayrollPolicy>(&path.join("policy.yaml"))?;
        let tax_config = Self::load_yaml::<TaxConfig>(&path.join("tax.yaml"))?;

        Ok(Self::new(policy, tax_config))
    }

    /// Builds a configuration from already-parsed parts.
    pub fn new(policy: PayrollPolicy, tax_config: TaxConfig) -> Self {
        Self {
            policy,
            tax: BracketTaxPolicy::new(tax_config.brackets),
        }
    }

    /// Returns the payroll policy.
    pub fn policy(&self) -> &PayrollPolicy {
        &self.policy
    }

    /// Returns the bracket tax policy.
    pub fn tax(&self) -> &BracketTaxPolicy {
        &self.tax
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParse {
            path: path_str,
            message: e.to_string(),
        })
    }
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self::new(PayrollPolicy::default(), TaxConfig::default())
    }
}
