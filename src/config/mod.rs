//! Configuration for the payroll engine.
//!
//! Policy knobs (attendance pro-ration, statutory amounts) and the tax
//! bracket table are loaded from YAML files; defaults are constructible in
//! code for tests.

mod loader;
mod types;

pub use loader::PayrollConfig;
pub use types::{AttendancePolicy, PayrollPolicy, StatutoryConfig, TaxConfig};
