//! Application state for the payroll engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::PayrollConfig;
use crate::engine::Engine;
use crate::store::PayrollStore;

/// Shared application state.
///
/// Contains the engine, which in turn holds the loaded configuration and
/// the payroll store shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    engine: Engine,
}

impl AppState {
    /// Creates application state over a configuration and store.
    pub fn new(config: PayrollConfig, store: Arc<dyn PayrollStore>) -> Self {
        Self {
            engine: Engine::new(Arc::new(config), store),
        }
    }

    /// Returns a reference to the engine.
    pub fn engine(&self) -> &Engine {
        &self.engine
    }
}
