use std::env;

use chrono::Duration;
use thiserror::Error;

use crate::application::window::{MutationWindow, DEFAULT_MUTATION_WINDOW_SECS};

pub const MUTATION_WINDOW_VAR: &str = "ORDER_MUTATION_WINDOW_SECS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a non-negative number of seconds in range, got '{value}'")]
    InvalidWindow { var: &'static str, value: String },
}

/// Workflow settings.
///
/// Reads from the environment (and a `.env` file when present):
/// - `ORDER_MUTATION_WINDOW_SECS`: how long after creation an order may be
///   updated or cancelled (default: `300`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowConfig {
    pub mutation_window: Duration,
}

impl WorkflowConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|var| env::var(var).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mutation_window = match lookup(MUTATION_WINDOW_VAR) {
            None => Duration::seconds(DEFAULT_MUTATION_WINDOW_SECS),
            Some(value) => value
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|secs| *secs >= 0)
                .and_then(Duration::try_seconds)
                .ok_or_else(|| ConfigError::InvalidWindow {
                    var: MUTATION_WINDOW_VAR,
                    value: value.clone(),
                })?,
        };

        Ok(Self { mutation_window })
    }

    pub fn mutation_window(&self) -> MutationWindow {
        MutationWindow::new(self.mutation_window)
    }
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            mutation_window: Duration::seconds(DEFAULT_MUTATION_WINDOW_SECS),
        }
    }
}
