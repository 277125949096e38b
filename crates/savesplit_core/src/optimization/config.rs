//! Optimization run configuration

use serde::{Deserialize, Serialize};

use crate::enumerate::DEFAULT_INCREMENT;
use crate::error::InputError;

/// Knobs for one optimization run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationConfig {
    /// Step in which funds are allocated to any one account
    #[serde(default = "default_increment")]
    pub increment: f64,

    /// Number of best distributions to keep
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Scenarios evaluated between two progress reports
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Stop after examining this many scenarios
    #[serde(default)]
    pub max_scenarios: Option<u64>,

    /// Stop once this much wall-clock time has passed (checked between batches)
    #[serde(default)]
    pub time_limit_ms: Option<u64>,
}

fn default_increment() -> f64 {
    DEFAULT_INCREMENT
}

fn default_top_k() -> usize {
    3
}

fn default_batch_size() -> usize {
    500
}

impl Default for OptimizationConfig {
    fn default() -> Self {
        Self {
            increment: default_increment(),
            top_k: default_top_k(),
            batch_size: default_batch_size(),
            max_scenarios: None,
            time_limit_ms: None,
        }
    }
}

impl OptimizationConfig {
    pub fn validate(&self) -> Result<(), InputError> {
        if !self.increment.is_finite() || self.increment <= 0.0 {
            return Err(InputError::InvalidIncrement(self.increment));
        }
        if self.top_k == 0 {
            return Err(InputError::InvalidTopK(self.top_k));
        }
        if self.batch_size == 0 {
            return Err(InputError::InvalidBatchSize(self.batch_size));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OptimizationConfig::default();
        assert_eq!(config.increment, 5_000.0);
        assert_eq!(config.top_k, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_serde_fills_defaults() {
        let config: OptimizationConfig = serde_json::from_str(r#"{"top_k": 5}"#).unwrap();
        assert_eq!(config.top_k, 5);
        assert_eq!(config.increment, 5_000.0);
        assert_eq!(config.batch_size, 500);
        assert_eq!(config.max_scenarios, None);
    }

    #[test]
    fn test_validate_rejects_zero_top_k() {
        let config = OptimizationConfig {
            top_k: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(InputError::InvalidTopK(0)));
    }
}
