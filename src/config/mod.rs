//! Configuration module for the tour guide orchestrator
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`TOURGUIDE_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use tourguide::config::TourConfig;
//!
//! // Load defaults
//! let config = TourConfig::default();
//! assert_eq!(config.engine.batch_size, 5);
//!
//! // Parse from TOML
//! let toml = r#"
//! [engine]
//! batch_size = 3
//! "#;
//! let config: TourConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.engine.batch_size, 3);
//! ```

pub mod agents;
pub mod arbiter;
pub mod engine;
pub mod error;
pub mod logging;

pub use agents::{default_agents, AgentConfig, AgentKind};
pub use arbiter::{ArbiterConfig, ArbiterStrategy};
pub use engine::EngineConfig;
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Unified configuration for the enrichment engine.
///
/// Aggregates engine timing/concurrency bounds, the arbitration strategy,
/// the agent registry definition, and logging. Passed explicitly into
/// constructors; the engine holds no process-global configuration state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TourConfig {
    /// Timeouts and concurrency bounds
    pub engine: EngineConfig,
    /// Arbitration strategy selection
    pub arbiter: ArbiterConfig,
    /// Registered content agents, in tie-break priority order
    pub agents: Vec<AgentConfig>,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            arbiter: ArbiterConfig::default(),
            agents: default_agents(),
            logging: LoggingConfig::default(),
        }
    }
}

impl TourConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                let mut config: TourConfig =
                    toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
                // An omitted [[agents]] table means "use the standard fan-out",
                // not "register nothing".
                if config.agents.is_empty() {
                    config.agents = default_agents();
                }
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supports TOURGUIDE_* environment variables for common settings.
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(timeout) = std::env::var("TOURGUIDE_AGENT_TIMEOUT_MS") {
            if let Ok(t) = timeout.parse() {
                self.engine.agent_timeout_ms = t;
            }
        }
        if let Ok(timeout) = std::env::var("TOURGUIDE_ARBITRATION_TIMEOUT_MS") {
            if let Ok(t) = timeout.parse() {
                self.engine.arbitration_timeout_ms = t;
            }
        }
        if let Ok(size) = std::env::var("TOURGUIDE_BATCH_SIZE") {
            if let Ok(s) = size.parse() {
                self.engine.batch_size = s;
            }
        }
        if let Ok(size) = std::env::var("TOURGUIDE_WORKER_POOL_SIZE") {
            if let Ok(s) = size.parse() {
                self.engine.worker_pool_size = s;
            }
        }

        if let Ok(level) = std::env::var("TOURGUIDE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("TOURGUIDE_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.agent_timeout_ms == 0 {
            return Err(ConfigError::Validation {
                field: "engine.agent_timeout_ms".to_string(),
                message: "must be positive".to_string(),
            });
        }
        if self.engine.arbitration_timeout_ms == 0 {
            return Err(ConfigError::Validation {
                field: "engine.arbitration_timeout_ms".to_string(),
                message: "must be positive".to_string(),
            });
        }
        if self.engine.batch_size == 0 {
            return Err(ConfigError::Validation {
                field: "engine.batch_size".to_string(),
                message: "must be positive".to_string(),
            });
        }
        if self.engine.worker_pool_size == 0 {
            return Err(ConfigError::Validation {
                field: "engine.worker_pool_size".to_string(),
                message: "must be positive".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for (i, agent) in self.agents.iter().enumerate() {
            if agent.name.is_empty() {
                return Err(ConfigError::Validation {
                    field: format!("agents[{}].name", i),
                    message: "name cannot be empty".to_string(),
                });
            }
            if !seen.insert(agent.name.as_str()) {
                return Err(ConfigError::DuplicateAgent(agent.name.clone()));
            }
            let relevance = agent.relevance_score();
            if !(0.0..=1.0).contains(&relevance) {
                return Err(ConfigError::Validation {
                    field: format!("agents[{}].relevance_score", i),
                    message: format!("must be in [0.0, 1.0], got {}", relevance),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_tour_config_defaults() {
        let config = TourConfig::default();
        assert_eq!(config.engine.batch_size, 5);
        assert_eq!(config.engine.worker_pool_size, 50);
        assert_eq!(config.agents.len(), 3);
        assert_eq!(config.arbiter.strategy, ArbiterStrategy::ScoreMax);
    }

    #[test]
    fn test_config_parse_minimal_toml() {
        let toml = r#"
        [engine]
        batch_size = 3
        "#;

        let config: TourConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.engine.batch_size, 3);
        assert_eq!(config.engine.agent_timeout_ms, 5000); // Default
    }

    #[test]
    fn test_config_parse_full_toml() {
        let toml = include_str!("../../tourguide.example.toml");
        let config: TourConfig = toml::from_str(toml).unwrap();
        assert!(config.validate().is_ok());
        assert!(!config.agents.is_empty());
    }

    #[test]
    fn test_config_parse_agents_array() {
        let toml = r#"
        [[agents]]
        name = "video"
        kind = "video"

        [[agents]]
        name = "music"
        kind = "music"
        latency_ms = 25
        "#;

        let config: TourConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.agents.len(), 2);
        assert_eq!(config.agents[1].latency_ms(), 25);
    }

    #[test]
    fn test_config_load_from_file() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "[engine]\nbatch_size = 7").unwrap();

        let config = TourConfig::load(Some(temp.path())).unwrap();
        assert_eq!(config.engine.batch_size, 7);
        // Omitted agents section falls back to the standard fan-out
        assert_eq!(config.agents.len(), 3);
    }

    #[test]
    fn test_config_missing_file_error() {
        let result = TourConfig::load(Some(Path::new("/nonexistent/config.toml")));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_config_load_none_returns_defaults() {
        let config = TourConfig::load(None).unwrap();
        assert_eq!(config.engine.batch_size, 5);
        assert_eq!(config.agents.len(), 3);
    }

    #[test]
    fn test_config_env_override_batch_size() {
        std::env::set_var("TOURGUIDE_BATCH_SIZE", "9");
        let config = TourConfig::default().with_env_overrides();
        std::env::remove_var("TOURGUIDE_BATCH_SIZE");

        assert_eq!(config.engine.batch_size, 9);
    }

    #[test]
    fn test_config_env_invalid_value_ignored() {
        std::env::set_var("TOURGUIDE_AGENT_TIMEOUT_MS", "not-a-number");
        let config = TourConfig::default().with_env_overrides();
        std::env::remove_var("TOURGUIDE_AGENT_TIMEOUT_MS");

        // Should keep default, not crash
        assert_eq!(config.engine.agent_timeout_ms, 5000);
    }

    #[test]
    fn test_config_env_override_log_level() {
        std::env::set_var("TOURGUIDE_LOG_LEVEL", "debug");
        let config = TourConfig::default().with_env_overrides();
        std::env::remove_var("TOURGUIDE_LOG_LEVEL");

        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_config_validation_zero_timeout() {
        let mut config = TourConfig::default();
        config.engine.agent_timeout_ms = 0;

        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. }) if field == "engine.agent_timeout_ms"
        ));
    }

    #[test]
    fn test_config_validation_zero_batch_size() {
        let mut config = TourConfig::default();
        config.engine.batch_size = 0;

        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. }) if field == "engine.batch_size"
        ));
    }

    #[test]
    fn test_config_validation_duplicate_agent_name() {
        let mut config = TourConfig::default();
        config.agents.push(AgentConfig {
            name: "video".to_string(),
            kind: AgentKind::Video,
            latency_ms: None,
            relevance_score: None,
        });

        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::DuplicateAgent(ref name)) if name == "video"));
    }

    #[test]
    fn test_config_validation_empty_agent_name() {
        let mut config = TourConfig::default();
        config.agents[0].name = String::new();

        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. }) if field.contains("name")
        ));
    }

    #[test]
    fn test_config_validation_relevance_out_of_range() {
        let mut config = TourConfig::default();
        config.agents[0].relevance_score = Some(1.5);

        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. }) if field.contains("relevance_score")
        ));
    }
}
