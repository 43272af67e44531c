//! Service configuration with documented constants
//!
//! Values load from a TOML file; every section falls back to its defaults
//! so a partial file (or none at all) is valid.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::agent::StrategyKind;
use crate::core::error::{ChaseError, Result};

/// Listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,

    /// TCP port; 0 binds an ephemeral port
    pub port: u16,

    /// Largest request body accepted, in bytes
    ///
    /// A snapshot for a crowded maze is a few KiB; anything far larger
    /// is not a snapshot.
    pub max_body_bytes: usize,

    /// Seconds a connection may take to deliver its next full request
    pub idle_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8004,
            max_body_bytes: 64 * 1024,
            idle_timeout_secs: 30,
        }
    }
}

/// Which agent answers decision requests
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub strategy: StrategyKind,

    /// Base seed for the per-agent random streams (drawn from entropy when absent)
    pub seed: Option<u64>,
}

/// Tuning of the navigation engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    /// Stuck counter value that switches Greedy into WallFollow
    ///
    /// The counter decays by one per moving turn, so a mouse that
    /// alternates between progress and blockage climbs slowly.
    pub stuck_threshold: u32,

    /// WallFollow calls before handing control back to Greedy
    pub wall_follow_steps: u32,

    /// Memory key used when the roster does not contain the caller
    pub fallback_agent_id: String,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            stuck_threshold: 3,
            wall_follow_steps: 6,
            fallback_agent_id: "__solo__".to_string(),
        }
    }
}

/// Complete service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChaseConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub navigator: NavigatorConfig,
}

impl ChaseConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            ChaseError::ConfigError(format!("Failed to read config file {:?}: {}", path, e))
        })?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration text
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: ChaseConfig = toml::from_str(contents)
            .map_err(|e| ChaseError::ConfigError(format!("Failed to parse config TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.navigator.stuck_threshold == 0 {
            return Err(ChaseError::ConfigError(
                "navigator.stuck_threshold must be at least 1".into(),
            ));
        }
        if self.navigator.wall_follow_steps == 0 {
            return Err(ChaseError::ConfigError(
                "navigator.wall_follow_steps must be at least 1".into(),
            ));
        }
        if self.navigator.fallback_agent_id.is_empty() {
            return Err(ChaseError::ConfigError(
                "navigator.fallback_agent_id must not be empty".into(),
            ));
        }
        if self.server.max_body_bytes == 0 {
            return Err(ChaseError::ConfigError(
                "server.max_body_bytes must be positive".into(),
            ));
        }
        if self.server.idle_timeout_secs == 0 {
            return Err(ChaseError::ConfigError(
                "server.idle_timeout_secs must be positive".into(),
            ));
        }
        Ok(())
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.server.idle_timeout_secs)
    }

    /// `host:port` string for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
