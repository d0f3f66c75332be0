//! Configuration loading and typed config structures for Stellar Blocks.
//!
//! The optional configuration file is `stellar-config.yaml` in the working
//! directory. Every field has a default matching the shipped game, so an
//! empty file (or no file at all) yields the standard experience.

use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The values parsed but describe an unplayable game.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level game configuration.
///
/// Mirrors the structure of `stellar-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GameConfig {
    /// Delays for every scripted beat.
    #[serde(default)]
    pub timing: TimingConfig,

    /// Score deltas and the starting score.
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Node-connection board geometry.
    #[serde(default)]
    pub board: BoardConfig,

    /// Decorative particle counts and seed.
    #[serde(default)]
    pub decoration: DecorationConfig,

    /// Host loop settings.
    #[serde(default)]
    pub host: HostConfig,
}

impl GameConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `STELLAR_LOG` overrides `host.log_level` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // serde_yml reports an empty document as a missing value.
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.host.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Check that the values describe a playable game.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.node_count == 0 {
            return Err(ConfigError::Invalid {
                reason: "board.node_count must be at least 1".to_owned(),
            });
        }
        if !self.board.radius.is_finite() || self.board.radius <= 0.0 {
            return Err(ConfigError::Invalid {
                reason: "board.radius must be a positive finite number".to_owned(),
            });
        }
        if !self.board.center_x.is_finite() || !self.board.center_y.is_finite() {
            return Err(ConfigError::Invalid {
                reason: "board center must be finite".to_owned(),
            });
        }
        if self.host.frame_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                reason: "host.frame_interval_ms must be at least 1".to_owned(),
            });
        }
        Ok(())
    }
}

/// Delays, in milliseconds, for every scripted beat.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TimingConfig {
    /// Delay between a minigame finishing and the reward screen.
    #[serde(default = "default_completion_delay_ms")]
    pub completion_delay_ms: u64,

    /// Delay between a correct quiz answer and the next question.
    #[serde(default = "default_next_round_delay_ms")]
    pub next_round_delay_ms: u64,

    /// Lifetime of a node click burst.
    #[serde(default = "default_particle_lifetime_ms")]
    pub particle_lifetime_ms: u64,

    /// Delay before the scripted "ERROR CRÍTICO" banner.
    #[serde(default = "default_critical_error_delay_ms")]
    pub critical_error_delay_ms: u64,

    /// Delay before the reward panel is revealed.
    #[serde(default = "default_reward_reveal_delay_ms")]
    pub reward_reveal_delay_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            completion_delay_ms: default_completion_delay_ms(),
            next_round_delay_ms: default_next_round_delay_ms(),
            particle_lifetime_ms: default_particle_lifetime_ms(),
            critical_error_delay_ms: default_critical_error_delay_ms(),
            reward_reveal_delay_ms: default_reward_reveal_delay_ms(),
        }
    }
}

/// Score deltas and the starting score.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScoringConfig {
    /// Score every session starts with.
    #[serde(default = "default_initial_score")]
    pub initial_score: u32,

    /// Added per newly connected node.
    #[serde(default = "default_node_connect_bonus")]
    pub node_connect_bonus: u32,

    /// Added per correct quiz answer.
    #[serde(default = "default_correct_answer_bonus")]
    pub correct_answer_bonus: u32,

    /// Subtracted (floor 0) per incorrect quiz answer.
    #[serde(default = "default_incorrect_answer_penalty")]
    pub incorrect_answer_penalty: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            initial_score: default_initial_score(),
            node_connect_bonus: default_node_connect_bonus(),
            correct_answer_bonus: default_correct_answer_bonus(),
            incorrect_answer_penalty: default_incorrect_answer_penalty(),
        }
    }
}

/// Geometry of the node ring.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BoardConfig {
    /// Number of nodes placed around the ring.
    #[serde(default = "default_node_count")]
    pub node_count: u32,

    /// Ring center, horizontal.
    #[serde(default = "default_center_x")]
    pub center_x: f64,

    /// Ring center, vertical.
    #[serde(default = "default_center_y")]
    pub center_y: f64,

    /// Ring radius.
    #[serde(default = "default_radius")]
    pub radius: f64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            node_count: default_node_count(),
            center_x: default_center_x(),
            center_y: default_center_y(),
            radius: default_radius(),
        }
    }
}

/// Decorative particle counts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DecorationConfig {
    /// Fixed RNG seed; OS entropy is used when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Stars on the home screen.
    #[serde(default = "default_star_count")]
    pub star_count: u32,

    /// Floating particles on the home screen.
    #[serde(default = "default_home_sparkle_count")]
    pub home_sparkle_count: u32,

    /// Falling coins on the reward screen.
    #[serde(default = "default_reward_token_count")]
    pub reward_token_count: u32,

    /// Background particles on the reward screen.
    #[serde(default = "default_reward_sparkle_count")]
    pub reward_sparkle_count: u32,

    /// Sparks around the server once the critical-error banner is up.
    #[serde(default = "default_error_spark_count")]
    pub error_spark_count: u32,
}

impl Default for DecorationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            star_count: default_star_count(),
            home_sparkle_count: default_home_sparkle_count(),
            reward_token_count: default_reward_token_count(),
            reward_sparkle_count: default_reward_sparkle_count(),
            error_spark_count: default_error_spark_count(),
        }
    }
}

/// Host loop settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HostConfig {
    /// Interval between frames that advance timers.
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl HostConfig {
    /// Override the log level with `STELLAR_LOG` when set.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("STELLAR_LOG") {
            self.log_level = val;
        }
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: default_frame_interval_ms(),
            log_level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_completion_delay_ms() -> u64 {
    1000
}

const fn default_next_round_delay_ms() -> u64 {
    1000
}

const fn default_particle_lifetime_ms() -> u64 {
    1000
}

const fn default_critical_error_delay_ms() -> u64 {
    3000
}

const fn default_reward_reveal_delay_ms() -> u64 {
    1500
}

const fn default_initial_score() -> u32 {
    1250
}

const fn default_node_connect_bonus() -> u32 {
    50
}

const fn default_correct_answer_bonus() -> u32 {
    200
}

const fn default_incorrect_answer_penalty() -> u32 {
    100
}

const fn default_node_count() -> u32 {
    8
}

const fn default_center_x() -> f64 {
    400.0
}

const fn default_center_y() -> f64 {
    300.0
}

const fn default_radius() -> f64 {
    150.0
}

const fn default_star_count() -> u32 {
    100
}

const fn default_home_sparkle_count() -> u32 {
    15
}

const fn default_reward_token_count() -> u32 {
    15
}

const fn default_reward_sparkle_count() -> u32 {
    30
}

const fn default_error_spark_count() -> u32 {
    10
}

const fn default_frame_interval_ms() -> u64 {
    50
}

fn default_log_level() -> String {
    "info".to_owned()
}
