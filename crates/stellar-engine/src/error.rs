//! Error types for the Stellar Blocks host binary.
//!
//! [`EngineError`] wraps every failure mode during startup and the host
//! run, so `main` can propagate with `?`.

/// Top-level error for the host binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: stellar_core::config::ConfigError,
    },

    /// The host loop failed.
    #[error("host error: {source}")]
    Host {
        /// The underlying host error.
        #[from]
        source: stellar_core::runner::HostError,
    },

    /// Reading stdin or writing stdout failed.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
