//! Error types
//!
//! Two kinds of fault exist at runtime. A [`ConfigurationFault`] makes a
//! module inert until it is initialized again. A [`HostError`] raised while a
//! tick writes to its lights only costs that tick.

use thiserror::Error;

use crate::config::ConfigError;

/// Faults that leave a module unable to run until re-initialized
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationFault {
    /// The engine reported no thrust transforms
    #[error("no thrust transforms found on engine '{engine}'")]
    NoNozzles {
        /// Diagnostic name of the engine
        engine: String,
    },

    /// A tick ran before light pairs were built
    #[error("light pairs failed to initialize correctly")]
    MissingLightPairs,

    /// No engine source is attached
    #[error("engine source failed to initialize correctly")]
    MissingEngine,

    /// An engine module set was built from an empty module list
    #[error("could not locate an engine module on part '{part}'")]
    NoEngineModules {
        /// Diagnostic name of the part
        part: String,
    },

    /// Tuning values outside their allowed ranges
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Errors reported by the host while creating or updating lights
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The handle refers to a light the host no longer has
    #[error("light '{name}' was released by the host")]
    LightReleased {
        /// Name the light was spawned with
        name: String,
    },

    /// The host could not allocate a new light
    #[error("failed to spawn light '{name}': {reason}")]
    SpawnFailed {
        /// Requested light name
        name: String,
        /// Host supplied reason
        reason: String,
    },
}

/// Top level error type for this crate
#[derive(Error, Debug)]
pub enum EngineLightError {
    /// Module configuration or initialization fault
    #[error("Configuration fault: {0}")]
    Configuration(#[from] ConfigurationFault),

    /// Host side failure
    #[error("Host error: {0}")]
    Host(#[from] HostError),

    /// Tuning file could not be loaded or saved
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Convenience result alias
pub type Result<T> = std::result::Result<T, EngineLightError>;
