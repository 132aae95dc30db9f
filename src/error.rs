use thiserror::Error;

/// Fatal problems found while loading or validating the configuration.
///
/// Any of these leaves the whole feature set disabled.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config file: {0}")]
    Load(String),

    #[error("failed to save config file: {0}")]
    Save(String),

    #[error("{kind} material is not specified in config (items.{kind}.material)")]
    MissingMaterial { kind: &'static str },

    #[error("material '{name}' does not exist on host version '{host}'")]
    UnknownMaterial { name: String, host: String },

    #[error("required message '{0}' is missing from the [messages] section")]
    MissingMessage(&'static str),

    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("hex colors (#RRGGBB) are used in messages but host version '{0}' does not support them")]
    HexColorsUnsupported(String),
}

/// Failure to build an item at emission time. Recovered by the emitter.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpawnError {
    #[error("unknown material '{0}'")]
    UnknownMaterial(String),

    #[error("material '{0}' cannot exist as an item")]
    NotAnItem(String),
}
