//! Error types for the ambient layer: configuration loading and the
//! text front end's command parser.
//!
//! The game core itself has no error path: invalid player actions are
//! ignored, and level lookups clamp.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config.toml parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A typed line the front end could not turn into a command.
/// Shown to the player as a hint, never fatal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("I don't know '{0}'. Type 'help' to see what you can do.")]
    Unknown(String),

    #[error("try: {0}")]
    Usage(&'static str),

    #[error("'{0}' is not a chocolate (try c1, c2, ...)")]
    BadItem(String),

    #[error("'{0}' is not a box (try b1, b2, ...)")]
    BadBox(String),

    #[error("pick a color first, or type: color <box> <color>")]
    NoColorSelected,
}
