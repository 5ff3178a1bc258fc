//! Error types for the stylist shell.
//!
//! The form itself cannot fail; these cover reading picked files, loading
//! the config and parsing values handed in on the command line.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StylistError {
    /// Value is not one of casual, formal, sporty, vintage
    #[error("unknown style '{0}' (expected casual, formal, sporty or vintage)")]
    UnknownStyle(String),

    /// Path does not look like an image to the picker filter
    #[error("not an image file: {}", .0.display())]
    NotAnImage(PathBuf),

    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StylistError>;
