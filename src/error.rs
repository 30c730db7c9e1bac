//! Unified error types for the desktop pet.
//!
//! A single `Error` enum that every subsystem can convert into.  Only
//! [`Error::Init`] is fatal (the presentation surface could not be
//! created); the rest describe conditions the pet degrades around.
//! All variants are `Copy` so they can be passed through the state machine
//! and event sink without allocation.

use core::fmt;

use crate::app::ports::ConfigError;

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A named animation could not be loaded; its behavior plays without frames.
    AssetMissing(&'static str),
    /// A behavior index outside the known set was observed and reset to Idle.
    StateCorrupted(u8),
    /// Teardown was requested after it already ran.
    AlreadyClosed,
    /// The presentation surface (or another startup resource) could not be created.
    Init(&'static str),
    /// Configuration is invalid or could not be loaded.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AssetMissing(name) => write!(f, "animation '{name}' not found"),
            Self::StateCorrupted(raw) => write!(f, "behavior index {raw} out of range"),
            Self::AlreadyClosed => write!(f, "pet already closed"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
