//! Startup failures.
//!
//! Only initialization can fail. Configuration inconsistencies (a referenced
//! body missing from the registry) are logged and skipped by the game, and a
//! pick that hits nothing is an ordinary `None`.

use std::fmt;

/// Why a scene could not be mounted. Every variant is fatal for the mount
/// attempt; nothing partially built is left behind.
#[derive(Debug)]
pub enum InitError {
    /// The host has no usable drawing context (e.g. canvas 2D unsupported).
    ContextUnavailable,
    /// The render surface could not be created or attached.
    SurfaceUnavailable(String),
    /// A host event listener could not be registered.
    ListenerRegistration(String),
    /// The host refused to schedule an animation frame.
    FrameScheduling(String),
    /// The configuration override could not be parsed.
    Config(serde_json::Error),
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitError::ContextUnavailable => write!(f, "rendering context unavailable"),
            InitError::SurfaceUnavailable(msg) => write!(f, "render surface unavailable: {msg}"),
            InitError::ListenerRegistration(msg) => write!(f, "failed to register listener: {msg}"),
            InitError::FrameScheduling(msg) => write!(f, "failed to schedule frame: {msg}"),
            InitError::Config(err) => write!(f, "invalid configuration: {err}"),
        }
    }
}

impl std::error::Error for InitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InitError::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for InitError {
    fn from(err: serde_json::Error) -> Self {
        InitError::Config(err)
    }
}
