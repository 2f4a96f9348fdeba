//! Error types for the drawer core

use thiserror::Error;

/// Drawer errors
///
/// Only configuration can fail. Transitions, gestures and bridge calls
/// never error: invalid requests are ignored.
#[derive(Debug, Error)]
pub enum DrawerError {
    /// Configuration failed validation
    #[error("Invalid drawer configuration: {0}")]
    InvalidConfig(String),

    /// Configuration could not be parsed
    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

/// Result type for drawer operations
pub type Result<T> = std::result::Result<T, DrawerError>;
