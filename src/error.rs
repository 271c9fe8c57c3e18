/*!
 * Error types for Sintra
 */

use std::io;

use sintra_core_presence::PresenceError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SintraError>;

/// Exit code constants for structured process exit
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_RUNTIME: i32 = 1;
pub const EXIT_CONFIG: i32 = 2;

#[derive(Error, Debug)]
pub enum SintraError {
    /// Invalid or inconsistent configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file could not be parsed
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration could not be serialized
    #[error("Failed to serialize configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Presence core rejected its parameters
    #[error("Invalid controller parameters: {0}")]
    Presence(#[from] PresenceError),

    /// I/O error (config file, listener socket)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// HTTP server failure
    #[error("Server error: {0}")]
    Server(String),
}

impl SintraError {
    /// Get the process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            SintraError::Config(_)
            | SintraError::ConfigParse(_)
            | SintraError::ConfigSerialize(_)
            | SintraError::Presence(_) => EXIT_CONFIG,
            SintraError::Io(_) | SintraError::Server(_) => EXIT_RUNTIME,
        }
    }
}
