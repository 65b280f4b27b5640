//! Core error types for focusflow-core.
//!
//! This module defines the error hierarchy using thiserror. Each subsystem
//! has its own enum; `CoreError` is the umbrella the CLI reports from.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for focusflow-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Timer engine errors
    #[error("Timer error: {0}")]
    Timer(#[from] TimerError),

    /// AI gateway errors
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Backup import/export errors
    #[error("Transfer error: {0}")]
    Transfer(#[from] TransferError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Timer engine errors.
///
/// Both variants are terminal for the engine instance: the owner must treat
/// the timer as disabled until a new engine is created.
#[derive(Error, Debug)]
pub enum TimerError {
    /// The background worker thread could not be created.
    #[error("Failed to start the background timer thread: {source}")]
    Spawn {
        #[source]
        source: std::io::Error,
    },

    /// The worker thread is gone; commands can no longer be delivered.
    #[error("Timer worker is no longer running")]
    Disconnected,
}

/// AI gateway errors.
///
/// All variants are surfaced to the user as text at the call site and never
/// retried automatically.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// No credential stored.
    #[error("API key not set. Save one with `focusflow auth set-key`")]
    MissingApiKey,

    /// The API answered with a non-success status.
    #[error("Gemini API error (HTTP {status}): {message}")]
    Http { status: u16, message: String },

    /// The request never completed (connect, timeout, TLS, ...).
    #[error("Request to the Gemini API failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered 2xx but the body was not usable.
    #[error("Unexpected Gemini API response: {0}")]
    InvalidResponse(String),

    /// Analysis requested with zero recorded sessions.
    #[error("No study sessions to analyze. Record one with the timer first")]
    NoSessions,
}

/// Storage-specific errors.
///
/// Read faults on individual values are not errors: corrupt serialized data
/// degrades to an empty collection instead.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the backing database
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Data directory could not be determined or created
    #[error("Failed to prepare data directory: {0}")]
    DataDir(String),
}

/// Backup import errors.
#[derive(Error, Debug)]
pub enum TransferError {
    /// The document is not a valid backup; existing data is left untouched.
    #[error("Not a valid backup document: {0}")]
    InvalidFormat(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::QueryFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
