// dhcpcd-prefs - Error Types
// SPDX-License-Identifier: MIT

//! Shared error types for the editor engine.

use thiserror::Error;

/// Result type alias for editor engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for editor engine operations.
#[derive(Debug, Error)]
pub enum Error {
    // ========================================
    // RPC Errors
    // ========================================
    #[error("{method}: {reason}")]
    Rpc { method: String, reason: String },

    #[error("D-Bus error: {0}")]
    Dbus(String),

    #[error("D-Bus connection failed: {0}")]
    DbusConnectionFailed(String),

    #[error("dhcpcd daemon not running")]
    DaemonNotRunning,

    // ========================================
    // Store Errors
    // ========================================
    #[error("Store operation failed: {0}")]
    Store(String),

    // ========================================
    // Settings Errors
    // ========================================
    #[error("Failed to read configuration: {0}")]
    ConfigReadFailed(String),

    #[error("Failed to write configuration: {0}")]
    ConfigWriteFailed(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParseFailed(String),

    // ========================================
    // System Errors
    // ========================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new RPC error for a named daemon call.
    pub fn rpc(method: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rpc {
            method: method.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error indicates the daemon is not running.
    pub fn is_daemon_not_running(&self) -> bool {
        matches!(self, Self::DaemonNotRunning | Self::DbusConnectionFailed(_))
    }
}

// Convert from zbus errors
impl From<zbus::Error> for Error {
    fn from(err: zbus::Error) -> Self {
        Error::Dbus(err.to_string())
    }
}

// Convert from toml parse errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::ConfigParseFailed(err.to_string())
    }
}

// Convert from toml serialize errors
impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::ConfigWriteFailed(err.to_string())
    }
}
