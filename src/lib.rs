// dhcpcd-prefs - Library Root
// SPDX-License-Identifier: MIT

//! # dhcpcd-prefs
//!
//! Editor engine for dhcpcd's per-interface and per-SSID configuration
//! blocks. The library reconciles the blocks the daemon knows about with
//! the interfaces and wireless scans the machine can currently see, and
//! drives an editing session whose in-progress changes are committed to
//! the configuration file exactly when the user switches context or
//! closes the editor:
//!
//! - **Validation**: syntax checks for addresses and address lists
//! - **Reconciliation**: classifying block names as new, saved, or both
//! - **Session**: the selection/commit state machine
//! - **Store**: ordered key-value access to dhcpcd.conf blocks
//! - **Daemon client**: the `GetConfigBlocks` and `Rebind` D-Bus calls
//!
//! ## Design Principles
//!
//! 1. **Commit on transition**: edits are persisted at every selection
//!    change and on close, never lost and never saved twice unchanged
//! 2. **Snapshot reads**: live system state is an immutable snapshot for
//!    the duration of any single operation
//! 3. **Absorb failures**: RPC and store errors are logged and corrected,
//!    never fatal

pub mod dbus_client;
pub mod models;
pub mod network_utils;
pub mod reconcile;
pub mod session;
pub mod store;

// Re-export main types for convenience
pub use dbus_client::{BlockCatalog, DaemonClient, RebindDispatcher};
pub use models::{Category, ClassifiedName, ConfigBlock, Directive, Error, Result};
pub use models::{AppConfig, LiveInterface, LiveStateIndex};
pub use reconcile::FieldSet;
pub use session::{EditorSession, TextField};
pub use store::{ConfFileStore, ConfigStore, MemoryStore};

/// Crate version.
pub const CRATE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// D-Bus service name of the dhcpcd daemon.
pub const DBUS_SERVICE_NAME: &str = "name.marples.roy.dhcpcd";

/// D-Bus object path of the daemon's main interface.
pub const DBUS_OBJECT_PATH: &str = "/name/marples/roy/dhcpcd";

/// D-Bus interface the daemon exposes its calls on.
pub const DBUS_INTERFACE: &str = "name.marples.roy.dhcpcd";

/// Configuration directory name (under XDG_CONFIG_HOME).
pub const CONFIG_DIR_NAME: &str = "dhcpcd-prefs";
