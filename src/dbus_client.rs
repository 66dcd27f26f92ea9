// dhcpcd-prefs - D-Bus Client
// SPDX-License-Identifier: MIT

//! Blocking D-Bus client used to call dhcpcd daemon operations.
//!
//! The editor consumes exactly two calls: `GetConfigBlocks`, which
//! enumerates the names holding a persisted block for one category, and
//! `Rebind`, which makes the daemon re-negotiate the lease on one
//! interface. Both are synchronous and attempted exactly once; failures
//! are reported to the caller and never retried here.

use std::sync::Arc;

use tracing::{debug, error};
use zbus::blocking::Connection;

use crate::models::{Category, Error, Result};
use crate::{DBUS_INTERFACE, DBUS_OBJECT_PATH, DBUS_SERVICE_NAME};

/// Enumeration of the names that have a persisted configuration block.
pub trait BlockCatalog {
    fn config_blocks(&self, category: Category) -> Result<Vec<String>>;
}

/// Lease re-negotiation trigger.
pub trait RebindDispatcher {
    fn rebind(&self, ifname: &str) -> Result<()>;
}

/// D-Bus client for the dhcpcd daemon.
#[derive(Clone, Default)]
pub struct DaemonClient {
    connection: Option<Arc<Connection>>,
}

impl DaemonClient {
    /// Create a new daemon client.
    pub fn new() -> Self {
        Self { connection: None }
    }

    /// Connect to the daemon.
    pub fn connect(&mut self) -> Result<()> {
        match Connection::system() {
            Ok(conn) => {
                debug!("Connected to system D-Bus");
                self.connection = Some(Arc::new(conn));
                Ok(())
            }
            Err(e) => {
                error!("Failed to connect to system D-Bus: {}", e);
                Err(Error::DbusConnectionFailed(e.to_string()))
            }
        }
    }

    /// Check if connected to the daemon.
    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    fn connection(&self) -> Result<&Connection> {
        self.connection.as_deref().ok_or(Error::DaemonNotRunning)
    }
}

impl BlockCatalog for DaemonClient {
    fn config_blocks(&self, category: Category) -> Result<Vec<String>> {
        let conn = self.connection()?;

        let reply = conn
            .call_method(
                Some(DBUS_SERVICE_NAME),
                DBUS_OBJECT_PATH,
                Some(DBUS_INTERFACE),
                "GetConfigBlocks",
                &(category.as_str(),),
            )
            .map_err(|e| Error::rpc("GetConfigBlocks", e.to_string()))?;

        reply
            .body()
            .deserialize()
            .map_err(|e| Error::rpc("GetConfigBlocks", e.to_string()))
    }
}

impl RebindDispatcher for DaemonClient {
    fn rebind(&self, ifname: &str) -> Result<()> {
        let conn = self.connection()?;

        debug!("Requesting rebind of {}", ifname);
        conn.call_method(
            Some(DBUS_SERVICE_NAME),
            DBUS_OBJECT_PATH,
            Some(DBUS_INTERFACE),
            "Rebind",
            &(ifname,),
        )
        .map(|_| ())
        .map_err(|e| Error::rpc("Rebind", e.to_string()))
    }
}
