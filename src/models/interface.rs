// dhcpcd-prefs - Live Interface Snapshot
// SPDX-License-Identifier: MIT

//! Read-only view over the interfaces the system currently has and, per
//! wireless interface, the SSIDs its latest scan saw.
//!
//! The snapshot is produced outside the editor engine and is never
//! mutated by it; a fresh snapshot may replace it between operations.

use std::collections::HashSet;

use super::block::Category;

/// One currently observed network interface.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LiveInterface {
    pub ifname: String,
    pub is_point_to_point: bool,
    pub is_wireless: bool,
    /// SSID the interface is currently associated with, if any.
    pub current_ssid: Option<String>,
    /// Distinct SSIDs seen in the latest scan, first-seen order.
    pub scanned_ssids: Vec<String>,
}

/// Immutable snapshot of all live interfaces.
#[derive(Debug, Clone, Default)]
pub struct LiveStateIndex {
    interfaces: Vec<LiveInterface>,
}

impl LiveStateIndex {
    pub fn new(interfaces: Vec<LiveInterface>) -> Self {
        Self { interfaces }
    }

    pub fn interfaces(&self) -> &[LiveInterface] {
        &self.interfaces
    }

    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }

    /// Find an interface by exact name.
    pub fn find(&self, ifname: &str) -> Option<&LiveInterface> {
        self.interfaces.iter().find(|i| i.ifname == ifname)
    }

    /// All interface names, in snapshot order.
    pub fn interface_names(&self) -> Vec<String> {
        self.interfaces.iter().map(|i| i.ifname.clone()).collect()
    }

    /// Union of scanned SSIDs across all wireless interfaces,
    /// de-duplicated by exact match in first-seen order.
    pub fn scanned_ssids(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut ssids = Vec::new();
        for ifm in self.interfaces.iter().filter(|i| i.is_wireless) {
            for ssid in &ifm.scanned_ssids {
                if seen.insert(ssid.clone()) {
                    ssids.push(ssid.clone());
                }
            }
        }
        ssids
    }

    /// The live name set for a category.
    pub fn names_for(&self, category: Category) -> Vec<String> {
        match category {
            Category::Interface => self.interface_names(),
            Category::Ssid => self.scanned_ssids(),
        }
    }
}
