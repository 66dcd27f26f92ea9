// dhcpcd-prefs - Configuration Blocks
// SPDX-License-Identifier: MIT

//! Configuration block model: categories, directives, and the ordered
//! directive list that makes up one block.
//!
//! A block is addressed by `(Category, name)` and holds an ordered run of
//! `key[=value]` directives. Directive order is significant: the store
//! round-trips blocks, so rewriting a block must not shuffle lines the
//! user did not touch.

use serde::{Deserialize, Serialize};

/// Directive keys used by the field translations.
///
/// Keys ending in `=` carry their value directly behind the `=`; bare
/// keys (`inform`) are separated from their value by a space.
pub mod keys {
    pub const IP_ADDRESS: &str = "ip_address=";
    pub const INFORM: &str = "inform";
    pub const ROUTERS: &str = "routers=";
    pub const DNS_SERVERS: &str = "domain_name_servers=";
    pub const DNS_SEARCH: &str = "domain_search=";
}

/// Block category, selecting which live-state set and field semantics apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Per-interface blocks, matched against live interface names.
    #[default]
    Interface,
    /// Per-wireless-network blocks, matched against scanned SSIDs.
    Ssid,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Interface => "interface",
            Self::Ssid => "ssid",
        }
    }

    /// Parse a category from its block-header keyword.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "interface" => Some(Self::Interface),
            "ssid" => Some(Self::Ssid),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `key[=value]` entry inside a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub key: String,
    pub value: Option<String>,
}

impl Directive {
    pub fn new(key: impl Into<String>, value: Option<&str>) -> Self {
        Self {
            key: key.into(),
            value: value.map(str::to_string),
        }
    }
}

/// An ordered sequence of directives, owned by the editor session while
/// being edited.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigBlock {
    directives: Vec<Directive>,
}

impl ConfigBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    /// Append a directive, keeping whatever order the source had.
    pub fn push(&mut self, directive: Directive) {
        self.directives.push(directive);
    }

    /// Value of the first directive with this key. A present but valueless
    /// directive yields `""`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.directives
            .iter()
            .find(|d| d.key == key)
            .map(|d| d.value.as_deref().unwrap_or(""))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.directives.iter().any(|d| d.key == key)
    }

    /// Set-or-remove by key.
    ///
    /// `None` removes every directive with the key. `Some(v)` updates the
    /// first occurrence in place, preserving its position, and drops any
    /// later duplicates; a new key is appended at the end.
    pub fn set(&mut self, key: &str, value: Option<&str>) {
        match value {
            None => self.directives.retain(|d| d.key != key),
            Some(v) => {
                if let Some(pos) = self.directives.iter().position(|d| d.key == key) {
                    self.directives[pos].value = Some(v.to_string());
                    let mut seen = 0;
                    self.directives.retain(|d| {
                        if d.key == key {
                            seen += 1;
                            seen == 1
                        } else {
                            true
                        }
                    });
                } else {
                    self.directives.push(Directive::new(key, Some(v)));
                }
            }
        }
    }
}

impl FromIterator<Directive> for ConfigBlock {
    fn from_iter<T: IntoIterator<Item = Directive>>(iter: T) -> Self {
        Self {
            directives: iter.into_iter().collect(),
        }
    }
}

/// A block name classified against the live system state.
///
/// Invariant: at least one of `has_persisted_block` and `is_live` holds;
/// names with neither are never surfaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedName {
    pub name: String,
    pub has_persisted_block: bool,
    pub is_live: bool,
}
