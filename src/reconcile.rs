// dhcpcd-prefs - Reconciliation Engine
// SPDX-License-Identifier: MIT

//! Merges the daemon's persisted block names with the live system
//! snapshot, and translates between a block's directives and the field
//! values the editor shows.

use std::collections::HashSet;

use crate::models::{keys, Category, ClassifiedName, ConfigBlock, LiveInterface, LiveStateIndex};

/// The five semantic fields the editor shows for one block.
///
/// Empty strings stand for "no value"; the widgets the values travel
/// through cannot carry a separate null.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet {
    pub auto_configure: bool,
    pub ip_address: String,
    pub router: String,
    pub dns_servers: String,
    pub dns_search: String,
}

impl Default for FieldSet {
    fn default() -> Self {
        Self {
            auto_configure: true,
            ip_address: String::new(),
            router: String::new(),
            dns_servers: String::new(),
            dns_search: String::new(),
        }
    }
}

/// Classify every known block name against the live snapshot.
///
/// `catalog` is the persisted-name list as the daemon returned it; it may
/// contain duplicates, which are dropped by name. Live names come first
/// in snapshot order, then the persisted-only names in catalog order.
pub fn classify(
    catalog: &[String],
    live: &LiveStateIndex,
    category: Category,
) -> Vec<ClassifiedName> {
    let mut persisted = Vec::new();
    let mut persisted_set = HashSet::new();
    for name in catalog {
        if persisted_set.insert(name.as_str()) {
            persisted.push(name.as_str());
        }
    }

    let live_names = live.names_for(category);
    let live_set: HashSet<&str> = live_names.iter().map(String::as_str).collect();

    let mut classified = Vec::with_capacity(live_names.len() + persisted.len());
    for name in &live_names {
        classified.push(ClassifiedName {
            name: name.clone(),
            has_persisted_block: persisted_set.contains(name.as_str()),
            is_live: true,
        });
    }
    for name in persisted {
        if !live_set.contains(name) {
            classified.push(ClassifiedName {
                name: name.to_string(),
                has_persisted_block: true,
                is_live: false,
            });
        }
    }
    classified
}

/// Derive the editable fields from a block's directives.
///
/// An explicit `ip_address=` directive forces manual configuration.
/// Without one, a point-to-point link that also lacks `inform` defaults
/// to manual, since such links cannot use DHCP-informed auto-addressing.
pub fn derive_fields(block: &ConfigBlock, matched: Option<&LiveInterface>) -> FieldSet {
    let static_address = block.get(keys::IP_ADDRESS);
    let inform = block.get(keys::INFORM);

    let auto_configure = match static_address {
        Some(_) => false,
        None => !(inform.is_none() && matched.is_some_and(|i| i.is_point_to_point)),
    };

    FieldSet {
        auto_configure,
        ip_address: static_address.or(inform).unwrap_or("").to_string(),
        router: block.get(keys::ROUTERS).unwrap_or("").to_string(),
        dns_servers: block.get(keys::DNS_SERVERS).unwrap_or("").to_string(),
        dns_search: block.get(keys::DNS_SEARCH).unwrap_or("").to_string(),
    }
}

/// Write the edited fields back into a block, set-or-remove by key so an
/// unchanged field set reproduces the block byte for byte.
///
/// Point-to-point links keep the source's asymmetry: a present-but-empty
/// `ip_address=` stands for "auto", and `inform` is never written.
pub fn apply_fields(fields: &FieldSet, block: &mut ConfigBlock, matched: Option<&LiveInterface>) {
    let auto = fields.auto_configure;

    if matched.is_some_and(|i| i.is_point_to_point) {
        let value = if auto { "" } else { fields.ip_address.as_str() };
        block.set(keys::IP_ADDRESS, Some(value));
    } else {
        let address = match fields.ip_address.as_str() {
            "" => None,
            addr => Some(addr),
        };
        block.set(keys::INFORM, if auto { address } else { None });
        block.set(keys::IP_ADDRESS, if auto { None } else { address });
    }

    for (key, value) in [
        (keys::ROUTERS, fields.router.as_str()),
        (keys::DNS_SERVERS, fields.dns_servers.as_str()),
        (keys::DNS_SEARCH, fields.dns_search.as_str()),
    ] {
        // With auto-configure on, an empty field lets the lease supply the
        // option; with it off, an empty value is an explicit suppression.
        if auto && value.is_empty() {
            block.set(key, None);
        } else {
            block.set(key, Some(value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Directive;

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn live(entries: &[(&str, bool)]) -> LiveStateIndex {
        LiveStateIndex::new(
            entries
                .iter()
                .map(|(ifname, p2p)| LiveInterface {
                    ifname: ifname.to_string(),
                    is_point_to_point: *p2p,
                    ..Default::default()
                })
                .collect(),
        )
    }

    fn block(entries: &[(&str, &str)]) -> ConfigBlock {
        entries
            .iter()
            .map(|(k, v)| Directive::new(*k, Some(v)))
            .collect()
    }

    #[test]
    fn test_classify_live_only() {
        let classified = classify(&[], &live(&[("eth0", false)]), Category::Interface);
        assert_eq!(
            classified,
            vec![ClassifiedName {
                name: "eth0".to_string(),
                has_persisted_block: false,
                is_live: true,
            }]
        );
    }

    #[test]
    fn test_classify_order_and_overlap() {
        let classified = classify(
            &names(&["eth9", "wlan0", "eth9"]),
            &live(&[("eth0", false), ("wlan0", false)]),
            Category::Interface,
        );
        let flat: Vec<(&str, bool, bool)> = classified
            .iter()
            .map(|c| (c.name.as_str(), c.has_persisted_block, c.is_live))
            .collect();
        // live names first in snapshot order, then persisted-only in
        // catalog order, duplicates dropped
        assert_eq!(
            flat,
            vec![
                ("eth0", false, true),
                ("wlan0", true, true),
                ("eth9", true, false),
            ]
        );
    }

    #[test]
    fn test_classify_idempotent() {
        let catalog = names(&["eth1", "eth0"]);
        let index = live(&[("eth0", false)]);
        let first = classify(&catalog, &index, Category::Interface);
        let second = classify(&catalog, &index, Category::Interface);
        assert_eq!(first, second);
    }

    #[test]
    fn test_classify_invariant_holds() {
        let classified = classify(
            &names(&["eth0", "eth9"]),
            &live(&[("eth0", false)]),
            Category::Interface,
        );
        assert!(classified.iter().all(|c| c.has_persisted_block || c.is_live));
    }

    #[test]
    fn test_derive_empty_block_defaults_to_auto() {
        let eth0 = LiveInterface {
            ifname: "eth0".to_string(),
            ..Default::default()
        };
        let fields = derive_fields(&ConfigBlock::new(), Some(&eth0));
        assert!(fields.auto_configure);
        assert_eq!(fields.ip_address, "");
        assert_eq!(fields.router, "");
        assert_eq!(fields.dns_servers, "");
        assert_eq!(fields.dns_search, "");
    }

    #[test]
    fn test_derive_static_address_forces_manual() {
        let b = block(&[
            (keys::IP_ADDRESS, "192.168.1.5/24"),
            (keys::ROUTERS, "192.168.1.1"),
        ]);
        let fields = derive_fields(&b, None);
        assert!(!fields.auto_configure);
        assert_eq!(fields.ip_address, "192.168.1.5/24");
        assert_eq!(fields.router, "192.168.1.1");
    }

    #[test]
    fn test_derive_inform_keeps_auto() {
        let b = block(&[(keys::INFORM, "10.0.0.5")]);
        let fields = derive_fields(&b, None);
        assert!(fields.auto_configure);
        assert_eq!(fields.ip_address, "10.0.0.5");
    }

    #[test]
    fn test_derive_point_to_point_defaults_to_manual() {
        let ppp0 = LiveInterface {
            ifname: "ppp0".to_string(),
            is_point_to_point: true,
            ..Default::default()
        };
        let fields = derive_fields(&ConfigBlock::new(), Some(&ppp0));
        assert!(!fields.auto_configure);

        // an inform directive still means auto, even on point-to-point
        let b = block(&[(keys::INFORM, "10.0.0.5")]);
        assert!(derive_fields(&b, Some(&ppp0)).auto_configure);
    }

    #[test]
    fn test_apply_auto_writes_inform() {
        let fields = FieldSet {
            ip_address: "10.0.0.5".to_string(),
            dns_servers: "8.8.8.8".to_string(),
            ..Default::default()
        };
        let mut b = ConfigBlock::new();
        apply_fields(&fields, &mut b, None);
        assert_eq!(b.get(keys::INFORM), Some("10.0.0.5"));
        assert!(!b.contains(keys::IP_ADDRESS));
        assert!(!b.contains(keys::ROUTERS));
        assert_eq!(b.get(keys::DNS_SERVERS), Some("8.8.8.8"));
    }

    #[test]
    fn test_apply_manual_writes_static_and_explicit_empties() {
        let fields = FieldSet {
            auto_configure: false,
            ip_address: "192.168.1.5/24".to_string(),
            ..Default::default()
        };
        let mut b = ConfigBlock::new();
        apply_fields(&fields, &mut b, None);
        assert_eq!(b.get(keys::IP_ADDRESS), Some("192.168.1.5/24"));
        assert!(!b.contains(keys::INFORM));
        // empty list fields are written as explicit suppressions
        assert_eq!(b.get(keys::ROUTERS), Some(""));
        assert_eq!(b.get(keys::DNS_SERVERS), Some(""));
        assert_eq!(b.get(keys::DNS_SEARCH), Some(""));
    }

    #[test]
    fn test_apply_auto_empty_address_omits_both() {
        let mut b = block(&[(keys::INFORM, "10.0.0.5")]);
        apply_fields(&FieldSet::default(), &mut b, None);
        assert!(b.is_empty());
    }

    #[test]
    fn test_apply_point_to_point_asymmetry() {
        let ppp0 = LiveInterface {
            ifname: "ppp0".to_string(),
            is_point_to_point: true,
            ..Default::default()
        };
        let mut b = ConfigBlock::new();
        apply_fields(&FieldSet::default(), &mut b, Some(&ppp0));
        // present-but-empty ip_address= stands for auto on p2p links
        assert_eq!(b.get(keys::IP_ADDRESS), Some(""));
        assert!(!b.contains(keys::INFORM));

        let manual = FieldSet {
            auto_configure: false,
            ip_address: "10.1.1.2".to_string(),
            ..Default::default()
        };
        let mut b = ConfigBlock::new();
        apply_fields(&manual, &mut b, Some(&ppp0));
        assert_eq!(b.get(keys::IP_ADDRESS), Some("10.1.1.2"));
    }

    #[test]
    fn test_roundtrip_law() {
        let eth0 = LiveInterface {
            ifname: "eth0".to_string(),
            ..Default::default()
        };
        for fields in [
            FieldSet {
                auto_configure: false,
                ip_address: "192.168.1.5/24".to_string(),
                router: "192.168.1.1".to_string(),
                dns_servers: "8.8.8.8 8.8.4.4".to_string(),
                dns_search: "example.org".to_string(),
            },
            FieldSet {
                auto_configure: true,
                ip_address: "10.0.0.5".to_string(),
                router: "10.0.0.1".to_string(),
                dns_servers: "10.0.0.2".to_string(),
                dns_search: "lan".to_string(),
            },
        ] {
            let mut b = ConfigBlock::new();
            apply_fields(&fields, &mut b, Some(&eth0));
            assert_eq!(derive_fields(&b, Some(&eth0)), fields);
        }
    }

    #[test]
    fn test_apply_is_idempotent_on_committed_blocks() {
        // a block in the user's own directive order, as a commit leaves it
        let committed = block(&[
            (keys::DNS_SEARCH, "example.org"),
            (keys::DNS_SERVERS, ""),
            (keys::IP_ADDRESS, "192.168.1.5/24"),
            (keys::ROUTERS, "192.168.1.1"),
        ]);
        let fields = derive_fields(&committed, None);
        let mut rewritten = committed.clone();
        apply_fields(&fields, &mut rewritten, None);
        // unchanged fields must not move a single directive
        assert_eq!(rewritten.directives(), committed.directives());
    }
}
