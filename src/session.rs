// dhcpcd-prefs - Editor Session
// SPDX-License-Identifier: MIT

//! The editing state machine.
//!
//! One session exists per open editor. It tracks the selected category
//! and name, owns the working copy of the selected block, and commits
//! that copy back through the store at every transition that changes the
//! selection or closes the session. Edits are therefore never lost, and
//! an unchanged working copy re-commits to a byte-identical block.

use tracing::{debug, warn};

use crate::dbus_client::{BlockCatalog, RebindDispatcher};
use crate::models::validation::{is_valid_address, is_valid_address_list};
use crate::models::{Category, ClassifiedName, ConfigBlock, LiveInterface, LiveStateIndex};
use crate::reconcile::{self, FieldSet};
use crate::store::ConfigStore;

/// Free-text field of the editor, named for the directive it feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    IpAddress,
    Router,
    DnsServers,
    DnsSearch,
}

/// The selection/commit state machine driving one editor window.
pub struct EditorSession<S, C, R>
where
    S: ConfigStore,
    C: BlockCatalog,
    R: RebindDispatcher,
{
    store: S,
    catalog: C,
    dispatcher: R,
    live: LiveStateIndex,

    category: Option<Category>,
    selected_name: Option<String>,
    working: Option<ConfigBlock>,
    /// Snapshot of the live interface matching the selected name, taken at
    /// selection time. `None` for SSID blocks and vanished interfaces.
    matched: Option<LiveInterface>,
    fields: FieldSet,
    names: Vec<ClassifiedName>,
    selector_enabled: bool,
}

impl<S, C, R> EditorSession<S, C, R>
where
    S: ConfigStore,
    C: BlockCatalog,
    R: RebindDispatcher,
{
    pub fn new(store: S, catalog: C, dispatcher: R, live: LiveStateIndex) -> Self {
        Self {
            store,
            catalog,
            dispatcher,
            live,
            category: None,
            selected_name: None,
            working: None,
            matched: None,
            fields: FieldSet::default(),
            names: Vec::new(),
            selector_enabled: false,
        }
    }

    /// Replace the live snapshot. Takes effect on the next operation; the
    /// current selection keeps the interface snapshot it matched at
    /// selection time.
    pub fn set_live(&mut self, live: LiveStateIndex) {
        self.live = live;
    }

    /// Open the editor on its default category.
    pub fn open(&mut self, default_category: Category) {
        self.select_category(default_category);
    }

    /// Switch category, committing any in-progress edit first.
    ///
    /// A catalog fetch failure is logged and leaves an empty, disabled
    /// name list; the prior commit is not rolled back.
    pub fn select_category(&mut self, category: Category) {
        self.commit();
        self.selected_name = None;
        self.working = None;
        self.matched = None;
        self.fields = FieldSet::default();
        self.category = Some(category);
        self.names = Vec::new();
        self.selector_enabled = false;

        let catalog_names = match self.catalog.config_blocks(category) {
            Ok(names) => names,
            Err(e) => {
                warn!("GetConfigBlocks: {}", e);
                return;
            }
        };
        self.names = reconcile::classify(&catalog_names, &self.live, category);
        self.selector_enabled = !self.names.is_empty();
    }

    /// Switch to another block name, committing the previous one first.
    /// `None` deselects and disables editing.
    pub fn select_name(&mut self, name: Option<&str>) {
        if self.selected_name.as_deref() == name {
            return;
        }
        self.commit();
        self.selected_name = name.map(str::to_string);
        self.working = None;
        self.matched = None;
        self.fields = FieldSet::default();

        let Some(name) = name else {
            return;
        };
        let Some(category) = self.category else {
            warn!("name {:?} selected before any category", name);
            self.selected_name = None;
            return;
        };

        if category == Category::Interface {
            // a vanished interface simply yields no match
            self.matched = self.live.find(name).cloned();
        }
        let block = match self.store.load(category, name) {
            Ok(block) => block,
            Err(e) => {
                warn!("load {}/{}: {}", category, name, e);
                ConfigBlock::new()
            }
        };
        self.fields = reconcile::derive_fields(&block, self.matched.as_ref());
        self.working = Some(block);
    }

    /// Toggle automatic configuration.
    pub fn set_auto_configure(&mut self, on: bool) {
        if self.controls_enabled() {
            self.fields.auto_configure = on;
        }
    }

    /// Store a raw field edit, applying the destructive correction: input
    /// that fails validation resets the field to empty.
    pub fn edit_field(&mut self, field: TextField, raw: &str) {
        if !self.controls_enabled() {
            return;
        }
        let valid = match field {
            TextField::IpAddress => raw.is_empty() || is_valid_address(raw, true),
            TextField::Router | TextField::DnsServers => is_valid_address_list(raw),
            TextField::DnsSearch => true,
        };
        let value = if valid { raw.to_string() } else { String::new() };
        match field {
            TextField::IpAddress => self.fields.ip_address = value,
            TextField::Router => self.fields.router = value,
            TextField::DnsServers => self.fields.dns_servers = value,
            TextField::DnsSearch => self.fields.dns_search = value,
        }
    }

    /// Replace the working copy with an empty block and persist that,
    /// resetting the fields to their defaults.
    pub fn clear(&mut self) {
        let (Some(category), Some(name)) = (self.category, self.selected_name.clone()) else {
            return;
        };
        let block = ConfigBlock::new();
        match self.store.save(category, &name, &block) {
            Ok(()) => {
                self.mark_persisted(&name, false);
                self.fields = reconcile::derive_fields(&block, self.matched.as_ref());
                self.working = Some(block);
            }
            Err(e) => warn!("save {}/{}: {}", category, name, e),
        }
    }

    /// Commit, then ask the daemon to re-negotiate the lease of every
    /// live interface the committed block applies to. Dispatch failures
    /// are logged and absorbed; the commit stands.
    pub fn rebind(&mut self) {
        let (Some(category), Some(name)) = (self.category, self.selected_name.clone()) else {
            return;
        };
        if !self.commit() {
            return;
        }
        if self.working.as_ref().map_or(true, ConfigBlock::is_empty) {
            return;
        }

        let targets: Vec<String> = match category {
            Category::Interface => vec![name],
            Category::Ssid => self
                .live
                .interfaces()
                .iter()
                .filter(|i| i.current_ssid.as_deref() == Some(name.as_str()))
                .map(|i| i.ifname.clone())
                .collect(),
        };
        for ifname in targets {
            if let Err(e) = self.dispatcher.rebind(&ifname) {
                tracing::error!("Rebind: {}: {}", ifname, e);
            }
        }
    }

    /// Commit any pending edit and discard all session state.
    pub fn close(&mut self) {
        self.commit();
        self.category = None;
        self.selected_name = None;
        self.working = None;
        self.matched = None;
        self.fields = FieldSet::default();
        self.names = Vec::new();
        self.selector_enabled = false;
    }

    /// Persist the working copy.
    ///
    /// On success the classified list reflects whether the name still has
    /// a block. On failure nothing changes and `false` is returned; the
    /// save is not retried.
    fn commit(&mut self) -> bool {
        let (Some(category), Some(name)) = (self.category, self.selected_name.clone()) else {
            return true;
        };
        let Some(current) = self.working.as_ref() else {
            return true;
        };

        let mut block = current.clone();
        reconcile::apply_fields(&self.fields, &mut block, self.matched.as_ref());
        match self.store.save(category, &name, &block) {
            Ok(()) => {
                debug!("committed {}/{} ({} directives)", category, name, block.len());
                self.mark_persisted(&name, !block.is_empty());
                self.fields = reconcile::derive_fields(&block, self.matched.as_ref());
                self.working = Some(block);
                true
            }
            Err(e) => {
                warn!("save {}/{}: {}", category, name, e);
                false
            }
        }
    }

    fn mark_persisted(&mut self, name: &str, persisted: bool) {
        if let Some(entry) = self.names.iter_mut().find(|e| e.name == name) {
            entry.has_persisted_block = persisted;
        }
    }

    // ========================================================================
    // Observable state for a frontend
    // ========================================================================

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn selected_name(&self) -> Option<&str> {
        self.selected_name.as_deref()
    }

    /// The classified name list for the selected category.
    pub fn names(&self) -> &[ClassifiedName] {
        &self.names
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    /// Whether the name selector has anything to offer.
    pub fn name_selector_enabled(&self) -> bool {
        self.selector_enabled
    }

    /// Whether the field controls and action buttons are usable.
    pub fn controls_enabled(&self) -> bool {
        self.selected_name.is_some()
    }

    /// The address entry is only editable for a matched interface that is
    /// not point-to-point.
    pub fn address_enabled(&self) -> bool {
        self.matched.as_ref().is_some_and(|i| !i.is_point_to_point)
    }
}
