// dhcpcd-prefs - Shared Models
// SPDX-License-Identifier: MIT

//! Value types shared across the editor engine:
//!
//! - **Block**: categories, directives, and ordered configuration blocks
//! - **Interface**: the live interface snapshot fed in from the system
//! - **Validation**: address syntax checks
//! - **Config**: application settings
//! - **Error**: shared error types

pub mod block;
pub mod config;
pub mod error;
pub mod interface;
pub mod validation;

// Re-export main types for convenience
pub use block::{keys, Category, ClassifiedName, ConfigBlock, Directive};
pub use config::AppConfig;
pub use error::{Error, Result};
pub use interface::{LiveInterface, LiveStateIndex};
