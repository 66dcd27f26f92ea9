// dhcpcd-prefs - Block Storage
// SPDX-License-Identifier: MIT

//! Configuration block storage.
//!
//! Blocks are addressed by `(Category, name)`. The file-backed store
//! edits a dhcpcd.conf-style file: a global section followed by
//! `interface <name>` / `ssid <name>` headers, each introducing an
//! ordered run of directive lines. Saving rewrites only the directives
//! the block still carries; the global section, every other block, and
//! comment and blank lines inside the edited block survive the rewrite.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::models::{Category, ConfigBlock, Directive, Error, Result};

/// Ordered key-value access to persisted blocks.
pub trait ConfigStore {
    /// Load a block. A missing block is an empty block, not an error.
    fn load(&self, category: Category, name: &str) -> Result<ConfigBlock>;

    /// Persist a block. Saving an empty block removes it.
    fn save(&mut self, category: Category, name: &str, block: &ConfigBlock) -> Result<()>;
}

/// In-memory store, used by tests and as a scratch fixture.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blocks: HashMap<(Category, String), ConfigBlock>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct read access for assertions.
    pub fn block(&self, category: Category, name: &str) -> Option<&ConfigBlock> {
        self.blocks.get(&(category, name.to_string()))
    }
}

impl ConfigStore for MemoryStore {
    fn load(&self, category: Category, name: &str) -> Result<ConfigBlock> {
        Ok(self
            .block(category, name)
            .cloned()
            .unwrap_or_default())
    }

    fn save(&mut self, category: Category, name: &str, block: &ConfigBlock) -> Result<()> {
        let key = (category, name.to_string());
        if block.is_empty() {
            self.blocks.remove(&key);
        } else {
            self.blocks.insert(key, block.clone());
        }
        Ok(())
    }
}

/// File-backed store over a dhcpcd.conf-style file.
#[derive(Debug, Clone)]
pub struct ConfFileStore {
    path: PathBuf,
}

/// One run of lines in the file: the leading global section
/// (`header == None`) or a named block.
struct Section {
    header: Option<(Category, String)>,
    lines: Vec<String>,
}

impl ConfFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<String> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(Error::Store(format!("read {}: {}", self.path.display(), e))),
        }
    }

    fn parse_sections(content: &str) -> Vec<Section> {
        let mut sections = vec![Section {
            header: None,
            lines: Vec::new(),
        }];
        for line in content.lines() {
            let trimmed = line.trim();
            let header = trimmed
                .split_once(' ')
                .and_then(|(kw, rest)| Some((Category::parse(kw)?, rest.trim().to_string())));
            match header {
                Some(header) => sections.push(Section {
                    header: Some(header),
                    lines: Vec::new(),
                }),
                None => sections
                    .last_mut()
                    .expect("global section always present")
                    .lines
                    .push(line.to_string()),
            }
        }
        sections
    }

    fn render(sections: &[Section]) -> String {
        let mut out = String::new();
        for section in sections {
            if let Some((category, name)) = &section.header {
                out.push_str(category.as_str());
                out.push(' ');
                out.push_str(name);
                out.push('\n');
            }
            for line in &section.lines {
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }
}

impl ConfigStore for ConfFileStore {
    fn load(&self, category: Category, name: &str) -> Result<ConfigBlock> {
        let content = self.read()?;
        let sections = Self::parse_sections(&content);
        let block = sections
            .iter()
            .find(|s| {
                s.header
                    .as_ref()
                    .is_some_and(|(c, n)| *c == category && n == name)
            })
            .map(|s| {
                s.lines
                    .iter()
                    .map(|l| l.trim())
                    .filter(|l| !l.is_empty() && !l.starts_with('#'))
                    .map(parse_directive)
                    .collect()
            })
            .unwrap_or_default();
        debug!("loaded block {}/{}", category, name);
        Ok(block)
    }

    fn save(&mut self, category: Category, name: &str, block: &ConfigBlock) -> Result<()> {
        let content = self.read()?;
        let mut sections = Self::parse_sections(&content);
        let matches = |s: &Section| {
            s.header
                .as_ref()
                .is_some_and(|(c, n)| *c == category && n == name)
        };

        match sections.iter_mut().find(|s| matches(*s)) {
            Some(section) if block.is_empty() => {
                // removing the lines alone would leave a dangling header
                section.header = None;
                section.lines.clear();
            }
            Some(section) => section.lines = merge_lines(&section.lines, block),
            None if block.is_empty() => {}
            None => sections.push(Section {
                header: Some((category, name.to_string())),
                lines: block.directives().iter().map(render_directive).collect(),
            }),
        }

        let rendered = Self::render(&sections);
        fs::write(&self.path, rendered)
            .map_err(|e| Error::Store(format!("write {}: {}", self.path.display(), e)))?;
        info!("saved block {}/{} ({} directives)", category, name, block.len());
        Ok(())
    }
}

/// Rewrite a block's lines from its edited directives.
///
/// Comment and blank lines keep their place, and each directive line
/// still carried by the block is re-rendered in place, so an untouched
/// line survives the rewrite as it was. Lines whose key the block no
/// longer holds are dropped; new keys are appended at the end.
fn merge_lines(lines: &[String], block: &ConfigBlock) -> Vec<String> {
    let mut remaining: Vec<&Directive> = block.directives().iter().collect();
    let mut merged = Vec::with_capacity(lines.len());
    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            merged.push(line.clone());
            continue;
        }
        let key = parse_directive(trimmed).key;
        if let Some(pos) = remaining.iter().position(|d| d.key == key) {
            merged.push(render_directive(remaining.remove(pos)));
        }
    }
    merged.extend(remaining.iter().map(|d| render_directive(d)));
    merged
}

/// Parse one directive line.
///
/// Only `static`-prefixed options carry their value behind a `=`; their
/// key keeps the trailing `=` so the prefix is restored on render. Any
/// other line splits on the first space, so a `=` inside the value
/// (`env force_hostname=true`) stays part of the value.
fn parse_directive(line: &str) -> Directive {
    if let Some(stripped) = line.strip_prefix("static ") {
        if let Some(eq) = stripped.find('=') {
            let (key, value) = stripped.split_at(eq + 1);
            return Directive::new(key, Some(value));
        }
    }
    match line.split_once(' ') {
        Some((key, value)) => Directive::new(key, Some(value.trim())),
        None => Directive::new(line, None),
    }
}

fn render_directive(directive: &Directive) -> String {
    let value = directive.value.as_deref().unwrap_or("");
    if directive.key.ends_with('=') {
        format!("static {}{}", directive.key, value)
    } else if value.is_empty() {
        directive.key.clone()
    } else {
        format!("{} {}", directive.key, value)
    }
}
