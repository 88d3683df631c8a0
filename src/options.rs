//! Resolution options: page fallbacks and per-kind default declarations.

use serde_json::Value;

use crate::node::{Declaration, NodeKind, Orientation};

/// Fallbacks used when a page declares nothing better.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageDefaults {
    /// Device resolution used when the page has no `dpi` prop.
    pub dpi: f32,
    /// Orientation used when the page has no `orientation` prop.
    pub orientation: Orientation,
    /// Base font size for `rem` units when the page declares no `fontSize`.
    pub rem_base: f32,
}

impl Default for PageDefaults {
    fn default() -> Self {
        Self {
            dpi: 72.0,
            orientation: Orientation::Portrait,
            rem_base: 18.0,
        }
    }
}

/// Default declarations merged underneath a node's own style, keyed by kind.
///
/// The defaults come first in merge order, so authored values always win.
#[derive(Clone, Debug, PartialEq)]
pub struct KindDefaults {
    table: Vec<(NodeKind, Declaration)>,
}

impl KindDefaults {
    /// Table with no defaults for any kind.
    pub fn empty() -> Self {
        Self { table: Vec::new() }
    }

    /// Set the defaults for `kind`, replacing any previous entry.
    pub fn with(mut self, kind: NodeKind, declaration: Declaration) -> Self {
        match self.table.iter_mut().find(|(k, _)| *k == kind) {
            Some(entry) => entry.1 = declaration,
            None => self.table.push((kind, declaration)),
        }
        self
    }

    /// Defaults for `kind`, if any.
    pub fn get(&self, kind: &NodeKind) -> Option<&Declaration> {
        self.table
            .iter()
            .find_map(|(k, declaration)| (k == kind).then_some(declaration))
    }

    /// Fallback styling for hyperlinks.
    pub fn link_declaration() -> Declaration {
        let mut declaration = Declaration::new();
        declaration.insert("color".into(), Value::from("blue"));
        declaration.insert("textDecoration".into(), Value::from("underline"));
        declaration
    }
}

impl Default for KindDefaults {
    fn default() -> Self {
        Self::empty().with(NodeKind::Link, Self::link_declaration())
    }
}

/// Options for a whole resolve pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleOptions {
    /// Page context fallbacks.
    pub page: PageDefaults,
    /// Per-kind default declarations.
    pub kind_defaults: KindDefaults,
}
