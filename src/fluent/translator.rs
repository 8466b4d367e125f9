//! Translator configuration shared by every rule.

use std::sync::Arc;

use super::lookup::{LexicalTypes, TypeLookup};

/// Holds the injected type lookup and output options for a translation.
///
/// A `Translator` carries no per-document state, so one instance can
/// translate many documents, including from several threads at once.
#[derive(Debug, Clone)]
pub struct Translator {
    types: Arc<dyn TypeLookup>,
    anchor_paths: bool,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(LexicalTypes)
    }
}

impl Translator {
    pub fn new(types: impl TypeLookup + 'static) -> Self {
        Self {
            types: Arc::new(types),
            anchor_paths: true,
        }
    }

    /// Render relative resource paths as `__DIR__ . '/path'` (default) or
    /// keep them as plain strings.
    pub fn with_anchor_paths(mut self, anchor_paths: bool) -> Self {
        self.anchor_paths = anchor_paths;
        self
    }

    pub fn types(&self) -> &dyn TypeLookup {
        self.types.as_ref()
    }

    pub fn anchor_paths(&self) -> bool {
        self.anchor_paths
    }
}
