//! Translation errors.
//!
//! Both kinds are deterministic and abort the whole document: the caller gets
//! either every statement or one of these.

use fluentconf_common::ConfigNode;

/// Errors raised while translating a configuration tree
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TranslateError {
    /// A recognized section holds a value shape with no translation rule
    #[error("unsupported construct in {context}: {value}")]
    UnsupportedConstruct { context: String, value: String },

    /// A key where the grammar does not expect one
    #[error("unexpected key '{key}' in {context}")]
    UnexpectedKey { key: String, context: String },
}

impl TranslateError {
    /// Create unsupported-construct error for a value
    pub fn unsupported(context: impl Into<String>, value: &ConfigNode) -> Self {
        Self::UnsupportedConstruct {
            context: context.into(),
            value: value.to_string(),
        }
    }

    /// Create unexpected-key error
    pub fn unexpected_key(key: impl Into<String>, context: impl Into<String>) -> Self {
        Self::UnexpectedKey {
            key: key.into(),
            context: context.into(),
        }
    }

    /// Offending key, if this is an `UnexpectedKey`.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::UnexpectedKey { key, .. } => Some(key),
            Self::UnsupportedConstruct { .. } => None,
        }
    }
}

/// Result type for translation
pub type Result<T> = std::result::Result<T, TranslateError>;
