//! Shared document model for fluentconf.
//!
//! This crate contains the generic configuration tree (`ConfigNode`) that the
//! translator consumes, plus loading of YAML documents into that tree. It is
//! used by both the translation library and the `fluentconf` CLI.

pub mod load;
pub mod node;

// Re-export commonly used types
pub use load::{LoadError, from_path, from_yaml_str};
pub use node::{ConfigNode, Mapping};
