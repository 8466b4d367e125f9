//! PHP configuration emitter for YAML service definitions.
//!
//! This module is a thin wrapper around the translation pipeline:
//! 1. Load: YAML source -> ConfigNode tree
//! 2. Translate: ConfigNode -> Vec<Stmt> (all container-configuration rules resolved)
//! 3. Emit: ConfigFile -> String (via Emit trait)

use std::path::Path;

use fluentconf_common::{ConfigNode, LoadError, from_path, from_yaml_str};

use super::emit::Emit;
use super::error::TranslateError;
use super::translator::Translator;
use super::types::ConfigFile;

/// Errors from the full YAML-to-PHP conversion
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Translate(#[from] TranslateError),
}

/// Generate a PHP configuration file from a YAML document.
pub fn generate(yaml: &str, translator: &Translator) -> Result<String, ConvertError> {
    // Parse YAML into the generic tree
    let root = from_yaml_str(yaml)?;
    generate_tree(&root, translator)
}

/// Read a YAML file and generate its PHP configuration.
pub fn generate_file(path: &Path, translator: &Translator) -> Result<String, ConvertError> {
    let root = from_path(path)?;
    generate_tree(&root, translator)
}

fn generate_tree(root: &ConfigNode, translator: &Translator) -> Result<String, ConvertError> {
    // Translate to statements (all DI rules resolved here)
    let statements = translator.translate(root)?;

    Ok(ConfigFile { statements }.emit())
}
