//! Converter settings loaded from `fluentconf.toml`.
//!
//! Every field is optional; a missing file means defaults. Command-line flags
//! are applied on top by the CLI.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::fluent::{KnownTypes, LexicalTypes, Translator};

/// Settings filename looked up in the working directory
pub const SETTINGS_FILENAME: &str = "fluentconf.toml";

/// How service keys and argument strings are recognized as class names
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TypeDetection {
    /// Any well-formed namespaced name with an uppercase short name
    #[default]
    Lexical,
    /// Only the names listed in `known_types`
    Known,
}

/// Settings file structure
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub type_detection: TypeDetection,
    pub known_types: Vec<String>,
    pub anchor_paths: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            type_detection: TypeDetection::Lexical,
            known_types: Vec::new(),
            anchor_paths: true,
        }
    }
}

impl Settings {
    /// Load settings from an explicit file.
    pub fn load(path: &Path) -> Result<Self, String> {
        let contents = fs::read_to_string(path)
            .map_err(|err| format!("Failed to read settings file {}: {err}", path.display()))?;
        Self::parse(&contents)
            .map_err(|err| format!("Failed to parse settings file {}: {err}", path.display()))
    }

    /// Load `fluentconf.toml` from `dir` when present, defaults otherwise.
    pub fn discover(dir: &Path) -> Result<Self, String> {
        let path = dir.join(SETTINGS_FILENAME);
        if path.exists() {
            tracing::debug!("Using settings from {}", path.display());
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Build the translator these settings describe.
    pub fn translator(&self) -> Translator {
        let translator = match self.type_detection {
            TypeDetection::Lexical => Translator::new(LexicalTypes),
            TypeDetection::Known => Translator::new(KnownTypes::new(self.known_types.iter())),
        };
        translator.with_anchor_paths(self.anchor_paths)
    }
}
