//! Loading YAML documents into `ConfigNode` trees.
//!
//! Uses serde_yaml for parsing. Mapping order is kept as written, and custom
//! tags (`!tagged_iterator`, `!php/const`, ...) survive as `ConfigNode::Tagged`.
//! Merge keys (`<<: *anchor`) are resolved here, so the tree never holds `<<`.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;

use crate::node::{ConfigNode, Mapping};

/// Errors while turning YAML text into a `ConfigNode` tree
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// YAML syntax error
    #[error("invalid YAML: {0}")]
    Syntax(#[from] serde_yaml::Error),

    /// IO error during file read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Mapping key that is not a scalar (e.g. `? [a, b]: c`)
    #[error("unsupported mapping key: only scalar keys are allowed, got {0}")]
    NonScalarKey(String),

    /// `<<` whose value is not a mapping or a sequence of mappings
    #[error("merge key '<<' expects a mapping or a sequence of mappings, got {0}")]
    InvalidMerge(String),
}

const MERGE_KEY: &str = "<<";

/// Parse YAML source into a configuration tree.
///
/// An empty document yields `ConfigNode::Null`.
pub fn from_yaml_str(source: &str) -> Result<ConfigNode, LoadError> {
    if source.trim().is_empty() {
        return Ok(ConfigNode::Null);
    }
    let value: Value = serde_yaml::from_str(source)?;
    convert(value)
}

/// Read and parse a YAML file.
pub fn from_path(path: &Path) -> Result<ConfigNode, LoadError> {
    let source = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_yaml_str(&source)
}

fn convert(value: Value) -> Result<ConfigNode, LoadError> {
    Ok(match value {
        Value::Null => ConfigNode::Null,
        Value::Bool(b) => ConfigNode::Bool(b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                ConfigNode::Int(i)
            } else {
                // u64 beyond i64::MAX, or a real float
                ConfigNode::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::String(s) => ConfigNode::String(s),
        Value::Sequence(items) => {
            ConfigNode::Sequence(items.into_iter().map(convert).collect::<Result<_, _>>()?)
        }
        Value::Mapping(map) => {
            let mut mapping = Mapping::new();
            for (key, value) in map {
                let key = key_to_string(key)?;
                if key == MERGE_KEY {
                    merge_into(&mut mapping, convert(value)?)?;
                } else {
                    mapping.insert(key, convert(value)?);
                }
            }
            ConfigNode::Mapping(mapping)
        }
        Value::Tagged(tagged) => {
            let tag = tagged.tag.to_string();
            ConfigNode::Tagged {
                tag: tag.trim_start_matches('!').to_string(),
                value: Box::new(convert(tagged.value)?),
            }
        }
    })
}

/// Copy merged entries in at the position of `<<`. Keys already present win,
/// and a later explicit key replaces the merged value in place.
fn merge_into(mapping: &mut Mapping, source: ConfigNode) -> Result<(), LoadError> {
    let sources = match source {
        ConfigNode::Mapping(merged) => vec![merged],
        ConfigNode::Sequence(items) => items
            .into_iter()
            .map(|item| match item {
                ConfigNode::Mapping(merged) => Ok(merged),
                other => Err(LoadError::InvalidMerge(other.to_string())),
            })
            .collect::<Result<_, _>>()?,
        other => return Err(LoadError::InvalidMerge(other.to_string())),
    };
    for merged in sources {
        for (key, value) in merged {
            if !mapping.contains_key(&key) {
                mapping.insert(key, value);
            }
        }
    }
    Ok(())
}

fn key_to_string(key: Value) -> Result<String, LoadError> {
    match key {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok("null".to_string()),
        other => Err(LoadError::NonScalarKey(format!("{other:?}"))),
    }
}
