//! Generic configuration tree.
//!
//! A `ConfigNode` is what a parsed service-configuration document looks like
//! before translation: scalars, sequences and mappings whose keys keep their
//! document order.

use std::fmt;

use indexmap::IndexMap;

/// A node of a decoded configuration document.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigNode {
    /// `~` / `null` / empty value
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Sequence(Vec<ConfigNode>),
    Mapping(Mapping),
    /// Value carrying a custom tag, e.g. `!tagged_iterator app.handler`.
    /// The tag is stored without its leading `!`.
    Tagged { tag: String, value: Box<ConfigNode> },
}

impl ConfigNode {
    /// Build a string node.
    pub fn string(value: impl Into<String>) -> Self {
        ConfigNode::String(value.into())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigNode::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigNode::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            ConfigNode::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[ConfigNode]> {
        match self {
            ConfigNode::Sequence(items) => Some(items),
            _ => None,
        }
    }
}

/// Renders the node in YAML flow style, e.g. `{public: false, tags: [a]}`.
impl fmt::Display for ConfigNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigNode::Null => f.write_str("null"),
            ConfigNode::Bool(b) => write!(f, "{b}"),
            ConfigNode::Int(i) => write!(f, "{i}"),
            ConfigNode::Float(x) => write!(f, "{x}"),
            ConfigNode::String(s) => write!(f, "{s:?}"),
            ConfigNode::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            ConfigNode::Mapping(map) => write!(f, "{map}"),
            ConfigNode::Tagged { tag, value } => write!(f, "!{tag} {value}"),
        }
    }
}

impl From<&str> for ConfigNode {
    fn from(value: &str) -> Self {
        ConfigNode::String(value.to_string())
    }
}

impl From<bool> for ConfigNode {
    fn from(value: bool) -> Self {
        ConfigNode::Bool(value)
    }
}

impl From<i64> for ConfigNode {
    fn from(value: i64) -> Self {
        ConfigNode::Int(value)
    }
}

/// Ordered string-keyed mapping.
///
/// Keys are unique; insertion order is document order. Equality compares
/// entries in order.
#[derive(Debug, Clone, Default)]
pub struct Mapping {
    entries: IndexMap<String, ConfigNode>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing an existing key in place.
    pub fn insert(&mut self, key: impl Into<String>, value: ConfigNode) {
        self.entries.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&ConfigNode> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&str, &ConfigNode)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Copy of this mapping without the given keys, order preserved.
    pub fn without(&self, keys: &[&str]) -> Mapping {
        self.filtered(|k| !keys.contains(&k))
    }

    /// Split into (entries matching `pred`, the rest), both order preserving.
    pub fn partition_keys(&self, pred: impl Fn(&str) -> bool) -> (Mapping, Mapping) {
        (self.filtered(&pred), self.filtered(|k| !pred(k)))
    }

    fn filtered(&self, keep: impl Fn(&str) -> bool) -> Mapping {
        Mapping {
            entries: self
                .entries
                .iter()
                .filter(|(k, _)| keep(k.as_str()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }
}

impl PartialEq for Mapping {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.entries.iter().eq(other.entries.iter())
    }
}

impl FromIterator<(String, ConfigNode)> for Mapping {
    fn from_iter<T: IntoIterator<Item = (String, ConfigNode)>>(iter: T) -> Self {
        Mapping {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Mapping {
    type Item = (String, ConfigNode);
    type IntoIter = indexmap::map::IntoIter<String, ConfigNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl fmt::Display for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k}: {v}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Mapping {
        [
            ("class".to_string(), ConfigNode::from("App\\Mailer")),
            ("public".to_string(), ConfigNode::from(false)),
            ("decoration_priority".to_string(), ConfigNode::from(5_i64)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_insert_keeps_order_and_replaces() {
        let mut map = sample();
        map.insert("public", ConfigNode::from(true));
        map.insert("lazy", ConfigNode::from(true));
        let keys: Vec<_> = map.keys().collect();
        assert_eq!(keys, vec!["class", "public", "decoration_priority", "lazy"]);
        assert_eq!(map.get("public"), Some(&ConfigNode::Bool(true)));
    }

    #[test]
    fn test_without() {
        let map = sample().without(&["class"]);
        assert_eq!(map.len(), 2);
        assert!(!map.contains_key("class"));
    }

    #[test]
    fn test_partition_keys() {
        let (decoration, rest) = sample().partition_keys(|k| k.starts_with("decoration_"));
        assert_eq!(decoration.keys().collect::<Vec<_>>(), vec!["decoration_priority"]);
        assert_eq!(rest.keys().collect::<Vec<_>>(), vec!["class", "public"]);
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let reversed: Mapping = sample()
            .iter()
            .rev()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        assert_ne!(reversed, sample());
        assert_eq!(sample().without(&[]), sample());
    }

    #[test]
    fn test_large_mapping_lookup() {
        let map: Mapping = (0..20_000_i64)
            .map(|i| (format!("app.service_{i}"), ConfigNode::from(i)))
            .collect();
        assert_eq!(map.len(), 20_000);
        assert_eq!(map.get("app.service_19999"), Some(&ConfigNode::Int(19_999)));
        assert_eq!(map.keys().next(), Some("app.service_0"));
        assert_eq!(map.keys().last(), Some("app.service_19999"));
    }

    #[test]
    fn test_display_flow_style() {
        let node = ConfigNode::Mapping(sample());
        assert_eq!(
            node.to_string(),
            r#"{class: "App\\Mailer", public: false, decoration_priority: 5}"#
        );
        let seq = ConfigNode::Sequence(vec![ConfigNode::Null, ConfigNode::Float(1.5)]);
        assert_eq!(seq.to_string(), "[null, 1.5]");
    }
}
