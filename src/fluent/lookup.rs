//! Known-type detection.
//!
//! The translator never consults a live class registry. Whether a service key
//! or argument string names a class is answered by a `TypeLookup`, either the
//! lexical convention or an explicit set of declared names.

use std::collections::HashSet;
use std::fmt::Debug;

use super::utils::looks_like_class_name;

/// Answers "is this string a class or interface name?".
pub trait TypeLookup: Debug + Send + Sync {
    fn is_known_type(&self, name: &str) -> bool;
}

/// Treats every well-formed namespaced name (`App\Mailer`) as a type.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalTypes;

impl TypeLookup for LexicalTypes {
    fn is_known_type(&self, name: &str) -> bool {
        looks_like_class_name(name)
    }
}

/// Fixed set of declared class/interface names.
///
/// Names are compared without a leading `\`.
#[derive(Debug, Clone, Default)]
pub struct KnownTypes {
    names: HashSet<String>,
}

impl KnownTypes {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|n| n.as_ref().trim_start_matches('\\').to_string())
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl TypeLookup for KnownTypes {
    fn is_known_type(&self, name: &str) -> bool {
        self.names.contains(name.trim_start_matches('\\'))
    }
}
