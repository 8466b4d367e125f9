//! Argument normalization and option ordering.
//!
//! `normalize` turns any tree value into an argument expression. The ordering
//! helpers turn an option mapping into a positional argument list, either
//! "include the keys that are present, in priority order" or "always include
//! every key, falling back to its default".

use fluentconf_common::{ConfigNode, Mapping};

use super::error::{Result, TranslateError};
use super::translator::Translator;
use super::types::{Expr, Literal};
use super::utils::{dir_suffix, is_relative_path, split_named_argument_key};

impl Translator {
    /// Convert a tree value into a literal / array-construction expression.
    pub fn normalize(&self, node: &ConfigNode) -> Result<Expr> {
        Ok(match node {
            ConfigNode::Null => Expr::null(),
            ConfigNode::Bool(b) => Expr::bool(*b),
            ConfigNode::Int(i) => Expr::int(*i),
            ConfigNode::Float(x) => Expr::Literal(Literal::Float(*x)),
            ConfigNode::String(s) => self.normalize_string(s),
            ConfigNode::Sequence(items) => Expr::List(
                items
                    .iter()
                    .map(|item| self.normalize(item))
                    .collect::<Result<_>>()?,
            ),
            ConfigNode::Mapping(map) => Expr::Map(
                map.iter()
                    .map(|(k, v)| Ok((Expr::string(k), self.normalize(v)?)))
                    .collect::<Result<_>>()?,
            ),
            ConfigNode::Tagged { tag, value } => self.normalize_tagged(tag, value, node)?,
        })
    }

    /// Strings carry the YAML reference conventions:
    /// `@id` service, `@?id` optional service, `@@` escaped `@`.
    fn normalize_string(&self, s: &str) -> Expr {
        if let Some(escaped) = s.strip_prefix("@@") {
            return Expr::string(format!("@{escaped}"));
        }
        if let Some(id) = s.strip_prefix("@?") {
            return Expr::func("service", vec![Expr::string(id)]).call("ignoreOnInvalid", vec![]);
        }
        if let Some(id) = s.strip_prefix('@') {
            return Expr::func("service", vec![Expr::string(id)]);
        }
        self.type_or_string(s)
    }

    fn normalize_tagged(&self, tag: &str, value: &ConfigNode, node: &ConfigNode) -> Result<Expr> {
        match tag {
            "tagged_iterator" | "tagged_locator" => {
                let args = match value {
                    ConfigNode::String(name) => vec![Expr::string(name)],
                    ConfigNode::Mapping(options) if options.contains_key("tag") => {
                        let mut values = ordered_with_defaults(options, &TAGGED_COLLECTION_ARGS);
                        trim_trailing_defaults(&mut values, &vec![ConfigNode::Null; 4], 1);
                        values
                            .iter()
                            .map(|v| self.normalize(v))
                            .collect::<Result<_>>()?
                    }
                    _ => return Err(TranslateError::unsupported(format!("!{tag}"), node)),
                };
                Ok(Expr::func(tag, args))
            }
            "php/const" => {
                let (class, name) = value
                    .as_str()
                    .and_then(|s| s.split_once("::"))
                    .ok_or_else(|| TranslateError::unsupported("!php/const", node))?;
                Ok(Expr::ConstRef {
                    class: class.trim_start_matches('\\').to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(TranslateError::unsupported("tagged value", node)),
        }
    }

    /// `Name::class` when the string is a known type, a string literal otherwise.
    pub(crate) fn type_or_string(&self, s: &str) -> Expr {
        if self.types().is_known_type(s) {
            Expr::class_ref(s)
        } else {
            Expr::string(s)
        }
    }

    /// (`class`, `argument`) for a `Type $argument` key whose type the lookup knows.
    pub(crate) fn named_argument_key<'k>(&self, key: &'k str) -> Option<(&'k str, &'k str)> {
        split_named_argument_key(key).filter(|(class, _)| self.types().is_known_type(class))
    }

    /// Expression for a service id used as the first argument of
    /// `set()` / `alias()` / `load()`.
    ///
    /// `App\Mailer $transport` becomes `\App\Mailer::class . ' $transport'`.
    pub(crate) fn service_key_expr(&self, key: &str) -> Expr {
        if let Some((class, argument)) = self.named_argument_key(key) {
            return Expr::concat(Expr::class_ref(class), Expr::string(format!(" ${argument}")));
        }
        self.type_or_string(key)
    }

    /// Expression for a file path or glob, anchored on `__DIR__` when relative.
    pub(crate) fn path_expr(&self, node: &ConfigNode) -> Result<Expr> {
        match node.as_str() {
            Some(path) if self.anchor_paths() && is_relative_path(path) => {
                Ok(Expr::concat(Expr::Dir, Expr::string(dir_suffix(path))))
            }
            Some(path) => Ok(Expr::string(path)),
            None => self.normalize(node),
        }
    }
}

/// Positional arguments of `tagged_iterator()` / `tagged_locator()`.
const TAGGED_COLLECTION_ARGS: [(&str, ConfigNode); 4] = [
    ("tag", ConfigNode::Null),
    ("index_by", ConfigNode::Null),
    ("default_index_method", ConfigNode::Null),
    ("default_priority_method", ConfigNode::Null),
];

/// Values of the keys present in `options`, in `priority` order.
pub fn ordered_present<'a>(options: &'a Mapping, priority: &[&str]) -> Vec<&'a ConfigNode> {
    priority.iter().filter_map(|key| options.get(key)).collect()
}

/// One value per `(key, default)` pair, in that order; missing keys take the default.
pub fn ordered_with_defaults(options: &Mapping, defaults: &[(&str, ConfigNode)]) -> Vec<ConfigNode> {
    defaults
        .iter()
        .map(|(key, default)| options.get(key).unwrap_or(default).clone())
        .collect()
}

/// Drop the contiguous trailing run of values equal to their default.
///
/// Never drops a value followed by a non-default one, and always keeps the
/// first `keep` values.
pub fn trim_trailing_defaults(values: &mut Vec<ConfigNode>, defaults: &[ConfigNode], keep: usize) {
    while values.len() > keep {
        let last = values.len() - 1;
        if defaults.get(last) == Some(&values[last]) {
            values.pop();
        } else {
            break;
        }
    }
}
