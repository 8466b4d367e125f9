//! Builders for the irregular multi-key service options.
//!
//! Each builder takes the chain built so far and returns it with the new
//! calls appended:
//! - `decorate`: `decorates` plus the absorbed `decoration_*` keys
//! - `deprecate`: string or `{package, version, message}` form
//! - `tags`: shorthand single tag or one `tag()` per entry
//! - `calls`: one `call()` per configured method call

use fluentconf_common::{ConfigNode, Mapping};

use super::args::{ordered_with_defaults, trim_trailing_defaults};
use super::error::{Result, TranslateError};
use super::translator::Translator;
use super::types::Expr;
use super::utils::{CONTAINER_INTERFACE, strip_reference_prefix};

/// Optional positional arguments of `decorate()` after the decorated id.
const DECORATION_OPTIONS: [(&str, ConfigNode); 3] = [
    ("decoration_inner_name", ConfigNode::Null),
    ("decoration_priority", ConfigNode::Int(0)),
    ("decoration_on_invalid", ConfigNode::Null),
];

/// Optional positional arguments of `deprecate()`.
const DEPRECATION_OPTIONS: [(&str, ConfigNode); 3] = [
    ("package", ConfigNode::String(String::new())),
    ("version", ConfigNode::String(String::new())),
    ("message", ConfigNode::String(String::new())),
];

/// `decorate(id, innerName = null, priority = 0, onInvalid = null)`
///
/// Only the trailing run of defaulted arguments is elided, so an explicit
/// priority keeps the `null` inner-name placeholder in front of it.
pub fn decorate(
    translator: &Translator,
    decorates: &ConfigNode,
    decoration: &Mapping,
    chain: Expr,
) -> Result<Expr> {
    let id = decorates
        .as_str()
        .ok_or_else(|| TranslateError::unsupported("decorates", decorates))?;

    let mut values = vec![decorates.clone()];
    values.extend(ordered_with_defaults(decoration, &DECORATION_OPTIONS));
    let defaults: Vec<ConfigNode> = std::iter::once(ConfigNode::Null)
        .chain(DECORATION_OPTIONS.iter().map(|(_, default)| default.clone()))
        .collect();
    trim_trailing_defaults(&mut values, &defaults, 1);

    let mut args = vec![translator.type_or_string(strip_reference_prefix(id))];
    for (index, value) in values.iter().enumerate().skip(1) {
        let arg = if index == 3 {
            on_invalid_constant(value)
        } else {
            translator.normalize(value)?
        };
        args.push(arg);
    }
    Ok(chain.call("decorate", args))
}

/// `exception` -> EXCEPTION_ON_INVALID_REFERENCE, anything else -> IGNORE_ON_INVALID_REFERENCE
fn on_invalid_constant(value: &ConfigNode) -> Expr {
    let name = if value.as_str() == Some("exception") {
        "EXCEPTION_ON_INVALID_REFERENCE"
    } else {
        "IGNORE_ON_INVALID_REFERENCE"
    };
    Expr::ConstRef {
        class: CONTAINER_INTERFACE.to_string(),
        name: name.to_string(),
    }
}

/// `deprecate(message)` or `deprecate(package, version, message)`
pub fn deprecate(translator: &Translator, value: &ConfigNode, chain: Expr) -> Result<Expr> {
    let args = match value {
        ConfigNode::String(_) | ConfigNode::Int(_) | ConfigNode::Float(_) => {
            vec![translator.normalize(value)?]
        }
        ConfigNode::Mapping(options) => ordered_with_defaults(options, &DEPRECATION_OPTIONS)
            .iter()
            .map(|v| translator.normalize(v))
            .collect::<Result<_>>()?,
        other => return Err(TranslateError::unsupported("deprecated", other)),
    };
    Ok(chain.call("deprecate", args))
}

/// Tag calls.
///
/// `tags: [name]` is always exactly one `tag('name')`. Otherwise every entry
/// becomes its own `tag()` call with `name` as first argument and the other
/// attributes as an array.
pub fn tags(translator: &Translator, value: &ConfigNode, chain: Expr) -> Result<Expr> {
    let entries = value
        .as_sequence()
        .ok_or_else(|| TranslateError::unsupported("tags", value))?;

    if let [ConfigNode::String(name)] = entries {
        return Ok(chain.call("tag", vec![Expr::string(name)]));
    }

    entries.iter().try_fold(chain, |chain, entry| match entry {
        ConfigNode::String(name) => Ok(chain.call("tag", vec![Expr::string(name)])),
        ConfigNode::Mapping(attributes) => {
            Ok(chain.call("tag", tag_arguments(translator, attributes)?))
        }
        other => Err(TranslateError::unsupported("tags", other)),
    })
}

fn tag_arguments(translator: &Translator, attributes: &Mapping) -> Result<Vec<Expr>> {
    let mut args = Vec::new();

    match attributes.get("name") {
        Some(ConfigNode::String(name)) => args.push(Expr::string(name)),
        Some(name) => args.push(translator.normalize(name)?),
        None => {
            // `- app.listener: { event: foo }` names the tag by its only key
            if let Some((name, ConfigNode::Mapping(nested))) = single_entry(attributes) {
                args.push(Expr::string(name));
                if !nested.is_empty() {
                    args.push(translator.normalize(&ConfigNode::Mapping(nested.clone()))?);
                }
                return Ok(args);
            }
        }
    }

    let rest = attributes.without(&["name"]);
    if !rest.is_empty() {
        args.push(translator.normalize(&ConfigNode::Mapping(rest))?);
    }
    Ok(args)
}

fn single_entry(map: &Mapping) -> Option<(&str, &ConfigNode)> {
    if map.len() == 1 { map.iter().next() } else { None }
}

/// `call(method, [arguments], returnsClone)` per entry.
///
/// Entries may be `[method, [args], returnsClone?]`,
/// `{method: m, arguments: [...], returns_clone: bool}` or `{m: [...]}`.
pub fn calls(translator: &Translator, value: &ConfigNode, chain: Expr) -> Result<Expr> {
    let entries = value
        .as_sequence()
        .ok_or_else(|| TranslateError::unsupported("calls", value))?;

    entries.iter().try_fold(chain, |chain, entry| {
        let (method, arguments, returns_clone) = call_parts(entry)?;

        let mut args = vec![Expr::string(method)];
        if let Some(arguments) = arguments {
            args.push(call_arguments(translator, arguments)?);
        }
        if returns_clone {
            if args.len() == 1 {
                args.push(Expr::List(Vec::new()));
            }
            args.push(Expr::bool(true));
        }
        Ok(chain.call("call", args))
    })
}

fn call_parts(entry: &ConfigNode) -> Result<(&str, Option<&ConfigNode>, bool)> {
    let unsupported = || TranslateError::unsupported("calls", entry);

    match entry {
        ConfigNode::Sequence(parts) => {
            let method = parts.first().and_then(ConfigNode::as_str).ok_or_else(unsupported)?;
            let returns_clone = match parts.get(2) {
                None => false,
                Some(flag) => flag.as_bool().ok_or_else(unsupported)?,
            };
            if parts.len() > 3 {
                return Err(unsupported());
            }
            Ok((method, parts.get(1), returns_clone))
        }
        ConfigNode::Mapping(map) if map.contains_key("method") => {
            let method = map.get("method").and_then(ConfigNode::as_str).ok_or_else(unsupported)?;
            let returns_clone = match map.get("returns_clone") {
                None => false,
                Some(flag) => flag.as_bool().ok_or_else(unsupported)?,
            };
            Ok((method, map.get("arguments"), returns_clone))
        }
        ConfigNode::Mapping(map) => {
            let (method, arguments) = single_entry(map).ok_or_else(unsupported)?;
            Ok((method, Some(arguments), false))
        }
        _ => Err(unsupported()),
    }
}

fn call_arguments(translator: &Translator, arguments: &ConfigNode) -> Result<Expr> {
    match arguments {
        ConfigNode::Null => Ok(Expr::List(Vec::new())),
        ConfigNode::Sequence(_) | ConfigNode::Mapping(_) => translator.normalize(arguments),
        single => Ok(Expr::List(vec![translator.normalize(single)?])),
    }
}
