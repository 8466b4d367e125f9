//! Common utilities for PHP code generation.
//!
//! This module provides shared helper functions used across translation and emission.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Namespace of the configurator functions (`service()`, `tagged_iterator()`, ...).
pub const CONFIGURATOR_NAMESPACE: &str = "Symfony\\Component\\DependencyInjection\\Loader\\Configurator";

/// Class holding the invalid-reference behaviour constants.
pub const CONTAINER_INTERFACE: &str = "Symfony\\Component\\DependencyInjection\\ContainerInterface";

/// PHP keywords that cannot be used as a namespace segment or class name.
pub static PHP_RESERVED_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "abstract", "and", "array", "as", "break", "callable", "case", "catch", "class", "clone",
        "const", "continue", "declare", "default", "do", "echo", "else", "elseif", "empty",
        "enddeclare", "endfor", "endforeach", "endif", "endswitch", "endwhile", "enum", "eval",
        "exit", "extends", "final", "finally", "fn", "for", "foreach", "function", "global",
        "goto", "if", "implements", "include", "instanceof", "insteadof", "interface", "isset",
        "list", "match", "namespace", "new", "or", "print", "private", "protected", "public",
        "readonly", "require", "return", "static", "switch", "throw", "trait", "try", "unset",
        "use", "var", "while", "xor", "yield",
    ]
    .into_iter()
    .collect()
});

/// Check if a string is a valid PHP label (identifier).
///
/// Returns true if the name:
/// - Is not empty
/// - Starts with a letter or underscore
/// - Contains only alphanumeric characters or underscores
pub fn is_php_identifier(name: &str) -> bool {
    name.chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Lexical test for a namespaced class/interface name such as `App\Mail\Mailer`.
///
/// Requires at least one namespace separator, every segment to be a
/// non-reserved identifier, and the short name to start uppercase.
pub fn looks_like_class_name(name: &str) -> bool {
    let name = name.strip_prefix('\\').unwrap_or(name);
    let segments: Vec<&str> = name.split('\\').collect();
    if segments.len() < 2 {
        return false;
    }
    let short_name_ok = segments
        .last()
        .and_then(|s| s.chars().next())
        .is_some_and(|c| c.is_ascii_uppercase());
    short_name_ok
        && segments
            .iter()
            .all(|s| is_php_identifier(s) && !PHP_RESERVED_WORDS.contains(s.to_ascii_lowercase().as_str()))
}

/// Split a named-argument key `App\Mailer $transport` into
/// (`App\Mailer`, `transport`). Whether the left side names a type is up to
/// the caller's `TypeLookup`.
pub fn split_named_argument_key(key: &str) -> Option<(&str, &str)> {
    let (class, argument) = key.split_once(" $")?;
    if class.is_empty() || !is_php_identifier(argument) {
        return None;
    }
    Some((class, argument))
}

/// Escape a string for use in a single-quoted PHP string literal.
/// Escapes backslashes and single quotes.
pub fn escape_php_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Strip the `@` that marks a service reference in YAML (`@mailer` -> `mailer`).
pub fn strip_reference_prefix(id: &str) -> &str {
    id.strip_prefix('@').unwrap_or(id)
}

/// Whether a path is relative to the configuration file and should be
/// anchored on `__DIR__`.
///
/// Absolute paths, parameter placeholders (`%kernel.project_dir%/...`),
/// bundle notation (`@AcmeBundle/...`) and URLs are left untouched.
pub fn is_relative_path(path: &str) -> bool {
    !path.is_empty()
        && !path.starts_with('/')
        && !path.starts_with('%')
        && !path.starts_with('@')
        && !path.contains("://")
}

/// Format a relative path as the suffix appended to `__DIR__`.
pub fn dir_suffix(path: &str) -> String {
    let path = path.strip_prefix("./").unwrap_or(path);
    format!("/{path}")
}
