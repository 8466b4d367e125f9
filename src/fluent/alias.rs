//! Alias detection for service entries.
//!
//! An entry is an alias when, in this order:
//! 1. its value is a mapping with an `alias` field (other options are folded
//!    onto the `alias()` call)
//! 2. its key is a named-argument alias `App\Contract $argument`
//! 3. its value is a `@service` reference string
//!
//! The first matching shape wins.

use fluentconf_common::ConfigNode;

use super::error::{Result, TranslateError};
use super::translator::Translator;
use super::types::{Expr, SERVICES_VAR};
use super::utils::strip_reference_prefix;

impl Translator {
    /// The `alias()` chain for an alias-shaped entry, `None` otherwise.
    pub fn resolve_alias(&self, key: &str, value: &ConfigNode) -> Result<Option<Expr>> {
        if let ConfigNode::Mapping(options) = value {
            if let Some(target) = options.get("alias") {
                let call = self.alias_call(key, alias_target(target)?);
                let rest = options.without(&["alias"]);
                return self.translate_directive(call, &rest).map(Some);
            }
        }

        if self.named_argument_key(key).is_some() {
            if let Some(target) = value.as_str() {
                return Ok(Some(self.alias_call(key, strip_reference_prefix(target))));
            }
        }

        if let Some(target) = value.as_str().and_then(|s| s.strip_prefix('@')) {
            return Ok(Some(self.alias_call(key, target)));
        }

        Ok(None)
    }

    fn alias_call(&self, key: &str, target: &str) -> Expr {
        Expr::var(SERVICES_VAR).call(
            "alias",
            vec![self.service_key_expr(key), self.type_or_string(target)],
        )
    }
}

fn alias_target(target: &ConfigNode) -> Result<&str> {
    target
        .as_str()
        .map(strip_reference_prefix)
        .ok_or_else(|| TranslateError::unsupported("alias", target))
}
