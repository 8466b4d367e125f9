//! Service option folding.
//!
//! A service's option mapping is folded key by key onto a base call. Every
//! recognized key maps to a pure rule `(input, chain) -> chain` in
//! `OPTION_RULES`; a key without a rule aborts the translation.

use std::collections::HashMap;
use std::sync::LazyLock;

use fluentconf_common::{ConfigNode, Mapping};
use tracing::trace;

use super::error::{Result, TranslateError};
use super::rules;
use super::translator::Translator;
use super::types::Expr;
use super::utils::strip_reference_prefix;

/// Prefix of the keys consumed by the `decorates` rule.
const DECORATION_PREFIX: &str = "decoration_";

/// What a rule sees of the option it translates.
#[derive(Debug, Clone, Copy)]
pub struct RuleInput<'a> {
    pub key: &'a str,
    pub value: &'a ConfigNode,
    /// The `decoration_*` options removed by the pre-scan.
    pub decoration: &'a Mapping,
}

/// Translation of one option key onto the chain.
pub type OptionRule = fn(&Translator, &RuleInput<'_>, Expr) -> Result<Expr>;

/// Option key -> rule. `shared` has no rule and is rejected.
static OPTION_RULES: LazyLock<HashMap<&'static str, OptionRule>> = LazyLock::new(|| {
    let rules: [(&'static str, OptionRule); 16] = [
        ("decorates", decorates_rule),
        ("deprecated", deprecated_rule),
        ("public", public_rule),
        ("bind", bind_rule),
        ("autowire", flag_rule),
        ("autoconfigure", flag_rule),
        ("lazy", flag_rule),
        ("abstract", flag_rule),
        ("factory", factory_rule),
        ("configurator", factory_rule),
        ("tags", tags_rule),
        ("calls", calls_rule),
        ("arguments", arguments_rule),
        ("properties", properties_rule),
        ("parent", parent_rule),
        ("exclude", exclude_rule),
    ];
    rules.into_iter().collect()
});

impl Translator {
    /// Fold `options` onto `base`, in document order.
    pub fn translate_directive(&self, base: Expr, options: &Mapping) -> Result<Expr> {
        let (decoration, options) = options.partition_keys(|k| k.starts_with(DECORATION_PREFIX));

        options.iter().try_fold(base, |chain, (key, value)| {
            let rule = OPTION_RULES
                .get(key)
                .ok_or_else(|| TranslateError::unexpected_key(key, "service options"))?;
            trace!(key, "applying service option");
            rule(
                self,
                &RuleInput {
                    key,
                    value,
                    decoration: &decoration,
                },
                chain,
            )
        })
    }
}

fn decorates_rule(t: &Translator, input: &RuleInput<'_>, chain: Expr) -> Result<Expr> {
    rules::decorate(t, input.value, input.decoration, chain)
}

fn deprecated_rule(t: &Translator, input: &RuleInput<'_>, chain: Expr) -> Result<Expr> {
    rules::deprecate(t, input.value, chain)
}

fn tags_rule(t: &Translator, input: &RuleInput<'_>, chain: Expr) -> Result<Expr> {
    rules::tags(t, input.value, chain)
}

fn calls_rule(t: &Translator, input: &RuleInput<'_>, chain: Expr) -> Result<Expr> {
    rules::calls(t, input.value, chain)
}

/// `public: false` -> `private()`, anything else -> `public()`
fn public_rule(_: &Translator, input: &RuleInput<'_>, chain: Expr) -> Result<Expr> {
    if input.value.as_bool() == Some(false) {
        Ok(chain.call("private", vec![]))
    } else {
        Ok(chain.call("public", vec![]))
    }
}

/// `autowire`, `autoconfigure`, `lazy`, `abstract`: `false` is passed explicitly.
fn flag_rule(_: &Translator, input: &RuleInput<'_>, chain: Expr) -> Result<Expr> {
    let args = if input.value.as_bool() == Some(false) {
        vec![Expr::bool(false)]
    } else {
        vec![]
    };
    Ok(chain.call(input.key, args))
}

/// Flag form like `autowire`; a mapping binds each entry separately.
fn bind_rule(t: &Translator, input: &RuleInput<'_>, chain: Expr) -> Result<Expr> {
    match input.value {
        ConfigNode::Mapping(bindings) => bindings.iter().try_fold(chain, |chain, (name, value)| {
            Ok(chain.call("bind", vec![Expr::string(name), t.normalize(value)?]))
        }),
        _ => flag_rule(t, input, chain),
    }
}

/// `factory` and `configurator` both emit `factory(...)`.
fn factory_rule(t: &Translator, input: &RuleInput<'_>, chain: Expr) -> Result<Expr> {
    let arg = match input.value {
        ConfigNode::String(_) => t.normalize(input.value)?,
        ConfigNode::Sequence(pair) if pair.len() == 2 => {
            let method = pair[1]
                .as_str()
                .ok_or_else(|| TranslateError::unsupported(input.key, input.value))?;
            Expr::List(vec![t.normalize(&pair[0])?, Expr::string(method)])
        }
        other => return Err(TranslateError::unsupported(input.key, other)),
    };
    Ok(chain.call("factory", vec![arg]))
}

/// `args([...])`; a single scalar is wrapped into a one-element list.
fn arguments_rule(t: &Translator, input: &RuleInput<'_>, chain: Expr) -> Result<Expr> {
    let arg = match input.value {
        ConfigNode::Sequence(_) | ConfigNode::Mapping(_) => t.normalize(input.value)?,
        ConfigNode::Null => Expr::List(Vec::new()),
        single => Expr::List(vec![t.normalize(single)?]),
    };
    Ok(chain.call("args", vec![arg]))
}

/// One `property(name, value)` per entry.
fn properties_rule(t: &Translator, input: &RuleInput<'_>, chain: Expr) -> Result<Expr> {
    let properties = input
        .value
        .as_mapping()
        .ok_or_else(|| TranslateError::unsupported(input.key, input.value))?;
    properties.iter().try_fold(chain, |chain, (name, value)| {
        Ok(chain.call("property", vec![Expr::string(name), t.normalize(value)?]))
    })
}

fn parent_rule(_: &Translator, input: &RuleInput<'_>, chain: Expr) -> Result<Expr> {
    let parent = input
        .value
        .as_str()
        .ok_or_else(|| TranslateError::unsupported(input.key, input.value))?;
    Ok(chain.call("parent", vec![Expr::string(strip_reference_prefix(parent))]))
}

/// `exclude([paths])` for resource loads; a single pattern is wrapped.
fn exclude_rule(t: &Translator, input: &RuleInput<'_>, chain: Expr) -> Result<Expr> {
    let patterns = match input.value {
        ConfigNode::String(_) => vec![t.path_expr(input.value)?],
        ConfigNode::Sequence(items) => items
            .iter()
            .map(|item| t.path_expr(item))
            .collect::<Result<_>>()?,
        other => return Err(TranslateError::unsupported(input.key, other)),
    };
    Ok(chain.call("exclude", vec![Expr::List(patterns)]))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::fluent::types::SERVICES_VAR;
    use fluentconf_common::from_yaml_str;

    fn translate(options: &str) -> Result<Expr> {
        let node = from_yaml_str(options).unwrap();
        let options = node.as_mapping().cloned().unwrap_or_default();
        let base = Expr::var(SERVICES_VAR).call("set", vec![Expr::string("app.mailer")]);
        Translator::default().translate_directive(base, &options)
    }

    #[test]
    fn test_options_fold_in_document_order() {
        let chain = translate("autowire: true\npublic: false\nautoconfigure: ~\n").unwrap();
        assert_eq!(
            chain.chain_methods(),
            vec!["set", "autowire", "private", "autoconfigure"]
        );
    }

    #[test]
    fn test_public_true_and_false() {
        assert_eq!(
            translate("public: true").unwrap().chain_methods(),
            vec!["set", "public"]
        );
        assert_eq!(
            translate("public: false").unwrap().chain_methods(),
            vec!["set", "private"]
        );
    }

    #[test]
    fn test_false_flag_is_passed_explicitly() {
        let chain = translate("autowire: false").unwrap();
        assert_eq!(chain.find_call("autowire").unwrap().args, vec![Expr::bool(false)]);

        let chain = translate("autowire: true").unwrap();
        assert!(chain.find_call("autowire").unwrap().args.is_empty());
    }

    #[test]
    fn test_bind_mapping_emits_one_call_per_binding() {
        let chain = translate("bind:\n  $projectDir: '%kernel.project_dir%'\n  $logger: '@logger'\n").unwrap();
        let binds = chain.find_calls("bind");
        assert_eq!(binds.len(), 2);
        assert_eq!(
            binds[0].args,
            vec![Expr::string("$projectDir"), Expr::string("%kernel.project_dir%")]
        );
        assert_eq!(binds[1].args[1], Expr::func("service", vec![Expr::string("logger")]));
    }

    #[test]
    fn test_decoration_keys_are_absorbed() {
        let chain = translate("decoration_priority: 5\ndecorates: foo\npublic: false\n").unwrap();
        assert_eq!(chain.chain_methods(), vec!["set", "decorate", "private"]);
        assert_eq!(
            chain.find_call("decorate").unwrap().args,
            vec![Expr::string("foo"), Expr::null(), Expr::int(5)]
        );
    }

    #[test]
    fn test_factory_and_configurator() {
        let chain = translate("factory: ['@app.mailer_factory', create]").unwrap();
        assert_eq!(
            chain.find_call("factory").unwrap().args,
            vec![Expr::List(vec![
                Expr::func("service", vec![Expr::string("app.mailer_factory")]),
                Expr::string("create"),
            ])]
        );

        let chain = translate("configurator: [App\\Configurator, configure]").unwrap();
        assert_eq!(chain.chain_methods(), vec!["set", "factory"]);
        assert_eq!(
            chain.find_call("factory").unwrap().args,
            vec![Expr::List(vec![
                Expr::class_ref("App\\Configurator"),
                Expr::string("configure"),
            ])]
        );

        let chain = translate("factory: 'App\\MailerFactory::create'").unwrap();
        assert_eq!(
            chain.find_call("factory").unwrap().args,
            vec![Expr::string("App\\MailerFactory::create")]
        );

        assert!(matches!(
            translate("factory: [a, b, c]"),
            Err(TranslateError::UnsupportedConstruct { .. })
        ));
    }

    #[test]
    fn test_arguments() {
        let chain = translate("arguments: ['@logger', 5]").unwrap();
        assert_eq!(
            chain.find_call("args").unwrap().args,
            vec![Expr::List(vec![
                Expr::func("service", vec![Expr::string("logger")]),
                Expr::int(5),
            ])]
        );

        let chain = translate("arguments: {$name: mailer}").unwrap();
        assert_eq!(
            chain.find_call("args").unwrap().args,
            vec![Expr::Map(vec![(Expr::string("$name"), Expr::string("mailer"))])]
        );
    }

    #[test]
    fn test_properties_parent_exclude() {
        let chain = translate("parent: '@app.base'\nproperties: {logger: '@logger'}\n").unwrap();
        assert_eq!(chain.chain_methods(), vec!["set", "parent", "property"]);
        assert_eq!(chain.find_call("parent").unwrap().args, vec![Expr::string("app.base")]);

        let chain = translate("exclude: '../src/Entity'").unwrap();
        assert_eq!(
            chain.find_call("exclude").unwrap().args,
            vec![Expr::List(vec![Expr::concat(
                Expr::Dir,
                Expr::string("/../src/Entity")
            )])]
        );
    }

    #[test]
    fn test_shared_is_unexpected() {
        let err = translate("shared: false").unwrap_err();
        assert_eq!(err.key(), Some("shared"));
    }

    #[test]
    fn test_unknown_option_is_unexpected() {
        let err = translate("public: true\nfoo_bar: 1\n").unwrap_err();
        assert_eq!(
            err,
            TranslateError::UnexpectedKey {
                key: "foo_bar".into(),
                context: "service options".into()
            }
        );
    }
}
