//! Ordinary service entries.
//!
//! After alias detection an entry is one of:
//! - a bulk resource registration (`resource:`), emitted as `load()`
//! - an explicit class definition (`class:`), emitted as `set(id, Class::class)`
//! - a bare `~`, a self-registering class: `set(Class::class)`
//! - an option mapping folded onto `set(id)`
//! - a sequence, shorthand for `arguments`

use fluentconf_common::{ConfigNode, Mapping};

use super::error::{Result, TranslateError};
use super::translator::Translator;
use super::types::{Expr, SERVICES_VAR};

impl Translator {
    /// Translate one entry of the `services` section into its call chain.
    pub fn translate_service(&self, key: &str, value: &ConfigNode) -> Result<Expr> {
        if let Some(alias) = self.resolve_alias(key, value)? {
            return Ok(alias);
        }

        match value {
            ConfigNode::Null => Ok(self.set_call(key, None)),
            ConfigNode::Mapping(options) if options.contains_key("resource") => {
                self.load_resource(key, options)
            }
            ConfigNode::Mapping(options) if options.contains_key("class") => {
                let class = options.get("class").map(class_expr).transpose()?;
                let rest = options.without(&["class"]);
                self.translate_directive(self.set_call(key, class), &rest)
            }
            ConfigNode::Mapping(options) => self.translate_directive(self.set_call(key, None), options),
            ConfigNode::Sequence(_) => Ok(self
                .set_call(key, None)
                .call("args", vec![self.normalize(value)?])),
            other => Err(TranslateError::unsupported(format!("service '{key}'"), other)),
        }
    }

    fn set_call(&self, key: &str, class: Option<Expr>) -> Expr {
        let mut args = vec![self.service_key_expr(key)];
        args.extend(class);
        Expr::var(SERVICES_VAR).call("set", args)
    }

    /// `load(namespace, resource)`; `namespace:` overrides the entry key.
    fn load_resource(&self, key: &str, options: &Mapping) -> Result<Expr> {
        let namespace = match options.get("namespace") {
            None => key,
            Some(ConfigNode::String(namespace)) => namespace.as_str(),
            Some(other) => return Err(TranslateError::unsupported("namespace", other)),
        };
        let resource = options
            .get("resource")
            .map(|r| self.path_expr(r))
            .transpose()?
            .unwrap_or_else(Expr::null);

        let call = Expr::var(SERVICES_VAR).call("load", vec![Expr::string(namespace), resource]);
        let rest = options.without(&["resource", "namespace"]);
        self.translate_directive(call, &rest)
    }
}

/// `class:` value: `Class::class`, or a string when it is a `%parameter%`.
fn class_expr(class: &ConfigNode) -> Result<Expr> {
    match class.as_str() {
        Some(name) if name.starts_with('%') => Ok(Expr::string(name)),
        Some(name) => Ok(Expr::class_ref(name)),
        None => Err(TranslateError::unsupported("class", class)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use fluentconf_common::from_yaml_str;

    fn translate(key: &str, value: &str) -> Result<Expr> {
        Translator::default().translate_service(key, &from_yaml_str(value).unwrap())
    }

    #[test]
    fn test_bare_class() {
        let chain = translate("App\\Mailer", "~").unwrap();
        assert_eq!(
            chain,
            Expr::var(SERVICES_VAR).call("set", vec![Expr::class_ref("App\\Mailer")])
        );
    }

    #[test]
    fn test_class_definition() {
        let chain = translate("app.mailer", "{class: App\\Mailer, public: true}").unwrap();
        assert_eq!(chain.chain_methods(), vec!["set", "public"]);
        assert_eq!(
            chain.find_call("set").unwrap().args,
            vec![Expr::string("app.mailer"), Expr::class_ref("App\\Mailer")]
        );

        let chain = translate("app.mailer", "{class: '%mailer.class%'}").unwrap();
        assert_eq!(
            chain.find_call("set").unwrap().args[1],
            Expr::string("%mailer.class%")
        );
    }

    #[test]
    fn test_resource_with_namespace() {
        let chain = translate(
            "app_controllers",
            "{namespace: App\\Controller\\, resource: ../src/Controller, tags: [controller.service_arguments]}",
        )
        .unwrap();
        assert_eq!(chain.chain_methods(), vec!["load", "tag"]);
        assert_eq!(
            chain.find_call("load").unwrap().args,
            vec![
                Expr::string("App\\Controller\\"),
                Expr::concat(Expr::Dir, Expr::string("/../src/Controller")),
            ]
        );
    }

    #[test]
    fn test_resource_with_exclude() {
        let chain = translate(
            "App\\",
            "{resource: ../src/*, exclude: [../src/Entity, ../src/Kernel.php]}",
        )
        .unwrap();
        assert_eq!(chain.chain_methods(), vec!["load", "exclude"]);
        assert_eq!(chain.find_call("load").unwrap().args[0], Expr::string("App\\"));
    }

    #[test]
    fn test_option_mapping() {
        let chain = translate("App\\Mailer", "{arguments: ['@logger'], autowire: false}").unwrap();
        assert_eq!(chain.chain_methods(), vec!["set", "args", "autowire"]);
    }

    #[test]
    fn test_arguments_shorthand() {
        let chain = translate("App\\Mailer", "['@logger']").unwrap();
        assert_eq!(chain.chain_methods(), vec!["set", "args"]);
    }

    #[test]
    fn test_alias_wins_over_class() {
        let chain = translate("App\\Foo", "{alias: '@bar', class: App\\Bar}");
        // `class` is not an option of an alias
        assert_eq!(chain.unwrap_err().key(), Some("class"));
    }

    #[test]
    fn test_plain_scalar_is_unsupported() {
        let err = translate("app.mailer", "true").unwrap_err();
        assert!(matches!(err, TranslateError::UnsupportedConstruct { .. }));
    }
}
