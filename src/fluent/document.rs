//! Document-level translation.
//!
//! Walks the top-level sections in document order and threads one statement
//! list through them. Under `services`, `_defaults` and `_instanceof` are
//! emitted before every ordinary entry wherever they are declared.

use std::borrow::Cow;

use fluentconf_common::{ConfigNode, Mapping};
use tracing::debug;

use super::args::ordered_present;
use super::error::{Result, TranslateError};
use super::translator::Translator;
use super::types::{CONFIGURATOR_VAR, Expr, PARAMETERS_VAR, SERVICES_VAR, Stmt};

const DEFAULTS_KEY: &str = "_defaults";
const INSTANCEOF_KEY: &str = "_instanceof";

/// Positional arguments of `import()`, in order.
const IMPORT_KEYS: [&str; 3] = ["resource", "type", "ignore_errors"];

impl Translator {
    /// Translate a whole configuration document.
    ///
    /// Either every statement is returned or the first error; nothing partial.
    pub fn translate(&self, root: &ConfigNode) -> Result<Vec<Stmt>> {
        let root = section_mapping(root, "document root")?;

        root.iter().try_fold(Vec::new(), |mut statements, (section, value)| {
            debug!(section, "translating section");
            let translated = match section {
                "parameters" => self.parameter_statements(value)?,
                "imports" => self.import_statements(value)?,
                "services" => self.service_statements(value)?,
                other => return Err(TranslateError::unexpected_key(other, "document root")),
            };
            statements.extend(translated);
            Ok(statements)
        })
    }

    fn parameter_statements(&self, value: &ConfigNode) -> Result<Vec<Stmt>> {
        let parameters = section_mapping(value, "parameters")?;
        let init = Stmt::Assign {
            var: PARAMETERS_VAR.to_string(),
            init: Expr::var(CONFIGURATOR_VAR).call("parameters", vec![]),
        };

        parameters
            .iter()
            .try_fold(vec![init], |mut statements, (name, value)| {
                let set = Expr::var(PARAMETERS_VAR)
                    .call("set", vec![Expr::string(name), self.normalize(value)?]);
                statements.push(Stmt::Expr(set));
                Ok(statements)
            })
    }

    fn import_statements(&self, value: &ConfigNode) -> Result<Vec<Stmt>> {
        let imports = match value {
            ConfigNode::Null => return Ok(Vec::new()),
            ConfigNode::Sequence(imports) => imports,
            other => return Err(TranslateError::unsupported("imports", other)),
        };

        imports
            .iter()
            .map(|entry| self.import_statement(entry).map(Stmt::Expr))
            .collect()
    }

    fn import_statement(&self, entry: &ConfigNode) -> Result<Expr> {
        let options = match entry {
            ConfigNode::Mapping(options) if options.contains_key("resource") => options,
            other => return Err(TranslateError::unsupported("imports", other)),
        };
        if let Some(key) = options.keys().find(|k| !IMPORT_KEYS.contains(k)) {
            return Err(TranslateError::unexpected_key(key, "imports"));
        }

        let args = ordered_present(options, &IMPORT_KEYS)
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                if index == 0 {
                    self.path_expr(value)
                } else {
                    self.normalize(value)
                }
            })
            .collect::<Result<_>>()?;
        Ok(Expr::var(CONFIGURATOR_VAR).call("import", args))
    }

    fn service_statements(&self, value: &ConfigNode) -> Result<Vec<Stmt>> {
        let services = section_mapping(value, "services")?;
        let init = Stmt::Assign {
            var: SERVICES_VAR.to_string(),
            init: Expr::var(CONFIGURATOR_VAR).call("services", vec![]),
        };

        let (special, ordinary) =
            services.partition_keys(|k| k == DEFAULTS_KEY || k == INSTANCEOF_KEY);

        special
            .iter()
            .chain(ordinary.iter())
            .try_fold(vec![init], |mut statements, (key, value)| {
                match key {
                    DEFAULTS_KEY => statements.push(Stmt::Expr(self.defaults_chain(value)?)),
                    INSTANCEOF_KEY => statements.extend(self.instanceof_statements(value)?),
                    _ => {
                        debug!(service = key, "translating service");
                        statements.push(Stmt::Expr(self.translate_service(key, value)?));
                    }
                }
                Ok(statements)
            })
    }

    fn defaults_chain(&self, value: &ConfigNode) -> Result<Expr> {
        let options = section_mapping(value, DEFAULTS_KEY)?;
        let base = Expr::var(SERVICES_VAR).call("defaults", vec![]);
        self.translate_directive(base, &options)
    }

    fn instanceof_statements(&self, value: &ConfigNode) -> Result<Vec<Stmt>> {
        let conditionals = section_mapping(value, INSTANCEOF_KEY)?;

        conditionals
            .iter()
            .map(|(class, options)| {
                let options = section_mapping(options, INSTANCEOF_KEY)?;
                let base =
                    Expr::var(SERVICES_VAR).call("instanceof", vec![Expr::class_ref(class)]);
                self.translate_directive(base, &options).map(Stmt::Expr)
            })
            .collect()
    }
}

/// A mapping section; a declared-but-empty (`~`) section is an empty mapping.
fn section_mapping<'a>(value: &'a ConfigNode, context: &str) -> Result<Cow<'a, Mapping>> {
    match value {
        ConfigNode::Null => Ok(Cow::Owned(Mapping::new())),
        ConfigNode::Mapping(map) => Ok(Cow::Borrowed(map)),
        other => Err(TranslateError::unsupported(context, other)),
    }
}
