//! YAML service configuration to fluent PHP configurator translation.
//!
//! This module translates a dependency-injection configuration tree with:
//! - `parameters`, `imports` and `services` sections
//! - Alias detection, decoration, deprecation, tags and method calls
//! - Rendering to a `ContainerConfigurator` closure file

mod alias;
mod args;
mod directive;
mod document;
mod emit;
mod emitter;
mod error;
mod lookup;
mod rules;
mod service;
mod translator;
mod types;
mod utils;

pub use args::{ordered_present, ordered_with_defaults, trim_trailing_defaults};
pub use directive::{OptionRule, RuleInput};
pub use emit::Emit;
pub use emitter::{ConvertError, generate, generate_file};
pub use error::{Result, TranslateError};
pub use lookup::{KnownTypes, LexicalTypes, TypeLookup};
pub use translator::Translator;
pub use types::{ConfigFile, Expr, Literal, MethodCall, Stmt};
