//! PHP IR types for the fluent container configuration.
//!
//! This module defines the output side of the translation:
//! - Expr: Expressions (literals, arrays, class references, method calls, etc.)
//! - Literal: Literal values (strings, numbers, booleans, null)
//! - Stmt: Top-level statements inside the configurator closure

/// Name of the closure parameter every chain starts from.
pub const CONFIGURATOR_VAR: &str = "containerConfigurator";
/// Variable holding `$containerConfigurator->parameters()`.
pub const PARAMETERS_VAR: &str = "parameters";
/// Variable holding `$containerConfigurator->services()`.
pub const SERVICES_VAR: &str = "services";

/// PHP literal values
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

/// PHP expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Literal value: 'bar', 42
    Literal(Literal),
    /// Variable: $services
    Var(String),
    /// Class name reference: \App\Mailer::class
    ClassRef(String),
    /// Class constant: \Symfony\...\ContainerInterface::IGNORE_ON_INVALID_REFERENCE
    ConstRef { class: String, name: String },
    /// The `__DIR__` magic constant
    Dir,
    /// String concatenation: a . b
    Concat { left: Box<Expr>, right: Box<Expr> },
    /// List array: ['a', 'b']
    List(Vec<Expr>),
    /// Keyed array: ['a' => 1]
    Map(Vec<(Expr, Expr)>),
    /// Function call: service('mailer')
    FuncCall { name: String, args: Vec<Expr> },
    /// Method call: $services->set('a')
    MethodCall(MethodCall),
}

/// One fluent builder invocation.
///
/// The receiver is either a variable (`$services`) or another call, which is
/// how chains are represented.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
    pub receiver: Box<Expr>,
    pub method: String,
    pub args: Vec<Expr>,
}

impl Expr {
    pub fn string(value: impl Into<String>) -> Expr {
        Expr::Literal(Literal::String(value.into()))
    }

    pub fn int(value: i64) -> Expr {
        Expr::Literal(Literal::Int(value))
    }

    pub fn bool(value: bool) -> Expr {
        Expr::Literal(Literal::Bool(value))
    }

    pub fn null() -> Expr {
        Expr::Literal(Literal::Null)
    }

    pub fn var(name: impl Into<String>) -> Expr {
        Expr::Var(name.into())
    }

    pub fn class_ref(name: &str) -> Expr {
        Expr::ClassRef(name.trim_start_matches('\\').to_string())
    }

    pub fn concat(left: Expr, right: Expr) -> Expr {
        Expr::Concat {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn func(name: impl Into<String>, args: Vec<Expr>) -> Expr {
        Expr::FuncCall {
            name: name.into(),
            args,
        }
    }

    /// Append a call to this expression: `self->method(args)`.
    pub fn call(self, method: impl Into<String>, args: Vec<Expr>) -> Expr {
        Expr::MethodCall(MethodCall {
            receiver: Box::new(self),
            method: method.into(),
            args,
        })
    }

    /// Method names of the chain, from the root receiver outward.
    pub fn chain_methods(&self) -> Vec<&str> {
        let mut methods = Vec::new();
        let mut current = self;
        while let Expr::MethodCall(call) = current {
            methods.push(call.method.as_str());
            current = &call.receiver;
        }
        methods.reverse();
        methods
    }

    /// Find the outermost call with the given method name in this chain.
    pub fn find_call(&self, method: &str) -> Option<&MethodCall> {
        let mut current = self;
        while let Expr::MethodCall(call) = current {
            if call.method == method {
                return Some(call);
            }
            current = &call.receiver;
        }
        None
    }

    /// All calls in this chain with the given method name, root first.
    pub fn find_calls(&self, method: &str) -> Vec<&MethodCall> {
        let mut found = Vec::new();
        let mut current = self;
        while let Expr::MethodCall(call) = current {
            if call.method == method {
                found.push(call);
            }
            current = &call.receiver;
        }
        found.reverse();
        found
    }
}

/// Statement in the configurator closure body
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// Variable initialization: $services = $containerConfigurator->services();
    Assign { var: String, init: Expr },
    /// Expression statement: a builder call chain
    Expr(Expr),
}

impl Stmt {
    /// The expression this statement evaluates.
    pub fn expr(&self) -> &Expr {
        match self {
            Stmt::Assign { init, .. } => init,
            Stmt::Expr(expr) => expr,
        }
    }
}

/// Complete PHP configuration file
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    pub statements: Vec<Stmt>,
}
