//! PHP code emission via the Emit trait.
//!
//! Nested expressions always render on one line. Only statement-level chains
//! of more than one call are broken, one `->call()` per line.

use std::collections::BTreeSet;

use super::types::{ConfigFile, Expr, Literal, MethodCall, Stmt};
use super::utils::{CONFIGURATOR_NAMESPACE, escape_php_string};

/// Trait for emitting PHP code from IR nodes.
pub trait Emit {
    /// Convert the IR node to its PHP string representation.
    fn emit(&self) -> String;
}

const INDENT: &str = "    ";

// =============================================================================
// Literals
// =============================================================================

impl Emit for Literal {
    fn emit(&self) -> String {
        match self {
            Literal::String(s) => format!("'{}'", escape_php_string(s)),
            Literal::Int(i) => i.to_string(),
            Literal::Float(x) => emit_float(*x),
            Literal::Bool(b) => b.to_string(),
            Literal::Null => "null".to_string(),
        }
    }
}

/// Whole floats keep a fractional part so PHP reads them back as floats.
fn emit_float(x: f64) -> String {
    if x.is_nan() {
        "NAN".to_string()
    } else if x.is_infinite() {
        let sign = if x < 0.0 { "-" } else { "" };
        format!("{sign}INF")
    } else {
        let rendered = x.to_string();
        if rendered.contains('.') {
            rendered
        } else {
            format!("{rendered}.0")
        }
    }
}

// =============================================================================
// Expressions
// =============================================================================

impl Emit for Expr {
    fn emit(&self) -> String {
        match self {
            Expr::Literal(lit) => lit.emit(),
            Expr::Var(name) => format!("${name}"),
            Expr::ClassRef(name) => format!("\\{name}::class"),
            Expr::ConstRef { class, name } => format!("\\{class}::{name}"),
            Expr::Dir => "__DIR__".to_string(),
            Expr::Concat { left, right } => format!("{} . {}", left.emit(), right.emit()),
            Expr::List(items) => format!("[{}]", emit_args(items)),
            Expr::Map(entries) => {
                let parts: Vec<_> = entries
                    .iter()
                    .map(|(k, v)| format!("{} => {}", k.emit(), v.emit()))
                    .collect();
                format!("[{}]", parts.join(", "))
            }
            Expr::FuncCall { name, args } => format!("{}({})", name, emit_args(args)),
            Expr::MethodCall(call) => call.emit(),
        }
    }
}

impl Emit for MethodCall {
    fn emit(&self) -> String {
        format!("{}->{}({})", self.receiver.emit(), self.method, emit_args(&self.args))
    }
}

fn emit_args(args: &[Expr]) -> String {
    args.iter().map(|a| a.emit()).collect::<Vec<_>>().join(", ")
}

/// Split a chain into its root receiver and its calls, root first.
fn unwind_chain(expr: &Expr) -> (&Expr, Vec<&MethodCall>) {
    let mut calls = Vec::new();
    let mut current = expr;
    while let Expr::MethodCall(call) = current {
        calls.push(call);
        current = &call.receiver;
    }
    calls.reverse();
    (current, calls)
}

/// Render a statement-level chain, breaking after the first call.
fn emit_chain(expr: &Expr, indent: usize) -> String {
    let (root, calls) = unwind_chain(expr);
    if calls.len() < 2 {
        return expr.emit();
    }

    let continuation = format!("\n{}", INDENT.repeat(indent));
    let mut output = root.emit();
    for (index, call) in calls.iter().enumerate() {
        if index > 0 {
            output.push_str(&continuation);
        }
        output.push_str(&format!("->{}({})", call.method, emit_args(&call.args)));
    }
    output
}

// =============================================================================
// Statements
// =============================================================================

impl Emit for Stmt {
    fn emit(&self) -> String {
        self.emit_indented(1)
    }
}

impl Stmt {
    /// Emit with specified indentation level (4 spaces per level)
    pub fn emit_indented(&self, indent: usize) -> String {
        let prefix = INDENT.repeat(indent);
        match self {
            Stmt::Assign { var, init } => format!("{prefix}${var} = {};\n", init.emit()),
            Stmt::Expr(expr) => format!("{prefix}{};\n", emit_chain(expr, indent + 1)),
        }
    }
}

// =============================================================================
// File
// =============================================================================

impl ConfigFile {
    /// Configurator helper functions called anywhere in the file, sorted.
    pub fn used_functions(&self) -> BTreeSet<&str> {
        let mut names = BTreeSet::new();
        for stmt in &self.statements {
            collect_functions(stmt.expr(), &mut names);
        }
        names
    }
}

fn collect_functions<'a>(expr: &'a Expr, names: &mut BTreeSet<&'a str>) {
    match expr {
        Expr::FuncCall { name, args } => {
            names.insert(name.as_str());
            args.iter().for_each(|a| collect_functions(a, names));
        }
        Expr::MethodCall(call) => {
            collect_functions(&call.receiver, names);
            call.args.iter().for_each(|a| collect_functions(a, names));
        }
        Expr::Concat { left, right } => {
            collect_functions(left, names);
            collect_functions(right, names);
        }
        Expr::List(items) => items.iter().for_each(|i| collect_functions(i, names)),
        Expr::Map(entries) => entries.iter().for_each(|(k, v)| {
            collect_functions(k, names);
            collect_functions(v, names);
        }),
        Expr::Literal(_) | Expr::Var(_) | Expr::ClassRef(_) | Expr::ConstRef { .. } | Expr::Dir => {}
    }
}

impl Emit for ConfigFile {
    fn emit(&self) -> String {
        let mut output = String::from("<?php\n\ndeclare(strict_types=1);\n\n");
        output.push_str(&format!("use {CONFIGURATOR_NAMESPACE}\\ContainerConfigurator;\n"));
        for name in self.used_functions() {
            output.push_str(&format!("use function {CONFIGURATOR_NAMESPACE}\\{name};\n"));
        }
        output.push('\n');

        output.push_str(
            "return static function (ContainerConfigurator $containerConfigurator): void {\n",
        );
        for (index, stmt) in self.statements.iter().enumerate() {
            // Each variable initialization opens a new block
            if index > 0 && matches!(stmt, Stmt::Assign { .. }) {
                output.push('\n');
            }
            output.push_str(&stmt.emit_indented(1));
        }
        output.push_str("};\n");
        output
    }
}
