#![forbid(unsafe_code)]
#![deny(unused_must_use, missing_debug_implementations)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

//! Converts YAML dependency-injection service configuration into fluent
//! `ContainerConfigurator` PHP files.

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

mod cli;
pub mod fluent;
pub mod settings;

pub use fluent::{ConvertError, Emit, TranslateError, Translator, generate, generate_file};
pub use settings::Settings;

#[derive(Parser)]
#[command(
    name = "fluentconf",
    version,
    about = "Convert YAML service configuration into fluent PHP configurator files"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert YAML files or directories to PHP
    Convert(cli::convert::ConvertArgs),
}

/// Parse `args` (program name first) and run the selected command.
///
/// Returns the process exit code.
pub fn run_cli(args: Vec<String>) -> i32 {
    match Cli::try_parse_from(args) {
        Ok(cli) => match cli.command {
            Some(Commands::Convert(convert_args)) => cli::convert::run(convert_args),
            None => {
                let mut cmd = Cli::command();
                let _ = cmd.print_help();
                println!();
                0
            }
        },
        Err(e) => {
            let code = e.exit_code();
            let _ = e.print();
            code
        }
    }
}

pub fn init_tracing() {
    let crate_root = module_path!().to_string();

    // FLUENTCONF_LOG controls log level: "trace", "debug", "info", "warn", "error"
    // or a full tracing filter spec like "fluentconf=debug"
    let filter = match std::env::var("FLUENTCONF_LOG") {
        Ok(level) if is_plain_level(&level) => {
            format!("{crate_root}={level}")
        }
        Ok(spec) => spec,
        Err(_) => format!("{crate_root}=warn"),
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn is_plain_level(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_is_plain_level() {
        assert!(is_plain_level("debug"));
        assert!(is_plain_level("WARN"));
        assert!(!is_plain_level("fluentconf=debug"));
        assert!(!is_plain_level(""));
    }

    #[test]
    fn test_run_cli_without_command_prints_help() {
        assert_eq!(run_cli(vec!["fluentconf".to_string()]), 0);
    }

    #[test]
    fn test_run_cli_rejects_unknown_flags() {
        let code = run_cli(vec![
            "fluentconf".to_string(),
            "convert".to_string(),
            "--bogus".to_string(),
        ]);
        assert_eq!(code, 2);
    }
}
