//! `fluentconf convert`: YAML service files to PHP configurator files.
//!
//! Inputs are files or directories; directories are walked for `*.yml` and
//! `*.yaml`. Files are converted in parallel and reported in input order.

use clap::Args;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::cli::run_cli;
use crate::fluent::{Translator, generate_file};
use crate::settings::{Settings, TypeDetection};

const YAML_EXTENSIONS: [&str; 2] = ["yml", "yaml"];

#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    #[arg(
        value_name = "INPUT",
        required = true,
        help = "YAML files or directories to convert"
    )]
    pub inputs: Vec<PathBuf>,
    #[arg(
        short = 'o',
        long = "output-dir",
        value_name = "DIR",
        help = "Write PHP files under this directory instead of next to their sources"
    )]
    pub output_dir: Option<PathBuf>,
    #[arg(
        long = "config",
        value_name = "FILE",
        help = "Settings file. Defaults to ./fluentconf.toml when present"
    )]
    pub config: Option<PathBuf>,
    #[arg(
        long = "known-type",
        value_name = "NAME",
        help = "Class name to render as Name::class (repeatable; disables lexical detection)"
    )]
    pub known_types: Vec<String>,
    #[arg(long = "no-anchor-paths", help = "Keep relative resource paths as plain strings")]
    pub no_anchor_paths: bool,
    #[arg(
        long = "stdout",
        conflicts_with = "output_dir",
        help = "Print the generated PHP instead of writing files"
    )]
    pub stdout: bool,
}

/// A YAML file to convert, with the input root it was found under.
#[derive(Debug, Clone)]
struct Source {
    path: PathBuf,
    root: Option<PathBuf>,
}

impl Source {
    /// Path of the generated file.
    ///
    /// Without an output directory the PHP file sits next to its source.
    /// With one, the layout below a walked directory is preserved.
    fn target(&self, output_dir: Option<&Path>) -> PathBuf {
        let Some(output_dir) = output_dir else {
            return self.path.with_extension("php");
        };
        let relative = self
            .root
            .as_deref()
            .and_then(|root| self.path.strip_prefix(root).ok())
            .map(Path::to_path_buf)
            .or_else(|| self.path.file_name().map(PathBuf::from))
            .unwrap_or_else(|| self.path.clone());
        output_dir.join(relative).with_extension("php")
    }
}

pub fn run(args: ConvertArgs) -> i32 {
    run_cli(|| run_inner(&args))
}

fn run_inner(args: &ConvertArgs) -> Result<(), String> {
    let settings = resolve_settings(args)?;
    let translator = settings.translator();
    debug!("Translating with {:?}", settings);

    let sources = collect_sources(&args.inputs)?;
    if sources.is_empty() {
        return Err("No YAML files found in the given inputs".to_string());
    }
    info!("Converting {} file(s)", sources.len());

    // Convert in parallel, report in input order
    let results: Vec<(&Source, Result<String, String>)> = sources
        .par_iter()
        .map(|source| (source, convert_file(&source.path, &translator)))
        .collect();

    let mut failures = 0_usize;
    for (source, result) in results {
        let outcome = result.and_then(|php| {
            if args.stdout {
                print!("{php}");
                Ok(())
            } else {
                write_output(source, &php, args.output_dir.as_deref())
            }
        });
        if let Err(err) = outcome {
            eprintln!("✗ {err}");
            failures += 1;
        }
    }

    if failures > 0 {
        return Err(format!(
            "{failures} of {} file(s) failed to convert",
            sources.len()
        ));
    }
    Ok(())
}

/// Settings file first, then command-line overrides.
fn resolve_settings(args: &ConvertArgs) -> Result<Settings, String> {
    let mut settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => {
            let cwd = std::env::current_dir()
                .map_err(|err| format!("Failed to determine current directory: {err}"))?;
            Settings::discover(&cwd)?
        }
    };

    if !args.known_types.is_empty() {
        settings.type_detection = TypeDetection::Known;
        settings.known_types.extend(args.known_types.iter().cloned());
    }
    if args.no_anchor_paths {
        settings.anchor_paths = false;
    }
    Ok(settings)
}

fn collect_sources(inputs: &[PathBuf]) -> Result<Vec<Source>, String> {
    let mut sources = Vec::new();
    for input in inputs {
        if input.is_dir() {
            sources.extend(
                WalkDir::new(input)
                    .sort_by_file_name()
                    .into_iter()
                    .filter_map(Result::ok)
                    .filter(|entry| entry.file_type().is_file() && is_yaml_path(entry.path()))
                    .map(|entry| Source {
                        path: entry.path().to_path_buf(),
                        root: Some(input.clone()),
                    }),
            );
        } else if input.is_file() {
            if !is_yaml_path(input) {
                warn!("Skipping {}: not a .yml/.yaml file", input.display());
                continue;
            }
            sources.push(Source {
                path: input.clone(),
                root: None,
            });
        } else {
            return Err(format!("Input not found: {}", input.display()));
        }
    }
    Ok(sources)
}

fn is_yaml_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| YAML_EXTENSIONS.contains(&ext))
}

fn convert_file(path: &Path, translator: &Translator) -> Result<String, String> {
    debug!("Converting {}", path.display());
    generate_file(path, translator).map_err(|err| format!("{}: {err}", path.display()))
}

fn write_output(source: &Source, php: &str, output_dir: Option<&Path>) -> Result<(), String> {
    let target = source.target(output_dir);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| format!("Failed to create {}: {err}", parent.display()))?;
    }
    fs::write(&target, php).map_err(|err| format!("Failed to write {}: {err}", target.display()))?;

    info!("Converted {}", source.path.display());
    println!("✓ {} -> {}", source.path.display(), target.display());
    Ok(())
}
