//! osgi-runtime - OSGi runtime assembly CLI
//!
//! Lists the bundle catalog and assembles framework runtime directories from
//! a local Maven repository.
//!
//! ## Usage
//!
//! ```sh
//! osgi-runtime features
//! osgi-runtime bundles [feature...]
//! osgi-runtime plan [--config <file>] [--repository <dir>] [--strict] [feature...]
//! osgi-runtime install <runtime-dir> [--config <file>] [--repository <dir>] [--strict] [feature...]
//! ```
//!
//! With no features given, the config file's list is used, and with no config
//! file every feature in the catalog.

use osgi_runtime::{Feature, MAX_RUN_LEVEL, MIN_RUN_LEVEL, RuntimeConfig, bundles_for};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Environment variable selecting the log level.
const LOG_ENV_VAR: &str = "OSGI_RUNTIME_LOG";

// =============================================================================
// CLI Parsing
// =============================================================================

#[derive(Debug, Default)]
struct AssemblyOptions {
    config: Option<PathBuf>,
    repository: Option<PathBuf>,
    strict: bool,
    features: Vec<String>,
}

#[derive(Debug)]
enum Command {
    Features,
    Bundles { features: Vec<String> },
    Plan { options: AssemblyOptions },
    Install {
        runtime_dir: PathBuf,
        options: AssemblyOptions,
    },
    Version,
    Help,
}

fn parse_args() -> Result<Command, String> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        return Ok(Command::Help);
    }

    match args[1].as_str() {
        "features" => Ok(Command::Features),
        "bundles" => Ok(Command::Bundles {
            features: args[2..].to_vec(),
        }),
        "plan" => Ok(Command::Plan {
            options: parse_assembly_options(&args[2..])?,
        }),
        "install" => {
            if args.len() < 3 || args[2].starts_with('-') {
                return Err("install requires <runtime-dir>".to_string());
            }
            Ok(Command::Install {
                runtime_dir: PathBuf::from(&args[2]),
                options: parse_assembly_options(&args[3..])?,
            })
        }
        "version" | "--version" | "-V" => Ok(Command::Version),
        "help" | "--help" | "-h" => Ok(Command::Help),
        other => Err(format!("unknown command: {}", other)),
    }
}

fn parse_assembly_options(args: &[String]) -> Result<AssemblyOptions, String> {
    let mut options = AssemblyOptions::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                let path = args.get(i + 1).ok_or("--config requires a path")?;
                options.config = Some(PathBuf::from(path));
                i += 2;
            }
            "--repository" | "-r" => {
                let path = args.get(i + 1).ok_or("--repository requires a path")?;
                options.repository = Some(PathBuf::from(path));
                i += 2;
            }
            "--strict" | "-s" => {
                options.strict = true;
                i += 1;
            }
            flag if flag.starts_with('-') => {
                return Err(format!("unknown option: {}", flag));
            }
            feature => {
                options.features.push(feature.to_string());
                i += 1;
            }
        }
    }
    Ok(options)
}

/// Merges the config file (if any) with command-line overrides.
fn effective_config(options: &AssemblyOptions) -> Result<RuntimeConfig, String> {
    let mut config = match &options.config {
        Some(path) => RuntimeConfig::load(path).map_err(|e| e.to_string())?,
        None => RuntimeConfig::default(),
    };

    if options.repository.is_some() {
        config.repository = options.repository.clone();
    }
    if !options.features.is_empty() {
        config.features = options.features.clone();
    }
    config.strict_run_levels |= options.strict;

    Ok(config)
}

fn parse_features(names: &[String]) -> Result<Vec<Feature>, String> {
    if names.is_empty() {
        return Ok(Feature::ALL.to_vec());
    }
    names
        .iter()
        .map(|name| name.parse::<Feature>().map_err(|e| e.to_string()))
        .collect()
}

// =============================================================================
// Commands
// =============================================================================

fn cmd_features() -> Result<(), String> {
    println!("FEATURE\tLEVEL\tBUNDLES\tDESCRIPTION");
    for feature in Feature::ALL {
        let bundles = feature.bundles();
        let levels: Vec<String> = {
            let mut levels: Vec<u32> = bundles.iter().map(|b| b.run_level()).collect();
            levels.sort_unstable();
            levels.dedup();
            levels.iter().map(u32::to_string).collect()
        };
        println!(
            "{}\t{}\t{}\t{}",
            feature.name(),
            levels.join(","),
            bundles.len(),
            feature.description()
        );
    }
    Ok(())
}

fn cmd_bundles(features: Vec<String>) -> Result<(), String> {
    let features = parse_features(&features)?;
    println!("LEVEL\tCOORDINATE");
    for bundle in bundles_for(&features) {
        println!("{}\t{}", bundle.run_level(), bundle.coordinate());
    }
    Ok(())
}

fn cmd_plan(options: AssemblyOptions) -> Result<(), String> {
    let config = effective_config(&options)?;
    let features = config.features().map_err(|e| e.to_string())?;
    let repository = config.repository();

    // Plan paths are relative to the bundle directory, so the base is irrelevant.
    let plan = config
        .layout(".")
        .plan(&bundles_for(&features), &repository)
        .map_err(|e| e.to_string())?;

    let json = serde_json::to_string_pretty(&plan).map_err(|e| e.to_string())?;
    println!("{}", json);
    Ok(())
}

fn cmd_install(runtime_dir: PathBuf, options: AssemblyOptions) -> Result<(), String> {
    let config = effective_config(&options)?;
    let features = config.features().map_err(|e| e.to_string())?;
    let repository = config.repository();

    tracing::info!(
        "Assembling {} feature(s) from {} into {}",
        features.len(),
        repository.root().display(),
        runtime_dir.display()
    );

    let report = config
        .layout(&runtime_dir)
        .assemble(&bundles_for(&features), &repository)
        .map_err(|e| e.to_string())?;

    println!(
        "installed {} bundle(s) into {} ({} copied, {} unchanged, {} removed)",
        report.installed.len(),
        runtime_dir.display(),
        report.copied,
        report.unchanged,
        report.removed
    );
    Ok(())
}

fn cmd_version() {
    println!("osgi-runtime version {}", env!("CARGO_PKG_VERSION"));
}

fn cmd_help() {
    println!(
        r#"osgi-runtime - OSGi bundle catalog and runtime assembly

USAGE:
    osgi-runtime <command> [options]

COMMANDS:
    features                     List feature sets
    bundles [feature...]         List bundles of the given features
    plan [feature...]            Print the install plan (JSON)
    install <dir> [feature...]   Assemble a runtime directory
    version                      Show version info
    help                         Show this help

OPTIONS:
    --config, -c <file>      JSON configuration file
    --repository, -r <dir>   Local Maven repository (default: ~/.m2/repository)
    --strict, -s             Reject run levels outside {min}..={max}

ENVIRONMENT:
    OSGI_RUNTIME_REPOSITORY  Default repository location
    OSGI_RUNTIME_LOG         Log level: error, warn, info, debug, trace

EXAMPLES:
    osgi-runtime bundles pax-logging felix-tui-shell
    osgi-runtime install target/runtime osgi-core osgi-compendium pax-logging
"#,
        min = MIN_RUN_LEVEL,
        max = MAX_RUN_LEVEL
    );
}

// =============================================================================
// Main
// =============================================================================

fn init_logging() {
    let level = std::env::var(LOG_ENV_VAR)
        .ok()
        .and_then(|v| v.parse::<Level>().ok())
        .unwrap_or(Level::INFO);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Failed to set tracing subscriber");
    }
}

fn main() -> ExitCode {
    init_logging();

    match parse_args() {
        Ok(cmd) => {
            let result = match cmd {
                Command::Features => cmd_features(),
                Command::Bundles { features } => cmd_bundles(features),
                Command::Plan { options } => cmd_plan(options),
                Command::Install {
                    runtime_dir,
                    options,
                } => cmd_install(runtime_dir, options),
                Command::Version => {
                    cmd_version();
                    Ok(())
                }
                Command::Help => {
                    cmd_help();
                    Ok(())
                }
            };

            match result {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("error: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("Run 'osgi-runtime help' for usage");
            ExitCode::FAILURE
        }
    }
}
