use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use multimod::config::{self, Config};
use multimod::domain::{is_stable_version, ModulePath};
use multimod::git_ops;
use multimod::{ModuleSetRelease, ModuleVersioning};

#[derive(Parser)]
#[command(
    name = "multimod",
    version,
    about = "Inspect module set versions and release tag names in a multi-module repository"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, global = true, help = "Versioning file (overrides configuration)")]
    versioning_file: Option<PathBuf>,

    #[arg(long, global = true, help = "Repository root (default: discovered from git)")]
    repo_root: Option<PathBuf>,

    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Increase log verbosity")]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List module sets with their versions
    Sets,
    /// Show which module set a module belongs to
    Info { module: String },
    /// Print the full tag names for a module set release
    Tags { module_set: String },
    /// Validate the versioning file against the repository
    Verify,
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(verbose >= 2).with_writer(std::io::stderr))
        .init();
}

fn resolve_paths(args: &Args, config: &Config) -> Result<(PathBuf, PathBuf)> {
    let repo_root = match args.repo_root.clone().or_else(|| config.repo_root.clone()) {
        Some(root) => root,
        None => git_ops::find_repo_root(".").context("could not determine repository root")?,
    };

    let versioning_file = match &args.versioning_file {
        Some(path) => path.clone(),
        None => config.versioning_file_in(&repo_root),
    };

    Ok((repo_root, versioning_file))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = config::load_config(args.config.as_deref()).context("error loading config")?;
    let (repo_root, versioning_file) = resolve_paths(&args, &config)?;

    match &args.command {
        Command::Sets => {
            let versioning = ModuleVersioning::new(&versioning_file, &repo_root)?;
            for name in versioning.module_set_names() {
                let mod_set = versioning.get_module_set(name)?;
                let stability = if is_stable_version(&mod_set.version) {
                    "stable"
                } else {
                    "unstable"
                };
                println!(
                    "{} {} ({}, {} modules)",
                    name,
                    mod_set.version,
                    stability,
                    mod_set.modules.len()
                );
            }
        }
        Command::Info { module } => {
            let versioning = ModuleVersioning::new(&versioning_file, &repo_root)?;
            let mod_path = ModulePath::from(module.as_str());
            match versioning.module_info(&mod_path) {
                Some(info) => println!("{} {} {}", mod_path, info.module_set_name, info.version),
                None => anyhow::bail!("module {} is not part of any module set", mod_path),
            }
        }
        Command::Tags { module_set } => {
            let release = ModuleSetRelease::new(&versioning_file, module_set, &repo_root)?;
            for tag in release.module_full_tag_names() {
                println!("{}", tag);
            }
        }
        Command::Verify => {
            let versioning = ModuleVersioning::new(&versioning_file, &repo_root)?;
            println!(
                "{}: {} module sets, {} modules OK",
                versioning_file.display(),
                versioning.mod_set_map().len(),
                versioning.mod_info_map().len()
            );
        }
    }

    Ok(())
}
