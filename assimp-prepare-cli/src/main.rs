//! CLI entry point for the Assimp build-and-stage workflow.
//!
//! This is the layer the host build orchestrator invokes, and the only place
//! the process environment is read: flags win over the `CMAKE_EXE_PATH`
//! override, which wins over the per-OS default tool path. The resulting
//! registration manifest is emitted as JSON for the host to consume.

use std::path::PathBuf;

use anyhow::{Context, Result};
use assimp_prepare::{PrepareConfig, TargetPlatform, prepare_dependency};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Build and stage the vendored Assimp library for a target platform.
#[derive(Parser)]
#[command(name = "assimp-prepare")]
#[command(version, about)]
struct Cli {
    /// Target platform: windows, macos, linux, android, or ios.
    /// Defaults to the host platform.
    #[arg(short, long)]
    platform: Option<String>,

    /// Directory containing the vendored `assimp/` source tree
    #[arg(short, long, default_value = ".")]
    module_dir: PathBuf,

    /// Binary staging root (default: <module-dir>/../../../Binaries)
    #[arg(long)]
    staging_root: Option<PathBuf>,

    /// Build tool executable (overrides CMAKE_EXE_PATH and the per-OS default)
    #[arg(long)]
    cmake: Option<PathBuf>,

    /// CMake build type for the configure step
    #[arg(long, default_value = "Release")]
    build_type: String,

    /// Android ABI selecting the prebuilt import library
    #[arg(long, default_value = "arm64-v8a")]
    android_abi: String,

    /// Write the registration manifest to this file instead of stdout
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let platform = match &cli.platform {
        Some(name) => name.parse::<TargetPlatform>()?,
        None => TargetPlatform::current()
            .context("could not detect a supported target platform; pass --platform")?,
    };

    let mut cfg = PrepareConfig::from_env(platform, cli.module_dir);
    if let Some(tool) = cli.cmake {
        cfg.build_tool = tool;
    }
    if let Some(root) = cli.staging_root {
        cfg.staging_root = root;
    }
    cfg.build_type = cli.build_type;
    cfg.android_abi = cli.android_abi;
    cfg.verbose |= cli.verbose;

    let prepared = prepare_dependency(&cfg)
        .with_context(|| format!("preparing Assimp for {platform}"))?;

    for warning in &prepared.warnings {
        eprintln!("warning: {warning}");
    }
    for staged in &prepared.staged_files {
        eprintln!("staged: {}", staged.display());
    }

    let manifest = serde_json::to_string_pretty(&prepared.registration)?;
    match &cli.manifest {
        Some(path) => std::fs::write(path, manifest)
            .with_context(|| format!("writing manifest to {}", path.display()))?,
        None => println!("{manifest}"),
    }

    Ok(())
}
