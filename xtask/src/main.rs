// Licensed under the Apache-2.0 license

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mars_util_host_config::{HostConfig, CONFIG_FILE_NAME};
use std::path::PathBuf;
use std::process::Command;

mod build;
mod clean;

#[derive(Parser)]
#[command(
    name = "xtask",
    version,
    about = "Command-line toolkit for the mars-util-host library",
    long_about = "Build, test and maintenance tasks for the MARS host library workspace."
)]
struct Xtask {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the workspace
    Build {
        /// Build in release mode
        #[arg(short, long)]
        release: bool,
        /// Build specific package(s)
        #[arg(short, long)]
        package: Vec<String>,
    },

    /// Run tests
    Test {
        /// Run tests in release mode
        #[arg(short, long)]
        release: bool,
        /// Run specific test package(s)
        #[arg(short, long)]
        package: Vec<String>,
        /// Run only the emulator-backed integration tests
        #[arg(long)]
        integration_only: bool,
        /// Only run tests whose name contains this string
        #[arg(short, long)]
        filter: Option<String>,
        /// Show test output
        #[arg(long)]
        nocapture: bool,
    },

    /// Clean build artifacts
    Clean {
        /// Also remove the local host configuration file
        #[arg(long)]
        config: bool,
    },

    /// Format code
    Fmt {
        /// Check formatting without applying changes
        #[arg(long)]
        check: bool,
    },

    /// Run clippy lints
    Clippy {
        /// Fix issues automatically where possible
        #[arg(long)]
        fix: bool,
        /// Fail on warnings
        #[arg(long)]
        deny_warnings: bool,
    },

    /// Write a host configuration file populated with defaults
    Config {
        /// Output path
        #[arg(short, long, default_value = CONFIG_FILE_NAME)]
        output: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Run comprehensive checks (format, clippy, build, test)
    Check {
        /// Skip tests
        #[arg(long)]
        quick: bool,
    },

    /// Run pre-check-in checks (format, clippy, build)
    Precheckin,
}

fn main() -> Result<()> {
    let args = Xtask::parse();

    println!("xtask mars-util-host toolkit");

    match args.command {
        Commands::Build { release, package } => build::run(release, package),
        Commands::Test {
            release,
            package,
            integration_only,
            filter,
            nocapture,
        } => test::run(release, package, integration_only, filter, nocapture),
        Commands::Clean { config } => clean::run(config),
        Commands::Fmt { check } => run_fmt(check),
        Commands::Clippy { fix, deny_warnings } => run_clippy(fix, deny_warnings),
        Commands::Config { output, force } => run_config(output, force),
        Commands::Check { quick } => run_check(quick),
        Commands::Precheckin => run_precheckin(),
    }
}

pub fn cargo(subcommand: &str) -> Command {
    let mut cmd = Command::new(std::env::var("CARGO").unwrap_or_else(|_| "cargo".into()));
    cmd.arg(subcommand);
    cmd
}

pub fn run_command(name: &str, cmd: &mut Command) -> Result<()> {
    println!("Running: {}", name);

    let status = cmd
        .status()
        .with_context(|| format!("Failed to execute command: {}", name))?;

    if status.success() {
        println!("✓ {}", name);
        Ok(())
    } else {
        anyhow::bail!("Command failed: {}", name);
    }
}

fn run_fmt(check: bool) -> Result<()> {
    let mut cmd = cargo("fmt");
    cmd.arg("--all");

    if check {
        cmd.arg("--check");
    }

    run_command("cargo fmt", &mut cmd)
}

fn run_clippy(fix: bool, deny_warnings: bool) -> Result<()> {
    let mut cmd = cargo("clippy");
    cmd.args(["--workspace", "--all-targets"]);

    if fix {
        cmd.args(["--fix", "--allow-dirty"]);
    }

    if deny_warnings {
        cmd.args(["--", "-D", "warnings"]);
    }

    run_command("cargo clippy", &mut cmd)
}

fn run_config(output: PathBuf, force: bool) -> Result<()> {
    if output.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            output.display()
        );
    }

    HostConfig::default().save_to_file(&output)?;

    println!("✓ Wrote default configuration to {}", output.display());
    Ok(())
}

fn run_check(quick: bool) -> Result<()> {
    println!("Starting comprehensive check");

    run_fmt(true)?;
    run_clippy(false, true)?;
    build::run(false, vec![])?;

    if quick {
        println!("ℹ Skipping tests (quick mode)");
    } else {
        test::run(false, vec![], false, None, false)?;
    }

    println!("✓ All checks passed!");
    Ok(())
}

fn run_precheckin() -> Result<()> {
    println!("Starting pre-check-in checks");

    run_fmt(true)?;
    run_clippy(false, true)?;
    build::run(false, vec![])?;

    println!("✓ Pre-check-in passed!");
    Ok(())
}
