// Licensed under the Apache-2.0 license

use anyhow::{Context, Result};
use mars_util_host_config::CONFIG_FILE_NAME;
use std::path::Path;

use crate::{cargo, run_command};

pub fn run(config: bool) -> Result<()> {
    println!("Cleaning build artifacts");

    let mut cmd = cargo("clean");
    run_command("cargo clean", &mut cmd)?;

    if config {
        remove_config(Path::new(CONFIG_FILE_NAME))?;
    }

    println!("✓ Cleaning completed successfully!");
    Ok(())
}

fn remove_config(path: &Path) -> Result<()> {
    if !path.exists() {
        println!("ℹ No {} found, skipping", path.display());
        return Ok(());
    }

    std::fs::remove_file(path)
        .with_context(|| format!("Failed to remove {}", path.display()))?;

    println!("✓ Removed {}", path.display());
    Ok(())
}
