// Licensed under the Apache-2.0 license

use anyhow::Result;
use std::process::Command;

use crate::{cargo, run_command};

pub fn run(release: bool, packages: Vec<String>) -> Result<()> {
    println!("Building mars-util-host workspace");

    let mut cmd = cargo("build");
    select_packages(&mut cmd, &packages);

    if release {
        cmd.arg("--release");
        println!("Mode: Release");
    } else {
        println!("Mode: Debug");
    }

    cmd.arg("--all-targets");

    run_command("cargo build", &mut cmd)?;

    println!("✓ Build completed successfully!");
    Ok(())
}

/// Restrict a cargo invocation to `packages`, or the whole workspace when empty
pub fn select_packages(cmd: &mut Command, packages: &[String]) {
    if packages.is_empty() {
        cmd.arg("--workspace");
        println!("Target: All workspace packages");
    } else {
        println!("Target: {}", packages.join(", "));
        for package in packages {
            cmd.args(["-p", package]);
        }
    }
}
