//! Verify that the project is configured for in-app updates.
//!
//! Run from the project root. Exits 0 when every check passes, 1 otherwise.

use anyhow::Context;
use update_flow::diagnostics;

const RELEASE_ENV: &[(&str, &str)] = &[
    ("GITHUB_TOKEN", "publishes release assets (provided by Actions)"),
    ("CARGO_REGISTRY_TOKEN", "only when also publishing the crate (optional)"),
];

const NEXT_STEPS: &[&str] = &[
    "Bump the version in Cargo.toml",
    "Tag the commit as vX.Y.Z and push the tag",
    "Watch the release workflow upload one archive per target",
    "Start an older build and use the toolbar button to update",
];

fn main() -> anyhow::Result<()> {
    let root = std::env::current_dir().context("Failed to resolve the working directory")?;

    println!("Checking update configuration in {}", root.display());

    let report = diagnostics::verify(&root);
    for line in report.render() {
        println!("{}", line);
    }

    println!("\nRelease workflow environment:");
    for (name, purpose) in RELEASE_ENV {
        println!("   {} - {}", name, purpose);
    }

    println!("\nNext steps:");
    for (i, step) in NEXT_STEPS.iter().enumerate() {
        println!("{}. {}", i + 1, step);
    }

    if report.passed() {
        println!("\nAll update checks passed.");
    } else {
        let count = report.failures().count();
        println!("\n{} update check(s) failed, fix them and run again.", count);
    }
    std::process::exit(report.exit_code());
}
