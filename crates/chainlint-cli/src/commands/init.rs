//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const CONFIG_FILE: &str = "chainlint.toml";

const DEFAULT_CONFIG: &str = r#"# chainlint configuration

# Exit with status 1 when a violation at or above this level is found
# fail_on = "error"

[analyzer]
# Root directory to analyze (default: current directory)
# root = "./pkg"

# Glob patterns to exclude from analysis
exclude = [
    "**/vendor/**",
    "**/testdata/**",
]

# Respect .gitignore files
respect_gitignore = true

[rules.long-chain]
enabled = true
# Override default severity. At "error", an allow directive without
# reason="..." is reported as a warning.
# severity = "warning"
# Longest selector prefix case expressions may share
max_shared_segments = 2
# Also check switches nested in if/for/case bodies
recurse_nested = false
"#;

/// Runs the init command in the current directory.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new(CONFIG_FILE), force)?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to configure rules");
    println!("  2. Run: chainlint check");

    Ok(())
}

fn write_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))
}
