//! Check command implementation.

use anyhow::{Context, Result};
use chainlint_core::{Analyzer, Config, LintResult, RuleBox};
use chainlint_go::GoFrontend;
use chainlint_rules::configured_rules;
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Runs the check command.
pub fn run(
    path: &Path,
    format: OutputFormat,
    rules_filter: Option<&str>,
    exclude: Vec<String>,
    source: &ConfigSource,
) -> Result<()> {
    let config = load_config(source)?;
    let fail_on = config.fail_on();

    let result = analyze(path, config, rules_filter, exclude)?;

    super::output::print(&result, format)?;

    if result.has_violations_at(fail_on) {
        std::process::exit(1);
    }

    Ok(())
}

fn load_config(source: &ConfigSource) -> Result<Config> {
    let Some(p) = source.path() else {
        return Ok(Config::default());
    };
    if source.is_global() {
        tracing::info!("Using global config: {}", p.display());
    }
    Config::from_file(p).with_context(|| format!("Failed to load config: {}", p.display()))
}

/// Builds the analyzer for `path` and runs it.
fn analyze(
    path: &Path,
    config: Config,
    rules_filter: Option<&str>,
    exclude: Vec<String>,
) -> Result<LintResult> {
    let mut rules = configured_rules(&config);
    if let Some(filter) = rules_filter {
        let names: Vec<&str> = filter.split(',').map(str::trim).collect();
        rules = filter_rules(rules, &names);
    }

    let builder = rules
        .into_iter()
        .fold(Analyzer::builder(), chainlint_core::AnalyzerBuilder::rule_box);

    let analyzer = builder
        .root(path)
        .frontend(GoFrontend::new())
        .config(config)
        .excludes(exclude)
        .build()
        .context("Failed to build analyzer")?;

    tracing::info!("Analyzing {:?} with {} rules", path, analyzer.rule_count());

    analyzer.analyze().context("Analysis failed")
}

fn filter_rules(rules: Vec<RuleBox>, names: &[&str]) -> Vec<RuleBox> {
    for name in names {
        if !rules.iter().any(|r| r.name() == *name || r.code() == *name) {
            tracing::warn!("Unknown or disabled rule: {}", name);
        }
    }

    rules
        .into_iter()
        .filter(|rule| names.contains(&rule.name()) || names.contains(&rule.code()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const SHARED: &str = r"package app

func handle(v int) {
	switch v {
	case app.cfg.mode.Fast:
	case app.cfg.mode.Slow:
	}
}
";

    fn project(files: &[(&str, &str)]) -> TempDir {
        let tmp = TempDir::new().unwrap();
        for (name, content) in files {
            let path = tmp.path().join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        tmp
    }

    #[test]
    fn test_analyze_reports_shared_chain() {
        let tmp = project(&[("app/handle.go", SHARED)]);
        let result = analyze(tmp.path(), Config::default(), None, Vec::new()).unwrap();

        assert_eq!(result.files_checked, 1);
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].code, "CL001");
        assert!(!result.has_errors());
    }

    #[test]
    fn test_analyze_honours_exclude_and_filter() {
        let tmp = project(&[("gen/handle.go", SHARED), ("app/handle.go", SHARED)]);

        let result = analyze(
            tmp.path(),
            Config::default(),
            None,
            vec!["**/gen/**".to_string()],
        )
        .unwrap();
        assert_eq!(result.files_checked, 1);

        let result = analyze(tmp.path(), Config::default(), Some("no-such-rule"), Vec::new())
            .unwrap();
        assert!(result.violations.is_empty());

        let result = analyze(tmp.path(), Config::default(), Some("CL001"), Vec::new()).unwrap();
        assert_eq!(result.violations.len(), 2);
    }

    #[test]
    fn test_analyze_skips_unparsable_files() {
        let tmp = project(&[
            ("app/handle.go", SHARED),
            ("app/broken.go", "package app\n\nfunc broken( {\n"),
        ]);
        let result = analyze(tmp.path(), Config::default(), None, Vec::new()).unwrap();
        assert_eq!(result.files_checked, 1);
        assert_eq!(result.violations.len(), 1);
    }

    #[test]
    fn test_severity_override_sets_fail_threshold() {
        let tmp = project(&[
            ("app/handle.go", SHARED),
            (
                "chainlint.toml",
                "fail_on = \"warning\"\n\n[rules.long-chain]\nseverity = \"error\"\n",
            ),
        ]);
        let source = crate::config_resolver::resolve(tmp.path(), None);
        let config = load_config(&source).unwrap();
        assert_eq!(config.fail_on(), chainlint_core::Severity::Warning);

        let result = analyze(tmp.path(), config, None, Vec::new()).unwrap();
        assert!(result.has_errors());
    }

    #[test]
    fn test_analyze_root_inside_vendor_directory() {
        let tmp = project(&[("vendor/proj/app/handle.go", SHARED)]);
        let root = tmp.path().join("vendor/proj");

        let result = analyze(&root, Config::default(), None, Vec::new()).unwrap();
        assert_eq!(result.files_checked, 1);
        assert_eq!(result.violations.len(), 1);
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let source = ConfigSource::Explicit("/nonexistent/chainlint.toml".into());
        assert!(load_config(&source).is_err());
    }
}
