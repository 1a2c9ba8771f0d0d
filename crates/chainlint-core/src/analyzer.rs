//! Core analyzer for orchestrating lint execution.

use crate::config::Config;
use crate::context::FileContext;
use crate::frontend::{Frontend, FrontendBox};
use crate::rule::{Rule, RuleBox};
use crate::types::{LintResult, Violation};

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error walking the source tree.
    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    /// Error parsing a source file.
    #[error("Parse error in {path}: {message}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Parse error message.
        message: String,
    },

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// No language frontend was configured.
    #[error("No language frontend configured")]
    MissingFrontend,

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    frontend: Option<FrontendBox>,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
    fail_on_parse_error: bool,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Sets the language frontend used to parse source files.
    #[must_use]
    pub fn frontend<F: Frontend + 'static>(mut self, frontend: F) -> Self {
        self.frontend = Some(Box::new(frontend));
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether to fail on parse errors (default: false).
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = fail;
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if no frontend was set, the current directory cannot
    /// be resolved, or an exclude pattern is not a valid glob.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let frontend = self.frontend.ok_or(AnalyzerError::MissingFrontend)?;

        let root = self
            .root
            .or_else(|| self.config.as_ref().map(|c| c.analyzer.root.clone()))
            .unwrap_or_else(|| PathBuf::from("."));

        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let config = self.config.unwrap_or_default();

        let mut raw_patterns = self.exclude_patterns;
        raw_patterns.extend(config.analyzer.exclude.iter().cloned());

        let exclude_patterns = raw_patterns
            .into_iter()
            .map(|raw| -> Result<_, AnalyzerError> { Ok((glob::Pattern::new(&raw)?, raw)) })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Analyzer {
            root,
            rules: self.rules,
            frontend,
            exclude_patterns,
            config,
            fail_on_parse_error: self.fail_on_parse_error,
        })
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    rules: Vec<RuleBox>,
    frontend: FrontendBox,
    exclude_patterns: Vec<(glob::Pattern, String)>,
    config: Config,
    fail_on_parse_error: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the configuration in effect.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Analyzes all files and returns the results.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery fails, a file cannot be read, or a
    /// file fails to parse while `fail_on_parse_error` is set.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        let mut result = LintResult::new();
        let files = self.discover_files()?;

        info!(
            "Found {} {} files to analyze",
            files.len(),
            self.frontend.language_id()
        );

        for file_path in &files {
            let content = std::fs::read_to_string(file_path)?;
            match self.check_source(file_path, &content) {
                Ok(violations) => {
                    result.violations.extend(violations);
                    result.files_checked += 1;
                }
                Err(AnalyzerError::Parse { path, message }) => {
                    warn!("Failed to parse {}: {}", path.display(), message);
                    if self.fail_on_parse_error {
                        return Err(AnalyzerError::Parse { path, message });
                    }
                }
                Err(e) => return Err(e),
            }
        }

        result.sort();

        info!(
            "Analysis complete: {} violations in {} files",
            result.violations.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Parses `content` as the file at `path` and runs every enabled rule.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Parse`] if the frontend rejects the source.
    pub fn check_source(&self, path: &Path, content: &str) -> Result<Vec<Violation>, AnalyzerError> {
        debug!("Analyzing: {}", path.display());

        let file = self
            .frontend
            .parse(content)
            .map_err(|e| AnalyzerError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let ctx = FileContext::new(path, content, &self.root);
        let mut violations = Vec::new();

        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.name()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }

            let rule_violations = rule.check(&ctx, &file);
            let rule_violations = self.apply_severity_override(rule.as_ref(), rule_violations);
            violations.extend(rule_violations);
        }

        Ok(violations)
    }

    /// Applies severity overrides from configuration.
    ///
    /// Only findings reported at the rule's own severity are rewritten;
    /// notices a rule pins to another level (e.g. a missing allow reason)
    /// keep it.
    fn apply_severity_override(
        &self,
        rule: &dyn Rule,
        mut violations: Vec<Violation>,
    ) -> Vec<Violation> {
        if let Some(severity) = self.config.rule_severity(rule.name()) {
            let own = rule.default_severity();
            for v in violations.iter_mut().filter(|v| v.severity == own) {
                v.severity = severity;
            }
        }
        violations
    }

    /// Discovers all source files the frontend handles.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let respect_gitignore = self.config.analyzer.respect_gitignore;
        let walker = ignore::WalkBuilder::new(&self.root)
            .git_ignore(respect_gitignore)
            .git_exclude(respect_gitignore)
            .require_git(false)
            .build();

        let mut files = Vec::new();

        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }

            let path = entry.path();
            if !self.frontend.handles(path) {
                continue;
            }

            if self.should_exclude(path) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    /// Checks if a path should be excluded.
    ///
    /// Relative patterns only see the part of the path below the root, so
    /// directories above the root never trigger an exclude.
    fn should_exclude(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let relative_str = format!("/{}", relative.to_string_lossy());

        self.exclude_patterns.iter().any(|(pattern, raw)| {
            if pattern.matches_path(relative) {
                return true;
            }
            if Path::new(raw).is_absolute() {
                return pattern.matches_path(path);
            }

            // Also check as substring for patterns like "**/vendor/**"
            let normalized = raw.replace("**", "");
            !normalized.is_empty() && normalized != "/" && relative_str.contains(&normalized)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::ParseError;
    use crate::syntax::{Decl, SourceFile, Span};
    use crate::types::{Location, Severity};

    /// Treats every `.src` file as one declaration per line; `!` is a syntax error.
    struct LineFrontend;

    impl Frontend for LineFrontend {
        fn language_id(&self) -> &'static str {
            "lines"
        }
        fn extensions(&self) -> &'static [&'static str] {
            &["src"]
        }
        fn parse(&self, source: &str) -> Result<SourceFile, ParseError> {
            if let Some(line) = source.lines().position(|l| l.contains('!')) {
                return Err(ParseError::new(line + 1, 1, "bang"));
            }
            let decls = source
                .lines()
                .enumerate()
                .map(|(i, _)| Decl::Other(Span::new(0, 0, i + 1, 1)))
                .collect();
            Ok(SourceFile { decls })
        }
    }

    struct CountDecls;

    impl Rule for CountDecls {
        fn name(&self) -> &'static str {
            "count-decls"
        }
        fn code(&self) -> &'static str {
            "T001"
        }
        fn check(&self, ctx: &FileContext, file: &SourceFile) -> Vec<Violation> {
            vec![Violation::new(
                self.code(),
                self.name(),
                self.default_severity(),
                Location::new(ctx.relative_path.clone(), 1, 1),
                format!("{} decls", file.decls.len()),
            )]
        }
    }

    /// Reports one finding at its own severity plus a pinned info notice.
    struct WithNotice;

    impl Rule for WithNotice {
        fn name(&self) -> &'static str {
            "with-notice"
        }
        fn code(&self) -> &'static str {
            "T002"
        }
        fn check(&self, ctx: &FileContext, _file: &SourceFile) -> Vec<Violation> {
            let at = Location::new(ctx.relative_path.clone(), 1, 1);
            vec![
                Violation::new(
                    self.code(),
                    self.name(),
                    self.default_severity(),
                    at.clone(),
                    "finding",
                ),
                Violation::new(self.code(), self.name(), Severity::Info, at, "notice"),
            ]
        }
    }

    fn analyzer_at(root: &Path, config: Config) -> Analyzer {
        Analyzer::builder()
            .root(root)
            .frontend(LineFrontend)
            .rule(CountDecls)
            .config(config)
            .build()
            .expect("Failed to build analyzer")
    }

    #[test]
    fn test_builder_requires_frontend() {
        let result = Analyzer::builder().root(".").build();
        assert!(matches!(result, Err(AnalyzerError::MissingFrontend)));
    }

    #[test]
    fn test_builder_rejects_bad_glob() {
        let result = Analyzer::builder()
            .frontend(LineFrontend)
            .exclude("[")
            .build();
        assert!(matches!(result, Err(AnalyzerError::Glob(_))));
    }

    #[test]
    fn test_exclude_patterns() {
        let analyzer = Analyzer::builder()
            .root("/repo")
            .frontend(LineFrontend)
            .exclude("**/generated/**")
            .build()
            .expect("Failed to build analyzer");

        assert!(analyzer.should_exclude(Path::new("/repo/vendor/lib.src")));
        assert!(analyzer.should_exclude(Path::new("/repo/pkg/generated/a.src")));
        assert!(!analyzer.should_exclude(Path::new("/repo/pkg/lib.src")));
    }

    #[test]
    fn test_exclude_ignores_directories_above_root() {
        let analyzer = Analyzer::builder()
            .root("/home/dev/vendor/proj")
            .frontend(LineFrontend)
            .exclude("/home/dev/vendor/proj/gen/**")
            .build()
            .expect("Failed to build analyzer");

        assert!(!analyzer.should_exclude(Path::new("/home/dev/vendor/proj/pkg/a.src")));
        assert!(analyzer.should_exclude(Path::new("/home/dev/vendor/proj/vendor/b.src")));
        assert!(analyzer.should_exclude(Path::new("/home/dev/vendor/proj/gen/c.src")));
    }

    #[test]
    fn test_analyze_root_nested_in_excluded_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path().join("vendor/proj");
        std::fs::create_dir_all(root.join("pkg")).expect("mkdir");
        std::fs::create_dir_all(root.join("testdata")).expect("mkdir");
        std::fs::write(root.join("pkg/a.src"), "x
").expect("write");
        std::fs::write(root.join("testdata/b.src"), "x
").expect("write");

        let result = analyzer_at(&root, Config::default())
            .analyze()
            .expect("analyze");

        assert_eq!(result.files_checked, 1);
        assert_eq!(result.violations[0].location.file, PathBuf::from("pkg/a.src"));
    }

    #[test]
    fn test_analyze_discovers_and_sorts() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(dir.path().join("pkg")).expect("mkdir");
        std::fs::create_dir_all(dir.path().join("vendor")).expect("mkdir");
        std::fs::write(dir.path().join("pkg/b.src"), "x\ny\n").expect("write");
        std::fs::write(dir.path().join("a.src"), "x\n").expect("write");
        std::fs::write(dir.path().join("vendor/c.src"), "x\n").expect("write");
        std::fs::write(dir.path().join("notes.txt"), "x\n").expect("write");

        let result = analyzer_at(dir.path(), Config::default())
            .analyze()
            .expect("analyze");

        assert_eq!(result.files_checked, 2);
        let messages: Vec<&str> = result.violations.iter().map(|v| v.message.as_str()).collect();
        assert_eq!(messages, vec!["1 decls", "2 decls"]);
        assert_eq!(result.violations[0].location.file, PathBuf::from("a.src"));
    }

    #[test]
    fn test_parse_errors_skip_or_fail() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("ok.src"), "x\n").expect("write");
        std::fs::write(dir.path().join("bad.src"), "x\n!\n").expect("write");

        let result = analyzer_at(dir.path(), Config::default())
            .analyze()
            .expect("analyze");
        assert_eq!(result.files_checked, 1);

        let strict = Analyzer::builder()
            .root(dir.path())
            .frontend(LineFrontend)
            .rule(CountDecls)
            .fail_on_parse_error(true)
            .build()
            .expect("build");
        assert!(matches!(strict.analyze(), Err(AnalyzerError::Parse { .. })));
    }

    #[test]
    fn test_config_disables_and_overrides() {
        let disabled = Config::parse("[rules.count-decls]\nenabled = false\n").expect("parse");
        let analyzer = analyzer_at(Path::new("/repo"), disabled);
        let violations = analyzer
            .check_source(Path::new("/repo/a.src"), "x\n")
            .expect("check");
        assert!(violations.is_empty());

        let overridden = Config::parse("[rules.count-decls]\nseverity = \"error\"\n").expect("parse");
        let analyzer = analyzer_at(Path::new("/repo"), overridden);
        let violations = analyzer
            .check_source(Path::new("/repo/a.src"), "x\n")
            .expect("check");
        assert_eq!(violations[0].severity, Severity::Error);
    }

    #[test]
    fn test_override_keeps_pinned_severity() {
        let config = Config::parse("[rules.with-notice]\nseverity = \"error\"\n").expect("parse");
        let analyzer = Analyzer::builder()
            .root("/repo")
            .frontend(LineFrontend)
            .rule(WithNotice)
            .config(config)
            .build()
            .expect("build");

        let violations = analyzer
            .check_source(Path::new("/repo/a.src"), "x\n")
            .expect("check");
        let levels: Vec<(&str, Severity)> = violations
            .iter()
            .map(|v| (v.message.as_str(), v.severity))
            .collect();
        assert_eq!(
            levels,
            vec![("finding", Severity::Error), ("notice", Severity::Info)]
        );
    }
}
