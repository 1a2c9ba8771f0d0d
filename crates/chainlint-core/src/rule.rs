//! Rule trait for defining lint rules.

use crate::context::FileContext;
use crate::syntax::SourceFile;
use crate::types::{Severity, Violation};

/// A per-file lint rule over the [`SourceFile`] syntax model.
///
/// # Example
///
/// ```ignore
/// use chainlint_core::{FileContext, Rule, SourceFile, Violation};
///
/// pub struct NoEmptyFunctions;
///
/// impl Rule for NoEmptyFunctions {
///     fn name(&self) -> &'static str { "no-empty-functions" }
///     fn code(&self) -> &'static str { "CL100" }
///
///     fn check(&self, ctx: &FileContext, file: &SourceFile) -> Vec<Violation> {
///         file.functions()
///             .filter(|f| f.body.as_ref().is_some_and(|b| b.stmts.is_empty()))
///             .map(|f| /* ... */)
///             .collect()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "long-chain").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "CL001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    /// Whether this rule requires a reason when using allow directives.
    ///
    /// By default, rules with `Severity::Error` require a reason.
    fn requires_allow_reason(&self) -> bool {
        self.default_severity() == Severity::Error
    }

    /// Checks a single file and returns any violations found.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Context about the file being checked
    /// * `file` - The lowered syntax tree of the file
    fn check(&self, ctx: &FileContext, file: &SourceFile) -> Vec<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Location;

    struct TestRule;

    impl Rule for TestRule {
        fn name(&self) -> &'static str {
            "test-rule"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn description(&self) -> &'static str {
            "A test rule"
        }

        fn check(&self, ctx: &FileContext, file: &SourceFile) -> Vec<Violation> {
            file.functions()
                .map(|func| {
                    Violation::new(
                        self.code(),
                        self.name(),
                        self.default_severity(),
                        Location::new(ctx.relative_path.clone(), func.span.line, func.span.column),
                        format!("found `{}`", func.name),
                    )
                })
                .collect()
        }
    }

    #[test]
    fn test_rule_trait() {
        let rule = TestRule;
        assert_eq!(rule.name(), "test-rule");
        assert_eq!(rule.code(), "TEST001");
        assert_eq!(rule.default_severity(), Severity::Warning);
        assert!(!rule.requires_allow_reason());
    }
}
