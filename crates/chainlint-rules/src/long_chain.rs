//! Rule to flag switch statements whose case expressions repeat a long
//! selector chain.
//!
//! # Rationale
//!
//! ```go
//! switch v {
//! case cfg.Srv.Opts.Timeout, cfg.Srv.Opts.Retries:
//! case cfg.Srv.Opts.Backoff:
//! }
//! ```
//!
//! Every case re-walks `cfg.Srv.Opts`. Hoisting the shared prefix into a
//! local variable shortens the cases and makes the common root explicit.
//!
//! # Detection
//!
//! The expressions of all non-default clauses are split along selectors into
//! root-first chains (`cfg.Srv.Opts.Timeout` becomes `[cfg, Srv, Opts,
//! Timeout]`). The greatest common prefix of all chains is computed under an
//! [`Equivalence`]; if it is longer than `max_shared_segments`, one warning
//! is reported on the switch statement.
//!
//! Only switches that are direct statements of a function body are examined
//! unless `recurse_nested` is enabled.
//!
//! # Configuration
//!
//! - `max_shared_segments`: Longest prefix that is still accepted (default: 2)
//! - `recurse_nested`: Also examine switches inside nested blocks (default: false)

use chainlint_core::syntax::FuncDecl;
use chainlint_core::utils::allowance::check_allow_with_reason;
use chainlint_core::{
    Equivalence, Expr, FileContext, Location, Rule, RuleConfig, Severity, SourceFile, Stmt,
    Structural, Suggestion, SwitchStmt, Violation,
};
use tracing::{debug, warn};

/// Rule code for long-chain.
pub const CODE: &str = "CL001";

/// Rule name for long-chain.
pub const NAME: &str = "long-chain";

/// Longest shared prefix that does not produce a warning.
pub const DEFAULT_MAX_SHARED_SEGMENTS: usize = 2;

/// Flags switch statements whose case expressions share a long selector prefix.
#[derive(Debug, Clone)]
pub struct LongChain<E = Structural> {
    equivalence: E,
    max_shared_segments: usize,
    recurse_nested: bool,
    severity: Severity,
}

impl Default for LongChain {
    fn default() -> Self {
        Self::new()
    }
}

impl LongChain {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            equivalence: Structural,
            max_shared_segments: DEFAULT_MAX_SHARED_SEGMENTS,
            recurse_nested: false,
            severity: Severity::Warning,
        }
    }
}

impl<E: Equivalence> LongChain<E> {
    /// Replaces the expression equivalence used to compare segments.
    #[must_use]
    pub fn with_equivalence<F: Equivalence>(self, equivalence: F) -> LongChain<F> {
        LongChain {
            equivalence,
            max_shared_segments: self.max_shared_segments,
            recurse_nested: self.recurse_nested,
            severity: self.severity,
        }
    }

    /// Sets the longest shared prefix that is still accepted.
    #[must_use]
    pub fn max_shared_segments(mut self, max: usize) -> Self {
        self.max_shared_segments = max;
        self
    }

    /// Sets whether switches nested in blocks, branches and loops are examined.
    ///
    /// Off by default: only switches that are direct statements of a function
    /// body are checked.
    #[must_use]
    pub fn recurse_nested(mut self, recurse: bool) -> Self {
        self.recurse_nested = recurse;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Applies `severity`, `max_shared_segments` and `recurse_nested` from a
    /// rule config block.
    ///
    /// A threshold that is not a non-negative integer, or a `recurse_nested`
    /// that is not a boolean, is logged and the current setting kept.
    #[must_use]
    pub fn configure(self, config: &RuleConfig) -> Self {
        let max = match config.options.get("max_shared_segments") {
            None => self.max_shared_segments,
            Some(value) => match value.as_integer().map(usize::try_from) {
                Some(Ok(max)) => max,
                _ => {
                    warn!(
                        "Ignoring {NAME}.max_shared_segments = {value}: expected a non-negative integer"
                    );
                    self.max_shared_segments
                }
            },
        };
        let recurse = match config.options.get("recurse_nested") {
            None => self.recurse_nested,
            Some(value) => value.as_bool().unwrap_or_else(|| {
                warn!("Ignoring {NAME}.recurse_nested = {value}: expected a boolean");
                self.recurse_nested
            }),
        };
        let severity = config.severity.unwrap_or(self.severity);
        self.max_shared_segments(max)
            .recurse_nested(recurse)
            .severity(severity)
    }

    /// Returns the shared prefix of `switch` if it is long enough to report.
    #[must_use]
    pub fn scan_switch<'a>(&self, switch: &'a SwitchStmt) -> Option<Vec<&'a Expr>> {
        let exprs: Vec<&Expr> = switch.case_exprs().collect();
        if exprs.len() < 2 {
            return None;
        }

        let mut chains = exprs.into_iter().map(decompose);
        let first = chains.next()?;
        let prefix = chains.fold(first, |prefix, chain| {
            common_prefix(&self.equivalence, &prefix, &chain)
        });

        (prefix.len() > self.max_shared_segments).then_some(prefix)
    }
}

impl<E: Equivalence> Rule for LongChain<E> {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Flags switch cases repeating a long selector chain"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, file: &SourceFile) -> Vec<Violation> {
        let mut visitor = SwitchVisitor {
            ctx,
            rule: self,
            violations: Vec::new(),
        };

        for func in file.functions() {
            visitor.visit_func(func);
        }
        visitor.violations
    }
}

/// Splits an expression along selectors into a root-first chain.
///
/// `a.b.c` yields `[a, b, c]`; any non-selector expression yields itself.
#[must_use]
pub fn decompose(expr: &Expr) -> Vec<&Expr> {
    let mut segments = Vec::new();
    let mut current = expr;
    while let Some((base, field)) = current.as_selector() {
        segments.push(field);
        current = base;
    }
    segments.push(current);
    segments.reverse();
    segments
}

/// Leading segments of `xs` that are equivalent, position by position, to
/// those of `ys`.
#[must_use]
pub fn common_prefix<'a, E: Equivalence + ?Sized>(
    equivalence: &E,
    xs: &[&'a Expr],
    ys: &[&Expr],
) -> Vec<&'a Expr> {
    xs.iter()
        .zip(ys)
        .take_while(|(x, y)| equivalence.equivalent(x, y))
        .map(|(x, _)| *x)
        .collect()
}

struct SwitchVisitor<'a, E> {
    ctx: &'a FileContext<'a>,
    rule: &'a LongChain<E>,
    violations: Vec<Violation>,
}

impl<E: Equivalence> SwitchVisitor<'_, E> {
    fn visit_func(&mut self, func: &FuncDecl) {
        let Some(body) = &func.body else {
            return;
        };
        for stmt in &body.stmts {
            self.visit_stmt(&func.name, stmt);
        }
    }

    fn visit_stmt(&mut self, func: &str, stmt: &Stmt) {
        if let Stmt::Switch(switch) = stmt {
            if let Some(prefix) = self.rule.scan_switch(switch) {
                self.report(func, switch, &prefix);
            }
        }

        if self.rule.recurse_nested {
            for nested in stmt.nested_stmts() {
                self.visit_stmt(func, nested);
            }
        }
    }

    fn report(&mut self, func: &str, switch: &SwitchStmt, prefix: &[&Expr]) {
        // Canonical form: layout inside a segment never reaches the message.
        let chain = prefix
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".");

        debug!(
            "Shared chain `{}` ({} segments) in {} at {}:{}",
            chain,
            prefix.len(),
            func,
            self.ctx.relative_path.display(),
            switch.span.line
        );

        let location = Location::from_span(self.ctx.relative_path.clone(), switch.span);

        let allow_check = check_allow_with_reason(self.ctx.content, switch.span.line, NAME);
        if allow_check.is_allowed() {
            if self.rule.requires_allow_reason() && allow_check.reason().is_none() {
                self.violations.push(
                    Violation::new(
                        CODE,
                        NAME,
                        Severity::Warning,
                        location,
                        format!("Allow directive for '{NAME}' is missing required reason"),
                    )
                    .with_suggestion(Suggestion::new(
                        "Add reason=\"...\" to explain why this exception is necessary",
                    )),
                );
            }
            return;
        }

        self.violations.push(
            Violation::new(
                CODE,
                NAME,
                self.rule.severity,
                location,
                format!(
                    "Expression chain {chain} repeated multiple times consider assigning it to local variable"
                ),
            )
            .with_suggestion(Suggestion::new(format!(
                "Assign `{chain}` to a local variable before the switch and select from it in each case"
            ))),
        );
    }
}
