//! # chainlint-core
//!
//! Core framework for chainlint.
//!
//! This crate provides the foundational traits and types for building
//! source linters over a language-neutral syntax model. It includes:
//!
//! - [`syntax`] model that language frontends lower into
//! - [`Frontend`] trait for pluggable language parsing
//! - [`Equivalence`] trait for comparing expressions structurally
//! - [`Rule`] trait for per-file rules
//! - [`Analyzer`] for orchestrating lint execution
//! - [`Violation`] for representing lint findings
//!
//! ## Example
//!
//! ```ignore
//! use chainlint_core::Analyzer;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./pkg")
//!     .frontend(GoFrontend::new())
//!     .rule(LongChain::new())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod equivalence;
mod frontend;
mod rule;
pub mod syntax;
mod types;

/// Utility modules for rule implementations.
pub mod utils;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use context::FileContext;
pub use equivalence::{Equivalence, Structural};
pub use frontend::{Frontend, FrontendBox, ParseError};
pub use rule::{Rule, RuleBox};
pub use syntax::{Expr, ExprKind, SourceFile, Span, Stmt, SwitchStmt};
pub use types::{LintResult, Location, Severity, Suggestion, Violation};
pub use utils::allowance::AllowCheck;
