//! # chainlint-rules
//!
//! Built-in lint rules for chainlint.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | CL001 | `long-chain` | Flags switch cases repeating a long selector chain |
//!
//! ## Usage
//!
//! ```ignore
//! use chainlint_core::Analyzer;
//! use chainlint_go::GoFrontend;
//! use chainlint_rules::LongChain;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./pkg")
//!     .frontend(GoFrontend::new())
//!     .rule(LongChain::new())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod long_chain;
mod registry;

pub use long_chain::{common_prefix, decompose, LongChain, DEFAULT_MAX_SHARED_SEGMENTS};
pub use registry::{all_rules, configured_rules};

/// Re-export core types for convenience.
pub use chainlint_core::{Rule, Severity, Violation};
