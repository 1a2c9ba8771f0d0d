//! # chainlint-go
//!
//! Tree-sitter based Go frontend for chainlint.
//!
//! [`GoFrontend`] parses Go source with `tree-sitter-go` and lowers the
//! concrete syntax tree into the language-neutral
//! [`chainlint_core::syntax`] model that rules consume.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod frontend;
mod lower;

pub use frontend::GoFrontend;
