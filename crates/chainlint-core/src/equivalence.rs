//! Structural equivalence of expressions.
//!
//! Rules that compare expressions take an [`Equivalence`] instead of relying
//! on a fixed notion of equality, so a frontend with richer semantics (e.g.
//! constant folding or alias resolution) can plug in its own comparison.

use crate::syntax::{Expr, ExprKind};

/// Decides whether two expressions denote the same syntax.
///
/// Implementations must be reflexive and symmetric.
pub trait Equivalence: Send + Sync {
    /// Returns true if `a` and `b` are equivalent.
    fn equivalent(&self, a: &Expr, b: &Expr) -> bool;
}

/// Syntactic identity ignoring source positions.
///
/// Identifiers compare by name, tokens by kind and text, composite nodes by
/// kind and pairwise children. Parentheses are significant: `(a)` and `a`
/// are different expressions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Structural;

impl Equivalence for Structural {
    fn equivalent(&self, a: &Expr, b: &Expr) -> bool {
        match (&a.kind, &b.kind) {
            (ExprKind::Ident(x), ExprKind::Ident(y)) => x == y,
            (
                ExprKind::Selector {
                    base: base_a,
                    field: field_a,
                },
                ExprKind::Selector {
                    base: base_b,
                    field: field_b,
                },
            ) => self.equivalent(field_a, field_b) && self.equivalent(base_a, base_b),
            (
                ExprKind::Token {
                    kind: kind_a,
                    text: text_a,
                },
                ExprKind::Token {
                    kind: kind_b,
                    text: text_b,
                },
            ) => kind_a == kind_b && text_a == text_b,
            (
                ExprKind::Node {
                    kind: kind_a,
                    children: children_a,
                },
                ExprKind::Node {
                    kind: kind_b,
                    children: children_b,
                },
            ) => {
                kind_a == kind_b
                    && children_a.len() == children_b.len()
                    && children_a
                        .iter()
                        .zip(children_b)
                        .all(|(x, y)| self.equivalent(x, y))
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::Span;

    fn at(offset: usize) -> Span {
        Span::new(offset, offset + 1, 1, offset + 1)
    }

    fn path(names: &[&str], offset: usize) -> Expr {
        let mut iter = names.iter().enumerate();
        let Some((_, root)) = iter.next() else {
            return Expr::token("invalid", "", at(offset));
        };
        iter.fold(Expr::ident(*root, at(offset)), |base, (i, name)| {
            Expr::selector(base, Expr::ident(*name, at(offset + i * 2)))
        })
    }

    fn call(name: &str, arg: &str, offset: usize) -> Expr {
        Expr::node(
            "call_expression",
            vec![
                Expr::ident(name, at(offset)),
                Expr::node(
                    "argument_list",
                    vec![
                        Expr::token("(", "(", at(offset + 1)),
                        Expr::token("int_literal", arg, at(offset + 2)),
                        Expr::token(")", ")", at(offset + 3)),
                    ],
                    at(offset + 1),
                ),
            ],
            at(offset),
        )
    }

    #[test]
    fn test_identical_paths_at_different_positions() {
        let eq = Structural;
        assert!(eq.equivalent(&path(&["a", "b", "c"], 0), &path(&["a", "b", "c"], 40)));
        assert!(!eq.equivalent(&path(&["a", "b", "c"], 0), &path(&["a", "b", "d"], 0)));
        assert!(!eq.equivalent(&path(&["a", "b"], 0), &path(&["a", "b", "c"], 0)));
    }

    #[test]
    fn test_calls_compare_arguments() {
        let eq = Structural;
        assert!(eq.equivalent(&call("f", "1", 0), &call("f", "1", 9)));
        assert!(!eq.equivalent(&call("f", "1", 0), &call("f", "2", 0)));
        assert!(!eq.equivalent(&call("f", "1", 0), &call("g", "1", 0)));
    }

    #[test]
    fn test_shapes_never_mix() {
        let eq = Structural;
        let ident = Expr::ident("x", at(0));
        let token = Expr::token("identifier", "x", at(0));
        assert!(!eq.equivalent(&ident, &token));
        assert!(!eq.equivalent(&ident, &path(&["x", "y"], 0)));
    }

    #[test]
    fn test_reflexive_and_symmetric() {
        let eq = Structural;
        let a = call("f", "1", 0);
        let b = call("f", "1", 5);
        assert!(eq.equivalent(&a, &a));
        assert_eq!(eq.equivalent(&a, &b), eq.equivalent(&b, &a));
    }
}
