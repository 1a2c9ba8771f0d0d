//! Language-neutral syntax model consumed by rules.
//!
//! Frontends lower their native parse trees into these types. The model keeps
//! declarations, statement nesting and full expression trees; anything a rule
//! never inspects is folded into [`Decl::Other`] or [`Stmt::Simple`] spans.

use std::fmt;

/// Source range of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
    /// Line of the start offset (1-indexed).
    pub line: usize,
    /// Column of the start offset (1-indexed).
    pub column: usize,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// Length of the span in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span covers no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A parsed source file.
#[derive(Debug, Clone, Default)]
pub struct SourceFile {
    /// Top-level declarations in source order.
    pub decls: Vec<Decl>,
}

impl SourceFile {
    /// Iterates over function and method declarations.
    pub fn functions(&self) -> impl Iterator<Item = &FuncDecl> {
        self.decls.iter().filter_map(|decl| match decl {
            Decl::Func(func) => Some(func),
            Decl::Other(_) => None,
        })
    }
}

/// Top-level declaration.
#[derive(Debug, Clone)]
pub enum Decl {
    /// Function or method declaration.
    Func(FuncDecl),
    /// Any other declaration (imports, types, vars, consts).
    Other(Span),
}

/// Function or method declaration.
#[derive(Debug, Clone)]
pub struct FuncDecl {
    /// Function or method name.
    pub name: String,
    /// Function body; `None` for external declarations.
    pub body: Option<Block>,
    /// Span of the whole declaration.
    pub span: Span,
}

/// Braced statement list.
#[derive(Debug, Clone, Default)]
pub struct Block {
    /// Direct statements of the block.
    pub stmts: Vec<Stmt>,
    /// Span of the block including braces.
    pub span: Span,
}

/// Statement.
#[derive(Debug, Clone)]
pub enum Stmt {
    /// Expression switch (`switch x { case a, b: ... }`).
    Switch(SwitchStmt),
    /// Statement owning nested blocks (if, for, block, select, type switch, labeled).
    Compound(CompoundStmt),
    /// Statement without nested statements.
    Simple(Span),
}

impl Stmt {
    /// Span of the statement.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Switch(switch) => switch.span,
            Self::Compound(compound) => compound.span,
            Self::Simple(span) => *span,
        }
    }

    /// Statements one nesting level below this one.
    ///
    /// For a switch these are the statements of every clause body; for a
    /// compound statement the statements of each owned block.
    #[must_use]
    pub fn nested_stmts(&self) -> Vec<&Stmt> {
        match self {
            Self::Switch(switch) => switch
                .clauses
                .iter()
                .flat_map(|clause| clause.body.iter())
                .collect(),
            Self::Compound(compound) => compound
                .blocks
                .iter()
                .flat_map(|block| block.stmts.iter())
                .collect(),
            Self::Simple(_) => Vec::new(),
        }
    }
}

/// Expression switch statement.
#[derive(Debug, Clone)]
pub struct SwitchStmt {
    /// Case clauses in source order.
    pub clauses: Vec<CaseClause>,
    /// Span of the whole statement.
    pub span: Span,
}

impl SwitchStmt {
    /// Flattens the expressions of every non-default clause, in clause order
    /// and then list order.
    pub fn case_exprs(&self) -> impl Iterator<Item = &Expr> {
        self.clauses
            .iter()
            .filter_map(|clause| clause.exprs.as_deref())
            .flatten()
    }
}

/// One `case` or `default` clause.
#[derive(Debug, Clone)]
pub struct CaseClause {
    /// Case expressions; `None` for the default clause.
    pub exprs: Option<Vec<Expr>>,
    /// Statements of the clause body.
    pub body: Vec<Stmt>,
    /// Span of the clause.
    pub span: Span,
}

impl CaseClause {
    /// Returns true for the `default:` clause.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.exprs.is_none()
    }
}

/// Kind of a compound statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompoundKind {
    /// Bare `{ ... }` block.
    Block,
    /// `if` with its `else` branches.
    If,
    /// `for` loop.
    For,
    /// `select` statement.
    Select,
    /// Type switch.
    TypeSwitch,
    /// Labeled statement.
    Labeled,
}

/// Statement that owns nested blocks.
#[derive(Debug, Clone)]
pub struct CompoundStmt {
    /// What kind of statement this is.
    pub kind: CompoundKind,
    /// Owned blocks in source order.
    pub blocks: Vec<Block>,
    /// Span of the whole statement.
    pub span: Span,
}

/// Expression node.
#[derive(Debug, Clone)]
pub struct Expr {
    /// Shape of the expression.
    pub kind: ExprKind,
    /// Source span.
    pub span: Span,
}

/// Shape of an expression.
#[derive(Debug, Clone)]
pub enum ExprKind {
    /// Identifier.
    Ident(String),
    /// Selector `base.field`.
    Selector {
        /// Expression being selected from.
        base: Box<Expr>,
        /// Selected field, always an identifier.
        field: Box<Expr>,
    },
    /// Leaf token: literal, operator, keyword or punctuation.
    Token {
        /// Frontend-specific token kind.
        kind: &'static str,
        /// Token text.
        text: String,
    },
    /// Any other composite expression, children in source order.
    Node {
        /// Frontend-specific node kind.
        kind: &'static str,
        /// All children, including punctuation tokens.
        children: Vec<Expr>,
    },
}

impl Expr {
    /// Creates an identifier expression.
    #[must_use]
    pub fn ident(name: impl Into<String>, span: Span) -> Self {
        Self {
            kind: ExprKind::Ident(name.into()),
            span,
        }
    }

    /// Creates a selector expression spanning `base` through `field`.
    #[must_use]
    pub fn selector(base: Self, field: Self) -> Self {
        let span = Span {
            end: field.span.end,
            ..base.span
        };
        Self {
            kind: ExprKind::Selector {
                base: Box::new(base),
                field: Box::new(field),
            },
            span,
        }
    }

    /// Creates a leaf token expression.
    #[must_use]
    pub fn token(kind: &'static str, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind: ExprKind::Token {
                kind,
                text: text.into(),
            },
            span,
        }
    }

    /// Creates a composite expression.
    #[must_use]
    pub fn node(kind: &'static str, children: Vec<Self>, span: Span) -> Self {
        Self {
            kind: ExprKind::Node { kind, children },
            span,
        }
    }

    /// Returns `(base, field)` if this is a selector.
    #[must_use]
    pub fn as_selector(&self) -> Option<(&Self, &Self)> {
        match &self.kind {
            ExprKind::Selector { base, field } => Some((base, field)),
            _ => None,
        }
    }
}

/// Canonical single-line form, spaced the way gofmt prints expressions.
///
/// Source layout (line breaks, comments, stray blanks) is not preserved:
/// `load( 1,\n 2 )` prints as `load(1, 2)`.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Ident(name) => f.write_str(name),
            ExprKind::Token { text, .. } => f.write_str(text),
            ExprKind::Selector { base, field } => write!(f, "{base}.{field}"),
            ExprKind::Node { kind, children } => {
                if let ("binary_expression", [lhs, op, rhs]) = (*kind, children.as_slice()) {
                    return write!(f, "{lhs} {op} {rhs}");
                }

                let mut prev: Option<String> = None;
                for child in children {
                    let text = child.to_string();
                    if let Some(prev) = &prev {
                        if needs_space(kind, prev, &text) {
                            f.write_str(" ")?;
                        }
                    }
                    f.write_str(&text)?;
                    prev = Some(text);
                }
                Ok(())
            }
        }
    }
}

fn needs_space(kind: &str, prev: &str, next: &str) -> bool {
    if next.starts_with([')', ']', '}']) {
        return false;
    }
    match prev {
        "," => true,
        ":" => kind == "keyed_element",
        // Keep adjacent words apart: `chan int`, `func() T`.
        _ => ends_with_word(prev) && starts_with_word(next),
    }
}

fn ends_with_word(s: &str) -> bool {
    s.chars().last().is_some_and(|c| c.is_alphanumeric() || c == '_')
}

fn starts_with_word(s: &str) -> bool {
    s.chars().next().is_some_and(|c| c.is_alphanumeric() || c == '_')
}
