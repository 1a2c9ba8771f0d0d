//! Lowering of the tree-sitter-go concrete syntax tree into the chainlint
//! syntax model.
//!
//! Blocks and case bodies are read both with and without an explicit
//! `statement_list` node, since grammar releases differ on that point.

use chainlint_core::syntax::{
    Block, CaseClause, CompoundKind, CompoundStmt, Decl, Expr, FuncDecl, SourceFile, Span, Stmt,
    SwitchStmt,
};
use tree_sitter::Node;

/// Lowers a `source_file` node.
pub(crate) fn source_file(root: Node<'_>, src: &str) -> SourceFile {
    let decls = named_children(root)
        .into_iter()
        .map(|node| match node.kind() {
            "function_declaration" | "method_declaration" => Decl::Func(func_decl(node, src)),
            _ => Decl::Other(span(node)),
        })
        .collect();

    SourceFile { decls }
}

fn func_decl(node: Node<'_>, src: &str) -> FuncDecl {
    FuncDecl {
        name: node
            .child_by_field_name("name")
            .map(|n| text(n, src).to_owned())
            .unwrap_or_default(),
        body: node.child_by_field_name("body").map(|n| block(n, src)),
        span: span(node),
    }
}

fn block(node: Node<'_>, src: &str) -> Block {
    Block {
        stmts: body_stmts(node, src),
        span: span(node),
    }
}

/// Statements among the unlabeled named children of `node`.
///
/// Field children (a case's values, an `if` condition) are never statements
/// of the body, so skipping them leaves exactly the clause or block body.
fn body_stmts(node: Node<'_>, src: &str) -> Vec<Stmt> {
    let mut stmts = Vec::new();
    let mut cursor = node.walk();
    if !cursor.goto_first_child() {
        return stmts;
    }

    loop {
        let child = cursor.node();
        if child.is_named() && !child.is_extra() && cursor.field_name().is_none() {
            if child.kind() == "statement_list" {
                stmts.extend(body_stmts(child, src));
            } else {
                stmts.push(stmt(child, src));
            }
        }
        if !cursor.goto_next_sibling() {
            break;
        }
    }

    stmts
}

fn stmt(node: Node<'_>, src: &str) -> Stmt {
    match node.kind() {
        "expression_switch_statement" => Stmt::Switch(switch_stmt(node, src)),
        "block" => compound(node, CompoundKind::Block, vec![block(node, src)]),
        "if_statement" => compound(node, CompoundKind::If, if_blocks(node, src)),
        "for_statement" => compound(
            node,
            CompoundKind::For,
            node.child_by_field_name("body")
                .map(|body| block(body, src))
                .into_iter()
                .collect(),
        ),
        "type_switch_statement" => compound(node, CompoundKind::TypeSwitch, clause_blocks(node, src)),
        "select_statement" => compound(node, CompoundKind::Select, clause_blocks(node, src)),
        "labeled_statement" => compound(
            node,
            CompoundKind::Labeled,
            vec![Block {
                stmts: named_children(node)
                    .into_iter()
                    .filter(|child| child.kind() != "label_name")
                    .map(|child| stmt(child, src))
                    .collect(),
                span: span(node),
            }],
        ),
        _ => Stmt::Simple(span(node)),
    }
}

fn compound(node: Node<'_>, kind: CompoundKind, blocks: Vec<Block>) -> Stmt {
    Stmt::Compound(CompoundStmt {
        kind,
        blocks,
        span: span(node),
    })
}

/// Consequence and alternative blocks; an `else if` becomes a block holding
/// the nested `if`.
fn if_blocks(node: Node<'_>, src: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    if let Some(consequence) = node.child_by_field_name("consequence") {
        blocks.push(block(consequence, src));
    }
    if let Some(alternative) = node.child_by_field_name("alternative") {
        if alternative.kind() == "block" {
            blocks.push(block(alternative, src));
        } else {
            blocks.push(Block {
                stmts: vec![stmt(alternative, src)],
                span: span(alternative),
            });
        }
    }
    blocks
}

/// One block per clause body of a type switch or select statement.
fn clause_blocks(node: Node<'_>, src: &str) -> Vec<Block> {
    named_children(node)
        .into_iter()
        .filter(|child| {
            matches!(
                child.kind(),
                "type_case" | "communication_case" | "default_case"
            )
        })
        .map(|clause| Block {
            stmts: body_stmts(clause, src),
            span: span(clause),
        })
        .collect()
}

fn switch_stmt(node: Node<'_>, src: &str) -> SwitchStmt {
    let clauses = named_children(node)
        .into_iter()
        .filter_map(|child| match child.kind() {
            "expression_case" => Some(CaseClause {
                exprs: Some(
                    child
                        .child_by_field_name("value")
                        .map(|list| {
                            named_children(list)
                                .into_iter()
                                .map(|e| expr(e, src))
                                .collect()
                        })
                        .unwrap_or_default(),
                ),
                body: body_stmts(child, src),
                span: span(child),
            }),
            "default_case" => Some(CaseClause {
                exprs: None,
                body: body_stmts(child, src),
                span: span(child),
            }),
            _ => None,
        })
        .collect();

    SwitchStmt {
        clauses,
        span: span(node),
    }
}

/// Lowers an expression node.
fn expr(node: Node<'_>, src: &str) -> Expr {
    match node.kind() {
        "identifier" | "field_identifier" | "package_identifier" | "type_identifier" => {
            Expr::ident(text(node, src), span(node))
        }
        // Literal text is kept verbatim, interior blanks included.
        "interpreted_string_literal" | "raw_string_literal" | "rune_literal" => {
            Expr::token(node.kind(), text(node, src), span(node))
        }
        "selector_expression" => {
            match (
                node.child_by_field_name("operand"),
                node.child_by_field_name("field"),
            ) {
                (Some(operand), Some(field)) => Expr {
                    span: span(node),
                    ..Expr::selector(expr(operand, src), expr(field, src))
                },
                _ => composite(node, src),
            }
        }
        _ if node.child_count() == 0 => Expr::token(node.kind(), text(node, src), span(node)),
        _ => composite(node, src),
    }
}

fn composite(node: Node<'_>, src: &str) -> Expr {
    let mut cursor = node.walk();
    let children = node
        .children(&mut cursor)
        .filter(|child| !child.is_extra())
        .map(|child| expr(child, src))
        .collect();
    Expr::node(node.kind(), children, span(node))
}

fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| !child.is_extra())
        .collect()
}

fn text<'s>(node: Node<'_>, src: &'s str) -> &'s str {
    src.get(node.byte_range()).unwrap_or("")
}

fn span(node: Node<'_>) -> Span {
    let pos = node.start_position();
    Span::new(node.start_byte(), node.end_byte(), pos.row + 1, pos.column + 1)
}
