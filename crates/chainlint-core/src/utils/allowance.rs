//! Comment-based allowance directives.
//!
//! Supports directives like:
//! ```text
//! // chainlint: allow(long-chain) reason="generated dispatch table"
//! ```
//!
//! A directive applies to the line it is on and to the line after it.

use std::collections::HashSet;

/// Result of checking for allow directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowCheck {
    /// Rule is not allowed.
    Denied,
    /// Rule is allowed with optional reason.
    Allowed {
        /// The reason provided (if any).
        reason: Option<String>,
    },
}

impl AllowCheck {
    /// Returns true if allowed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    /// Returns the reason if allowed.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Allowed { reason } => reason.as_deref(),
            Self::Denied => None,
        }
    }
}

/// Parsed allowance directive.
#[derive(Debug, Clone)]
struct AllowDirective {
    rules: HashSet<String>,
    reason: Option<String>,
}

/// Checks source code for allowance comments with reason.
///
/// Looks for comments in the format:
/// ```text
/// // chainlint: allow(rule1, rule2) reason="explanation"
/// ```
///
/// # Arguments
///
/// * `content` - Source code content
/// * `line` - Line number to check (1-indexed)
/// * `rule_name` - Name of the rule to check for
///
/// # Returns
///
/// `AllowCheck::Allowed` with optional reason if an allowance directive is found.
#[must_use]
pub fn check_allow_with_reason(content: &str, line: usize, rule_name: &str) -> AllowCheck {
    let lines: Vec<&str> = content.lines().collect();

    for check_line in [line.saturating_sub(1), line] {
        if check_line == 0 || check_line > lines.len() {
            continue;
        }

        if let Some(directive) = parse_allow_directive(lines[check_line - 1]) {
            if directive.rules.contains(rule_name) || directive.rules.contains("all") {
                return AllowCheck::Allowed {
                    reason: directive.reason,
                };
            }
        }
    }

    AllowCheck::Denied
}

/// Parses an allowance directive from a line, which may carry code before
/// the comment.
fn parse_allow_directive(line: &str) -> Option<AllowDirective> {
    let marker = line.find("chainlint:")?;
    if !line[..marker].trim_end().ends_with("//") {
        return None;
    }

    let directive = line[marker + "chainlint:".len()..].trim();
    let allow_content = directive.strip_prefix("allow(")?.trim();

    let paren_end = allow_content.find(')')?;
    let rules: HashSet<String> = allow_content[..paren_end]
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if rules.is_empty() {
        return None;
    }

    let rest = allow_content[paren_end + 1..].trim();
    let reason = rest
        .strip_prefix("reason=")
        .map(str::trim)
        .and_then(|quoted| quoted.strip_prefix('"'))
        .and_then(|quoted| quoted.find('"').map(|end| quoted[..end].to_string()));

    Some(AllowDirective { rules, reason })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_allow_directive() {
        let directive = parse_allow_directive("// chainlint: allow(long-chain)").expect("directive");
        assert!(directive.rules.contains("long-chain"));
        assert!(directive.reason.is_none());
    }

    #[test]
    fn test_parse_allow_directive_with_reason() {
        let directive =
            parse_allow_directive("\t// chainlint: allow(long-chain) reason=\"generated code\"")
                .expect("directive");
        assert_eq!(directive.reason.as_deref(), Some("generated code"));
    }

    #[test]
    fn test_parse_trailing_comment() {
        let directive = parse_allow_directive("switch ev.Kind { // chainlint: allow(a, b)")
            .expect("directive");
        assert!(directive.rules.contains("a"));
        assert!(directive.rules.contains("b"));
    }

    #[test]
    fn test_parse_rejects_other_comments() {
        assert!(parse_allow_directive("// just a comment").is_none());
        assert!(parse_allow_directive("// chainlint: allow()").is_none());
        assert!(parse_allow_directive("x := 1").is_none());
        assert!(parse_allow_directive("s := \"chainlint: allow(x)\"").is_none());
    }

    #[test]
    fn test_check_allow_with_reason() {
        let content = "func f() {\n\t// chainlint: allow(long-chain) reason=\"table\"\n\tswitch x {\n\t}\n}";

        let result = check_allow_with_reason(content, 3, "long-chain");
        assert!(result.is_allowed());
        assert_eq!(result.reason(), Some("table"));

        assert_eq!(
            check_allow_with_reason(content, 3, "other-rule"),
            AllowCheck::Denied
        );
        assert!(!check_allow_with_reason(content, 5, "long-chain").is_allowed());
    }

    #[test]
    fn test_all_allows_everything() {
        let content = "// chainlint: allow(all)\nswitch x {}";
        assert!(check_allow_with_reason(content, 2, "long-chain").is_allowed());
    }
}
