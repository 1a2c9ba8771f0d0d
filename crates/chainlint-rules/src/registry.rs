//! Rule registry: the built-in rules and their config-driven construction.

use crate::long_chain::{self, LongChain};
use chainlint_core::{Config, RuleBox};
use tracing::debug;

/// Returns every built-in rule with default settings.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![Box::new(LongChain::new())]
}

/// Builds the enabled rules with the options of their `[rules.<name>]` blocks.
#[must_use]
pub fn configured_rules(config: &Config) -> Vec<RuleBox> {
    let mut rules: Vec<RuleBox> = Vec::new();

    if config.is_rule_enabled(long_chain::NAME) {
        let rule = match config.rule(long_chain::NAME) {
            Some(rule_config) => LongChain::new().configure(rule_config),
            None => LongChain::new(),
        };
        rules.push(Box::new(rule));
    } else {
        debug!("Rule {} disabled by configuration", long_chain::NAME);
    }

    rules
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainlint_core::Severity;

    #[test]
    fn test_all_rules_lists_long_chain() {
        let names: Vec<&str> = all_rules().iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["long-chain"]);
    }

    #[test]
    fn test_configured_rules_respects_enabled() {
        let config = Config::parse("[rules.long-chain]\nenabled = false\n").expect("parse");
        assert!(configured_rules(&config).is_empty());

        let config = Config::default();
        assert_eq!(configured_rules(&config).len(), 1);
    }

    #[test]
    fn test_configured_rules_carry_severity() {
        let config = Config::parse("[rules.long-chain]\nseverity = \"error\"\n").expect("parse");
        let rules = configured_rules(&config);
        assert_eq!(rules[0].default_severity(), Severity::Error);
        assert!(rules[0].requires_allow_reason());
    }
}
