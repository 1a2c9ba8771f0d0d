//! List rules command implementation.

use chainlint_rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<8} {:<14} {:<9} Description", "Code", "Name", "Severity");
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        println!(
            "{:<8} {:<14} {:<9} {}",
            rule.code(),
            rule.name(),
            rule.default_severity().to_string(),
            rule.description()
        );
    }

    println!("\nRule options are set in [rules.<name>] blocks; see `chainlint init`.");

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  chainlint check --rules long-chain");
    println!("  chainlint check --rules CL001");
}
