//! List rules command implementation.

use stylist_rules::catalog::ALL_RULES;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!(
        "{:<50} {:<14} {:<8} {:<7} Title",
        "Id", "Category", "Lenient", "Fix"
    );
    println!("{}", "-".repeat(110));

    for rule in ALL_RULES {
        println!(
            "{:<50} {:<14} {:<8} {:<7} {}",
            rule.id,
            rule.category.to_string(),
            if rule.enabled_by_default { "on" } else { "off" },
            if rule.fixable { "yes" } else { "no" },
            rule.title
        );
    }

    println!("\nProfiles:");
    println!("  strict   - every rule (default)");
    println!("  lenient  - rules marked 'on' above");

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  stylist check --rules IndentWithTabs,NoTrailingWhitespace");
    println!("  stylist check --rules Stylist_CommentedSegments");
}
