//! `hush categories`: list the category catalog.

use hush_lint::{Category, Tier};

use crate::GlobalArgs;

/// Runs the `hush categories` command.
pub fn run(global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    if !global.quiet {
        println!("{:<32} {:<8} FLAGS", "CATEGORY", "TIER");
    }
    for category in Category::ALL {
        println!("{}", describe(category));
    }
    Ok(0)
}

fn describe(category: Category) -> String {
    let tier = match category.tier() {
        Tier::Default => "default",
        Tier::Extra => "extra",
        Tier::OptIn => "opt-in",
    };
    let mut flags = Vec::new();
    if category.annotation_suppressible() {
        flags.push("suppressible");
    }
    if category.suppression_tracked() {
        flags.push("tracked");
    }
    format!("{:<32} {tier:<8} {}", category.token(), flags.join(","))
        .trim_end()
        .to_string()
}
