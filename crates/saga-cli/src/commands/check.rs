use std::path::Path;

use colored::Colorize;
use saga_core::Rules;

pub fn run(script: &Path) -> Result<(), String> {
    let story = super::load_story(script)?;
    let rules = Rules::default();

    let mut errors = 0;
    for issue in story.validate() {
        eprintln!("  {} {issue}", "error:".red().bold());
        errors += 1;
    }
    if !story.branches.contains_key(&rules.start_branch) {
        eprintln!(
            "  {} start branch \"{}\" is not defined",
            "error:".red().bold(),
            rules.start_branch
        );
        errors += 1;
    }
    for (role, name) in [
        ("week-limit ending", &rules.week_limit_branch),
        ("out-of-budget branch", &rules.broke_branch),
    ] {
        if !story.branches.contains_key(name) {
            eprintln!(
                "  {} {role} \"{name}\" is not defined",
                "warning:".yellow().bold()
            );
        }
    }

    if errors > 0 {
        return Err(format!(
            "{errors} problem{} found",
            if errors == 1 { "" } else { "s" }
        ));
    }

    println!("  All checks passed for '{}'.", script.display());
    println!(
        "  {} branches, {} lines, {} characters, {} endings",
        story.branch_count(),
        story.line_count(),
        story.characters.len().saturating_sub(1),
        story.endings().count()
    );
    Ok(())
}
