use std::path::Path;

use comfy_table::{ContentArrangement, Table};

pub fn run(script: &Path) -> Result<(), String> {
    let story = super::load_story(script)?;

    if story.branches.is_empty() {
        println!("  No branches found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Branch", "Lines", "Weeks", "Budget", "Fans", "Coach", "Choices",
    ]);

    for (name, branch) in &story.branches {
        let name = if name.is_empty() {
            "(unnamed)".to_string()
        } else {
            name.clone()
        };
        let choices = if branch.is_ending() {
            "(ending)".to_string()
        } else {
            branch
                .options()
                .map(|(text, target)| format!("{text} -> {target}"))
                .collect::<Vec<_>>()
                .join("\n")
        };
        let d = branch.deltas;
        table.add_row(vec![
            name,
            branch.lines.len().to_string(),
            format!("{:+}", d.time),
            format!("{:+}", d.budget),
            format!("{:+}", d.fan),
            format!("{:+}", d.coach),
            choices,
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} branches", story.branch_count());

    Ok(())
}
