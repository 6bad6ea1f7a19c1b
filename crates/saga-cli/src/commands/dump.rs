use std::path::Path;

pub fn run(script: &Path) -> Result<(), String> {
    let story = super::load_story(script)?;
    let json = serde_json::to_string_pretty(&story).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}
