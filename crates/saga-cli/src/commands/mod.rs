pub mod branches;
pub mod check;
pub mod dump;
pub mod play;

use std::path::Path;

use ariadne::{Color, Label, Report, ReportKind, Source};
use saga_core::script::read_source;
use saga_core::{ScriptError, ScriptParser, Story};

/// Read and parse a script, printing parse errors with source context.
fn load_story(path: &Path) -> Result<Story, String> {
    let source = read_source(path).map_err(|e| e.to_string())?;
    ScriptParser::parse(&source).map_err(|e| {
        eprint!(
            "{}",
            render_script_error(&source, &path.display().to_string(), &e)
        );
        "script failed to parse".to_string()
    })
}

/// Render a parse error using ariadne when it points into the source.
fn render_script_error(source: &str, filename: &str, error: &ScriptError) -> String {
    let message = error.to_string();
    let Some(span) = error.span() else {
        return format!("{message}\n");
    };

    let mut output = Vec::new();
    Report::build(ReportKind::Error, (filename, span.clone()))
        .with_message(&message)
        .with_label(
            Label::new((filename, span))
                .with_message("here")
                .with_color(Color::Red),
        )
        .finish()
        .write((filename, Source::from(source)), &mut output)
        .ok();
    String::from_utf8(output).unwrap_or(message)
}
