//! Play a script in the terminal.

use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;
use saga_core::{Advance, NarrativeEngine, RenderedLine, Story};

/// Play `script` on stdin/stdout until an ending or end of input.
pub fn run(script: &Path) -> Result<(), String> {
    let story = super::load_story(script)?;
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    play(&story, stdin.lock(), &mut stdout)
}

fn io_err(e: io::Error) -> String {
    e.to_string()
}

fn paint(line: &RenderedLine) -> String {
    let [r, g, b, _] = line.color.to_bytes();
    line.text.truecolor(r, g, b).to_string()
}

fn play<R: BufRead, W: Write>(story: &Story, mut input: R, out: &mut W) -> Result<(), String> {
    let mut engine = NarrativeEngine::new(story).map_err(|e| e.to_string())?;
    writeln!(out, "{}", engine.status_line()).map_err(io_err)?;

    loop {
        match engine.advance_line().map_err(|e| e.to_string())? {
            Advance::Line(line) => {
                writeln!(out, "{}", paint(&line)).map_err(io_err)?;
                if read_line(&mut input)?.is_none() {
                    return Ok(());
                }
            }
            Advance::Choices(_) | Advance::Waiting => {
                let options = &engine.current_branch().option_texts;
                for (i, option) in options.iter().enumerate() {
                    writeln!(out, "  {}. {option}", i + 1).map_err(io_err)?;
                }
                let Some(choice) = read_choice(&mut input, out, options.len())? else {
                    return Ok(());
                };
                let resolution = engine.resolve(choice).map_err(|e| e.to_string())?;
                if resolution.forced_ending {
                    writeln!(out, "{}", "The transfer window has closed.".bold())
                        .map_err(io_err)?;
                } else if resolution.budget_redirect {
                    writeln!(out, "{}", "You cannot afford that.".bold()).map_err(io_err)?;
                }
                writeln!(out, "{}", engine.status_line()).map_err(io_err)?;
            }
            Advance::Ended => {
                writeln!(out, "{}", "The End.".bold()).map_err(io_err)?;
                return Ok(());
            }
        }
    }
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>, String> {
    let mut buf = String::new();
    match input.read_line(&mut buf).map_err(io_err)? {
        0 => Ok(None),
        _ => Ok(Some(buf)),
    }
}

fn read_choice<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    count: usize,
) -> Result<Option<usize>, String> {
    loop {
        write!(out, "> ").map_err(io_err)?;
        out.flush().map_err(io_err)?;
        let Some(answer) = read_line(input)? else {
            return Ok(None);
        };
        match answer.trim().parse::<usize>() {
            Ok(n) if (1..=count).contains(&n) => return Ok(Some(n - 1)),
            _ => writeln!(out, "  Pick a number from 1 to {count}.").map_err(io_err)?,
        }
    }
}
