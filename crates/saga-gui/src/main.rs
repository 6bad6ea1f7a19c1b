//! Transfer Saga: macroquad entry point.
//!
//! Loads the script and fonts, then runs the story screen on a 1280x720
//! logical canvas scaled to fit the window.

use std::rc::Rc;

use clap::Parser;
use macroquad::prelude::*;
use tracing_subscriber::EnvFilter;

use saga_core::Story;
use saga_gui::canvas::{GLYPH_CACHE_SIZE, GlyphCanvas, drawable_size, setup_virtual_canvas};
use saga_gui::config::{CANVAS_H, CANVAS_W, GameArgs, GameConfig};
use saga_gui::error::GameResult;
use saga_gui::input::{escape_pressed, pressed_intents};
use saga_gui::screen::StoryScreen;
use saga_view::{FontSet, FontShaper, Shaper, ViewContext};

fn window_conf() -> Conf {
    Conf {
        window_title: "Transfer Saga".to_owned(),
        window_width: CANVAS_W as i32,
        window_height: CANVAS_H as i32,
        window_resizable: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = GameArgs::parse().into_config();
    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "session aborted");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(config: GameConfig) -> GameResult<()> {
    let story = Story::load(&config.script)?;
    tracing::info!(
        script = %config.script.display(),
        branches = story.branch_count(),
        "script loaded"
    );
    let fonts = FontSet::load(&config.body_font_path(), &config.mono_font_path())?;
    let ctx = ViewContext::new(config.canvas, drawable_size())?;
    let shaper: Rc<dyn Shaper> = Rc::new(FontShaper::new(&ctx, fonts.clone()));

    let mut screen = StoryScreen::new(&ctx, shaper, &story, &config)?;
    let mut canvas = GlyphCanvas::new(&fonts, GLYPH_CACHE_SIZE);

    loop {
        clear_background(BLACK);
        setup_virtual_canvas();

        for intent in pressed_intents() {
            screen.handle(intent)?;
        }
        screen.update(get_frame_time());
        screen.draw(&mut canvas);

        if escape_pressed() {
            tracing::info!(branch = screen.engine().current_name(), "quit");
            break;
        }
        next_frame().await;
    }
    Ok(())
}
