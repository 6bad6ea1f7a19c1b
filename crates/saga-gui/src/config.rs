//! Game configuration and its command-line form.

use std::path::PathBuf;

use clap::Parser;

use saga_core::{Rules, Stats};
use saga_view::DialogStyle;

/// Logical canvas width in pixels. The window scales this to fit.
pub const CANVAS_W: f32 = 1280.0;
/// Logical canvas height in pixels.
pub const CANVAS_H: f32 = 720.0;

/// Everything needed to start a session.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Script file.
    pub script: PathBuf,
    /// Directory holding the font files.
    pub assets: PathBuf,
    /// Body face file name within `assets`.
    pub body_font: String,
    /// Mono face file name within `assets`.
    pub mono_font: String,
    /// Logical canvas size.
    pub canvas: (u32, u32),
    /// Dialog appearance and pacing.
    pub style: DialogStyle,
    /// Game rules.
    pub rules: Rules,
    /// Starting statistics.
    pub stats: Stats,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            script: PathBuf::from("assets/script"),
            assets: PathBuf::from("assets"),
            body_font: "fonts/DejaVuSerif.ttf".to_string(),
            mono_font: "fonts/DejaVuSansMono.ttf".to_string(),
            canvas: (CANVAS_W as u32, CANVAS_H as u32),
            style: DialogStyle::default(),
            rules: Rules::default(),
            stats: Stats::default(),
        }
    }
}

impl GameConfig {
    /// Set the script path.
    pub fn with_script(mut self, script: impl Into<PathBuf>) -> Self {
        self.script = script.into();
        self
    }

    /// Set the assets directory.
    pub fn with_assets(mut self, assets: impl Into<PathBuf>) -> Self {
        self.assets = assets.into();
        self
    }

    /// Set the dialog style.
    pub fn with_style(mut self, style: DialogStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the rules.
    pub fn with_rules(mut self, rules: Rules) -> Self {
        self.rules = rules;
        self
    }

    /// Path of the body face.
    pub fn body_font_path(&self) -> PathBuf {
        self.assets.join(&self.body_font)
    }

    /// Path of the mono face.
    pub fn mono_font_path(&self) -> PathBuf {
        self.assets.join(&self.mono_font)
    }
}

/// Command-line arguments of the game.
#[derive(Debug, Parser)]
#[command(name = "saga-gui", version, about = "Transfer Saga: a transfer-window story")]
pub struct GameArgs {
    /// Script to play
    #[arg(long, default_value = "assets/script")]
    pub script: PathBuf,

    /// Directory holding the fonts
    #[arg(long, default_value = "assets")]
    pub assets: PathBuf,

    /// Text reveal speed in glyphs per second
    #[arg(long, default_value_t = 50.0)]
    pub reveal_rate: f32,

    /// Show whole prompts at once
    #[arg(long)]
    pub instant: bool,
}

impl GameArgs {
    /// Turn the arguments into a configuration.
    pub fn into_config(self) -> GameConfig {
        let rate = if self.instant {
            None
        } else {
            Some(self.reveal_rate)
        };
        GameConfig::default()
            .with_script(self.script)
            .with_assets(self.assets)
            .with_style(DialogStyle::default().with_reveal_rate(rate))
    }
}
