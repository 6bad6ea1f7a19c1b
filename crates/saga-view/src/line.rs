//! A single line of text revealed glyph by glyph.

use std::rc::Rc;

use saga_core::Rgba;

use crate::context::ViewContext;
use crate::error::{ViewError, ViewResult};
use crate::render::{Canvas, GlyphInstance};
use crate::shaping::{FontSelection, ShapedLine, Shaper};

/// Everything needed to build an [`AnimatedLine`].
#[derive(Debug, Clone, PartialEq)]
pub struct LineSpec {
    /// Text to show.
    pub text: String,
    /// Top-left corner in logical pixels.
    pub anchor: (f32, f32),
    /// Fill colour.
    pub color: Rgba,
    /// Face and size.
    pub font: FontSelection,
    /// Glyphs per second, or `None` to show the whole line at once.
    pub reveal_rate: Option<f32>,
    /// Whether the line starts visible.
    pub visible: bool,
}

impl LineSpec {
    /// A visible, white, unrated line.
    pub fn new(text: impl Into<String>, anchor: (f32, f32), font: FontSelection) -> Self {
        Self {
            text: text.into(),
            anchor,
            color: Rgba::WHITE,
            font,
            reveal_rate: None,
            visible: true,
        }
    }

    /// Set the fill colour.
    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    /// Set the reveal rate.
    pub fn with_reveal_rate(mut self, rate: Option<f32>) -> Self {
        self.reveal_rate = rate;
        self
    }

    /// Start invisible.
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

fn check_rate(rate: Option<f32>) -> ViewResult<Option<f32>> {
    match rate {
        Some(r) if !r.is_finite() || r <= 0.0 => Err(ViewError::InvalidRevealRate(r)),
        _ => Ok(rate),
    }
}

/// A line of text with typewriter-style reveal.
///
/// With a rate, [`update`](Self::update) reveals `floor(elapsed * rate)`
/// glyphs while the line is visible and reports completion exactly once.
/// Without a rate the whole line is revealed immediately and no completion
/// is ever reported.
pub struct AnimatedLine {
    shaper: Rc<dyn Shaper>,
    scale_factor: f32,
    text: String,
    anchor: (f32, f32),
    color: Rgba,
    font: FontSelection,
    shaped: ShapedLine,
    reveal_rate: Option<f32>,
    reveal_count: usize,
    elapsed: f32,
    visible: bool,
    completed: bool,
}

impl AnimatedLine {
    /// Shape `spec.text` and prepare it for display.
    pub fn new(ctx: &ViewContext, shaper: Rc<dyn Shaper>, spec: LineSpec) -> ViewResult<Self> {
        let reveal_rate = check_rate(spec.reveal_rate)?;
        let shaped = shaper.shape(&spec.text, spec.font);
        let reveal_count = if reveal_rate.is_some() { 0 } else { shaped.len() };
        Ok(Self {
            shaper,
            scale_factor: ctx.scale_factor(),
            text: spec.text,
            anchor: spec.anchor,
            color: spec.color,
            font: spec.font,
            shaped,
            reveal_rate,
            reveal_count,
            elapsed: 0.0,
            visible: spec.visible,
            completed: false,
        })
    }

    /// Advance the reveal by `elapsed` seconds.
    ///
    /// Returns true on the update where the last glyph becomes revealed,
    /// and never again until the text is replaced.
    pub fn update(&mut self, elapsed: f32) -> bool {
        let Some(rate) = self.reveal_rate else {
            return false;
        };
        if !self.visible || self.completed {
            return false;
        }
        let total = self.shaped.len();
        if self.reveal_count < total {
            self.elapsed += elapsed;
            let revealed = (self.elapsed * rate).floor() as usize;
            self.reveal_count = revealed.min(total).max(self.reveal_count);
        }
        if self.reveal_count == total {
            self.completed = true;
            return true;
        }
        false
    }

    /// Reveal every glyph of a visible rated line at once.
    ///
    /// Returns true if this completed the line.
    pub fn reveal_all(&mut self) -> bool {
        if self.reveal_rate.is_none() || !self.visible || self.completed {
            return false;
        }
        self.reveal_count = self.shaped.len();
        self.completed = true;
        true
    }

    /// Replace the text and restart the reveal at `rate`.
    pub fn set_text(&mut self, text: impl Into<String>, rate: Option<f32>) -> ViewResult<()> {
        self.reveal_rate = check_rate(rate)?;
        self.replace_text(text);
        Ok(())
    }

    /// Replace the text, keeping the current rate.
    pub fn replace_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.shaped = self.shaper.shape(&self.text, self.font);
        self.reveal_count = if self.reveal_rate.is_some() {
            0
        } else {
            self.shaped.len()
        };
        self.elapsed = 0.0;
        self.completed = false;
    }

    /// Show or hide the line without touching its progress.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Whether the line is drawn.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Glyphs revealed so far.
    pub fn reveal_count(&self) -> usize {
        self.reveal_count
    }

    /// Glyphs in the shaped line.
    pub fn total_glyphs(&self) -> usize {
        self.shaped.len()
    }

    /// Whether every glyph is revealed.
    pub fn is_revealed(&self) -> bool {
        self.reveal_count == self.shaped.len()
    }

    /// The reveal rate, if any.
    pub fn reveal_rate(&self) -> Option<f32> {
        self.reveal_rate
    }

    /// Top-left corner in logical pixels.
    pub fn anchor(&self) -> (f32, f32) {
        self.anchor
    }

    /// Face and size.
    pub fn font(&self) -> FontSelection {
        self.font
    }

    /// Full width in logical pixels.
    pub fn width(&self) -> f32 {
        self.shaped.width() / self.scale_factor
    }

    /// Draw the revealed glyphs.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        if !self.visible {
            return;
        }
        let scale = self.scale_factor;
        let (mut pen_x, mut pen_y) = (self.anchor.0, self.anchor.1 + self.font.size);
        for glyph in &self.shaped.glyphs()[..self.reveal_count] {
            canvas.draw_glyph(&GlyphInstance {
                face: self.font.face,
                physical_px: self.shaped.physical_px(),
                glyph_id: glyph.glyph_id,
                position: (pen_x + glyph.x_offset / scale, pen_y - glyph.y_offset / scale),
                scale_factor: scale,
                color: self.color,
            });
            pen_x += glyph.x_advance / scale;
            pen_y -= glyph.y_advance / scale;
        }
    }
}
