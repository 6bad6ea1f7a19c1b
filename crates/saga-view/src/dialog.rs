//! A prompt followed by a list of choices.

use std::rc::Rc;

use saga_core::Rgba;

use crate::context::ViewContext;
use crate::error::ViewResult;
use crate::group::{GroupLayout, LineGroup};
use crate::input::Input;
use crate::render::Canvas;
use crate::selector::{OptionSelector, SelectorLayout};
use crate::shaping::{FontSelection, Shaper};

/// Appearance and pacing of a [`DialogView`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialogStyle {
    /// Prompt reveal rate in glyphs per second, or `None` for instant text.
    pub reveal_rate: Option<f32>,
    /// Font size in logical pixels.
    pub font_size: f32,
    /// Left margin in logical pixels.
    pub padding_left: f32,
    /// Top margin in logical pixels.
    pub padding_top: f32,
}

impl Default for DialogStyle {
    fn default() -> Self {
        Self {
            reveal_rate: Some(50.0),
            font_size: 32.0,
            padding_left: 16.0,
            padding_top: 16.0,
        }
    }
}

impl DialogStyle {
    /// Set the prompt reveal rate.
    pub fn with_reveal_rate(mut self, rate: Option<f32>) -> Self {
        self.reveal_rate = rate;
        self
    }

    /// Set the font size.
    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Set both margins.
    pub fn with_padding(mut self, left: f32, top: f32) -> Self {
        self.padding_left = left;
        self.padding_top = top;
        self
    }
}

/// An animated prompt with options appearing one blank line below it.
pub struct DialogView {
    prompt: LineGroup,
    options: OptionSelector,
}

impl DialogView {
    /// Build the prompt from `(colour, text)` lines and the option list.
    pub fn new(
        ctx: &ViewContext,
        shaper: &Rc<dyn Shaper>,
        prompts: Vec<(Rgba, String)>,
        options: &[String],
        style: &DialogStyle,
    ) -> ViewResult<Self> {
        let size = style.font_size;
        let prompt = LineGroup::new(
            ctx,
            shaper,
            prompts,
            GroupLayout {
                origin: (style.padding_left, style.padding_top),
                font: FontSelection::body(size),
            },
            style.reveal_rate,
        )?;
        let mut options = OptionSelector::new(
            ctx,
            shaper,
            options,
            SelectorLayout {
                origin: (style.padding_left, style.padding_top + prompt.height() + size),
                font_size: size,
            },
        )?;
        if prompt.completes_on_construction() {
            options.show();
        }
        Ok(Self { prompt, options })
    }

    /// Advance the prompt animation.
    ///
    /// Returns true on the update where the prompt completes and the
    /// options appear.
    pub fn update(&mut self, elapsed: f32) -> bool {
        if self.prompt.update(elapsed) {
            self.options.show();
            return true;
        }
        false
    }

    /// Apply a player intent; returns the chosen option index, if any.
    pub fn handle(&mut self, input: Input) -> Option<usize> {
        match input {
            Input::MoveFocusUp => {
                self.options.move_up();
                None
            }
            Input::MoveFocusDown => {
                self.options.move_down();
                None
            }
            Input::Confirm => self.confirm(),
        }
    }

    /// Pick the focused option, or skip the animation if options are hidden.
    pub fn confirm(&mut self) -> Option<usize> {
        if !self.options.is_shown() {
            if self.prompt.finish() {
                self.options.show();
            }
            return None;
        }
        self.options.confirm()
    }

    /// Whether the whole prompt is displayed.
    pub fn is_prompt_complete(&self) -> bool {
        self.prompt.is_complete()
    }

    /// The prompt lines.
    pub fn prompt(&self) -> &LineGroup {
        &self.prompt
    }

    /// The option list.
    pub fn options(&self) -> &OptionSelector {
        &self.options
    }

    /// Draw prompt and options.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        self.prompt.draw(canvas);
        self.options.draw(canvas);
    }
}
