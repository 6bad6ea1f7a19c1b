//! The story screen: engine state joined to its dialog view.

use std::rc::Rc;

use saga_core::{NarrativeEngine, Phase, Story};
use saga_view::{
    AnimatedLine, Canvas, DialogStyle, DialogView, FontSelection, Input, LineSpec, Shaper,
    ViewContext,
};

use crate::config::GameConfig;
use crate::error::GameResult;

/// Top-left corner of the status readout.
pub const STATUS_ANCHOR: (f32, f32) = (50.0, 650.0);
/// Font size of the status readout.
pub const STATUS_SIZE: f32 = 20.0;

/// Plays a story: one dialog per branch plus the status readout.
///
/// Frame order is [`handle`](Self::handle) for each input, then
/// [`update`](Self::update), then [`draw`](Self::draw).
pub struct StoryScreen<'s> {
    ctx: ViewContext,
    shaper: Rc<dyn Shaper>,
    style: DialogStyle,
    engine: NarrativeEngine<'s>,
    dialog: DialogView,
    status: AnimatedLine,
}

impl<'s> StoryScreen<'s> {
    /// Enter the start branch of `story`.
    pub fn new(
        ctx: &ViewContext,
        shaper: Rc<dyn Shaper>,
        story: &'s Story,
        config: &GameConfig,
    ) -> GameResult<Self> {
        let engine = NarrativeEngine::with_rules(story, config.rules.clone(), config.stats)?;
        let dialog = build_dialog(ctx, &shaper, &engine, &config.style)?;
        let status = AnimatedLine::new(
            ctx,
            Rc::clone(&shaper),
            LineSpec::new(
                engine.status_line(),
                STATUS_ANCHOR,
                FontSelection::body(STATUS_SIZE),
            ),
        )?;
        let mut screen = Self {
            ctx: *ctx,
            shaper,
            style: config.style,
            engine,
            dialog,
            status,
        };
        screen.sync_narration();
        Ok(screen)
    }

    /// Apply one player intent.
    pub fn handle(&mut self, input: Input) -> GameResult<()> {
        match self.dialog.handle(input) {
            Some(choice) => self.choose(choice),
            None => {
                self.sync_narration();
                Ok(())
            }
        }
    }

    /// Advance animations by `elapsed` seconds.
    pub fn update(&mut self, elapsed: f32) {
        if self.dialog.update(elapsed) {
            self.sync_narration();
        }
    }

    /// Draw the status readout and the dialog.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        self.status.draw(canvas);
        self.dialog.draw(canvas);
    }

    /// The engine driving the story.
    pub fn engine(&self) -> &NarrativeEngine<'s> {
        &self.engine
    }

    /// The current dialog.
    pub fn dialog(&self) -> &DialogView {
        &self.dialog
    }

    /// The status readout.
    pub fn status(&self) -> &AnimatedLine {
        &self.status
    }

    /// Whether the story reached an ending.
    pub fn is_finished(&self) -> bool {
        self.engine.is_finished()
    }

    fn choose(&mut self, choice: usize) -> GameResult<()> {
        let resolution = self.engine.resolve(choice)?;
        tracing::debug!(
            landed = %resolution.landed,
            forced = resolution.forced_ending,
            redirect = resolution.budget_redirect,
            "rebuilding dialog"
        );
        self.status.set_text(self.engine.status_line(), None)?;
        self.dialog = build_dialog(&self.ctx, &self.shaper, &self.engine, &self.style)?;
        self.sync_narration();
        Ok(())
    }

    fn sync_narration(&mut self) {
        if self.dialog.is_prompt_complete() && self.engine.phase() == Phase::Narrating {
            self.engine.finish_narration();
        }
    }
}

fn build_dialog(
    ctx: &ViewContext,
    shaper: &Rc<dyn Shaper>,
    engine: &NarrativeEngine<'_>,
    style: &DialogStyle,
) -> GameResult<DialogView> {
    let prompts = engine.prompt_lines()?;
    let options = &engine.current_branch().option_texts;
    Ok(DialogView::new(ctx, shaper, prompts, options, style)?)
}
