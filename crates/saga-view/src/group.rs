//! Lines that reveal one after another.

use std::rc::Rc;

use saga_core::Rgba;

use crate::context::ViewContext;
use crate::error::ViewResult;
use crate::line::{AnimatedLine, LineSpec};
use crate::render::Canvas;
use crate::shaping::{FontSelection, Shaper};

/// Placement of a [`LineGroup`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupLayout {
    /// Top-left corner of the first line.
    pub origin: (f32, f32),
    /// Face and size shared by every line.
    pub font: FontSelection,
}

/// A vertical stack of lines revealed in sequence.
///
/// With a rate only the first line starts visible; each line's completion
/// makes the next one visible, and the last line's completion is the
/// group's completion. Without a rate every line is shown at once.
pub struct LineGroup {
    lines: Vec<AnimatedLine>,
    reveal_rate: Option<f32>,
    font: FontSelection,
    completed: bool,
}

impl LineGroup {
    /// Build one line per `(colour, text)` pair, stacked `font.size` apart.
    pub fn new(
        ctx: &ViewContext,
        shaper: &Rc<dyn Shaper>,
        contents: Vec<(Rgba, String)>,
        layout: GroupLayout,
        reveal_rate: Option<f32>,
    ) -> ViewResult<Self> {
        let (x, y) = layout.origin;
        let mut lines = Vec::new();
        for (i, (color, text)) in contents.into_iter().enumerate() {
            let mut spec = LineSpec::new(text, (x, y + layout.font.size * i as f32), layout.font)
                .with_color(color)
                .with_reveal_rate(reveal_rate);
            if reveal_rate.is_some() && i > 0 {
                spec = spec.hidden();
            }
            lines.push(AnimatedLine::new(ctx, Rc::clone(shaper), spec)?);
        }
        Ok(Self {
            lines,
            reveal_rate,
            font: layout.font,
            completed: false,
        })
    }

    /// Advance the visible lines by `elapsed` seconds.
    ///
    /// Returns true on the update where the last line completes.
    pub fn update(&mut self, elapsed: f32) -> bool {
        if self.reveal_rate.is_none() || self.completed {
            return false;
        }
        let Some(last) = self.lines.len().checked_sub(1) else {
            self.completed = true;
            return true;
        };
        for i in 0..=last {
            if !self.lines[i].update(elapsed) {
                continue;
            }
            if i == last {
                self.completed = true;
                tracing::trace!(lines = self.lines.len(), "line group complete");
                return true;
            }
            self.lines[i + 1].set_visible(true);
        }
        false
    }

    /// Complete every remaining line in one step.
    ///
    /// Returns true if this completed the group.
    pub fn finish(&mut self) -> bool {
        if self.reveal_rate.is_none() || self.completed {
            return false;
        }
        for line in &mut self.lines {
            line.set_visible(true);
            line.reveal_all();
        }
        self.completed = true;
        tracing::trace!(lines = self.lines.len(), "line group finished early");
        true
    }

    /// Whether the group is shown complete as soon as it is built.
    pub fn completes_on_construction(&self) -> bool {
        self.reveal_rate.is_none()
    }

    /// Whether every line is fully shown.
    pub fn is_complete(&self) -> bool {
        self.completed || self.completes_on_construction()
    }

    /// Total height in logical pixels.
    pub fn height(&self) -> f32 {
        self.font.size * self.lines.len() as f32
    }

    /// The lines, top to bottom.
    pub fn lines(&self) -> &[AnimatedLine] {
        &self.lines
    }

    /// Draw every visible line.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        for line in &self.lines {
            line.draw(canvas);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingCanvas;
    use crate::shaping::MonoShaper;

    fn group(texts: &[&str], rate: Option<f32>) -> LineGroup {
        let ctx = ViewContext::new((1280, 720), (1280, 720)).unwrap();
        let shaper: Rc<dyn Shaper> = Rc::new(MonoShaper::new(&ctx));
        let contents = texts
            .iter()
            .map(|t| (Rgba::WHITE, t.to_string()))
            .collect();
        let layout = GroupLayout {
            origin: (16.0, 16.0),
            font: FontSelection::body(32.0),
        };
        LineGroup::new(&ctx, &shaper, contents, layout, rate).unwrap()
    }

    fn visible(group: &LineGroup) -> Vec<bool> {
        group.lines().iter().map(AnimatedLine::is_visible).collect()
    }

    #[test]
    fn lines_stack_by_font_size() {
        let g = group(&["a", "b", "c"], None);
        let ys: Vec<f32> = g.lines().iter().map(|l| l.anchor().1).collect();
        assert_eq!(ys, vec![16.0, 48.0, 80.0]);
        assert_eq!(g.height(), 96.0);
    }

    #[test]
    fn chain_reveals_in_order() {
        let mut g = group(&["ab", "cd"], Some(10.0));
        assert_eq!(visible(&g), vec![true, false]);
        assert!(!g.update(0.1));
        assert_eq!(visible(&g), vec![true, false]);
        assert!(!g.update(0.15));
        assert_eq!(visible(&g), vec![true, true]);
        assert_eq!(g.lines()[1].reveal_count(), 1);
        assert!(g.update(0.1));
        assert!(g.is_complete());
        assert!(!g.update(1.0));
    }

    #[test]
    fn single_long_frame_cascades() {
        let mut g = group(&["Hi", "there", "!"], Some(50.0));
        assert!(g.update(10.0));
        assert!(g.lines().iter().all(AnimatedLine::is_revealed));
    }

    #[test]
    fn empty_rated_group_completes_on_first_update() {
        let mut g = group(&[], Some(50.0));
        assert!(!g.is_complete());
        assert!(g.update(0.0));
        assert!(!g.update(0.0));
        assert_eq!(g.height(), 0.0);
    }

    #[test]
    fn unrated_group_never_reports() {
        let mut g = group(&["a", "b"], None);
        assert!(g.completes_on_construction());
        assert!(g.is_complete());
        assert_eq!(visible(&g), vec![true, true]);
        assert!(!g.update(1.0));
        assert!(!g.finish());
    }

    #[test]
    fn finish_completes_remaining_chain() {
        let mut g = group(&["abc", "def", "ghi"], Some(1.0));
        g.update(1.0);
        assert!(g.finish());
        assert_eq!(visible(&g), vec![true, true, true]);
        assert!(g.lines().iter().all(AnimatedLine::is_revealed));
        assert!(!g.finish());

        let mut canvas = RecordingCanvas::default();
        g.draw(&mut canvas);
        assert_eq!(canvas.text(), "abcdefghi");
    }

    #[test]
    fn finish_before_any_update_reveals_everything() {
        let mut g = group(&["abc", "def"], Some(1.0));
        assert_eq!(visible(&g), vec![true, false]);
        assert!(g.finish());
        assert!(g.is_complete());
        assert!(g.lines().iter().all(|l| l.reveal_count() == l.total_glyphs()));
        assert!(!g.update(10.0));
    }

    #[test]
    fn finish_on_empty_group_completes() {
        let mut g = group(&[], Some(1.0));
        assert!(g.finish());
        assert!(!g.finish());
    }
}
