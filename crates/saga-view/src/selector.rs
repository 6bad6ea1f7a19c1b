//! A vertical list of options with a movable focus marker.

use std::rc::Rc;

use crate::context::ViewContext;
use crate::error::ViewResult;
use crate::line::{AnimatedLine, LineSpec};
use crate::render::Canvas;
use crate::shaping::{FontSelection, Shaper};

/// Marker beside an unfocused option.
pub const MARKER_IDLE: &str = "[ ]";
/// Marker beside the focused option.
pub const MARKER_FOCUSED: &str = "[x]";

/// Placement of an [`OptionSelector`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectorLayout {
    /// Top-left corner of the first marker.
    pub origin: (f32, f32),
    /// Font size for markers and option text.
    pub font_size: f32,
}

struct OptionEntry {
    marker: AnimatedLine,
    text: AnimatedLine,
}

/// Options that stay hidden until [`show`](Self::show) is called.
///
/// Focus starts on the first option and is clamped to the list; markers
/// use the mono face, texts sit two font sizes to the right.
pub struct OptionSelector {
    entries: Vec<OptionEntry>,
    focus: usize,
    shown: bool,
}

impl OptionSelector {
    /// Build a hidden selector for `options`.
    pub fn new(
        ctx: &ViewContext,
        shaper: &Rc<dyn Shaper>,
        options: &[String],
        layout: SelectorLayout,
    ) -> ViewResult<Self> {
        let (x, y0) = layout.origin;
        let size = layout.font_size;
        let mut entries = Vec::new();
        for (i, option) in options.iter().enumerate() {
            let y = y0 + size * i as f32;
            let marker = if i == 0 { MARKER_FOCUSED } else { MARKER_IDLE };
            entries.push(OptionEntry {
                marker: AnimatedLine::new(
                    ctx,
                    Rc::clone(shaper),
                    LineSpec::new(marker, (x, y), FontSelection::mono(size)).hidden(),
                )?,
                text: AnimatedLine::new(
                    ctx,
                    Rc::clone(shaper),
                    LineSpec::new(option.as_str(), (x + size * 2.0, y), FontSelection::body(size))
                        .hidden(),
                )?,
            });
        }
        Ok(Self {
            entries,
            focus: 0,
            shown: false,
        })
    }

    /// Make every option visible. Idempotent.
    pub fn show(&mut self) {
        if self.shown {
            return;
        }
        self.shown = true;
        for entry in &mut self.entries {
            entry.marker.set_visible(true);
            entry.text.set_visible(true);
        }
    }

    /// Whether the options are visible.
    pub fn is_shown(&self) -> bool {
        self.shown
    }

    /// Index of the focused option.
    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Number of options.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no options.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Move focus one option up, stopping at the first.
    pub fn move_up(&mut self) {
        if self.shown && !self.entries.is_empty() {
            self.set_focus(self.focus.saturating_sub(1));
        }
    }

    /// Move focus one option down, stopping at the last.
    pub fn move_down(&mut self) {
        if self.shown && !self.entries.is_empty() {
            self.set_focus((self.focus + 1).min(self.entries.len() - 1));
        }
    }

    /// The focused index, if the options are shown and non-empty.
    pub fn confirm(&self) -> Option<usize> {
        (self.shown && !self.entries.is_empty()).then_some(self.focus)
    }

    /// Marker text beside option `index`.
    pub fn marker(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|e| e.marker.text())
    }

    /// Text line of option `index`.
    pub fn option_line(&self, index: usize) -> Option<&AnimatedLine> {
        self.entries.get(index).map(|e| &e.text)
    }

    fn set_focus(&mut self, focus: usize) {
        if focus == self.focus {
            return;
        }
        if let Some(entry) = self.entries.get_mut(self.focus) {
            entry.marker.replace_text(MARKER_IDLE);
        }
        if let Some(entry) = self.entries.get_mut(focus) {
            entry.marker.replace_text(MARKER_FOCUSED);
        }
        self.focus = focus;
    }

    /// Draw markers and option texts.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        for entry in &self.entries {
            entry.marker.draw(canvas);
            entry.text.draw(canvas);
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::render::RecordingCanvas;
    use crate::shaping::{FontFace, MonoShaper};

    fn selector(options: &[&str]) -> OptionSelector {
        let ctx = ViewContext::new((1280, 720), (1280, 720)).unwrap();
        let shaper: Rc<dyn Shaper> = Rc::new(MonoShaper::new(&ctx));
        let options: Vec<String> = options.iter().map(|s| s.to_string()).collect();
        let layout = SelectorLayout {
            origin: (16.0, 100.0),
            font_size: 32.0,
        };
        OptionSelector::new(&ctx, &shaper, &options, layout).unwrap()
    }

    #[test]
    fn hidden_until_shown() {
        let mut s = selector(&["Yes", "No"]);
        assert!(!s.is_shown());
        assert_eq!(s.confirm(), None);
        s.move_down();
        assert_eq!(s.focus(), 0);

        let mut canvas = RecordingCanvas::default();
        s.draw(&mut canvas);
        assert!(canvas.glyphs.is_empty());

        s.show();
        s.draw(&mut canvas);
        assert_eq!(canvas.text(), "[x]Yes[ ]No");
        assert_eq!(s.confirm(), Some(0));
    }

    #[test]
    fn layout_of_markers_and_texts() {
        let mut s = selector(&["Yes", "No"]);
        s.show();
        let mut canvas = RecordingCanvas::default();
        s.draw(&mut canvas);
        assert_eq!(canvas.glyphs[0].face, FontFace::Mono);
        assert_eq!(canvas.glyphs[0].position, (16.0, 132.0));
        assert_eq!(canvas.glyphs[3].face, FontFace::Body);
        assert_eq!(canvas.glyphs[3].position, (80.0, 132.0));
        assert_eq!(s.option_line(1).unwrap().anchor(), (80.0, 132.0));
    }

    #[test]
    fn focus_moves_markers_and_clamps() {
        let mut s = selector(&["A", "B", "C"]);
        s.show();
        s.move_down();
        s.move_down();
        s.move_down();
        assert_eq!(s.focus(), 2);
        assert_eq!(s.marker(0), Some(MARKER_IDLE));
        assert_eq!(s.marker(2), Some(MARKER_FOCUSED));
        s.move_up();
        assert_eq!(s.confirm(), Some(1));
        assert_eq!(s.marker(1), Some(MARKER_FOCUSED));
        assert_eq!(s.marker(2), Some(MARKER_IDLE));
    }

    #[test]
    fn empty_selector_confirms_nothing() {
        let mut s = selector(&[]);
        s.show();
        s.move_down();
        s.move_up();
        assert!(s.is_empty());
        assert_eq!(s.confirm(), None);
    }

    proptest! {
        #[test]
        fn exactly_one_focused_marker(
            n in 1usize..6,
            moves in prop::collection::vec(any::<bool>(), 0..20),
        ) {
            let names: Vec<String> = (0..n).map(|i| format!("opt{i}")).collect();
            let refs: Vec<&str> = names.iter().map(String::as_str).collect();
            let mut s = selector(&refs);
            s.show();
            for down in moves {
                if down { s.move_down() } else { s.move_up() }
                prop_assert!(s.focus() < n);
                let focused = (0..n).filter(|&i| s.marker(i) == Some(MARKER_FOCUSED)).count();
                prop_assert_eq!(focused, 1);
                prop_assert_eq!(s.marker(s.focus()), Some(MARKER_FOCUSED));
            }
        }
    }
}
