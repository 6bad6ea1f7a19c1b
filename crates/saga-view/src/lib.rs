//! Text presentation for Transfer Saga.
//!
//! Views are built against a [`ViewContext`] and a shared [`Shaper`], advanced
//! once per frame with `update(elapsed)` and drawn onto any [`Canvas`]. Lines
//! reveal glyph by glyph; groups chain lines; a [`DialogView`] pairs a prompt
//! with an [`OptionSelector`].

/// Screen geometry.
pub mod context;
/// Prompt and choices.
pub mod dialog;
/// Error types.
pub mod error;
/// Sequentially revealed line stacks.
pub mod group;
/// Player intents.
pub mod input;
/// Single animated lines.
pub mod line;
/// Drawing seam.
pub mod render;
/// Option lists.
pub mod selector;
/// Text shaping.
pub mod shaping;

pub use context::ViewContext;
pub use dialog::{DialogStyle, DialogView};
pub use error::{ViewError, ViewResult};
pub use group::{GroupLayout, LineGroup};
pub use input::Input;
pub use line::{AnimatedLine, LineSpec};
pub use render::{Canvas, GlyphInstance, RecordingCanvas};
pub use selector::{MARKER_FOCUSED, MARKER_IDLE, OptionSelector, SelectorLayout};
pub use shaping::{
    FontFace, FontSelection, FontSet, FontShaper, GlyphPlacement, MonoShaper, ShapedLine, Shaper,
};
