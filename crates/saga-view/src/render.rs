//! The drawing seam between views and a graphics backend.

use saga_core::Rgba;

use crate::shaping::FontFace;

/// A single glyph to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphInstance {
    /// Face the glyph belongs to.
    pub face: FontFace,
    /// Pixel size to rasterize at.
    pub physical_px: u32,
    /// Glyph index within the face.
    pub glyph_id: u32,
    /// Pen position on the baseline, in logical pixels.
    pub position: (f32, f32),
    /// Physical pixels per logical pixel.
    pub scale_factor: f32,
    /// Fill colour.
    pub color: Rgba,
}

/// A surface that glyphs are drawn onto.
pub trait Canvas {
    /// Draw one glyph.
    fn draw_glyph(&mut self, glyph: &GlyphInstance);
}

/// Canvas that records what was drawn.
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    /// Glyphs in draw order.
    pub glyphs: Vec<GlyphInstance>,
}

impl RecordingCanvas {
    /// Forget everything drawn so far.
    pub fn clear(&mut self) {
        self.glyphs.clear();
    }

    /// The drawn glyph ids read back as characters.
    ///
    /// Only meaningful with a shaper whose glyph ids are code points.
    pub fn text(&self) -> String {
        self.glyphs
            .iter()
            .filter_map(|g| char::from_u32(g.glyph_id))
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn draw_glyph(&mut self, glyph: &GlyphInstance) {
        self.glyphs.push(*glyph);
    }
}
