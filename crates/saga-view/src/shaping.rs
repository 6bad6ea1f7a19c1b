//! Turning text into positioned glyphs.

use std::path::Path;
use std::rc::Rc;

use rusttype::Font;
use rustybuzz::{Face, UnicodeBuffer};

use crate::context::ViewContext;
use crate::error::{ViewError, ViewResult};

/// Which of the two loaded faces a line uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    /// Proportional face for dialogue and options.
    Body,
    /// Monospace face for the option markers.
    Mono,
}

/// A face at a logical pixel size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSelection {
    /// Face to shape with.
    pub face: FontFace,
    /// Size in logical pixels.
    pub size: f32,
}

impl FontSelection {
    /// The body face at `size`.
    pub const fn body(size: f32) -> Self {
        Self {
            face: FontFace::Body,
            size,
        }
    }

    /// The mono face at `size`.
    pub const fn mono(size: f32) -> Self {
        Self {
            face: FontFace::Mono,
            size,
        }
    }
}

/// One shaped glyph, in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphPlacement {
    /// Glyph index within the face.
    pub glyph_id: u32,
    /// Horizontal offset from the pen position.
    pub x_offset: f32,
    /// Vertical offset from the pen position, up positive.
    pub y_offset: f32,
    /// Horizontal pen advance.
    pub x_advance: f32,
    /// Vertical pen advance.
    pub y_advance: f32,
}

/// The immutable result of shaping one line of text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapedLine {
    glyphs: Vec<GlyphPlacement>,
    physical_px: u32,
}

impl ShapedLine {
    /// Wrap glyphs shaped at `physical_px`.
    pub fn new(glyphs: Vec<GlyphPlacement>, physical_px: u32) -> Self {
        Self {
            glyphs,
            physical_px,
        }
    }

    /// The glyphs in visual order.
    pub fn glyphs(&self) -> &[GlyphPlacement] {
        &self.glyphs
    }

    /// Number of glyphs.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Whether the line has no glyphs.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Pixel size the glyphs were shaped at.
    pub fn physical_px(&self) -> u32 {
        self.physical_px
    }

    /// Total horizontal advance in physical pixels.
    pub fn width(&self) -> f32 {
        self.glyphs.iter().map(|g| g.x_advance).sum()
    }
}

/// Shapes a single line of text.
pub trait Shaper {
    /// Shape `text` as one visual line. Control characters are dropped.
    fn shape(&self, text: &str, font: FontSelection) -> ShapedLine;
}

/// Shaper with a fixed advance of half the pixel size per character.
///
/// Glyph ids are Unicode scalar values. Needs no font files.
#[derive(Debug, Clone, Copy)]
pub struct MonoShaper {
    ctx: ViewContext,
}

impl MonoShaper {
    /// Create a shaper for `ctx`.
    pub fn new(ctx: &ViewContext) -> Self {
        Self { ctx: *ctx }
    }
}

impl Shaper for MonoShaper {
    fn shape(&self, text: &str, font: FontSelection) -> ShapedLine {
        let px = self.ctx.physical_px(font.size);
        let advance = px as f32 / 2.0;
        let glyphs = text
            .chars()
            .filter(|c| !c.is_control())
            .map(|c| GlyphPlacement {
                glyph_id: u32::from(c),
                x_offset: 0.0,
                y_offset: 0.0,
                x_advance: advance,
                y_advance: 0.0,
            })
            .collect();
        ShapedLine::new(glyphs, px)
    }
}

#[derive(Clone)]
struct LoadedFace {
    data: Rc<[u8]>,
    font: Font<'static>,
}

impl LoadedFace {
    fn parse(data: Vec<u8>, role: &str) -> ViewResult<Self> {
        let invalid = || ViewError::FontParse(format!("{role} face"));
        if Face::from_slice(&data, 0).is_none() {
            return Err(invalid());
        }
        let data: Rc<[u8]> = Rc::from(data);
        let font = Font::try_from_vec(data.to_vec()).ok_or_else(invalid)?;
        Ok(Self { data, font })
    }
}

/// The two faces used by the game.
///
/// Each face is kept as raw data for shaping and as a rusttype font for
/// rasterizing glyphs by id.
#[derive(Clone)]
pub struct FontSet {
    body: LoadedFace,
    mono: LoadedFace,
}

impl FontSet {
    /// Build from raw TrueType/OpenType data.
    pub fn from_bytes(body: Vec<u8>, mono: Vec<u8>) -> ViewResult<Self> {
        Ok(Self {
            body: LoadedFace::parse(body, "body")?,
            mono: LoadedFace::parse(mono, "mono")?,
        })
    }

    /// Read both faces from disk.
    pub fn load(body: &Path, mono: &Path) -> ViewResult<Self> {
        let read = |path: &Path| {
            std::fs::read(path).map_err(|source| ViewError::FontRead {
                path: path.to_path_buf(),
                source,
            })
        };
        tracing::debug!(body = %body.display(), mono = %mono.display(), "loading fonts");
        Self::from_bytes(read(body)?, read(mono)?)
    }

    fn face(&self, face: FontFace) -> &LoadedFace {
        match face {
            FontFace::Body => &self.body,
            FontFace::Mono => &self.mono,
        }
    }

    /// The rasterizable font for `face`.
    pub fn font(&self, face: FontFace) -> &Font<'static> {
        &self.face(face).font
    }

    /// Raw font data for `face`.
    pub fn data(&self, face: FontFace) -> &[u8] {
        &self.face(face).data
    }
}

/// OpenType shaper backed by rustybuzz.
///
/// Applies the font's substitution and positioning tables, so one glyph
/// may cover several characters.
#[derive(Clone)]
pub struct FontShaper {
    ctx: ViewContext,
    fonts: FontSet,
}

impl FontShaper {
    /// Create a shaper for `ctx` using `fonts`.
    pub fn new(ctx: &ViewContext, fonts: FontSet) -> Self {
        Self { ctx: *ctx, fonts }
    }
}

impl Shaper for FontShaper {
    fn shape(&self, text: &str, font: FontSelection) -> ShapedLine {
        let px = self.ctx.physical_px(font.size);
        let Some(face) = Face::from_slice(self.fonts.data(font.face), 0) else {
            tracing::warn!(face = ?font.face, "font data rejected by the shaper");
            return ShapedLine::new(Vec::new(), px);
        };

        let mut buffer = UnicodeBuffer::new();
        buffer.push_str(&text.chars().filter(|c| !c.is_control()).collect::<String>());
        let shaped = rustybuzz::shape(&face, &[], buffer);

        let scale = px as f32 / face.units_per_em().max(1) as f32;
        let glyphs = shaped
            .glyph_infos()
            .iter()
            .zip(shaped.glyph_positions())
            .map(|(info, pos)| GlyphPlacement {
                glyph_id: info.glyph_id,
                x_offset: pos.x_offset as f32 * scale,
                y_offset: pos.y_offset as f32 * scale,
                x_advance: pos.x_advance as f32 * scale,
                y_advance: pos.y_advance as f32 * scale,
            })
            .collect();
        ShapedLine::new(glyphs, px)
    }
}
