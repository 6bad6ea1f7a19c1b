//! macroquad drawing: the virtual canvas camera and cached glyph textures.

use std::num::NonZeroUsize;

use lru::LruCache;
use macroquad::prelude::*;
use rusttype::{Font, GlyphId, Scale, point};

use saga_core::Rgba;
use saga_view::{Canvas, FontFace, FontSet, GlyphInstance};

use crate::config::{CANVAS_H, CANVAS_W};

/// Default number of glyph textures kept alive.
pub const GLYPH_CACHE_SIZE: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct GlyphKey {
    face: FontFace,
    glyph_id: u32,
    px: u32,
}

struct CachedGlyph {
    texture: Texture2D,
    /// Top-left of the bitmap relative to the pen, in physical pixels.
    offset: (f32, f32),
}

/// Draws glyphs as textures rasterized on first use.
///
/// Glyphs without pixels (spaces) are cached as `None`.
pub struct GlyphCanvas<'f> {
    fonts: &'f FontSet,
    cache: LruCache<GlyphKey, Option<CachedGlyph>>,
}

impl<'f> GlyphCanvas<'f> {
    /// Create a canvas holding at most `capacity` glyph textures.
    pub fn new(fonts: &'f FontSet, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            fonts,
            cache: LruCache::new(capacity),
        }
    }
}

fn rasterize(font: &Font<'_>, key: GlyphKey) -> Option<CachedGlyph> {
    let id = u16::try_from(key.glyph_id).ok()?;
    let glyph = font
        .glyph(GlyphId(id))
        .scaled(Scale::uniform(key.px as f32))
        .positioned(point(0.0, 0.0));
    let bb = glyph.pixel_bounding_box()?;
    let width = u16::try_from(bb.width()).ok()?;
    let height = u16::try_from(bb.height()).ok()?;

    let stride = usize::from(width);
    let mut rgba = vec![255u8; stride * usize::from(height) * 4];
    glyph.draw(|x, y, coverage| {
        let alpha = (y as usize * stride + x as usize) * 4 + 3;
        if let Some(a) = rgba.get_mut(alpha) {
            *a = (coverage * 255.0).min(255.0) as u8;
        }
    });

    let texture = Texture2D::from_rgba8(width, height, &rgba);
    texture.set_filter(FilterMode::Linear);
    Some(CachedGlyph {
        texture,
        offset: (bb.min.x as f32, bb.min.y as f32),
    })
}

fn to_color(rgba: Rgba) -> Color {
    Color::new(rgba.r, rgba.g, rgba.b, rgba.a)
}

impl Canvas for GlyphCanvas<'_> {
    fn draw_glyph(&mut self, glyph: &GlyphInstance) {
        let key = GlyphKey {
            face: glyph.face,
            glyph_id: glyph.glyph_id,
            px: glyph.physical_px,
        };
        let fonts = self.fonts;
        let cached = self
            .cache
            .get_or_insert(key, || rasterize(fonts.font(key.face), key));
        let Some(cached) = cached else {
            return;
        };
        let scale = glyph.scale_factor;
        draw_texture_ex(
            &cached.texture,
            glyph.position.0 + cached.offset.0 / scale,
            glyph.position.1 + cached.offset.1 / scale,
            to_color(glyph.color),
            DrawTextureParams {
                dest_size: Some(vec2(
                    cached.texture.width() / scale,
                    cached.texture.height() / scale,
                )),
                ..Default::default()
            },
        );
    }
}

/// Placement of the logical canvas inside a window, scaled uniformly
/// and centred.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letterbox {
    /// Window pixels per logical pixel.
    pub scale: f32,
    /// Top-left corner of the canvas in the window.
    pub origin: (f32, f32),
    /// Size of the canvas in the window.
    pub size: (f32, f32),
}

impl Letterbox {
    /// Fit a `canvas` sized area into `window`.
    pub fn fit(canvas: (f32, f32), window: (f32, f32)) -> Self {
        let scale = (window.0 / canvas.0).min(window.1 / canvas.1);
        let size = (canvas.0 * scale, canvas.1 * scale);
        Self {
            scale,
            origin: ((window.0 - size.0) / 2.0, (window.1 - size.1) / 2.0),
            size,
        }
    }

    /// Physical pixels covered at `dpi` device pixels per window pixel.
    pub fn drawable(&self, dpi: f32) -> (u32, u32) {
        (
            (self.size.0 * dpi).round().max(1.0) as u32,
            (self.size.1 * dpi).round().max(1.0) as u32,
        )
    }
}

fn window_letterbox() -> Letterbox {
    Letterbox::fit((CANVAS_W, CANVAS_H), (screen_width(), screen_height()))
}

/// Physical pixels the logical canvas occupies in the current window.
pub fn drawable_size() -> (u32, u32) {
    window_letterbox().drawable(screen_dpi_scale())
}

/// Point the camera at the logical canvas, letterboxed in the window.
pub fn setup_virtual_canvas() {
    let lb = window_letterbox();
    set_camera(&Camera2D {
        zoom: vec2(2.0 / CANVAS_W, 2.0 / CANVAS_H),
        target: vec2(CANVAS_W / 2.0, CANVAS_H / 2.0),
        viewport: Some((
            lb.origin.0 as i32,
            lb.origin.1 as i32,
            lb.size.0 as i32,
            lb.size.1 as i32,
        )),
        ..Default::default()
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_window_pillarboxes() {
        let lb = Letterbox::fit((1280.0, 720.0), (1920.0, 720.0));
        assert_eq!(lb.scale, 1.0);
        assert_eq!(lb.origin, (320.0, 0.0));
        assert_eq!(lb.size, (1280.0, 720.0));
    }

    #[test]
    fn tall_window_letterboxes() {
        let lb = Letterbox::fit((1280.0, 720.0), (640.0, 720.0));
        assert_eq!(lb.scale, 0.5);
        assert_eq!(lb.origin, (0.0, 180.0));
        assert_eq!(lb.size, (640.0, 360.0));
    }

    #[test]
    fn drawable_applies_dpi() {
        let lb = Letterbox::fit((1280.0, 720.0), (1280.0, 720.0));
        assert_eq!(lb.drawable(1.0), (1280, 720));
        assert_eq!(lb.drawable(2.0), (2560, 1440));
        let tiny = Letterbox::fit((1280.0, 720.0), (0.0, 0.0));
        assert_eq!(tiny.drawable(1.0), (1, 1));
    }
}
