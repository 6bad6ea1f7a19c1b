//! Screen geometry shared by every text view.

use crate::error::{ViewError, ViewResult};

/// Logical and physical size of the render surface.
///
/// Built once by the host after the window exists and passed by reference
/// to every view constructor. Layout happens in logical pixels; fonts are
/// rasterized at physical size so text stays sharp on high-DPI displays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewContext {
    logical_size: (u32, u32),
    drawable_size: (u32, u32),
    scale_factor: f32,
}

impl ViewContext {
    /// Create a context from the logical canvas size and the drawable size.
    pub fn new(logical_size: (u32, u32), drawable_size: (u32, u32)) -> ViewResult<Self> {
        for (width, height) in [logical_size, drawable_size] {
            if width == 0 || height == 0 {
                return Err(ViewError::EmptyViewport { width, height });
            }
        }
        Ok(Self {
            logical_size,
            drawable_size,
            scale_factor: drawable_size.0 as f32 / logical_size.0 as f32,
        })
    }

    /// Logical canvas size.
    pub fn logical_size(&self) -> (u32, u32) {
        self.logical_size
    }

    /// Drawable size in physical pixels.
    pub fn drawable_size(&self) -> (u32, u32) {
        self.drawable_size
    }

    /// Physical pixels per logical pixel.
    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    /// Convert a logical pixel size to whole physical pixels (at least 1).
    pub fn physical_px(&self, logical_px: f32) -> u32 {
        ((logical_px * self.scale_factor).round() as u32).max(1)
    }
}
