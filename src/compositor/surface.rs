//! Drawing surface and conversions between `image` and `tiny_skia` buffers.
//!
//! `tiny_skia` stores premultiplied alpha while `image` stores straight
//! alpha, so every crossing between the two goes through this module.

use image::{Rgba, RgbaImage};
use palette::Srgb;
use resvg::tiny_skia::{Color, ColorU8, Pixmap};

use crate::error::RenderError;

// ============================================================================
// Surface
// ============================================================================

/// A square scratch surface that the compositor draws into.
///
/// A single surface can be reused across many renders of the same size;
/// each render starts by clearing it.
#[derive(Clone)]
pub struct Surface {
    pixmap: Pixmap,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface").field("size", &self.size()).finish()
    }
}

impl Surface {
    /// Allocates a fully transparent `size x size` surface.
    pub fn new(size: u32) -> Result<Self, RenderError> {
        if size == 0 {
            return Err(RenderError::InvalidSize(size));
        }
        let pixmap = Pixmap::new(size, size).ok_or(RenderError::Allocation(size))?;
        Ok(Self { pixmap })
    }

    /// Side length in pixels.
    pub fn size(&self) -> u32 {
        self.pixmap.width()
    }

    /// Resets every pixel to transparent.
    pub fn clear(&mut self) {
        self.pixmap.fill(Color::TRANSPARENT);
    }

    /// Fills the whole surface with an opaque color.
    pub fn fill(&mut self, color: Srgb<u8>) {
        self.pixmap
            .fill(Color::from_rgba8(color.red, color.green, color.blue, 255));
    }

    /// Copies the surface out as straight-alpha RGBA.
    pub fn to_rgba_image(&self) -> RgbaImage {
        pixmap_to_rgba_image(&self.pixmap)
    }

    pub(crate) fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }
}

// ============================================================================
// Conversions
// ============================================================================

/// Converts a straight-alpha RGBA image into a premultiplied pixmap.
///
/// Returns `None` for zero-sized images.
pub fn pixmap_from_rgba(img: &RgbaImage) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(img.width(), img.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(img.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Some(pixmap)
}

/// Converts a premultiplied pixmap into a straight-alpha RGBA image.
pub fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    img
}
