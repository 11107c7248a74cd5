//! Decoding uploaded bytes into an immutable source image.

use std::fmt;

use image::RgbaImage;
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};

use crate::compositor::surface::{pixmap_from_rgba, pixmap_to_rgba_image};
use crate::error::DecodeError;

/// Longest side, in pixels, that vector uploads are rasterized to.
pub const SVG_RASTER_SIZE: u32 = 1024;

/// A decoded upload, ready to be composited.
///
/// Holds both the straight-alpha RGBA buffer and a premultiplied copy used
/// for drawing. Never mutated after construction; a new upload replaces it.
#[derive(Clone)]
pub struct SourceImage {
    data: RgbaImage,
    pixmap: Pixmap,
}

impl SourceImage {
    /// Decodes PNG, JPEG, WebP (or any other format `image` is built with),
    /// falling back to SVG rasterization for vector uploads.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        match image::load_from_memory(bytes) {
            Ok(img) => Self::from_rgba(img.to_rgba8()),
            Err(_) if looks_like_svg(bytes) => Self::from_pixmap(rasterize_svg(bytes)?),
            Err(err) => Err(err.into()),
        }
    }

    /// Wraps an already decoded RGBA buffer.
    pub fn from_rgba(data: RgbaImage) -> Result<Self, DecodeError> {
        let pixmap = pixmap_from_rgba(&data).ok_or(DecodeError::Empty {
            width: data.width(),
            height: data.height(),
        })?;
        Ok(Self { data, pixmap })
    }

    fn from_pixmap(pixmap: Pixmap) -> Result<Self, DecodeError> {
        let data = pixmap_to_rgba_image(&pixmap);
        Ok(Self { data, pixmap })
    }

    pub fn width(&self) -> u32 {
        self.data.width()
    }

    pub fn height(&self) -> u32 {
        self.data.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.data.dimensions()
    }

    /// The decoded pixels in straight (non-premultiplied) RGBA.
    pub fn data(&self) -> &RgbaImage {
        &self.data
    }

    pub(crate) fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }
}

impl fmt::Debug for SourceImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceImage")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

/// Cheap sniff for XML/SVG text, skipping a UTF-8 BOM and leading whitespace.
fn looks_like_svg(bytes: &[u8]) -> bool {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let head = &bytes[start..];
    head.starts_with(b"<svg") || head.starts_with(b"<?xml") || head.starts_with(b"<!--")
}

/// Renders an SVG so that its larger side is [`SVG_RASTER_SIZE`] pixels.
fn rasterize_svg(bytes: &[u8]) -> Result<Pixmap, DecodeError> {
    let opts = Options::default();
    let tree = Tree::from_data(bytes, &opts)?;

    let svg_size = tree.size();
    let scale = SVG_RASTER_SIZE as f32 / svg_size.width().max(svg_size.height());
    let width = (svg_size.width() * scale).ceil() as u32;
    let height = (svg_size.height() * scale).ceil() as u32;

    let mut pixmap = Pixmap::new(width, height).ok_or(DecodeError::Empty { width, height })?;
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    log::debug!("rasterized SVG upload to {}x{}", width, height);
    Ok(pixmap)
}
