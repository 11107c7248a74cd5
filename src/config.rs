//! User-driven render settings shared by previews and exports.

use std::ops::RangeInclusive;

use palette::Srgb;

use crate::icon::IconShape;

/// Allowed padding, in pixels, on every side of the content square.
pub const PADDING_RANGE: RangeInclusive<i32> = -20..=40;

/// The background used when nothing else is configured.
pub const DEFAULT_BACKGROUND: Srgb<u8> = Srgb::new(255, 255, 255);

/// Settings for one render.
///
/// The compositor tolerates any `padding`, but values coming from user input
/// should go through [`RenderConfig::set_padding`] which clamps them to
/// [`PADDING_RANGE`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Inset in pixels. Negative values zoom the image past the canvas edge.
    pub padding: i32,

    /// Opaque fill drawn under the image unless `transparent` is set.
    pub background_color: Srgb<u8>,

    /// Skip the background fill entirely.
    pub transparent: bool,

    /// Mask applied to the content square by [`render`](crate::render) and
    /// [`render_into`](crate::render_into). The session previews and
    /// [`export_icons`](crate::export_icons) draw every shape and override it
    /// through [`with_shape`](Self::with_shape).
    pub shape: IconShape,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            padding: 0,
            background_color: DEFAULT_BACKGROUND,
            transparent: false,
            shape: IconShape::Square,
        }
    }
}

impl RenderConfig {
    /// Creates a config, clamping `padding` into [`PADDING_RANGE`].
    pub fn new(padding: i32, background_color: Srgb<u8>, transparent: bool) -> Self {
        Self {
            padding: clamp_padding(padding),
            background_color,
            transparent,
            shape: IconShape::Square,
        }
    }

    /// Returns a copy of this config drawing the given shape.
    pub fn with_shape(mut self, shape: IconShape) -> Self {
        self.shape = shape;
        self
    }

    /// Sets the padding, clamped to [`PADDING_RANGE`]. Returns true if it changed.
    pub fn set_padding(&mut self, padding: i32) -> bool {
        let padding = clamp_padding(padding);
        replace_if_changed(&mut self.padding, padding)
    }

    /// Returns true if the color changed.
    pub fn set_background_color(&mut self, color: Srgb<u8>) -> bool {
        replace_if_changed(&mut self.background_color, color)
    }

    /// Returns true if the flag changed.
    pub fn set_transparent(&mut self, transparent: bool) -> bool {
        replace_if_changed(&mut self.transparent, transparent)
    }

    /// Side length of the content square for a given output size.
    ///
    /// May be zero or negative when the padding exceeds half the output.
    pub fn content_size(&self, output_size: u32) -> i64 {
        content_side(output_size, self.padding)
    }
}

pub(crate) fn content_side(output_size: u32, padding: i32) -> i64 {
    i64::from(output_size) - 2 * i64::from(padding)
}

pub(crate) fn clamp_padding(padding: i32) -> i32 {
    padding.clamp(*PADDING_RANGE.start(), *PADDING_RANGE.end())
}

fn replace_if_changed<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot != value {
        *slot = value;
        true
    } else {
        false
    }
}
