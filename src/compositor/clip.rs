//! Content-square geometry and per-shape clip masks.

use resvg::tiny_skia::{FillRule, Mask, Path, PathBuilder, Rect, Transform};

use crate::config::content_side;
use crate::icon::IconShape;

/// Cubic Bézier handle length for a quarter circle of radius 1.
const KAPPA: f32 = 0.552_284_8;

// ============================================================================
// ContentSquare
// ============================================================================

/// The square inset by the padding on all four sides of the surface.
///
/// `side` may be zero or negative when the padding exceeds half the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentSquare {
    pub x: f32,
    pub y: f32,
    pub side: f32,
}

impl ContentSquare {
    pub fn new(surface_size: u32, padding: i32) -> Self {
        Self {
            x: padding as f32,
            y: padding as f32,
            side: content_side(surface_size, padding) as f32,
        }
    }

    /// True when nothing can be drawn inside the square.
    pub fn is_empty(&self) -> bool {
        self.side <= 0.0
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.side / 2.0, self.y + self.side / 2.0)
    }

    fn rect(&self) -> Option<Rect> {
        Rect::from_xywh(self.x, self.y, self.side, self.side)
    }
}

// ============================================================================
// ClipRegion
// ============================================================================

/// A temporary drawing restriction for one render.
///
/// Built from a path with the non-zero fill rule and passed to each draw call
/// that should respect it. The surface itself never carries clip state.
pub struct ClipRegion {
    mask: Mask,
}

impl std::fmt::Debug for ClipRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClipRegion")
            .field("width", &self.mask.width())
            .field("height", &self.mask.height())
            .finish()
    }
}

impl ClipRegion {
    /// Builds the clip for `shape` over `content` on a `surface_size` surface.
    ///
    /// Returns `None` when the geometry is degenerate (empty content square).
    pub fn new(shape: IconShape, content: &ContentSquare, surface_size: u32) -> Option<Self> {
        if content.is_empty() {
            return None;
        }
        let path = shape_path(shape, content)?;
        let mut mask = Mask::new(surface_size, surface_size)?;
        mask.fill_path(&path, FillRule::Winding, true, Transform::identity());
        Some(Self { mask })
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }
}

/// The outline of `shape` inscribed in the content square.
pub fn shape_path(shape: IconShape, content: &ContentSquare) -> Option<Path> {
    match shape {
        IconShape::Square => content.rect().map(PathBuilder::from_rect),
        IconShape::Circle => {
            let (cx, cy) = content.center();
            PathBuilder::from_circle(cx, cy, content.side / 2.0)
        }
        IconShape::Rounded => rounded_rect_path(content.rect()?, content.side / 4.0),
    }
}

/// A rectangle with four quarter-circle corners of the given radius.
fn rounded_rect_path(rect: Rect, radius: f32) -> Option<Path> {
    let radius = radius.min(rect.width() / 2.0).min(rect.height() / 2.0);
    let k = radius * KAPPA;
    let (l, t, r, b) = (rect.left(), rect.top(), rect.right(), rect.bottom());

    let mut pb = PathBuilder::new();
    pb.move_to(l + radius, t);
    pb.line_to(r - radius, t);
    pb.cubic_to(r - radius + k, t, r, t + radius - k, r, t + radius);
    pb.line_to(r, b - radius);
    pb.cubic_to(r, b - radius + k, r - radius + k, b, r - radius, b);
    pb.line_to(l + radius, b);
    pb.cubic_to(l + radius - k, b, l, b - radius + k, l, b - radius);
    pb.line_to(l, t + radius);
    pb.cubic_to(l, t + radius - k, l + radius - k, t, l + radius, t);
    pb.close();
    pb.finish()
}
