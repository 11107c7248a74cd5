//! The icon compositor.
//!
//! A render is a pure function of the source image, the output size and the
//! [`RenderConfig`]:
//!
//! 1. Start from a cleared, fully transparent surface.
//! 2. Fill it with the background color unless the config is transparent.
//! 3. Inset a content square by the padding on every side.
//! 4. Build a clip for the configured [`IconShape`](crate::IconShape).
//! 5. Scale the source to *cover* the content square, centered on it.
//! 6. Draw the scaled source through the clip. Anything outside the surface
//!    is simply not drawn.
//!
//! A padding of more than half the output leaves an empty content square, in
//! which case only the background is drawn.

pub mod clip;
pub mod surface;

pub use clip::{ClipRegion, ContentSquare};
pub use surface::Surface;

use resvg::tiny_skia::{FilterQuality, PixmapPaint, Transform};

use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::icon::RenderedIcon;
use crate::source::SourceImage;

// ============================================================================
// CoverPlacement
// ============================================================================

/// Where a scaled source lands so that it fully covers the content square.
///
/// The scaled image overflows the square on one axis whenever the source is
/// not square; the clip removes the overflow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverPlacement {
    pub scale: f32,
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl CoverPlacement {
    pub fn new(content: &ContentSquare, source_width: u32, source_height: u32) -> Self {
        let scale = (content.side / source_width as f32).max(content.side / source_height as f32);
        let width = source_width as f32 * scale;
        let height = source_height as f32 * scale;
        Self {
            scale,
            left: content.x + (content.side - width) / 2.0,
            top: content.y + (content.side - height) / 2.0,
            width,
            height,
        }
    }

    fn transform(&self) -> Transform {
        Transform::from_row(self.scale, 0.0, 0.0, self.scale, self.left, self.top)
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Renders `source` into a new `output_size x output_size` icon.
///
/// The icon is clipped to `config.shape`.
pub fn render(
    source: &SourceImage,
    output_size: u32,
    config: &RenderConfig,
) -> Result<RenderedIcon, RenderError> {
    let mut surface = Surface::new(output_size)?;
    render_into(&mut surface, source, config);
    Ok(RenderedIcon::new(config.shape, surface.to_rgba_image()))
}

/// Renders `source` onto an existing surface, overwriting all of it.
///
/// The output size is the surface size. Reusing one surface across calls is
/// safe as long as each result is copied out before the next call.
pub fn render_into(surface: &mut Surface, source: &SourceImage, config: &RenderConfig) {
    let size = surface.size();

    surface.clear();
    if !config.transparent {
        surface.fill(config.background_color);
    }

    let content = ContentSquare::new(size, config.padding);
    let Some(clip) = ClipRegion::new(config.shape, &content, size) else {
        log::debug!(
            "padding {} leaves no content at {}px, drawing background only",
            config.padding,
            size
        );
        return;
    };

    let placement = CoverPlacement::new(&content, source.width(), source.height());
    let paint = PixmapPaint {
        quality: FilterQuality::Bicubic,
        ..PixmapPaint::default()
    };

    surface.pixmap_mut().as_mut().draw_pixmap(
        0,
        0,
        source.pixmap().as_ref(),
        &paint,
        placement.transform(),
        Some(clip.mask()),
    );
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::IconShape;
    use image::{Rgba, RgbaImage};
    use palette::Srgb;

    const RED: [u8; 4] = [255, 0, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];
    const GREEN_BG: Srgb<u8> = Srgb::new(0, 200, 0);

    fn solid_source(width: u32, height: u32, color: [u8; 4]) -> SourceImage {
        SourceImage::from_rgba(RgbaImage::from_pixel(width, height, Rgba(color))).unwrap()
    }

    /// Left half red, right half blue.
    fn split_source(width: u32, height: u32) -> SourceImage {
        let img = RgbaImage::from_fn(width, height, |x, _| {
            if x < width / 2 { Rgba(RED) } else { Rgba(BLUE) }
        });
        SourceImage::from_rgba(img).unwrap()
    }

    fn config(padding: i32, transparent: bool, shape: IconShape) -> RenderConfig {
        RenderConfig {
            padding,
            background_color: GREEN_BG,
            transparent,
            shape,
        }
    }

    fn bg() -> [u8; 4] {
        [GREEN_BG.red, GREEN_BG.green, GREEN_BG.blue, 255]
    }

    fn close(actual: [u8; 4], expected: [u8; 4]) -> bool {
        actual
            .iter()
            .zip(expected.iter())
            .all(|(a, e)| (*a as i16 - *e as i16).abs() <= 2)
    }

    fn distance_from(x: u32, y: u32, cx: f32, cy: f32) -> f32 {
        let dx = x as f32 + 0.5 - cx;
        let dy = y as f32 + 0.5 - cy;
        (dx * dx + dy * dy).sqrt()
    }

    #[test]
    fn cover_placement_for_wide_source() {
        let content = ContentSquare::new(192, 10);
        let placement = CoverPlacement::new(&content, 1000, 500);

        assert!((placement.scale - 0.344).abs() < 1e-6);
        assert!((placement.width - 344.0).abs() < 1e-3);
        assert!((placement.height - 172.0).abs() < 1e-3);
        assert!((placement.left - -76.0).abs() < 1e-3);
        assert!((placement.top - 10.0).abs() < 1e-3);
    }

    #[test]
    fn cover_placement_for_tall_source() {
        let content = ContentSquare::new(100, 0);
        let placement = CoverPlacement::new(&content, 50, 200);

        assert_eq!(placement.scale, 2.0);
        assert_eq!(placement.width, 100.0);
        assert_eq!(placement.height, 400.0);
        assert_eq!(placement.left, 0.0);
        assert_eq!(placement.top, -150.0);
    }

    #[test]
    fn output_has_requested_dimensions() {
        let source = solid_source(30, 70, RED);
        for size in [48, 72, 96, 144, 192] {
            let icon = render(&source, size, &config(10, false, IconShape::Rounded)).unwrap();
            assert_eq!(icon.data.dimensions(), (size, size));
            assert_eq!(icon.size(), size);
        }
    }

    #[test]
    fn zero_output_size_is_rejected() {
        let source = solid_source(4, 4, RED);
        let err = render(&source, 0, &RenderConfig::default()).unwrap_err();
        assert!(matches!(err, RenderError::InvalidSize(0)));
    }

    #[test]
    fn render_follows_config_shape() {
        let source = solid_source(60, 60, RED);
        for shape in IconShape::ALL {
            let icon = render(&source, 48, &config(0, true, shape)).unwrap();
            assert_eq!(icon.shape, shape);

            let corner = icon.data.get_pixel(0, 0)[3];
            match shape {
                IconShape::Square => assert_eq!(corner, 255),
                IconShape::Circle | IconShape::Rounded => assert_eq!(corner, 0),
            }
        }
    }

    #[test]
    fn square_without_padding_is_fully_covered() {
        let source = split_source(100, 50);
        let icon = render(&source, 48, &config(0, false, IconShape::Square)).unwrap();

        // Height is the constrained axis: the image spans the full canvas.
        for y in [0, 24, 47] {
            assert!(close(icon.data.get_pixel(10, y).0, RED));
            assert!(close(icon.data.get_pixel(40, y).0, BLUE));
        }
        assert!(icon.data.pixels().all(|p| p.0 != bg()));
    }

    #[test]
    fn square_padding_shows_background_border() {
        let source = solid_source(100, 50, RED);
        let icon = render(&source, 48, &config(8, false, IconShape::Square)).unwrap();

        assert_eq!(icon.data.get_pixel(2, 24).0, bg());
        assert_eq!(icon.data.get_pixel(45, 24).0, bg());
        assert_eq!(icon.data.get_pixel(24, 2).0, bg());
        assert!(close(icon.data.get_pixel(24, 24).0, RED));
        assert!(close(icon.data.get_pixel(9, 9).0, RED));
    }

    #[test]
    fn circle_scenario_masks_outside_radius() {
        let source = solid_source(1000, 500, RED);
        let icon = render(&source, 192, &config(10, true, IconShape::Circle)).unwrap();

        for (x, y, pixel) in icon.data.enumerate_pixels() {
            let d = distance_from(x, y, 96.0, 96.0);
            if d > 87.0 {
                assert_eq!(pixel[3], 0, "pixel ({x}, {y}) leaked past the circle");
            } else if d < 85.0 {
                assert!(close(pixel.0, RED), "pixel ({x}, {y}) not covered");
            }
        }
    }

    #[test]
    fn circle_outside_mask_is_background_when_opaque() {
        let source = solid_source(1000, 500, RED);
        let icon = render(&source, 192, &config(10, false, IconShape::Circle)).unwrap();

        for (x, y, pixel) in icon.data.enumerate_pixels() {
            if distance_from(x, y, 96.0, 96.0) > 87.0 {
                assert_eq!(pixel.0, bg());
            }
        }
    }

    #[test]
    fn rounded_corners_do_not_leak() {
        let source = solid_source(64, 64, BLUE);
        let icon = render(&source, 96, &config(8, true, IconShape::Rounded)).unwrap();

        // Content square 8..88, corner radius 20; corner arc centered at (28, 28).
        for (x, y, pixel) in icon.data.enumerate_pixels() {
            let outside_square = x < 8 || y < 8 || x >= 88 || y >= 88;
            let (cx, cy) = (
                if x < 48 { 28.0 } else { 68.0 },
                if y < 48 { 28.0 } else { 68.0 },
            );
            let in_corner_zone = (x < 28 || x >= 68) && (y < 28 || y >= 68);
            let outside_arc = in_corner_zone && distance_from(x, y, cx, cy) > 21.0;
            if outside_square || outside_arc {
                assert_eq!(pixel[3], 0, "pixel ({x}, {y}) leaked past the rounded mask");
            }
        }
        assert!(close(icon.data.get_pixel(48, 48).0, BLUE));
        assert!(close(icon.data.get_pixel(48, 9).0, BLUE));
    }

    #[test]
    fn transparent_skips_background_fill() {
        let source = solid_source(10, 10, RED);
        for shape in IconShape::ALL {
            let icon = render(&source, 48, &config(10, true, shape)).unwrap();
            assert_eq!(icon.data.get_pixel(0, 0).0, [0, 0, 0, 0]);
            assert_eq!(icon.data.get_pixel(47, 47).0, [0, 0, 0, 0]);
        }
    }

    #[test]
    fn larger_padding_shrinks_visible_content() {
        let source = solid_source(40, 40, RED);
        for shape in IconShape::ALL {
            let visible: Vec<usize> = [0, 10, 20, 30]
                .iter()
                .map(|&padding| {
                    let icon = render(&source, 96, &config(padding, true, shape)).unwrap();
                    icon.data.pixels().filter(|p| p[3] > 0).count()
                })
                .collect();
            assert!(
                visible.windows(2).all(|w| w[0] > w[1]),
                "{shape:?} visible areas not decreasing: {visible:?}"
            );
        }
    }

    #[test]
    fn square_content_side_matches_padding() {
        let source = solid_source(40, 40, RED);
        let icon = render(&source, 96, &config(18, true, IconShape::Square)).unwrap();
        let visible = icon.data.pixels().filter(|p| p[3] > 0).count();
        assert_eq!(visible, 60 * 60);
    }

    #[test]
    fn negative_padding_overflows_canvas() {
        let source = split_source(80, 80);
        for shape in IconShape::ALL {
            let icon = render(&source, 48, &config(-20, false, shape)).unwrap();
            assert_eq!(icon.data.dimensions(), (48, 48));
            assert!(close(icon.data.get_pixel(10, 24).0, RED));
            assert!(close(icon.data.get_pixel(40, 24).0, BLUE));
        }
    }

    #[test]
    fn oversized_padding_draws_only_background() {
        let source = solid_source(10, 10, RED);
        for padding in [24, 40] {
            for shape in IconShape::ALL {
                let opaque = render(&source, 48, &config(padding, false, shape)).unwrap();
                assert!(opaque.data.pixels().all(|p| p.0 == bg()));

                let clear = render(&source, 48, &config(padding, true, shape)).unwrap();
                assert!(clear.data.pixels().all(|p| p.0 == [0, 0, 0, 0]));
            }
        }
    }

    #[test]
    fn reused_surface_does_not_leak_between_renders() {
        let red = solid_source(20, 20, RED);
        let blue = solid_source(20, 20, BLUE);
        let mut surface = Surface::new(48).unwrap();

        render_into(&mut surface, &red, &config(-20, false, IconShape::Square));
        render_into(&mut surface, &blue, &config(12, true, IconShape::Circle));
        let reused = surface.to_rgba_image();

        let fresh = render(&blue, 48, &config(12, true, IconShape::Circle)).unwrap();
        assert_eq!(reused, fresh.data);
    }

    #[test]
    fn render_is_deterministic() {
        let source = split_source(33, 71);
        let cfg = config(5, false, IconShape::Rounded);
        let first = render(&source, 72, &cfg).unwrap();
        let second = render(&source, 72, &cfg).unwrap();
        assert_eq!(first, second);
    }
}
