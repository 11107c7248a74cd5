//! launcher-icons: Launcher icon set generator
//!
//! This crate turns a single uploaded image into the fifteen launcher icons an
//! Android app ships with: five density buckets times three shapes (square
//! foreground, round, rounded-square launcher), with configurable padding,
//! background fill and export format.
//!
//! # Example
//!
//! ```
//! use launcher_icons::{ExportFormat, IconSession, IconShape, MemorySink};
//! use image::{Rgba, RgbaImage};
//!
//! let mut session = IconSession::new();
//! # let logo = RgbaImage::from_pixel(300, 200, Rgba([0, 120, 255, 255]));
//! # let mut upload = Vec::new();
//! # image::DynamicImage::ImageRgba8(logo)
//! #     .write_to(&mut std::io::Cursor::new(&mut upload), image::ImageFormat::Png)
//! #     .unwrap();
//! session.load_image(&upload).unwrap();
//!
//! // Every change re-renders the three previews
//! session.set_padding(16);
//! session.set_transparent(true);
//! let round = session.preview(IconShape::Circle).unwrap();
//! assert_eq!(round.size(), 192);
//!
//! // Export all fifteen files
//! session.set_export_format(ExportFormat::Webp);
//! let mut sink = MemorySink::new();
//! let report = session.export(&mut sink).unwrap();
//! assert_eq!(report.written.len(), 15);
//! ```
//!
//! # Rendering without a session
//!
//! The compositor is a plain function of its inputs:
//!
//! ```
//! use launcher_icons::{render, IconShape, RenderConfig, SourceImage};
//! use image::{Rgba, RgbaImage};
//! use palette::Srgb;
//!
//! let source = SourceImage::from_rgba(RgbaImage::from_pixel(1000, 500, Rgba([255, 0, 0, 255]))).unwrap();
//! let config = RenderConfig::new(10, Srgb::new(255, 255, 255), false).with_shape(IconShape::Circle);
//!
//! let icon = render(&source, 192, &config).unwrap();
//! assert_eq!(icon.data.dimensions(), (192, 192));
//! ```

mod compositor;
mod config;
mod error;
mod export;
mod icon;
mod profile;
mod session;
mod source;

pub use compositor::{render, render_into, ClipRegion, ContentSquare, CoverPlacement, Surface};
pub use config::{RenderConfig, DEFAULT_BACKGROUND, PADDING_RANGE};
pub use error::{DecodeError, Error, ExportError, RenderError, Result};
pub use export::{
    encode, export_icons, DirectorySink, ExportFailure, ExportFormat, ExportReport, ExportedIcon,
    IconSink, MemorySink,
};
pub use icon::{icon_specs, DensityBucket, IconShape, IconSpec, RenderedIcon};
pub use profile::{to_hex, IconProfile};
pub use session::{generate_icons, Configurable, IconSession};
pub use source::{SourceImage, SVG_RASTER_SIZE};
