//! Rendering, encoding and emitting the full launcher icon set.
//!
//! [`export_icons`] walks the fifteen entries of [`icon_specs`] in order,
//! rendering each into a scratch [`Surface`], encoding it and handing the
//! bytes to an [`IconSink`] before moving on. A failure on one file is
//! recorded in the [`ExportReport`] and the remaining files are still
//! attempted.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::compositor::{render_into, Surface};
use crate::config::RenderConfig;
use crate::error::ExportError;
use crate::icon::{icon_specs, IconSpec};
use crate::source::SourceImage;

// ============================================================================
// ExportFormat
// ============================================================================

/// File format of exported icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum ExportFormat {
    /// Lossless PNG.
    #[default]
    Png,
    /// Lossless WebP.
    Webp,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Webp => "webp",
        }
    }

    pub fn image_format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Webp => ImageFormat::WebP,
        }
    }
}

/// Encodes an RGBA buffer in the given format.
pub fn encode(image: &RgbaImage, format: ExportFormat) -> Result<Vec<u8>, image::ImageError> {
    let mut buf = Vec::new();
    image.write_to(&mut Cursor::new(&mut buf), format.image_format())?;
    Ok(buf)
}

// ============================================================================
// Sinks
// ============================================================================

/// Destination for encoded icons.
///
/// `path` is relative to the export root, e.g. `mipmap-mdpi/ic_launcher.png`.
pub trait IconSink {
    fn emit(&mut self, path: &Path, bytes: &[u8]) -> Result<(), ExportError>;
}

/// Writes icons below a root directory, creating bucket folders as needed.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl IconSink for DirectorySink {
    fn emit(&mut self, path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
        let target = self.root.join(path);
        let io_err = |source| ExportError::Io {
            path: target.clone(),
            source,
        };

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(&target, bytes).map_err(io_err)
    }
}

/// An encoded icon held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedIcon {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

/// Collects icons in memory, e.g. to bundle them for a download.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    icons: Vec<ExportedIcon>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn icons(&self) -> &[ExportedIcon] {
        &self.icons
    }

    pub fn into_icons(self) -> Vec<ExportedIcon> {
        self.icons
    }
}

impl IconSink for MemorySink {
    fn emit(&mut self, path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
        self.icons.push(ExportedIcon {
            path: path.to_path_buf(),
            bytes: bytes.to_vec(),
        });
        Ok(())
    }
}

// ============================================================================
// ExportReport
// ============================================================================

/// A file that could not be exported.
#[derive(Debug)]
pub struct ExportFailure {
    pub path: PathBuf,
    pub error: ExportError,
}

/// Outcome of an export run, one entry per attempted file.
#[derive(Debug, Default)]
pub struct ExportReport {
    pub written: Vec<PathBuf>,
    pub failures: Vec<ExportFailure>,
}

impl ExportReport {
    /// True when every file was written.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of files attempted.
    pub fn attempted(&self) -> usize {
        self.written.len() + self.failures.len()
    }
}

// ============================================================================
// Export
// ============================================================================

/// Renders and emits all fifteen icons with one shared config.
///
/// The shape in `config` is ignored; each entry of the table supplies its own.
pub fn export_icons(
    source: &SourceImage,
    config: &RenderConfig,
    format: ExportFormat,
    sink: &mut dyn IconSink,
) -> ExportReport {
    let mut report = ExportReport::default();
    let mut scratch: Option<Surface> = None;

    for spec in icon_specs() {
        let path = spec.relative_path(format);
        match export_one(source, config, format, &spec, &path, &mut scratch, sink) {
            Ok(()) => report.written.push(path),
            Err(error) => {
                log::warn!("skipping {}: {}", path.display(), error);
                report.failures.push(ExportFailure { path, error });
            }
        }
    }

    log::info!(
        "exported {}/{} icons as {}",
        report.written.len(),
        report.attempted(),
        format.extension()
    );
    report
}

fn export_one(
    source: &SourceImage,
    config: &RenderConfig,
    format: ExportFormat,
    spec: &IconSpec,
    path: &Path,
    scratch: &mut Option<Surface>,
    sink: &mut dyn IconSink,
) -> Result<(), ExportError> {
    let size = spec.output_size();
    let surface = match scratch.take() {
        Some(surface) if surface.size() == size => scratch.insert(surface),
        _ => scratch.insert(Surface::new(size)?),
    };

    render_into(surface, source, &config.with_shape(spec.shape));
    let bytes = encode(&surface.to_rgba_image(), format).map_err(|source| ExportError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    sink.emit(path, &bytes)
}

// ============================================================================
// Tests
// ============================================================================
