//! Error types for decoding, rendering and exporting icons.

use std::path::PathBuf;

/// Failure to turn uploaded bytes into a [`SourceImage`](crate::SourceImage).
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("unsupported or corrupt image: {0}")]
    Image(#[from] image::ImageError),

    #[error("invalid SVG: {0}")]
    Svg(#[from] resvg::usvg::Error),

    #[error("image has no pixels ({width}x{height})")]
    Empty { width: u32, height: u32 },
}

/// Failure while compositing a single icon.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("output size must be positive, got {0}")]
    InvalidSize(u32),

    #[error("failed to allocate a {0}x{0} surface")]
    Allocation(u32),
}

/// Failure of an export run as a whole, or of one file within it.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("no image loaded")]
    NoImage,

    #[error("an export is already running")]
    InFlight,

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Crate-level error covering every fallible entry point.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("invalid profile: {0}")]
    Profile(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
