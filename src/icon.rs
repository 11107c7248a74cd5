//! Launcher icon shapes, density buckets and the fixed export table.
//!
//! Android launchers expect one raster per density bucket and icon variant.
//! The table produced by [`icon_specs`] is the cartesian product of the five
//! [`DensityBucket`]s and the three [`IconShape`]s.

use std::path::PathBuf;

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::export::ExportFormat;

// ============================================================================
// IconShape
// ============================================================================

/// The mask applied to the content square of an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum IconShape {
    /// Axis-aligned square, used for the adaptive foreground layer.
    #[default]
    Square,
    /// Circle inscribed in the content square.
    Circle,
    /// Rounded rectangle with a corner radius of a quarter of the content side.
    Rounded,
}

impl IconShape {
    /// All shapes, in export order.
    pub const ALL: [IconShape; 3] = [IconShape::Square, IconShape::Circle, IconShape::Rounded];

    /// The launcher resource name written for this shape.
    pub fn icon_name(self) -> &'static str {
        match self {
            Self::Square => "ic_launcher_foreground",
            Self::Circle => "ic_launcher_round",
            Self::Rounded => "ic_launcher",
        }
    }
}

// ============================================================================
// DensityBucket
// ============================================================================

/// A device pixel-density class and its launcher icon size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DensityBucket {
    Mdpi,
    Hdpi,
    Xhdpi,
    Xxhdpi,
    Xxxhdpi,
}

impl DensityBucket {
    /// All buckets, from the highest density down.
    pub const ALL: [DensityBucket; 5] = [
        DensityBucket::Xxxhdpi,
        DensityBucket::Xxhdpi,
        DensityBucket::Xhdpi,
        DensityBucket::Hdpi,
        DensityBucket::Mdpi,
    ];

    /// The bucket used for interactive previews.
    pub const PREVIEW: DensityBucket = DensityBucket::Xxxhdpi;

    /// Output side length in pixels.
    pub fn size(self) -> u32 {
        match self {
            Self::Mdpi => 48,
            Self::Hdpi => 72,
            Self::Xhdpi => 96,
            Self::Xxhdpi => 144,
            Self::Xxxhdpi => 192,
        }
    }

    /// Resource directory name, e.g. `mipmap-xhdpi`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Mdpi => "mipmap-mdpi",
            Self::Hdpi => "mipmap-hdpi",
            Self::Xhdpi => "mipmap-xhdpi",
            Self::Xxhdpi => "mipmap-xxhdpi",
            Self::Xxxhdpi => "mipmap-xxxhdpi",
        }
    }
}

// ============================================================================
// IconSpec
// ============================================================================

/// One entry of the export table: which bucket, which shape, which file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IconSpec {
    pub density: DensityBucket,
    pub shape: IconShape,
}

impl IconSpec {
    pub fn new(density: DensityBucket, shape: IconShape) -> Self {
        Self { density, shape }
    }

    pub fn output_size(&self) -> u32 {
        self.density.size()
    }

    pub fn output_name(&self) -> &'static str {
        self.shape.icon_name()
    }

    /// Path of the exported file relative to the export root,
    /// e.g. `mipmap-hdpi/ic_launcher_round.webp`.
    pub fn relative_path(&self, format: ExportFormat) -> PathBuf {
        PathBuf::from(self.density.label())
            .join(format!("{}.{}", self.output_name(), format.extension()))
    }
}

/// Returns the fifteen fixed export entries, grouped by density bucket.
pub fn icon_specs() -> impl Iterator<Item = IconSpec> {
    DensityBucket::ALL.into_iter().flat_map(|density| {
        IconShape::ALL
            .into_iter()
            .map(move |shape| IconSpec::new(density, shape))
    })
}

// ============================================================================
// RenderedIcon
// ============================================================================

/// A composited icon, `size x size` pixels of straight-alpha RGBA.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedIcon {
    pub shape: IconShape,
    pub data: RgbaImage,
}

impl RenderedIcon {
    pub fn new(shape: IconShape, data: RgbaImage) -> Self {
        Self { shape, data }
    }

    /// Side length in pixels.
    pub fn size(&self) -> u32 {
        self.data.width()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn table_has_fifteen_distinct_entries() {
        let specs: Vec<_> = icon_specs().collect();
        assert_eq!(specs.len(), 15);

        let unique: HashSet<_> = specs.iter().copied().collect();
        assert_eq!(unique.len(), 15);
    }

    #[test]
    fn bucket_sizes_and_labels() {
        let pairs: Vec<_> = DensityBucket::ALL
            .iter()
            .map(|b| (b.label(), b.size()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("mipmap-xxxhdpi", 192),
                ("mipmap-xxhdpi", 144),
                ("mipmap-xhdpi", 96),
                ("mipmap-hdpi", 72),
                ("mipmap-mdpi", 48),
            ]
        );
    }

    #[test]
    fn shape_names() {
        assert_eq!(IconShape::Square.icon_name(), "ic_launcher_foreground");
        assert_eq!(IconShape::Circle.icon_name(), "ic_launcher_round");
        assert_eq!(IconShape::Rounded.icon_name(), "ic_launcher");
    }

    #[test]
    fn relative_path_layout() {
        let spec = IconSpec::new(DensityBucket::Hdpi, IconShape::Circle);
        assert_eq!(spec.output_size(), 72);
        assert_eq!(
            spec.relative_path(ExportFormat::Webp),
            PathBuf::from("mipmap-hdpi").join("ic_launcher_round.webp")
        );
    }

    #[test]
    fn shape_serializes_lowercase() {
        let json = serde_json::to_string(&IconShape::Rounded).unwrap();
        assert_eq!(json, "\"rounded\"");
    }
}
