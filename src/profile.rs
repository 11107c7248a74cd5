//! Serializable icon settings for saving and cross-process communication.
//!
//! An [`IconProfile`] captures everything a user can tweak in one session in
//! a JSON-friendly form.
//!
//! # Example
//!
//! ```
//! use launcher_icons::{ExportFormat, IconProfile};
//!
//! let profile = IconProfile::new()
//!     .with_padding(12)
//!     .with_background_hex("#3ddc84")
//!     .unwrap()
//!     .with_format(ExportFormat::Webp);
//!
//! let json = profile.to_json().unwrap();
//! let restored = IconProfile::from_json(&json).unwrap();
//! assert_eq!(restored.padding, 12);
//! ```

use palette::Srgb;
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_BACKGROUND, RenderConfig};
use crate::export::ExportFormat;

/// A serializable snapshot of the user's icon settings.
///
/// # JSON Format
///
/// ```json
/// {
///   "padding": 12,
///   "backgroundColor": "#3ddc84",
///   "transparent": false,
///   "format": "webp"
/// }
/// ```
///
/// Every field is optional when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct IconProfile {
    /// Inset in pixels, clamped to `-20..=40` when applied.
    pub padding: i32,

    /// Background as `#rrggbb`.
    #[serde(with = "hex_color")]
    #[cfg_attr(feature = "jsonschema", schemars(with = "String"))]
    pub background_color: Srgb<u8>,

    /// Skip the background fill.
    pub transparent: bool,

    /// Export file format.
    pub format: ExportFormat,
}

impl Default for IconProfile {
    fn default() -> Self {
        Self {
            padding: 0,
            background_color: DEFAULT_BACKGROUND,
            transparent: false,
            format: ExportFormat::default(),
        }
    }
}

impl IconProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Captures the settings of a render config plus an export format.
    pub fn from_config(config: &RenderConfig, format: ExportFormat) -> Self {
        Self {
            padding: config.padding,
            background_color: config.background_color,
            transparent: config.transparent,
            format,
        }
    }

    /// The render config described by this profile, padding clamped.
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig::new(self.padding, self.background_color, self.transparent)
    }

    pub fn with_padding(mut self, padding: i32) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_background(mut self, color: Srgb<u8>) -> Self {
        self.background_color = color;
        self
    }

    /// Sets the background from a hex string such as `#ff8800` or `f80`.
    pub fn with_background_hex(mut self, hex: &str) -> Result<Self, palette::rgb::FromHexError> {
        self.background_color = hex.parse()?;
        Ok(self)
    }

    pub fn with_transparent(mut self, transparent: bool) -> Self {
        self.transparent = transparent;
        self
    }

    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.format = format;
        self
    }

    /// Serializes the profile to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the profile to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a profile from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Formats a color as lowercase `#rrggbb`.
pub fn to_hex(color: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

mod hex_color {
    use palette::Srgb;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(color: &Srgb<u8>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::to_hex(*color))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Srgb<u8>, D::Error> {
        let hex = String::deserialize(deserializer)?;
        hex.trim()
            .parse()
            .map_err(|e| de::Error::custom(format!("invalid color {hex:?}: {e}")))
    }
}

// ============================================================================
// Tests
// ============================================================================
