//! Interactive session: the loaded image, the user's settings, live previews
//! and the export entry point.

use std::sync::atomic::{AtomicBool, Ordering};

use palette::Srgb;

use crate::compositor;
use crate::config::RenderConfig;
use crate::error::{DecodeError, ExportError, Result};
use crate::export::{export_icons, ExportFormat, ExportReport, IconSink};
use crate::icon::{DensityBucket, IconShape, RenderedIcon};
use crate::profile::IconProfile;
use crate::source::SourceImage;

// ============================================================================
// Configurable Trait
// ============================================================================

/// Trait for types that can be configured from an [`IconProfile`].
pub trait Configurable {
    /// Applies a profile's settings to this instance.
    fn apply_profile(&mut self, profile: &IconProfile);

    /// Exports the current settings as a profile.
    fn export_profile(&self) -> IconProfile;
}

// ============================================================================
// IconSession
// ============================================================================

/// One user's icon-generation session.
///
/// Holds at most one [`SourceImage`] and the current [`RenderConfig`]. Every
/// setter that changes something re-renders the three preview shapes at the
/// [`DensityBucket::PREVIEW`] size, so [`previews`](Self::previews) always
/// reflects the current inputs.
///
/// # Example
///
/// ```
/// use launcher_icons::{IconSession, IconShape, MemorySink};
/// use image::{Rgba, RgbaImage};
///
/// let mut session = IconSession::new();
/// let logo = RgbaImage::from_pixel(64, 32, Rgba([255, 0, 0, 255]));
/// session.set_image(launcher_icons::SourceImage::from_rgba(logo).unwrap());
///
/// session.set_padding(12);
/// assert_eq!(session.preview(IconShape::Circle).unwrap().size(), 192);
///
/// let mut sink = MemorySink::new();
/// let report = session.export(&mut sink).unwrap();
/// assert!(report.is_complete());
/// ```
#[derive(Debug, Default)]
pub struct IconSession {
    source: Option<SourceImage>,
    config: RenderConfig,
    format: ExportFormat,
    previews: Vec<RenderedIcon>,
    exporting: AtomicBool,
}

impl IconSession {
    /// Creates an empty session with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    // ---- Source image ----

    /// Decodes an upload and makes it the session's image.
    ///
    /// On failure the previous image is dropped too, so the session never
    /// shows a stale selection next to a load error.
    pub fn load_image(&mut self, bytes: &[u8]) -> Result<(), DecodeError> {
        match SourceImage::decode(bytes) {
            Ok(source) => {
                log::info!("loaded {}x{} image", source.width(), source.height());
                self.set_image(source);
                Ok(())
            }
            Err(err) => {
                log::warn!("failed to load image: {}", err);
                self.clear_image();
                Err(err)
            }
        }
    }

    /// Replaces the session's image wholesale.
    pub fn set_image(&mut self, source: SourceImage) {
        self.source = Some(source);
        self.refresh_previews();
    }

    /// Drops the image and its previews.
    pub fn clear_image(&mut self) {
        self.source = None;
        self.previews.clear();
    }

    pub fn image(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.source.is_some()
    }

    // ---- Settings ----

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn export_format(&self) -> ExportFormat {
        self.format
    }

    /// Sets the padding (clamped to `-20..=40`). Returns true if it changed.
    pub fn set_padding(&mut self, padding: i32) -> bool {
        let changed = self.config.set_padding(padding);
        self.refresh_if(changed)
    }

    /// Sets the background color. Returns true if it changed.
    pub fn set_background_color(&mut self, color: Srgb<u8>) -> bool {
        let changed = self.config.set_background_color(color);
        self.refresh_if(changed)
    }

    /// Toggles the transparent background. Returns true if it changed.
    pub fn set_transparent(&mut self, transparent: bool) -> bool {
        let changed = self.config.set_transparent(transparent);
        self.refresh_if(changed)
    }

    /// Selects the export format. Previews are unaffected.
    pub fn set_export_format(&mut self, format: ExportFormat) -> bool {
        let changed = self.format != format;
        self.format = format;
        changed
    }

    // ---- Previews ----

    /// The current preview renders, one per shape, or empty without an image.
    pub fn previews(&self) -> &[RenderedIcon] {
        &self.previews
    }

    pub fn preview(&self, shape: IconShape) -> Option<&RenderedIcon> {
        self.previews.iter().find(|icon| icon.shape == shape)
    }

    fn refresh_if(&mut self, changed: bool) -> bool {
        if changed {
            self.refresh_previews();
        }
        changed
    }

    fn refresh_previews(&mut self) {
        self.previews.clear();
        let Some(source) = &self.source else {
            return;
        };

        let size = DensityBucket::PREVIEW.size();
        for shape in IconShape::ALL {
            match compositor::render(source, size, &self.config.with_shape(shape)) {
                Ok(icon) => self.previews.push(icon),
                Err(err) => log::error!("failed to render {:?} preview: {}", shape, err),
            }
        }
    }

    // ---- Export ----

    /// Returns true while an export is running.
    pub fn is_exporting(&self) -> bool {
        self.exporting.load(Ordering::Acquire)
    }

    /// Renders and emits all fifteen icons with the current settings.
    ///
    /// Fails with [`ExportError::NoImage`] when nothing is loaded and with
    /// [`ExportError::InFlight`] when another export on this session has not
    /// finished. Per-file failures are reported in the [`ExportReport`].
    pub fn export(&self, sink: &mut dyn IconSink) -> Result<ExportReport, ExportError> {
        let Some(source) = &self.source else {
            log::warn!("export requested with no image loaded");
            return Err(ExportError::NoImage);
        };
        let _guard = ExportGuard::acquire(&self.exporting)?;
        Ok(export_icons(source, &self.config, self.format, sink))
    }
}

impl IconSession {
    /// Applies settings from a JSON profile.
    pub fn import_profile_json(&mut self, json: &str) -> Result<()> {
        let profile = IconProfile::from_json(json)?;
        self.apply_profile(&profile);
        Ok(())
    }

    /// Exports the current settings as a JSON string.
    pub fn export_profile_json(&self) -> Result<String> {
        Ok(self.export_profile().to_json()?)
    }
}

/// Decodes `bytes` and exports the full icon set with `profile` in one call.
pub fn generate_icons(
    bytes: &[u8],
    profile: &IconProfile,
    sink: &mut dyn IconSink,
) -> Result<ExportReport> {
    let mut session = IconSession::new();
    session.apply_profile(profile);
    session.load_image(bytes)?;
    Ok(session.export(sink)?)
}

impl Configurable for IconSession {
    /// Applies a profile's settings, re-rendering previews at most once.
    fn apply_profile(&mut self, profile: &IconProfile) {
        let incoming = profile.render_config();
        let changed = self.config.set_padding(incoming.padding)
            | self.config.set_background_color(incoming.background_color)
            | self.config.set_transparent(incoming.transparent);
        self.format = profile.format;
        self.refresh_if(changed);
    }

    fn export_profile(&self) -> IconProfile {
        IconProfile::from_config(&self.config, self.format)
    }
}

// ============================================================================
// ExportGuard
// ============================================================================

/// Marks an export as running for as long as it is alive.
struct ExportGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> ExportGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, ExportError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ExportError::InFlight)?;
        Ok(Self { flag })
    }
}

impl Drop for ExportGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

// ============================================================================
// Tests
// ============================================================================
