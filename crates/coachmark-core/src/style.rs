#![forbid(unsafe_code)]

//! Overlay style parameters.
//!
//! [`StyleConfig`] is supplied by the caller and stays read-only for the
//! lifetime of a presentation. Every field has a default, so a partial
//! TOML or JSON document is enough to override a handful of values.
//!
//! ```toml
//! corner_radius = 12.0
//! padding = 32.0
//! text_color = "#FFFFFFFF"
//!
//! [insets]
//! top = -4.0
//! bottom = -4.0
//! ```
//!
//! ```rust,ignore
//! let style = StyleConfig::from_toml_file("coachmark.toml")?;
//! ```

#[cfg(feature = "style-config")]
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
#[cfg(feature = "style-config")]
use thiserror::Error;

use crate::color::Rgba;
use crate::font::FontSpec;
use crate::geometry::Sides;
use crate::guide::ImageHandle;

/// Visual parameters for the overlay and the layout pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Requested cutout corner radius (capped to half the cutout's short side).
    pub corner_radius: f64,
    /// Opacity of the black backdrop, in `[0, 1]`.
    pub background_alpha: f64,
    /// Gap between cutout and arrow, and between arrow and text.
    pub spacing: f64,
    /// Horizontal screen padding the text block must stay within.
    pub padding: f64,
    /// Insets applied to the target rect before it becomes the cutout.
    pub insets: Sides,
    pub font: FontSpec,
    pub text_color: Rgba,
    pub arrow_color: Rgba,
    /// Arrow used when an item carries none. Not serialized.
    #[serde(skip)]
    pub default_arrow_image: Option<ImageHandle>,
    /// Duration of every transition, in seconds.
    pub animation_duration: f64,
    pub animate_mask: bool,
    pub animate_text: bool,
    pub animate_arrow: bool,
    pub status_bar_hidden: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            corner_radius: 8.0,
            background_alpha: 0.7,
            spacing: 20.0,
            padding: 50.0,
            insets: Sides::ZERO,
            font: FontSpec::default(),
            text_color: Rgba::WHITE,
            arrow_color: Rgba::WHITE,
            default_arrow_image: None,
            animation_duration: 0.2,
            animate_mask: true,
            animate_text: true,
            animate_arrow: true,
            status_bar_hidden: false,
        }
    }
}

impl StyleConfig {
    /// Set the cutout corner radius.
    #[must_use]
    pub fn corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius;
        self
    }

    /// Set the backdrop opacity.
    #[must_use]
    pub fn background_alpha(mut self, alpha: f64) -> Self {
        self.background_alpha = alpha;
        self
    }

    #[must_use]
    pub fn spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    #[must_use]
    pub fn padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Set the cutout insets. Negative values grow the cutout.
    #[must_use]
    pub fn insets(mut self, insets: impl Into<Sides>) -> Self {
        self.insets = insets.into();
        self
    }

    #[must_use]
    pub fn font(mut self, font: FontSpec) -> Self {
        self.font = font;
        self
    }

    #[must_use]
    pub fn text_color(mut self, color: Rgba) -> Self {
        self.text_color = color;
        self
    }

    #[must_use]
    pub fn arrow_color(mut self, color: Rgba) -> Self {
        self.arrow_color = color;
        self
    }

    #[must_use]
    pub fn default_arrow_image(mut self, image: ImageHandle) -> Self {
        self.default_arrow_image = Some(image);
        self
    }

    #[must_use]
    pub fn animation_duration(mut self, seconds: f64) -> Self {
        self.animation_duration = seconds;
        self
    }

    /// Toggle mask, text, and arrow animation together.
    #[must_use]
    pub fn animated(mut self, animated: bool) -> Self {
        self.animate_mask = animated;
        self.animate_text = animated;
        self.animate_arrow = animated;
        self
    }

    #[must_use]
    pub fn status_bar_hidden(mut self, hidden: bool) -> Self {
        self.status_bar_hidden = hidden;
        self
    }

    /// Backdrop color: black at `background_alpha`.
    #[must_use]
    pub fn backdrop_color(&self) -> Rgba {
        Rgba::BLACK.with_alpha(self.background_alpha)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !(self.corner_radius >= 0.0) {
            errors.push(format!(
                "corner_radius must be >= 0, got {}",
                self.corner_radius
            ));
        }

        if !(0.0..=1.0).contains(&self.background_alpha) {
            errors.push(format!(
                "background_alpha must be in [0, 1], got {}",
                self.background_alpha
            ));
        }

        if !(self.spacing >= 0.0) {
            errors.push(format!("spacing must be >= 0, got {}", self.spacing));
        }

        if !(self.padding >= 0.0) {
            errors.push(format!("padding must be >= 0, got {}", self.padding));
        }

        let insets = [
            self.insets.top,
            self.insets.right,
            self.insets.bottom,
            self.insets.left,
        ];
        if insets.iter().any(|v| !v.is_finite()) {
            errors.push("insets must be finite".into());
        }

        if !(self.font.size > 0.0) {
            errors.push(format!("font.size must be > 0, got {}", self.font.size));
        }

        if Duration::try_from_secs_f64(self.animation_duration).is_err() {
            errors.push(format!(
                "animation_duration must be a representable duration >= 0, got {}",
                self.animation_duration
            ));
        }

        errors
    }

    /// Load from a TOML string.
    #[cfg(feature = "style-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, StyleConfigError> {
        let config: Self = toml::from_str(s).map_err(StyleConfigError::Toml)?;
        config.checked()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "style-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, StyleConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "style-config")]
    pub fn from_json_str(s: &str) -> Result<Self, StyleConfigError> {
        let config: Self = serde_json::from_str(s).map_err(StyleConfigError::Json)?;
        config.checked()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "style-config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, StyleConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    #[cfg(feature = "style-config")]
    fn checked(self) -> Result<Self, StyleConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(StyleConfigError::Validation(errors))
        }
    }
}

/// Failure to load a [`StyleConfig`].
#[cfg(feature = "style-config")]
#[derive(Debug, Error)]
pub enum StyleConfigError {
    /// I/O error reading a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parse error.
    #[error("TOML parse error: {0}")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[error("JSON parse error: {0}")]
    Json(serde_json::Error),
    /// Validation errors.
    #[error("invalid style config: {}", .0.join("; "))]
    Validation(Vec<String>),
}
