#![forbid(unsafe_code)]

//! Font descriptor handed to text measurement and the renderer.

use serde::{Deserialize, Serialize};

/// Family name used when none is configured.
pub const SYSTEM_FAMILY: &str = "system";

/// A font request: family plus point size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSpec {
    pub family: String,
    pub size: f64,
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }

    /// The platform UI font at `size` points.
    pub fn system(size: f64) -> Self {
        Self::new(SYSTEM_FAMILY, size)
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::system(14.0)
    }
}
