#![forbid(unsafe_code)]

//! Test harness and reference fixtures for coachmark.
//!
//! [`TestBackend`] is an in-memory [`OverlayBackend`] built from a
//! [`RecordingHost`], a [`RecordingRenderer`], a [`MapResolver`], and any
//! [`TextMeasurer`]. Tests drive a controller against it and then inspect
//! what the host and renderer were asked to do.

pub mod recording;

use std::collections::BTreeMap;

use coachmark_backend::OverlayBackend;
use coachmark_core::font::FontSpec;
use coachmark_core::geometry::{Rect, Size};
use coachmark_core::guide::ViewId;
use coachmark_layout::{TextMeasurer, ViewResolver};
use thiserror::Error;

pub use recording::{FrameSnapshot, HostCall, RecordingHost, RecordingRenderer};

/// Reference screen used across the test suites.
pub const PHONE_SCREEN: Rect = Rect::from_size(375.0, 667.0);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HarnessError {
    #[error("injected {op} failure")]
    Injected { op: &'static str },
}

/// Measurer that reports the same size for every string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedMeasurer(pub Size);

impl TextMeasurer for FixedMeasurer {
    fn measure(&self, _text: &str, _font: &FontSpec, _max_width: f64) -> Size {
        self.0
    }
}

/// View registry backed by a map. Unknown views fail to resolve.
#[derive(Debug, Clone, Default)]
pub struct MapResolver {
    frames: BTreeMap<ViewId, Rect>,
}

impl MapResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, view: ViewId, frame: Rect) -> Self {
        self.insert(view, frame);
        self
    }

    pub fn insert(&mut self, view: ViewId, frame: Rect) {
        self.frames.insert(view, frame);
    }

    /// Detach `view`, as if it left the hierarchy.
    pub fn remove(&mut self, view: ViewId) {
        self.frames.remove(&view);
    }
}

impl ViewResolver for MapResolver {
    fn resolve(&self, view: ViewId) -> Option<Rect> {
        self.frames.get(&view).copied()
    }
}

/// In-memory backend for driving a controller in tests.
pub struct TestBackend {
    host: RecordingHost,
    renderer: RecordingRenderer,
    resolver: MapResolver,
    measurer: Box<dyn TextMeasurer>,
}

impl TestBackend {
    /// Backend whose measurer always reports `text_size`.
    #[must_use]
    pub fn new(text_size: Size) -> Self {
        Self::with_measurer(FixedMeasurer(text_size))
    }

    #[must_use]
    pub fn with_measurer(measurer: impl TextMeasurer + 'static) -> Self {
        Self {
            host: RecordingHost::new(),
            renderer: RecordingRenderer::new(),
            resolver: MapResolver::new(),
            measurer: Box::new(measurer),
        }
    }

    #[must_use]
    pub fn with_view(mut self, view: ViewId, frame: Rect) -> Self {
        self.resolver.insert(view, frame);
        self
    }

    #[must_use]
    pub fn recorded_host(&self) -> &RecordingHost {
        &self.host
    }

    #[must_use]
    pub fn recorded_renderer(&self) -> &RecordingRenderer {
        &self.renderer
    }

    pub fn resolver_mut(&mut self) -> &mut MapResolver {
        &mut self.resolver
    }
}

impl core::fmt::Debug for TestBackend {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TestBackend")
            .field("host", &self.host)
            .field("frames", &self.renderer.frames().len())
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}

impl OverlayBackend for TestBackend {
    type Error = HarnessError;
    type Host = RecordingHost;
    type Renderer = RecordingRenderer;

    fn host(&mut self) -> &mut Self::Host {
        &mut self.host
    }

    fn renderer(&mut self) -> &mut Self::Renderer {
        &mut self.renderer
    }

    fn resolver(&self) -> &dyn ViewResolver {
        &self.resolver
    }

    fn measurer(&self) -> &dyn TextMeasurer {
        self.measurer.as_ref()
    }
}
