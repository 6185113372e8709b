#![forbid(unsafe_code)]

//! Guide items and the ordered sequence a controller walks through.
//!
//! # Invariants
//!
//! 1. A [`GuideSequence`] is never empty; construction rejects zero items.
//! 2. `current_index` is always in `[0, len - 1]`.
//! 3. The index only moves forward, one step at a time.

use std::sync::Arc;

use thiserror::Error;

use crate::geometry::{Rect, Size};

/// Opaque reference to a view in the host's hierarchy.
///
/// Resolved to a screen rect at layout time by a `ViewResolver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub u64);

/// What an item highlights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TargetRegion {
    /// A live view, resolved on every layout pass.
    View(ViewId),
    /// A fixed rectangle in screen coordinates.
    Rect(Rect),
}

impl From<ViewId> for TargetRegion {
    fn from(view: ViewId) -> Self {
        Self::View(view)
    }
}

impl From<Rect> for TargetRegion {
    fn from(rect: Rect) -> Self {
        Self::Rect(rect)
    }
}

/// A decoded image with its intrinsic size in points.
///
/// `pixels` holds straight RGBA8 rows when the image was decoded locally;
/// hosts that manage their own textures can leave it empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageHandle {
    name: Arc<str>,
    size: Size,
    pixels: Option<Arc<[u8]>>,
}

impl ImageHandle {
    /// A host-managed image known only by name and size.
    pub fn new(name: impl AsRef<str>, size: Size) -> Self {
        Self {
            name: Arc::from(name.as_ref()),
            size,
            pixels: None,
        }
    }

    /// An image with decoded RGBA8 pixels.
    pub fn with_pixels(name: impl AsRef<str>, size: Size, rgba: Vec<u8>) -> Self {
        Self {
            name: Arc::from(name.as_ref()),
            size,
            pixels: Some(Arc::from(rgba)),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    #[must_use]
    pub fn pixels(&self) -> Option<&[u8]> {
        self.pixels.as_deref()
    }
}

/// One highlight: a target, an optional arrow override, and the caption.
#[derive(Debug, Clone, PartialEq)]
pub struct GuideItem {
    target: TargetRegion,
    arrow_image: Option<ImageHandle>,
    text: String,
}

impl GuideItem {
    pub fn new(target: impl Into<TargetRegion>, text: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            arrow_image: None,
            text: text.into(),
        }
    }

    /// Highlight a view in the host hierarchy.
    pub fn view(view: ViewId, text: impl Into<String>) -> Self {
        Self::new(view, text)
    }

    /// Highlight a fixed screen rect.
    pub fn rect(rect: Rect, text: impl Into<String>) -> Self {
        Self::new(rect, text)
    }

    /// Use `image` instead of the configured arrow for this item.
    #[must_use]
    pub fn arrow_image(mut self, image: ImageHandle) -> Self {
        self.arrow_image = Some(image);
        self
    }

    #[must_use]
    pub fn target(&self) -> TargetRegion {
        self.target
    }

    #[must_use]
    pub fn arrow(&self) -> Option<&ImageHandle> {
        self.arrow_image.as_ref()
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Sequence construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    #[error("guide sequence must contain at least one item")]
    Empty,
}

/// Ordered, non-empty list of guide items plus the cursor into it.
#[derive(Debug, Clone, PartialEq)]
pub struct GuideSequence {
    items: Vec<GuideItem>,
    current_index: usize,
    key: Option<String>,
}

impl GuideSequence {
    /// Build a sequence. `key` enables the show-once gate.
    pub fn new(items: Vec<GuideItem>, key: Option<String>) -> Result<Self, SequenceError> {
        if items.is_empty() {
            return Err(SequenceError::Empty);
        }
        Ok(Self {
            items,
            current_index: 0,
            key,
        })
    }

    /// A one-item sequence.
    pub fn single(item: GuideItem, key: Option<String>) -> Self {
        Self {
            items: vec![item],
            current_index: 0,
            key,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// A constructed sequence always holds at least one item.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn items(&self) -> &[GuideItem] {
        &self.items
    }

    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn current_item(&self) -> &GuideItem {
        &self.items[self.current_index]
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&GuideItem> {
        self.items.get(index)
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current_index + 1 >= self.items.len()
    }

    /// Index the next advance would move to, if any.
    #[must_use]
    pub fn next_index(&self) -> Option<usize> {
        (!self.is_last()).then_some(self.current_index + 1)
    }

    /// Step forward. Returns the new index, or `None` at the last item.
    pub fn advance(&mut self) -> Option<usize> {
        let next = self.next_index()?;
        self.current_index = next;
        Some(next)
    }

    /// Rewind to the first item.
    pub fn rewind(&mut self) {
        self.current_index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<GuideItem> {
        (0..n)
            .map(|i| GuideItem::rect(Rect::new(i as f64, 0.0, 10.0, 10.0), format!("step {i}")))
            .collect()
    }

    #[test]
    fn empty_sequence_is_rejected() {
        assert_eq!(
            GuideSequence::new(Vec::new(), None).unwrap_err(),
            SequenceError::Empty
        );
    }

    #[test]
    fn starts_at_zero_and_walks_to_the_end() {
        let mut seq = GuideSequence::new(items(3), Some("tour".into())).unwrap();
        assert_eq!(seq.current_index(), 0);
        assert_eq!(seq.key(), Some("tour"));
        assert_eq!(seq.advance(), Some(1));
        assert_eq!(seq.advance(), Some(2));
        assert!(seq.is_last());
        assert_eq!(seq.advance(), None);
        assert_eq!(seq.current_index(), 2);
        assert_eq!(seq.current_item().text(), "step 2");
    }

    #[test]
    fn rewind_returns_to_first_item() {
        let mut seq = GuideSequence::new(items(2), None).unwrap();
        seq.advance();
        seq.rewind();
        assert_eq!(seq.current_index(), 0);
    }

    #[test]
    fn single_item_sequence_is_already_last() {
        let seq = GuideSequence::single(GuideItem::view(ViewId(7), "only"), None);
        assert_eq!(seq.len(), 1);
        assert!(seq.is_last());
        assert_eq!(seq.next_index(), None);
        assert_eq!(seq.current_item().target(), TargetRegion::View(ViewId(7)));
    }

    #[test]
    fn item_arrow_override() {
        let arrow = ImageHandle::new("custom", Size::new(30.0, 40.0));
        let item = GuideItem::rect(Rect::from_size(1.0, 1.0), "x").arrow_image(arrow.clone());
        assert_eq!(item.arrow(), Some(&arrow));
        assert_eq!(arrow.name(), "custom");
        assert!(arrow.pixels().is_none());
    }
}
