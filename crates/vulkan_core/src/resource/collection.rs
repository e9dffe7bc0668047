//! Ordered sequence of same-kind handles
//!
//! Swapchain images, image views and framebuffers come in index-correlated
//! arrays (framebuffer `i` renders into image view `i`), so release order is
//! insertion order and the sequence is never partially released.

use crate::backend::{DeviceBackend, VulkanError, VulkanResult};
use crate::resource::handle::{HandleKind, RawHandle};

/// Ordered collection of handles released element-wise
#[derive(Debug)]
pub struct HandleList {
    kind: HandleKind,
    items: Vec<RawHandle>,
}

impl HandleList {
    /// Create an empty collection of the given kind
    pub fn new(kind: HandleKind) -> Self {
        Self {
            kind,
            items: Vec::new(),
        }
    }

    /// Get the kind of object this collection holds
    pub fn kind(&self) -> HandleKind {
        self.kind
    }

    /// Replace the contents without releasing the previous handles
    pub fn set_raw(&mut self, values: impl IntoIterator<Item = u64>) {
        self.items = values
            .into_iter()
            .map(|value| {
                let mut handle = RawHandle::new(self.kind);
                handle.set(value);
                handle
            })
            .collect();
    }

    /// Append one handle value
    pub fn push(&mut self, value: u64) {
        let mut handle = RawHandle::new(self.kind);
        handle.set(value);
        self.items.push(handle);
    }

    /// Get the value at `index`, failing on an out-of-range index
    pub fn get(&self, index: usize) -> VulkanResult<u64> {
        self.items
            .get(index)
            .map(RawHandle::get)
            .ok_or(VulkanError::IndexOutOfRange {
                index: index as i64,
                limit: self.items.len().saturating_sub(1),
            })
    }

    /// Number of handles in the collection
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the raw handle values in insertion order
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.items.iter().map(RawHandle::get)
    }

    /// Release every element in insertion order, then empty the collection.
    ///
    /// Null elements are skipped silently; the sequence is never partially
    /// released. A second call observes an empty collection and does nothing.
    pub fn release(&mut self, backend: &dyn DeviceBackend) {
        for handle in &mut self.items {
            handle.release(backend);
        }
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::recording::{Op, RecordingBackend};

    #[test]
    fn release_follows_insertion_order() {
        let backend = RecordingBackend::new();
        let mut framebuffers = HandleList::new(HandleKind::Framebuffer);
        framebuffers.set_raw([30, 10, 20]);

        framebuffers.release(&backend);

        assert_eq!(
            backend.calls(),
            vec![
                Op::DestroyFramebuffer(30),
                Op::DestroyFramebuffer(10),
                Op::DestroyFramebuffer(20),
            ]
        );
        assert!(framebuffers.is_empty());
    }

    #[test]
    fn null_elements_are_skipped() {
        let backend = RecordingBackend::new();
        let mut views = HandleList::new(HandleKind::ImageView);
        views.set_raw([1, 0, 3]);

        views.release(&backend);

        assert_eq!(
            backend.calls(),
            vec![Op::DestroyImageView(1), Op::DestroyImageView(3)]
        );
    }

    #[test]
    fn double_release_is_a_no_op() {
        let backend = RecordingBackend::new();
        let mut views = HandleList::new(HandleKind::ImageView);
        views.set_raw([5]);

        views.release(&backend);
        views.release(&backend);

        assert_eq!(backend.calls(), vec![Op::DestroyImageView(5)]);
    }

    #[test]
    fn get_checks_bounds() {
        let mut images = HandleList::new(HandleKind::SwapchainImage);
        images.set_raw([11, 12]);

        assert_eq!(images.get(1).unwrap(), 12);
        assert!(matches!(
            images.get(2),
            Err(crate::backend::VulkanError::IndexOutOfRange { index: 2, .. })
        ));
    }

    #[test]
    fn push_appends_in_order() {
        let mut views = HandleList::new(HandleKind::ImageView);
        views.push(1);
        views.push(2);

        assert_eq!(views.len(), 2);
        assert_eq!(views.iter().collect::<Vec<_>>(), vec![1, 2]);
    }
}
