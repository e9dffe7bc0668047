//! Sampled texture as one releasable unit
//!
//! A texture aggregates image, backing memory, view and sampler. All four
//! default to null so the struct can be re-populated in place after a resize
//! without reallocating it; release nulls each field individually.

use crate::backend::DeviceBackend;
use crate::resource::handle::{HandleKind, RawHandle};

/// Image, memory, view and sampler released together
#[derive(Debug)]
pub struct Texture {
    /// Image object handle
    pub image: RawHandle,
    /// Backing memory for the image
    pub memory: RawHandle,
    /// Image view over the image
    pub view: RawHandle,
    /// Sampler used to read the texture
    pub sampler: RawHandle,
}

impl Texture {
    /// Create a texture with all handles null
    pub fn new() -> Self {
        Self {
            image: RawHandle::new(HandleKind::Image),
            memory: RawHandle::new(HandleKind::DeviceMemory),
            view: RawHandle::new(HandleKind::ImageView),
            sampler: RawHandle::new(HandleKind::Sampler),
        }
    }

    /// Whether every sub-handle is null
    pub fn is_released(&self) -> bool {
        self.image.is_null()
            && self.memory.is_null()
            && self.view.is_null()
            && self.sampler.is_null()
    }

    /// Destroy the image, free its memory, then destroy sampler and view.
    ///
    /// Each field is nulled individually; already-null fields are skipped, so
    /// repeated release performs no native calls.
    pub fn release(&mut self, backend: &dyn DeviceBackend) {
        self.image.release(backend);
        self.memory.release(backend);
        self.sampler.release(backend);
        self.view.release(backend);
    }
}

impl Default for Texture {
    fn default() -> Self {
        Self::new()
    }
}
