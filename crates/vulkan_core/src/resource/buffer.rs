//! GPU buffer with its backing memory as one releasable unit
//!
//! A buffer object and its memory allocation must be freed together and in
//! order; binding them into one struct keeps call sites from forgetting
//! either half. The creation descriptor is retained only for buffers that
//! must be recreated later (per-frame uniform buffers after a resize) and is
//! cleared before the native release calls, so a half-destroyed buffer can
//! never be queried for its description.

use ash::vk;

use crate::backend::{DeviceBackend, VulkanError, VulkanResult};
use crate::resource::handle::{HandleKind, RawHandle};

/// Creation parameters retained for recreatable buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferSpec {
    /// Buffer size in bytes
    pub size: vk::DeviceSize,
    /// Usage flags the buffer was created with
    pub usage: vk::BufferUsageFlags,
    /// Memory properties requested for the backing allocation
    pub properties: vk::MemoryPropertyFlags,
}

impl BufferSpec {
    /// Spec for a host-visible uniform buffer of the given size
    pub fn uniform(size: vk::DeviceSize) -> Self {
        Self {
            size,
            usage: vk::BufferUsageFlags::UNIFORM_BUFFER,
            properties: vk::MemoryPropertyFlags::HOST_VISIBLE
                | vk::MemoryPropertyFlags::HOST_COHERENT,
        }
    }
}

/// Buffer object plus backing memory, released together
#[derive(Debug)]
pub struct Buffer {
    storage: RawHandle,
    memory: RawHandle,
    spec: Option<BufferSpec>,
}

impl Buffer {
    /// Create an unbound buffer with no native objects behind it
    pub fn new() -> Self {
        Self {
            storage: RawHandle::new(HandleKind::Buffer),
            memory: RawHandle::new(HandleKind::DeviceMemory),
            spec: None,
        }
    }

    /// Create the native buffer and its memory through the backend
    pub fn create(backend: &dyn DeviceBackend, spec: BufferSpec) -> VulkanResult<Self> {
        let (storage, memory) = backend.create_buffer(&spec)?;
        Ok(Self::from_raw(storage, memory, Some(spec)))
    }

    /// Wrap already-created native handles
    pub fn from_raw(storage: u64, memory: u64, spec: Option<BufferSpec>) -> Self {
        let mut buffer = Self::new();
        buffer.storage.set(storage);
        buffer.memory.set(memory);
        buffer.spec = spec;
        buffer
    }

    /// Get the buffer object handle
    pub fn storage(&self) -> u64 {
        self.storage.get()
    }

    /// Get the backing memory handle
    pub fn memory(&self) -> u64 {
        self.memory.get()
    }

    /// Get the retained creation parameters.
    ///
    /// Fails for a buffer that was never given a spec or has been released.
    pub fn spec(&self) -> VulkanResult<&BufferSpec> {
        self.spec.as_ref().ok_or(VulkanError::UnboundResource {
            name: "buffer creation parameters",
        })
    }

    /// Write `data` into the buffer's mapped memory
    pub fn write(&self, backend: &dyn DeviceBackend, data: &[u8]) -> VulkanResult<()> {
        backend.write_buffer(self.memory.try_get()?, data)
    }

    /// Whether both sub-handles are null
    pub fn is_released(&self) -> bool {
        self.storage.is_null() && self.memory.is_null()
    }

    /// Destroy the buffer, then free its memory.
    ///
    /// The spec is dropped before the native calls. Subsequent calls observe
    /// all-null handles and perform no native calls.
    pub fn release(&mut self, backend: &dyn DeviceBackend) {
        self.spec = None;
        self.storage.release(backend);
        self.memory.release(backend);
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}
