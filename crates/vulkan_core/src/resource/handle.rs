//! Single native handle with kind-specific release
//!
//! A [`RawHandle`] stores one opaque handle value together with the kind of
//! object it names. `set` installs a new value without releasing the old one
//! (replacing a live resource is release-then-set at the call site); `release`
//! issues the kind's native destroy call exactly once and resets the handle
//! to null, so calling it again is a no-op.

use crate::backend::{DeviceBackend, VulkanError, VulkanResult};

/// The closed set of native object kinds tracked by this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleKind {
    /// Vulkan instance
    Instance,
    /// Validation-layer debug messenger
    DebugMessenger,
    /// Window surface
    Surface,
    /// Physical device; freed implicitly with the logical device
    PhysicalDevice,
    /// Logical device
    Device,
    /// Device queue; owned by the logical device
    Queue,
    /// Swapchain
    Swapchain,
    /// Swapchain image; owned by the swapchain
    SwapchainImage,
    /// Image view
    ImageView,
    /// Framebuffer
    Framebuffer,
    /// Render pass
    RenderPass,
    /// Pipeline layout
    PipelineLayout,
    /// Graphics pipeline
    Pipeline,
    /// Command pool
    CommandPool,
    /// Command buffer; freed together with its pool
    CommandBuffer,
    /// Buffer object
    Buffer,
    /// Device memory allocation
    DeviceMemory,
    /// Image object
    Image,
    /// Sampler
    Sampler,
    /// Semaphore
    Semaphore,
    /// Fence
    Fence,
}

impl HandleKind {
    /// Human-readable name used in logs and error values
    pub fn name(self) -> &'static str {
        match self {
            Self::Instance => "instance",
            Self::DebugMessenger => "debug messenger",
            Self::Surface => "surface",
            Self::PhysicalDevice => "physical device",
            Self::Device => "logical device",
            Self::Queue => "queue",
            Self::Swapchain => "swapchain",
            Self::SwapchainImage => "swapchain image",
            Self::ImageView => "image view",
            Self::Framebuffer => "framebuffer",
            Self::RenderPass => "render pass",
            Self::PipelineLayout => "pipeline layout",
            Self::Pipeline => "pipeline",
            Self::CommandPool => "command pool",
            Self::CommandBuffer => "command buffer",
            Self::Buffer => "buffer",
            Self::DeviceMemory => "device memory",
            Self::Image => "image",
            Self::Sampler => "sampler",
            Self::Semaphore => "semaphore",
            Self::Fence => "fence",
        }
    }

    /// Issue the native destroy call for a live handle of this kind.
    ///
    /// Kinds owned by a parent object (queues, swapchain images, command
    /// buffers) issue no call; the physical device only notes that it goes
    /// away with the logical device.
    fn destroy(self, backend: &dyn DeviceBackend, value: u64) {
        match self {
            Self::Instance => backend.destroy_instance(),
            Self::DebugMessenger => backend.destroy_debug_messenger(value),
            Self::Surface => backend.destroy_surface(value),
            Self::PhysicalDevice => {
                log::debug!("physical device is freed together with the logical device");
            }
            Self::Device => backend.destroy_device(),
            Self::Queue | Self::SwapchainImage | Self::CommandBuffer => {}
            Self::Swapchain => backend.destroy_swapchain(value),
            Self::ImageView => backend.destroy_image_view(value),
            Self::Framebuffer => backend.destroy_framebuffer(value),
            Self::RenderPass => backend.destroy_render_pass(value),
            Self::PipelineLayout => backend.destroy_pipeline_layout(value),
            Self::Pipeline => backend.destroy_pipeline(value),
            Self::CommandPool => backend.destroy_command_pool(value),
            Self::Buffer => backend.destroy_buffer(value),
            Self::DeviceMemory => backend.free_memory(value),
            Self::Image => backend.destroy_image(value),
            Self::Sampler => backend.destroy_sampler(value),
            Self::Semaphore => backend.destroy_semaphore(value),
            Self::Fence => backend.destroy_fence(value),
        }
    }
}

/// The null handle value
pub const NULL_HANDLE: u64 = 0;

/// One native handle with its release state
#[derive(Debug)]
pub struct RawHandle {
    kind: HandleKind,
    value: u64,
    released: bool,
}

impl RawHandle {
    /// Create an unset handle of the given kind
    pub fn new(kind: HandleKind) -> Self {
        Self {
            kind,
            value: NULL_HANDLE,
            released: false,
        }
    }

    /// Get the kind of object this handle names
    pub fn kind(&self) -> HandleKind {
        self.kind
    }

    /// Store a new value without releasing the previous one
    pub fn set(&mut self, value: u64) {
        self.value = value;
        self.released = false;
    }

    /// Get the current value; null if unset or released
    pub fn get(&self) -> u64 {
        self.value
    }

    /// Get the current value, failing if the handle was never bound
    pub fn try_get(&self) -> VulkanResult<u64> {
        if self.value == NULL_HANDLE {
            Err(VulkanError::UnboundResource {
                name: self.kind.name(),
            })
        } else {
            Ok(self.value)
        }
    }

    /// Whether the handle currently holds the null value
    pub fn is_null(&self) -> bool {
        self.value == NULL_HANDLE
    }

    /// Whether the handle has been released
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Reset to null without a native call.
    ///
    /// For handles whose object is already gone, e.g. a debug messenger
    /// whose destroy entry point is not resolvable.
    pub fn clear(&mut self) {
        self.value = NULL_HANDLE;
        self.released = true;
    }

    /// Destroy the native object and reset the handle to null.
    ///
    /// A null or already-released handle is skipped silently; release is
    /// idempotent and never issues a second native call.
    pub fn release(&mut self, backend: &dyn DeviceBackend) {
        if self.released || self.value == NULL_HANDLE {
            self.released = true;
            return;
        }
        self.kind.destroy(backend, self.value);
        self.value = NULL_HANDLE;
        self.released = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::recording::{Op, RecordingBackend};

    #[test]
    fn release_resets_to_null() {
        let backend = RecordingBackend::new();
        let mut handle = RawHandle::new(HandleKind::Semaphore);
        handle.set(42);

        handle.release(&backend);

        assert!(handle.is_null());
        assert!(handle.is_released());
        assert_eq!(backend.calls(), vec![Op::DestroySemaphore(42)]);
    }

    #[test]
    fn double_release_is_a_no_op() {
        let backend = RecordingBackend::new();
        let mut handle = RawHandle::new(HandleKind::Fence);
        handle.set(7);

        handle.release(&backend);
        handle.release(&backend);

        assert_eq!(backend.calls(), vec![Op::DestroyFence(7)]);
    }

    #[test]
    fn releasing_an_unset_handle_issues_no_call() {
        let backend = RecordingBackend::new();
        let mut handle = RawHandle::new(HandleKind::Pipeline);

        handle.release(&backend);

        assert!(backend.calls().is_empty());
        assert!(handle.is_released());
    }

    #[test]
    fn set_overwrites_without_releasing() {
        let backend = RecordingBackend::new();
        let mut handle = RawHandle::new(HandleKind::ImageView);
        handle.set(1);
        handle.set(2);

        assert_eq!(handle.get(), 2);
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn try_get_fails_before_set() {
        let handle = RawHandle::new(HandleKind::Device);

        match handle.try_get() {
            Err(crate::backend::VulkanError::UnboundResource { name }) => {
                assert_eq!(name, "logical device");
            }
            other => panic!("expected UnboundResource, got {other:?}"),
        }
    }

    #[test]
    fn released_handle_can_be_rebound() {
        let backend = RecordingBackend::new();
        let mut handle = RawHandle::new(HandleKind::Sampler);
        handle.set(9);
        handle.release(&backend);

        handle.set(10);

        assert!(!handle.is_released());
        assert_eq!(handle.try_get().unwrap(), 10);
    }
}
