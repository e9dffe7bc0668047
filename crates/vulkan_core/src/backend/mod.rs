//! Backend abstraction for native Vulkan calls
//!
//! Every native create/destroy/wait entry point used by the lifecycle core
//! goes through the [`DeviceBackend`] trait. The live implementation is
//! [`vulkan::VulkanBackend`] over ash; tests substitute a recording stub to
//! verify call ordering. Handles cross this seam as raw `u64` values so the
//! resource layer stays uniform over every object kind.

use ash::vk;
use thiserror::Error;

use crate::resource::buffer::BufferSpec;

pub mod vulkan;

/// Vulkan-specific error types
#[derive(Error, Debug)]
pub enum VulkanError {
    /// Native resource-creation call failed with the given result code
    #[error("device creation call failed: {code:?}")]
    DeviceCreation {
        /// Result code reported by the backend
        code: vk::Result,
    },

    /// Fence wait exceeded its timeout; the device is considered lost
    #[error("GPU fence wait timed out after {timeout_ns} ns")]
    GpuTimeout {
        /// Timeout that expired, in nanoseconds
        timeout_ns: u64,
    },

    /// A resource was read before anything was stored in it
    #[error("resource read before it was bound: {name}")]
    UnboundResource {
        /// Name of the resource kind that was read
        name: &'static str,
    },

    /// Key code or slot index outside the valid range
    #[error("index {index} out of range (limit {limit})")]
    IndexOutOfRange {
        /// The offending index
        index: i64,
        /// Largest valid index
        limit: usize,
    },

    /// General Vulkan API error with result code
    #[error("Vulkan API error: {0:?}")]
    Api(vk::Result),

    /// No suitable memory type found for a buffer allocation
    #[error("no suitable memory type found")]
    NoSuitableMemoryType,
}

/// Result type for Vulkan operations
pub type VulkanResult<T> = Result<T, VulkanError>;

/// Native device operations consumed by the lifecycle core.
///
/// Creation calls fail with [`VulkanError::DeviceCreation`] carrying the
/// native result code. Destroy calls take the raw handle value and return
/// nothing; a null handle never reaches them (the resource layer guards).
pub trait DeviceBackend {
    /// Create a binary semaphore and return its raw handle
    fn create_semaphore(&self) -> VulkanResult<u64>;

    /// Create a fence, optionally in the signaled state
    fn create_fence(&self, signaled: bool) -> VulkanResult<u64>;

    /// Create a buffer with bound memory; returns `(storage, memory)` handles
    fn create_buffer(&self, spec: &BufferSpec) -> VulkanResult<(u64, u64)>;

    /// Write `data` into mapped buffer memory starting at offset zero
    fn write_buffer(&self, memory: u64, data: &[u8]) -> VulkanResult<()>;

    /// Block until the fence signals or the timeout expires.
    ///
    /// A timeout surfaces as [`VulkanError::GpuTimeout`] and is fatal to the
    /// frame loop; any other failure maps to [`VulkanError::Api`].
    fn wait_for_fence(&self, fence: u64, timeout_ns: u64) -> VulkanResult<()>;

    /// Reset a fence to the unsignaled state
    fn reset_fence(&self, fence: u64) -> VulkanResult<()>;

    /// Block until the device has finished all submitted work
    fn device_wait_idle(&self) -> VulkanResult<()>;

    /// Destroy a buffer object
    fn destroy_buffer(&self, handle: u64);
    /// Free a device memory allocation
    fn free_memory(&self, handle: u64);
    /// Destroy an image object
    fn destroy_image(&self, handle: u64);
    /// Destroy an image view
    fn destroy_image_view(&self, handle: u64);
    /// Destroy a sampler
    fn destroy_sampler(&self, handle: u64);
    /// Destroy a semaphore
    fn destroy_semaphore(&self, handle: u64);
    /// Destroy a fence
    fn destroy_fence(&self, handle: u64);
    /// Destroy a framebuffer
    fn destroy_framebuffer(&self, handle: u64);
    /// Destroy a render pass
    fn destroy_render_pass(&self, handle: u64);
    /// Destroy a graphics pipeline
    fn destroy_pipeline(&self, handle: u64);
    /// Destroy a pipeline layout
    fn destroy_pipeline_layout(&self, handle: u64);
    /// Destroy a command pool, freeing its command buffers with it
    fn destroy_command_pool(&self, handle: u64);
    /// Destroy a swapchain, freeing its images with it
    fn destroy_swapchain(&self, handle: u64);
    /// Destroy a window surface
    fn destroy_surface(&self, handle: u64);

    /// Whether the debug messenger destroy entry point is resolvable.
    ///
    /// The messenger is only created when validation is enabled, so teardown
    /// probes for the entry point instead of assuming it exists.
    fn debug_messenger_destroyable(&self) -> bool;
    /// Destroy the debug messenger
    fn destroy_debug_messenger(&self, handle: u64);

    /// Destroy the logical device
    fn destroy_device(&self);
    /// Destroy the instance; the backend is unusable afterwards
    fn destroy_instance(&self);
}

#[cfg(test)]
pub(crate) mod recording {
    //! Stub backend recording every native call in order.

    use std::cell::{Cell, RefCell};

    use super::{DeviceBackend, VulkanError, VulkanResult};
    use crate::resource::buffer::BufferSpec;

    /// One recorded native call.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Op {
        CreateSemaphore(u64),
        CreateFence(u64),
        CreateBuffer(u64, u64),
        WriteBuffer(u64, usize),
        WaitFence(u64),
        ResetFence(u64),
        WaitIdle,
        DestroyBuffer(u64),
        FreeMemory(u64),
        DestroyImage(u64),
        DestroyImageView(u64),
        DestroySampler(u64),
        DestroySemaphore(u64),
        DestroyFence(u64),
        DestroyFramebuffer(u64),
        DestroyRenderPass(u64),
        DestroyPipeline(u64),
        DestroyPipelineLayout(u64),
        DestroyCommandPool(u64),
        DestroySwapchain(u64),
        DestroySurface(u64),
        DestroyDebugMessenger(u64),
        DestroyDevice,
        DestroyInstance,
    }

    pub struct RecordingBackend {
        ops: RefCell<Vec<Op>>,
        next_handle: Cell<u64>,
        pub messenger_resolvable: Cell<bool>,
        pub time_out_fence_waits: Cell<bool>,
    }

    impl RecordingBackend {
        pub fn new() -> Self {
            Self {
                ops: RefCell::new(Vec::new()),
                next_handle: Cell::new(1),
                messenger_resolvable: Cell::new(true),
                time_out_fence_waits: Cell::new(false),
            }
        }

        fn next(&self) -> u64 {
            let value = self.next_handle.get();
            self.next_handle.set(value + 1);
            value
        }

        fn record(&self, op: Op) {
            self.ops.borrow_mut().push(op);
        }

        /// All calls recorded so far, in order.
        pub fn calls(&self) -> Vec<Op> {
            self.ops.borrow().clone()
        }

        /// How many recorded calls match `predicate`.
        pub fn count(&self, predicate: impl Fn(&Op) -> bool) -> usize {
            self.ops.borrow().iter().filter(|op| predicate(op)).count()
        }
    }

    impl DeviceBackend for RecordingBackend {
        fn create_semaphore(&self) -> VulkanResult<u64> {
            let handle = self.next();
            self.record(Op::CreateSemaphore(handle));
            Ok(handle)
        }

        fn create_fence(&self, _signaled: bool) -> VulkanResult<u64> {
            let handle = self.next();
            self.record(Op::CreateFence(handle));
            Ok(handle)
        }

        fn create_buffer(&self, _spec: &BufferSpec) -> VulkanResult<(u64, u64)> {
            let storage = self.next();
            let memory = self.next();
            self.record(Op::CreateBuffer(storage, memory));
            Ok((storage, memory))
        }

        fn write_buffer(&self, memory: u64, data: &[u8]) -> VulkanResult<()> {
            self.record(Op::WriteBuffer(memory, data.len()));
            Ok(())
        }

        fn wait_for_fence(&self, fence: u64, timeout_ns: u64) -> VulkanResult<()> {
            self.record(Op::WaitFence(fence));
            if self.time_out_fence_waits.get() {
                Err(VulkanError::GpuTimeout { timeout_ns })
            } else {
                Ok(())
            }
        }

        fn reset_fence(&self, fence: u64) -> VulkanResult<()> {
            self.record(Op::ResetFence(fence));
            Ok(())
        }

        fn device_wait_idle(&self) -> VulkanResult<()> {
            self.record(Op::WaitIdle);
            Ok(())
        }

        fn destroy_buffer(&self, handle: u64) {
            self.record(Op::DestroyBuffer(handle));
        }

        fn free_memory(&self, handle: u64) {
            self.record(Op::FreeMemory(handle));
        }

        fn destroy_image(&self, handle: u64) {
            self.record(Op::DestroyImage(handle));
        }

        fn destroy_image_view(&self, handle: u64) {
            self.record(Op::DestroyImageView(handle));
        }

        fn destroy_sampler(&self, handle: u64) {
            self.record(Op::DestroySampler(handle));
        }

        fn destroy_semaphore(&self, handle: u64) {
            self.record(Op::DestroySemaphore(handle));
        }

        fn destroy_fence(&self, handle: u64) {
            self.record(Op::DestroyFence(handle));
        }

        fn destroy_framebuffer(&self, handle: u64) {
            self.record(Op::DestroyFramebuffer(handle));
        }

        fn destroy_render_pass(&self, handle: u64) {
            self.record(Op::DestroyRenderPass(handle));
        }

        fn destroy_pipeline(&self, handle: u64) {
            self.record(Op::DestroyPipeline(handle));
        }

        fn destroy_pipeline_layout(&self, handle: u64) {
            self.record(Op::DestroyPipelineLayout(handle));
        }

        fn destroy_command_pool(&self, handle: u64) {
            self.record(Op::DestroyCommandPool(handle));
        }

        fn destroy_swapchain(&self, handle: u64) {
            self.record(Op::DestroySwapchain(handle));
        }

        fn destroy_surface(&self, handle: u64) {
            self.record(Op::DestroySurface(handle));
        }

        fn debug_messenger_destroyable(&self) -> bool {
            self.messenger_resolvable.get()
        }

        fn destroy_debug_messenger(&self, handle: u64) {
            self.record(Op::DestroyDebugMessenger(handle));
        }

        fn destroy_device(&self) {
            self.record(Op::DestroyDevice);
        }

        fn destroy_instance(&self) {
            self.record(Op::DestroyInstance);
        }
    }
}
