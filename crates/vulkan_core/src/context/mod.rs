//! Device context registry with ordered teardown
//!
//! Single source of truth for every GPU object the renderer currently owns.
//! The context is explicitly constructed by the application driver and passed
//! by reference to the subsystems that need it; there is no global state.
//!
//! Population happens once during startup in dependency order (instance →
//! physical device selection → logical device → queues → surface → swapchain
//! → views/framebuffers/pipeline). Teardown walks the exact reverse order;
//! that order is the hardest invariant in this crate, since any reversal
//! leaves dangling native handles or use-after-free in the driver. Swapchain
//! recreation on resize releases a strict subset (framebuffers down to the
//! swapchain itself) and leaves the creation steps to the bootstrap code.
//!
//! `set` on any entry overwrites without releasing: replacing a live resource
//! is release-then-set at the call site. The registry is mutated only during
//! startup, shutdown and recreation windows, with no frames in flight.

use ash::vk;

use crate::backend::{DeviceBackend, VulkanError, VulkanResult};
use crate::resource::{Buffer, HandleKind, HandleList, RawHandle};

/// Graphics and presentation queue family indices
#[derive(Debug, Default)]
pub struct QueueFamilies {
    graphics: Option<u32>,
    present: Option<u32>,
}

impl QueueFamilies {
    /// Create with both families unset
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the graphics family index
    pub fn set_graphics(&mut self, family: u32) {
        self.graphics = Some(family);
    }

    /// Store the presentation family index
    pub fn set_present(&mut self, family: u32) {
        self.present = Some(family);
    }

    /// Get the graphics family index, failing if it was never selected
    pub fn graphics(&self) -> VulkanResult<u32> {
        self.graphics.ok_or(VulkanError::UnboundResource {
            name: "graphics queue family",
        })
    }

    /// Get the presentation family index, failing if it was never selected
    pub fn present(&self) -> VulkanResult<u32> {
        self.present.ok_or(VulkanError::UnboundResource {
            name: "present queue family",
        })
    }

    /// Whether both families have been selected
    pub fn is_complete(&self) -> bool {
        self.graphics.is_some() && self.present.is_some()
    }

    /// Forget both indices
    pub fn clear(&mut self) {
        self.graphics = None;
        self.present = None;
    }
}

/// Registry of every GPU object the renderer owns
///
/// The set of entries is fixed at compile time; each entry carries its own
/// typed release logic through its [`HandleKind`]. Entries whose objects are
/// owned by a parent (queues, swapchain images, command buffers, the physical
/// device) are still modeled uniformly for symmetry with the rest.
#[derive(Debug)]
pub struct DeviceContext {
    /// Whether validation layers were requested at startup
    pub validation_enabled: bool,
    /// Vulkan instance
    pub instance: RawHandle,
    /// Debug messenger; only bound when validation is enabled
    pub debug_messenger: RawHandle,
    /// Window surface
    pub surface: RawHandle,
    /// Selected physical device
    pub physical_device: RawHandle,
    /// Queue family indices selected for the physical device
    pub queue_families: QueueFamilies,
    /// Logical device
    pub device: RawHandle,
    /// Graphics queue
    pub graphics_queue: RawHandle,
    /// Presentation queue
    pub present_queue: RawHandle,
    /// Swapchain
    pub swapchain: RawHandle,
    /// Extent the swapchain was created with
    pub swapchain_extent: Option<vk::Extent2D>,
    /// Images owned by the swapchain
    pub swapchain_images: HandleList,
    /// Views over the swapchain images
    pub image_views: HandleList,
    /// Framebuffers, one per swapchain image view
    pub framebuffers: HandleList,
    /// Render pass
    pub render_pass: RawHandle,
    /// Pipeline layout
    pub pipeline_layout: RawHandle,
    /// Graphics pipeline
    pub pipeline: RawHandle,
    /// Command pool
    pub command_pool: RawHandle,
    /// Command buffers allocated from the pool
    pub command_buffers: HandleList,
    /// Per-frame uniform buffers
    pub uniform_buffers: Vec<Buffer>,
}

impl DeviceContext {
    /// Create an empty context with every entry unset
    pub fn new(validation_enabled: bool) -> Self {
        Self {
            validation_enabled,
            instance: RawHandle::new(HandleKind::Instance),
            debug_messenger: RawHandle::new(HandleKind::DebugMessenger),
            surface: RawHandle::new(HandleKind::Surface),
            physical_device: RawHandle::new(HandleKind::PhysicalDevice),
            queue_families: QueueFamilies::new(),
            device: RawHandle::new(HandleKind::Device),
            graphics_queue: RawHandle::new(HandleKind::Queue),
            present_queue: RawHandle::new(HandleKind::Queue),
            swapchain: RawHandle::new(HandleKind::Swapchain),
            swapchain_extent: None,
            swapchain_images: HandleList::new(HandleKind::SwapchainImage),
            image_views: HandleList::new(HandleKind::ImageView),
            framebuffers: HandleList::new(HandleKind::Framebuffer),
            render_pass: RawHandle::new(HandleKind::RenderPass),
            pipeline_layout: RawHandle::new(HandleKind::PipelineLayout),
            pipeline: RawHandle::new(HandleKind::Pipeline),
            command_pool: RawHandle::new(HandleKind::CommandPool),
            command_buffers: HandleList::new(HandleKind::CommandBuffer),
            uniform_buffers: Vec::new(),
        }
    }

    /// Get the logical device handle, failing if the device was never created
    pub fn device_handle(&self) -> VulkanResult<u64> {
        self.device.try_get()
    }

    /// Release everything from framebuffers down to the swapchain.
    ///
    /// This is the resize subset of the shutdown order: framebuffers, then
    /// image views, then the swapchain (its images go with it). The caller
    /// recreates the released entries before the next frame is submitted.
    pub fn release_swapchain_resources(&mut self, backend: &dyn DeviceBackend) {
        log::debug!("releasing swapchain-dependent resources");
        self.framebuffers.release(backend);
        self.image_views.release(backend);
        self.swapchain_images.release(backend);
        self.swapchain.release(backend);
        self.swapchain_extent = None;
    }

    /// Release every entry in reverse dependency order.
    ///
    /// Command buffers, command pool, uniform buffers, pipeline, pipeline
    /// layout, render pass, framebuffers, image views, swapchain, surface,
    /// debug messenger (only if its destroy entry point is resolvable),
    /// queues and physical device (no native call), logical device, instance.
    ///
    /// Every release is idempotent, so a failed startup can run teardown over
    /// a partially populated context for best-effort cleanup, and a second
    /// call performs no native work.
    pub fn teardown(&mut self, backend: &dyn DeviceBackend) -> VulkanResult<()> {
        log::info!("tearing down device context");

        if !self.device.is_null() {
            backend.device_wait_idle()?;
        }

        self.command_buffers.release(backend);
        self.command_pool.release(backend);

        for buffer in &mut self.uniform_buffers {
            buffer.release(backend);
        }
        self.uniform_buffers.clear();

        self.pipeline.release(backend);
        self.pipeline_layout.release(backend);
        self.render_pass.release(backend);

        self.release_swapchain_resources(backend);

        self.surface.release(backend);

        if backend.debug_messenger_destroyable() {
            self.debug_messenger.release(backend);
        } else {
            self.debug_messenger.clear();
        }

        self.graphics_queue.release(backend);
        self.present_queue.release(backend);
        self.queue_families.clear();
        self.physical_device.release(backend);

        self.device.release(backend);
        self.instance.release(backend);

        log::info!("device context teardown complete");
        Ok(())
    }
}
