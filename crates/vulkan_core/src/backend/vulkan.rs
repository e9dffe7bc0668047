//! Live [`DeviceBackend`] implementation over ash
//!
//! Owns the ash function tables (device, instance, extension loaders) that
//! back the raw handle values stored in the resource layer. The backend is
//! constructed by the application's bootstrap code once the instance and
//! logical device exist; after `destroy_instance` it must not be used again.

use ash::extensions::ext::DebugUtils;
use ash::extensions::khr::{Surface as SurfaceLoader, Swapchain as SwapchainLoader};
use ash::vk::Handle;
use ash::{vk, Device, Entry, Instance};

use crate::backend::{DeviceBackend, VulkanError, VulkanResult};
use crate::resource::buffer::BufferSpec;

/// Vulkan backend over the ash function tables
pub struct VulkanBackend {
    /// Vulkan entry point, kept alive for the lifetime of the loaders
    pub entry: Entry,
    /// Instance the logical device was created from
    pub instance: Instance,
    /// Logical device function table
    pub device: Device,
    /// Physical device backing the logical device
    pub physical_device: vk::PhysicalDevice,
    surface_loader: SurfaceLoader,
    swapchain_loader: SwapchainLoader,
    debug_utils: Option<DebugUtils>,
}

impl VulkanBackend {
    /// Wrap already-created Vulkan objects in a backend.
    ///
    /// `load_debug_utils` controls whether the debug-utils extension loader
    /// is resolved; without it the debug messenger destroy entry point is
    /// reported as unresolvable and skipped during teardown.
    pub fn new(
        entry: Entry,
        instance: Instance,
        device: Device,
        physical_device: vk::PhysicalDevice,
        load_debug_utils: bool,
    ) -> Self {
        let surface_loader = SurfaceLoader::new(&entry, &instance);
        let swapchain_loader = SwapchainLoader::new(&instance, &device);
        let debug_utils = load_debug_utils.then(|| DebugUtils::new(&entry, &instance));

        Self {
            entry,
            instance,
            device,
            physical_device,
            surface_loader,
            swapchain_loader,
            debug_utils,
        }
    }

    /// Get the swapchain extension loader
    pub fn swapchain_loader(&self) -> &SwapchainLoader {
        &self.swapchain_loader
    }

    /// Get the surface extension loader
    pub fn surface_loader(&self) -> &SurfaceLoader {
        &self.surface_loader
    }

    /// Find a memory type matching the filter and required properties
    fn find_memory_type(
        &self,
        type_filter: u32,
        properties: vk::MemoryPropertyFlags,
    ) -> VulkanResult<u32> {
        let mem_properties = unsafe {
            self.instance
                .get_physical_device_memory_properties(self.physical_device)
        };

        for i in 0..mem_properties.memory_type_count {
            if (type_filter & (1 << i)) != 0
                && (mem_properties.memory_types[i as usize].property_flags & properties)
                    == properties
            {
                return Ok(i);
            }
        }

        Err(VulkanError::NoSuitableMemoryType)
    }
}

impl DeviceBackend for VulkanBackend {
    fn create_semaphore(&self) -> VulkanResult<u64> {
        let create_info = vk::SemaphoreCreateInfo::builder();

        let semaphore = unsafe {
            self.device
                .create_semaphore(&create_info, None)
                .map_err(|code| VulkanError::DeviceCreation { code })?
        };

        Ok(semaphore.as_raw())
    }

    fn create_fence(&self, signaled: bool) -> VulkanResult<u64> {
        let flags = if signaled {
            vk::FenceCreateFlags::SIGNALED
        } else {
            vk::FenceCreateFlags::empty()
        };

        let create_info = vk::FenceCreateInfo::builder().flags(flags);

        let fence = unsafe {
            self.device
                .create_fence(&create_info, None)
                .map_err(|code| VulkanError::DeviceCreation { code })?
        };

        Ok(fence.as_raw())
    }

    fn create_buffer(&self, spec: &BufferSpec) -> VulkanResult<(u64, u64)> {
        let buffer_info = vk::BufferCreateInfo::builder()
            .size(spec.size)
            .usage(spec.usage)
            .sharing_mode(vk::SharingMode::EXCLUSIVE);

        let buffer = unsafe {
            self.device
                .create_buffer(&buffer_info, None)
                .map_err(|code| VulkanError::DeviceCreation { code })?
        };

        let mem_requirements = unsafe { self.device.get_buffer_memory_requirements(buffer) };

        let memory_type_index = match self
            .find_memory_type(mem_requirements.memory_type_bits, spec.properties)
        {
            Ok(index) => index,
            Err(e) => {
                unsafe { self.device.destroy_buffer(buffer, None) };
                return Err(e);
            }
        };

        let alloc_info = vk::MemoryAllocateInfo::builder()
            .allocation_size(mem_requirements.size)
            .memory_type_index(memory_type_index);

        let memory = match unsafe { self.device.allocate_memory(&alloc_info, None) } {
            Ok(memory) => memory,
            Err(code) => {
                unsafe { self.device.destroy_buffer(buffer, None) };
                return Err(VulkanError::DeviceCreation { code });
            }
        };

        if let Err(code) = unsafe { self.device.bind_buffer_memory(buffer, memory, 0) } {
            unsafe {
                self.device.destroy_buffer(buffer, None);
                self.device.free_memory(memory, None);
            }
            return Err(VulkanError::DeviceCreation { code });
        }

        Ok((buffer.as_raw(), memory.as_raw()))
    }

    fn write_buffer(&self, memory: u64, data: &[u8]) -> VulkanResult<()> {
        let memory = vk::DeviceMemory::from_raw(memory);

        let mapped = unsafe {
            self.device
                .map_memory(
                    memory,
                    0,
                    data.len() as vk::DeviceSize,
                    vk::MemoryMapFlags::empty(),
                )
                .map_err(VulkanError::Api)?
        };

        unsafe {
            std::ptr::copy_nonoverlapping(data.as_ptr(), mapped.cast::<u8>(), data.len());
            self.device.unmap_memory(memory);
        }

        Ok(())
    }

    fn wait_for_fence(&self, fence: u64, timeout_ns: u64) -> VulkanResult<()> {
        let fences = [vk::Fence::from_raw(fence)];

        unsafe { self.device.wait_for_fences(&fences, true, timeout_ns) }.map_err(|code| {
            match code {
                vk::Result::TIMEOUT => VulkanError::GpuTimeout { timeout_ns },
                other => VulkanError::Api(other),
            }
        })
    }

    fn reset_fence(&self, fence: u64) -> VulkanResult<()> {
        let fences = [vk::Fence::from_raw(fence)];

        unsafe { self.device.reset_fences(&fences) }.map_err(VulkanError::Api)
    }

    fn device_wait_idle(&self) -> VulkanResult<()> {
        unsafe { self.device.device_wait_idle() }.map_err(VulkanError::Api)
    }

    fn destroy_buffer(&self, handle: u64) {
        unsafe {
            self.device.destroy_buffer(vk::Buffer::from_raw(handle), None);
        }
    }

    fn free_memory(&self, handle: u64) {
        unsafe {
            self.device.free_memory(vk::DeviceMemory::from_raw(handle), None);
        }
    }

    fn destroy_image(&self, handle: u64) {
        unsafe {
            self.device.destroy_image(vk::Image::from_raw(handle), None);
        }
    }

    fn destroy_image_view(&self, handle: u64) {
        unsafe {
            self.device
                .destroy_image_view(vk::ImageView::from_raw(handle), None);
        }
    }

    fn destroy_sampler(&self, handle: u64) {
        unsafe {
            self.device.destroy_sampler(vk::Sampler::from_raw(handle), None);
        }
    }

    fn destroy_semaphore(&self, handle: u64) {
        unsafe {
            self.device
                .destroy_semaphore(vk::Semaphore::from_raw(handle), None);
        }
    }

    fn destroy_fence(&self, handle: u64) {
        unsafe {
            self.device.destroy_fence(vk::Fence::from_raw(handle), None);
        }
    }

    fn destroy_framebuffer(&self, handle: u64) {
        unsafe {
            self.device
                .destroy_framebuffer(vk::Framebuffer::from_raw(handle), None);
        }
    }

    fn destroy_render_pass(&self, handle: u64) {
        unsafe {
            self.device
                .destroy_render_pass(vk::RenderPass::from_raw(handle), None);
        }
    }

    fn destroy_pipeline(&self, handle: u64) {
        unsafe {
            self.device
                .destroy_pipeline(vk::Pipeline::from_raw(handle), None);
        }
    }

    fn destroy_pipeline_layout(&self, handle: u64) {
        unsafe {
            self.device
                .destroy_pipeline_layout(vk::PipelineLayout::from_raw(handle), None);
        }
    }

    fn destroy_command_pool(&self, handle: u64) {
        unsafe {
            self.device
                .destroy_command_pool(vk::CommandPool::from_raw(handle), None);
        }
    }

    fn destroy_swapchain(&self, handle: u64) {
        unsafe {
            self.swapchain_loader
                .destroy_swapchain(vk::SwapchainKHR::from_raw(handle), None);
        }
    }

    fn destroy_surface(&self, handle: u64) {
        unsafe {
            self.surface_loader
                .destroy_surface(vk::SurfaceKHR::from_raw(handle), None);
        }
    }

    fn debug_messenger_destroyable(&self) -> bool {
        self.debug_utils.is_some()
    }

    fn destroy_debug_messenger(&self, handle: u64) {
        match &self.debug_utils {
            Some(debug_utils) => unsafe {
                debug_utils.destroy_debug_utils_messenger(
                    vk::DebugUtilsMessengerEXT::from_raw(handle),
                    None,
                );
            },
            None => {
                log::warn!("debug messenger destroy requested without a resolvable entry point");
            }
        }
    }

    fn destroy_device(&self) {
        unsafe {
            self.device.destroy_device(None);
        }
    }

    fn destroy_instance(&self) {
        unsafe {
            self.instance.destroy_instance(None);
        }
    }
}
