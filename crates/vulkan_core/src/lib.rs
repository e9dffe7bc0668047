//! # Vulkan Core
//!
//! Resource lifecycle and frame synchronization core for a Vulkan renderer.
//!
//! ## What this crate owns
//!
//! - **Resource handles**: uniform `get`/`set`/`release` wrappers over raw
//!   Vulkan handles, collections of same-kind handles, and structured
//!   buffer/texture aggregates released as one unit
//! - **Device context**: the explicit registry of every GPU object the
//!   renderer owns, torn down in strict reverse-dependency order
//! - **Frame ring**: per-frame semaphore/fence triples pacing CPU submission
//!   against GPU consumption across N frames in flight, with frame timing
//!   and swapchain invalidation on resize
//!
//! Leaf utilities used by the surrounding renderer live alongside: the
//! shader `layout(...)` scanner, key/mouse state tables, and uniform-buffer
//! serialization helpers.
//!
//! ## What it does not own
//!
//! Instance/device/swapchain bootstrap, pipeline construction and command
//! recording are the application driver's job. The driver populates a
//! [`DeviceContext`] in dependency order during startup and calls
//! [`DeviceContext::teardown`] at shutdown; every native call in between
//! goes through the [`DeviceBackend`] seam.
//!
//! ## Frame loop shape
//!
//! ```rust,no_run
//! # use vulkan_core::{FrameRing, DeviceBackend};
//! # fn frame(ring: &mut FrameRing, backend: &dyn DeviceBackend) -> vulkan_core::VulkanResult<()> {
//! # let resize_requested = false;
//! if resize_requested {
//!     ring.mark_resized();
//! }
//! if ring.swapchain_invalidated() {
//!     // recreate the swapchain through the device context, then:
//!     ring.clear_swapchain_invalidated();
//! }
//! ring.wait_current(backend, 1_000_000_000)?;
//! ring.reset_current_fence(backend)?;
//! // acquire gated by the slot's image-available semaphore, submit work
//! // signaling its render-finished semaphore and in-flight fence, present
//! ring.advance();
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod backend;
pub mod context;
pub mod core;
pub mod frame;
pub mod input;
pub mod math;
pub mod memory;
pub mod resource;
pub mod shader;

pub use backend::vulkan::VulkanBackend;
pub use backend::{DeviceBackend, VulkanError, VulkanResult};
pub use context::{DeviceContext, QueueFamilies};
pub use frame::{FrameRing, FrameSlot, DEFAULT_FRAMES_IN_FLIGHT};
pub use memory::{align_up, UniformBufferObject};
pub use resource::{Buffer, BufferSpec, HandleKind, HandleList, RawHandle, Texture};
pub use shader::{analyze, LayoutMode, ShaderLayout};
