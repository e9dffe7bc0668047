//! Per-frame synchronization ring
//!
//! A fixed-size circular array of synchronization triples paces CPU
//! submission against GPU consumption. Each slot owns the image-available
//! semaphore, render-finished semaphore and in-flight fence for one frame in
//! flight; the ring advances one slot per submitted frame.
//!
//! Slot reuse follows the wait-then-reset pattern: wait on the slot's fence
//! (signaled by the slot's previous use), reset it, then submit work that
//! signals it again. Keeping the slot count explicit and fixed, rather than
//! inferring it from the number of swapchain images, is what guarantees a
//! semaphore is never reused while still pending from an earlier frame.
//!
//! The ring also carries frame timing (delta time recomputed once per
//! advance) and the swapchain-invalidation flag set by resize events. The
//! flag is consumed by the render loop, which must request swapchain
//! recreation through the device context and clear the flag only after that
//! succeeds.

use std::time::Instant;

use crate::backend::{DeviceBackend, VulkanError, VulkanResult};
use crate::resource::{HandleKind, RawHandle};

/// Default number of frames in flight
pub const DEFAULT_FRAMES_IN_FLIGHT: usize = 2;

/// Synchronization triple for one frame in flight
#[derive(Debug)]
pub struct FrameSlot {
    /// Signaled by the acquire call when the swapchain image is ready
    pub image_available: RawHandle,
    /// Signaled by the submit when rendering into the image has finished
    pub render_finished: RawHandle,
    /// Signaled by the GPU when the slot's submitted work completes
    pub in_flight: RawHandle,
}

impl FrameSlot {
    fn create(backend: &dyn DeviceBackend) -> VulkanResult<Self> {
        let mut slot = Self {
            image_available: RawHandle::new(HandleKind::Semaphore),
            render_finished: RawHandle::new(HandleKind::Semaphore),
            in_flight: RawHandle::new(HandleKind::Fence),
        };
        slot.image_available.set(backend.create_semaphore()?);
        slot.render_finished.set(backend.create_semaphore()?);
        // Created signaled so the first wait on the slot passes immediately.
        slot.in_flight.set(backend.create_fence(true)?);
        Ok(slot)
    }

    fn release(&mut self, backend: &dyn DeviceBackend) {
        self.image_available.release(backend);
        self.render_finished.release(backend);
        self.in_flight.release(backend);
    }
}

/// Circular array of frame slots with timing and resize state
#[derive(Debug)]
pub struct FrameRing {
    slots: Vec<FrameSlot>,
    current: usize,
    epoch: Instant,
    last_timestamp: f64,
    delta_time: f64,
    swapchain_invalidated: bool,
}

impl FrameRing {
    /// Create a ring with `slot_count` slots, each with fresh sync objects.
    ///
    /// Fences are created signaled so the first frame does not block.
    ///
    /// # Panics
    /// Panics if `slot_count` is zero.
    pub fn new(backend: &dyn DeviceBackend, slot_count: usize) -> VulkanResult<Self> {
        assert!(slot_count >= 1, "frame ring needs at least one slot");

        let mut slots = Vec::with_capacity(slot_count);
        for _ in 0..slot_count {
            slots.push(FrameSlot::create(backend)?);
        }
        log::debug!("created frame ring with {slot_count} slots");

        Ok(Self {
            slots,
            current: 0,
            epoch: Instant::now(),
            last_timestamp: 0.0,
            delta_time: 0.0,
            swapchain_invalidated: false,
        })
    }

    /// Number of frames in flight
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Index of the active slot, always within `[0, slot_count)`
    pub fn current_slot(&self) -> usize {
        self.current
    }

    /// The active slot's synchronization triple
    pub fn current(&self) -> &FrameSlot {
        &self.slots[self.current]
    }

    /// Get a slot by index, failing on an out-of-range index
    pub fn slot(&self, index: usize) -> VulkanResult<&FrameSlot> {
        self.slots.get(index).ok_or(VulkanError::IndexOutOfRange {
            index: index as i64,
            limit: self.slots.len() - 1,
        })
    }

    /// Wait for the active slot's fence from its previous use.
    ///
    /// Times out with [`VulkanError::GpuTimeout`], which the frame loop
    /// treats as device-lost.
    pub fn wait_current(&self, backend: &dyn DeviceBackend, timeout_ns: u64) -> VulkanResult<()> {
        backend.wait_for_fence(self.current().in_flight.get(), timeout_ns)
    }

    /// Reset the active slot's fence just before resubmitting it
    pub fn reset_current_fence(&self, backend: &dyn DeviceBackend) -> VulkanResult<()> {
        backend.reset_fence(self.current().in_flight.get())
    }

    /// Advance to the next slot, sampling the monotonic clock for timing
    pub fn advance(&mut self) {
        let now = self.epoch.elapsed().as_secs_f64();
        self.advance_at(now);
    }

    /// Advance to the next slot with an explicit clock sample in seconds.
    ///
    /// Recomputes the delta time from the previous sample; the ring index
    /// wraps modulo the slot count and never skips.
    pub fn advance_at(&mut self, now_seconds: f64) {
        self.delta_time = now_seconds - self.last_timestamp;
        self.last_timestamp = now_seconds;
        self.current = (self.current + 1) % self.slots.len();
    }

    /// Seconds between the two most recent advances
    pub fn delta_time(&self) -> f64 {
        self.delta_time
    }

    /// Record that the window was resized and the swapchain is stale
    pub fn mark_resized(&mut self) {
        self.swapchain_invalidated = true;
    }

    /// Whether the swapchain must be recreated before the next acquire
    pub fn swapchain_invalidated(&self) -> bool {
        self.swapchain_invalidated
    }

    /// Clear the invalidation flag once recreation has succeeded
    pub fn clear_swapchain_invalidated(&mut self) {
        self.swapchain_invalidated = false;
    }

    /// Release every slot's sync objects and rewind to slot zero.
    ///
    /// Used at shutdown; the ring can be rebuilt with [`FrameRing::new`]
    /// afterwards.
    pub fn release(&mut self, backend: &dyn DeviceBackend) {
        for slot in &mut self.slots {
            slot.release(backend);
        }
        self.current = 0;
    }
}
