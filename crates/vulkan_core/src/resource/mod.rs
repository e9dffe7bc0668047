//! Uniform ownership wrappers for native GPU objects
//!
//! Every Vulkan object tracked by this crate is held either as a single
//! [`RawHandle`], an ordered [`HandleList`], or a structured aggregate
//! ([`Buffer`], [`Texture`]) that releases several co-dependent handles as
//! one unit.

pub mod buffer;
pub mod collection;
pub mod handle;
pub mod texture;

pub use buffer::{Buffer, BufferSpec};
pub use collection::HandleList;
pub use handle::{HandleKind, RawHandle};
pub use texture::Texture;
