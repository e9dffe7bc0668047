//! Input state tables fed by the windowing callbacks

pub mod keys;
pub mod mouse;

pub use keys::{KeyState, MAX_KEY_CODE};
