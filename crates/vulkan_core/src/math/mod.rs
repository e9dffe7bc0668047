//! Math helpers for the uniform-buffer payload

pub mod glsl;

use nalgebra::Matrix4;

/// Flip a projection matrix's Y axis for Vulkan clip space.
///
/// GL-style projection matrices point Y up; Vulkan's clip space points Y
/// down, so the (1,1) element is negated.
pub fn vulkanize(mut projection: Matrix4<f32>) -> Matrix4<f32> {
    projection[(1, 1)] = -projection[(1, 1)];
    projection
}
