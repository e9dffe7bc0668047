//! Per-frame uniform buffer payload
//!
//! The uniform block is three 4×4 float matrices (model, view, projection)
//! serialized column-major with no padding between them beyond what the
//! backend's alignment requirement introduces.

use nalgebra::Matrix4;

use crate::backend::{DeviceBackend, VulkanResult};
use crate::memory::{align_up, write_floats};
use crate::resource::Buffer;

/// Size of one serialized 4×4 float matrix in bytes
pub const MATRIX_BYTES: usize = 64;

/// Model, view and projection matrices for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct UniformBufferObject {
    /// Object-to-world transform
    pub model: Matrix4<f32>,
    /// World-to-camera transform
    pub view: Matrix4<f32>,
    /// Camera-to-clip transform
    pub projection: Matrix4<f32>,
}

impl UniformBufferObject {
    /// Bundle the three matrices
    pub fn new(model: Matrix4<f32>, view: Matrix4<f32>, projection: Matrix4<f32>) -> Self {
        Self {
            model,
            view,
            projection,
        }
    }

    /// Serialized size with each matrix at an aligned offset
    pub fn packed_size(alignment: u64) -> u64 {
        let mut offset = 0;
        for _ in 0..3 {
            offset = align_up(offset, alignment) + MATRIX_BYTES as u64;
        }
        offset
    }

    /// Write the matrices into `out`, each at an aligned offset.
    ///
    /// Matrices are serialized column-major, the layout GLSL expects.
    ///
    /// # Panics
    /// Panics if `out` is smaller than [`Self::packed_size`].
    pub fn write_into(&self, out: &mut [u8], alignment: u64) {
        let mut offset = 0usize;
        for matrix in [&self.model, &self.view, &self.projection] {
            offset = align_up(offset as u64, alignment) as usize;
            write_floats(out, offset, matrix.as_slice());
            offset += MATRIX_BYTES;
        }
    }

    /// Serialize into a fresh byte vector
    pub fn to_bytes(&self, alignment: u64) -> Vec<u8> {
        let mut out = vec![0u8; Self::packed_size(alignment) as usize];
        self.write_into(&mut out, alignment);
        out
    }

    /// Serialize and write into a uniform buffer's memory
    pub fn upload(
        &self,
        backend: &dyn DeviceBackend,
        buffer: &Buffer,
        alignment: u64,
    ) -> VulkanResult<()> {
        buffer.write(backend, &self.to_bytes(alignment))
    }
}
