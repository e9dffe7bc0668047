//! Vertex input state from scanned shader layouts
//!
//! Builds the Vulkan vertex-input binding and attribute descriptions from
//! the `in` declarations of a scanned vertex shader. Attributes are packed
//! in location order with no padding, matching a tightly packed vertex
//! buffer. Declarations with a type outside the GLSL float/vector set are
//! skipped, consistent with the scanner's skip policy.

use ash::vk;

use crate::math::glsl::GlslType;
use crate::shader::layout::{LayoutMode, ShaderLayout};

/// Stage inputs with resolved types, sorted by location
fn vertex_inputs(layouts: &[ShaderLayout]) -> Vec<(u32, GlslType)> {
    let mut inputs: Vec<(u32, GlslType)> = layouts
        .iter()
        .filter(|layout| layout.mode == LayoutMode::In)
        .filter_map(|layout| {
            let ty = GlslType::from_name(layout.ty.as_deref()?)?;
            Some((layout.location, ty))
        })
        .collect();
    inputs.sort_by_key(|&(location, _)| location);
    inputs
}

/// Byte stride of one tightly packed vertex
pub fn vertex_stride(layouts: &[ShaderLayout]) -> u32 {
    vertex_inputs(layouts).iter().map(|&(_, ty)| ty.size()).sum()
}

/// Binding description for a single tightly packed vertex buffer
pub fn binding_description(layouts: &[ShaderLayout]) -> vk::VertexInputBindingDescription {
    vk::VertexInputBindingDescription {
        binding: 0,
        stride: vertex_stride(layouts),
        input_rate: vk::VertexInputRate::VERTEX,
    }
}

/// Attribute descriptions for the stage inputs, offsets packed in
/// location order
pub fn attribute_descriptions(layouts: &[ShaderLayout]) -> Vec<vk::VertexInputAttributeDescription> {
    let mut offset = 0;
    vertex_inputs(layouts)
        .into_iter()
        .map(|(location, ty)| {
            let description = vk::VertexInputAttributeDescription {
                binding: 0,
                location,
                format: ty.format(),
                offset,
            };
            offset += ty.size();
            description
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::layout::analyze;

    const VERTEX_SHADER: &str = "\
        layout(location = 0) in vec2 inPosition;\n\
        layout(location = 1) in vec3 inColor;\n\
        layout(location = 0) out vec3 fragColor;\n\
        layout(binding = 0) uniform UniformBufferObject { mat4 model; } ubo;\n";

    #[test]
    fn attributes_are_packed_in_location_order() {
        let layouts = analyze(VERTEX_SHADER);
        let attributes = attribute_descriptions(&layouts);

        assert_eq!(attributes.len(), 2);
        assert_eq!(attributes[0].location, 0);
        assert_eq!(attributes[0].format, vk::Format::R32G32_SFLOAT);
        assert_eq!(attributes[0].offset, 0);
        assert_eq!(attributes[1].location, 1);
        assert_eq!(attributes[1].format, vk::Format::R32G32B32_SFLOAT);
        assert_eq!(attributes[1].offset, 8);
    }

    #[test]
    fn stride_covers_every_input() {
        let layouts = analyze(VERTEX_SHADER);

        let binding = binding_description(&layouts);
        assert_eq!(binding.binding, 0);
        assert_eq!(binding.stride, 20);
        assert_eq!(binding.input_rate, vk::VertexInputRate::VERTEX);
    }

    #[test]
    fn outputs_and_uniforms_do_not_contribute() {
        let layouts = analyze("layout(location = 0) out vec4 color;\n");

        assert!(attribute_descriptions(&layouts).is_empty());
        assert_eq!(vertex_stride(&layouts), 0);
    }

    #[test]
    fn unknown_input_types_are_skipped() {
        let layouts = analyze("layout(location = 3) in mat3 weird;\n");

        assert!(attribute_descriptions(&layouts).is_empty());
    }
}
