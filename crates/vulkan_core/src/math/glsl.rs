//! GLSL scalar/vector types as seen by the vertex input
//!
//! Maps the float and vector type names that can appear in scanned `in`
//! declarations to their component layout and Vulkan attribute format.

use ash::vk;

/// GLSL types representable as vertex attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlslType {
    /// `float`
    Float,
    /// `vec2`
    Vec2,
    /// `vec3`
    Vec3,
    /// `vec4`
    Vec4,
}

impl GlslType {
    /// Look up a type by its GLSL name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "float" => Some(Self::Float),
            "vec2" => Some(Self::Vec2),
            "vec3" => Some(Self::Vec3),
            "vec4" => Some(Self::Vec4),
            _ => None,
        }
    }

    /// Number of float components
    pub fn component_count(self) -> u32 {
        match self {
            Self::Float => 1,
            Self::Vec2 => 2,
            Self::Vec3 => 3,
            Self::Vec4 => 4,
        }
    }

    /// Size of one component in bytes
    pub fn component_size(self) -> u32 {
        std::mem::size_of::<f32>() as u32
    }

    /// Total size in bytes
    pub fn size(self) -> u32 {
        self.component_count() * self.component_size()
    }

    /// Vulkan attribute format for this type
    pub fn format(self) -> vk::Format {
        match self {
            Self::Float => vk::Format::R32_SFLOAT,
            Self::Vec2 => vk::Format::R32G32_SFLOAT,
            Self::Vec3 => vk::Format::R32G32B32_SFLOAT,
            Self::Vec4 => vk::Format::R32G32B32A32_SFLOAT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_resolve_to_types() {
        assert_eq!(GlslType::from_name("float"), Some(GlslType::Float));
        assert_eq!(GlslType::from_name("vec3"), Some(GlslType::Vec3));
        assert_eq!(GlslType::from_name("mat4"), None);
    }

    #[test]
    fn sizes_follow_component_counts() {
        assert_eq!(GlslType::Float.size(), 4);
        assert_eq!(GlslType::Vec2.size(), 8);
        assert_eq!(GlslType::Vec3.size(), 12);
        assert_eq!(GlslType::Vec4.size(), 16);
    }

    #[test]
    fn formats_match_component_counts() {
        assert_eq!(GlslType::Float.format(), vk::Format::R32_SFLOAT);
        assert_eq!(GlslType::Vec4.format(), vk::Format::R32G32B32A32_SFLOAT);
    }
}
