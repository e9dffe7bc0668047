//! `layout(...)` directive scanner
//!
//! Extracts input/output/uniform descriptors from raw GLSL source. This is a
//! scanner, not a parser: a malformed directive (missing `=`, non-integer
//! slot, unterminated declaration, unknown storage qualifier) is skipped
//! silently and scanning continues after the `layout` keyword.

/// Storage qualifier of a scanned declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Vertex/fragment stage input
    In,
    /// Stage output
    Out,
    /// Uniform binding
    Uniform,
}

/// One descriptor extracted from a `layout(...)` declaration
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderLayout {
    /// Storage qualifier
    pub mode: LayoutMode,
    /// Attribute location; zero unless the directive carried `location = n`
    pub location: u32,
    /// Descriptor binding; zero unless the directive carried `binding = n`
    pub binding: u32,
    /// Declared type, absent for uniform block declarations
    pub ty: Option<String>,
    /// Variable or block name
    pub name: String,
}

enum SlotKey {
    Location,
    Binding,
}

/// Scan shader source for `layout(...)` declarations, in source order
pub fn analyze(source: &str) -> Vec<ShaderLayout> {
    let mut layouts = Vec::new();
    let mut rest = source;
    while let Some(at) = rest.find("layout") {
        rest = &rest[at + "layout".len()..];
        if let Some((layout, tail)) = scan_directive(rest) {
            layouts.push(layout);
            rest = tail;
        }
    }
    layouts
}

/// Scan one directive starting just past the `layout` keyword.
///
/// Returns the descriptor and the unconsumed tail, or `None` if the
/// directive is malformed.
fn scan_directive(input: &str) -> Option<(ShaderLayout, &str)> {
    let s = input.trim_start();
    let s = s.strip_prefix('(')?;
    let close = s.find(')')?;
    let (slot_key, slot_value) = parse_qualifier(&s[..close])?;

    let decl = &s[close + 1..];
    let end = decl.find(|c| c == ';' || c == '{')?;
    let mut words = decl[..end].split_whitespace();

    let mode = match words.next()? {
        "in" => LayoutMode::In,
        "out" => LayoutMode::Out,
        "uniform" => LayoutMode::Uniform,
        _ => return None,
    };

    let first = words.next()?;
    let (ty, name) = match (mode, words.next()) {
        (_, Some(second)) => (Some(first.to_string()), second.to_string()),
        // A uniform block declaration carries only the block name.
        (LayoutMode::Uniform, None) => (None, first.to_string()),
        (_, None) => return None,
    };

    let mut layout = ShaderLayout {
        mode,
        location: 0,
        binding: 0,
        ty,
        name,
    };
    match slot_key {
        SlotKey::Location => layout.location = slot_value,
        SlotKey::Binding => layout.binding = slot_value,
    }

    Some((layout, &decl[end..]))
}

/// Find `location = n` or `binding = n` among comma-separated qualifiers
fn parse_qualifier(args: &str) -> Option<(SlotKey, u32)> {
    for part in args.split(',') {
        let mut kv = part.splitn(2, '=');
        let slot_key = match kv.next()?.trim() {
            "location" => SlotKey::Location,
            "binding" => SlotKey::Binding,
            _ => continue,
        };
        let value = kv.next()?.trim().parse().ok()?;
        return Some((slot_key, value));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scans_a_vertex_input() {
        let layouts = analyze("layout(location = 0) in vec3 inPosition;");

        assert_eq!(
            layouts,
            vec![ShaderLayout {
                mode: LayoutMode::In,
                location: 0,
                binding: 0,
                ty: Some("vec3".to_string()),
                name: "inPosition".to_string(),
            }]
        );
    }

    #[test]
    fn scans_a_sampler_uniform() {
        let layouts = analyze("layout(binding = 1) uniform sampler2D tex;");

        assert_eq!(layouts.len(), 1);
        assert_eq!(layouts[0].mode, LayoutMode::Uniform);
        assert_eq!(layouts[0].binding, 1);
        assert_eq!(layouts[0].location, 0);
        assert_eq!(layouts[0].ty.as_deref(), Some("sampler2D"));
        assert_eq!(layouts[0].name, "tex");
    }

    #[test]
    fn scans_a_uniform_block() {
        let source = "layout(binding = 0) uniform UniformBufferObject {\n\
                      \x20   mat4 model;\n\
                      } ubo;";
        let layouts = analyze(source);

        assert_eq!(layouts.len(), 1);
        assert_eq!(layouts[0].name, "UniformBufferObject");
        assert_eq!(layouts[0].ty, None);
        assert_eq!(layouts[0].binding, 0);
    }

    #[test]
    fn preserves_source_order() {
        let source = "\
            #version 450\n\
            layout(location = 0) in vec2 inPosition;\n\
            layout(location = 1) in vec3 inColor;\n\
            layout(location = 0) out vec3 fragColor;\n";
        let layouts = analyze(source);

        assert_eq!(layouts.len(), 3);
        assert_eq!(layouts[0].name, "inPosition");
        assert_eq!(layouts[1].name, "inColor");
        assert_eq!(layouts[2].mode, LayoutMode::Out);
        assert_eq!(layouts[2].name, "fragColor");
    }

    #[test]
    fn skips_extra_layout_qualifiers() {
        let layouts = analyze("layout(std140, binding = 2) uniform Lights { vec4 dir; } lights;");

        assert_eq!(layouts.len(), 1);
        assert_eq!(layouts[0].binding, 2);
        assert_eq!(layouts[0].name, "Lights");
    }

    #[test]
    fn malformed_directives_are_skipped_silently() {
        let source = "\
            layout(location = ) in vec3 broken;\n\
            layout location = 0 in vec3 alsoBroken;\n\
            layout(location = 2) in vec4 unterminated\n";
        assert!(analyze(source).is_empty());
    }

    #[test]
    fn unknown_storage_qualifiers_are_skipped() {
        let source = "\
            layout(binding = 0) buffer Data { float values[]; };\n\
            layout(location = 1) in float weight;\n";
        let layouts = analyze(source);

        assert_eq!(layouts.len(), 1);
        assert_eq!(layouts[0].name, "weight");
    }

    #[test]
    fn source_without_directives_yields_nothing() {
        assert!(analyze("void main() { gl_Position = vec4(0.0); }").is_empty());
    }
}
