//! Wraps WebGL-style GLSL so naga's GLSL 450 frontend accepts it.
//!
//! Embedded page shaders declare their inputs the WebGL way: `attribute` and
//! `varying` globals, loose `uniform` values and `sampler2D` uniforms, with
//! output through `gl_FragColor`. wgpu wants explicit locations, a std140
//! uniform block and separate texture/sampler bindings. The wrapper:
//!
//! 1. drops `#version` and `precision` statements;
//! 2. rewrites `attribute` declarations with the quad's vertex locations
//!    (`a_position` at 0, `a_texCoord` at 1);
//! 3. rewrites `varying` declarations as `out` (vertex) or `in` (fragment),
//!    numbering locations in declaration order;
//! 4. drops the known uniform declarations and prepends a header that declares
//!    the uniform block and macro aliases for every known name.
//!
//! Replaced lines are kept as blank lines and the header ends with `#line 1`,
//! so diagnostics point at the embedded source's own line numbers.

use std::borrow::Cow;

use crate::{RenderError, Stage};

/// Uniforms carried by the parameter block, with their GLSL types.
pub const UNIFORMS: [(&str, &str); 12] = [
    ("u_scaleFactor", "float"),
    ("u_depthFactor", "float"),
    ("u_shift", "vec2"),
    ("inputSize", "vec4"),
    ("outputFrame", "vec4"),
    ("offset", "vec3"),
    ("scale", "float"),
    ("focus", "float"),
    ("enlarge", "float"),
    ("aspect", "float"),
    ("projectionMatrix", "mat3"),
    ("filterMatrix", "mat3"),
];

/// Color image and depth map sampler names.
pub const SAMPLERS: [&str; 2] = ["imageSampler", "mapSampler"];

/// Vertex attributes fed from the quad buffer and their locations.
pub const ATTRIBUTES: [(&str, u32); 2] = [("a_position", 0), ("a_texCoord", 1)];

const PRECISION_QUALIFIERS: [&str; 3] = ["lowp", "mediump", "highp"];

pub fn wrap_vertex(source: &str) -> Result<String, RenderError> {
    wrap(source, Stage::Vertex)
}

pub fn wrap_fragment(source: &str) -> Result<String, RenderError> {
    wrap(source, Stage::Fragment)
}

/// Wraps `source` and compiles it, reporting naga diagnostics as
/// [`RenderError::ShaderCompile`].
pub(crate) async fn compile_shader(
    device: &wgpu::Device,
    stage: Stage,
    source: &str,
) -> Result<wgpu::ShaderModule, RenderError> {
    let wrapped = wrap(source, stage)?;
    tracing::debug!(%stage, bytes = wrapped.len(), "compiling wrapped shader");

    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(match stage {
            Stage::Vertex => "parallax vertex",
            Stage::Fragment => "parallax fragment",
        }),
        source: wgpu::ShaderSource::Glsl {
            shader: Cow::Owned(wrapped),
            stage: stage.naga(),
            defines: &[],
        },
    });
    match device.pop_error_scope().await {
        Some(error) => Err(RenderError::ShaderCompile {
            stage,
            log: error.to_string(),
        }),
        None => Ok(module),
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Declaration<'a> {
    Version,
    Precision,
    Attribute { ty: &'a str, name: &'a str },
    Varying { ty: &'a str, name: &'a str },
    Uniform { ty: &'a str, name: &'a str },
}

fn parse_declaration(line: &str) -> Option<Declaration<'_>> {
    let code = line.split("//").next().unwrap_or(line).trim();
    if code.starts_with("#version") {
        return Some(Declaration::Version);
    }
    let statement = code.strip_suffix(';')?;
    let mut tokens = statement
        .split_whitespace()
        .filter(|token| !PRECISION_QUALIFIERS.contains(token));
    let keyword = tokens.next()?;
    if keyword == "precision" {
        return Some(Declaration::Precision);
    }
    let ty = tokens.next()?;
    let name = tokens.next()?;
    if tokens.next().is_some() || name.contains(',') || ty.contains(',') {
        return None;
    }
    match keyword {
        "attribute" => Some(Declaration::Attribute { ty, name }),
        "varying" => Some(Declaration::Varying { ty, name }),
        "uniform" => Some(Declaration::Uniform { ty, name }),
        _ => None,
    }
}

fn wrap(source: &str, stage: Stage) -> Result<String, RenderError> {
    let fail = |log: String| RenderError::ShaderCompile { stage, log };
    let mut body = String::with_capacity(source.len());
    let mut varying_location = 0u32;

    for (index, line) in source.lines().enumerate() {
        let line_number = index + 1;
        let replacement = match parse_declaration(line) {
            None => {
                body.push_str(line);
                body.push('\n');
                continue;
            }
            Some(Declaration::Version | Declaration::Precision) => String::new(),
            Some(Declaration::Attribute { ty, name }) => {
                if stage != Stage::Vertex {
                    return Err(fail(format!(
                        "line {line_number}: attribute '{name}' outside the vertex shader"
                    )));
                }
                let location = ATTRIBUTES
                    .iter()
                    .find(|(known, _)| *known == name)
                    .map(|(_, location)| *location)
                    .ok_or_else(|| {
                        fail(format!(
                            "line {line_number}: unknown attribute '{name}'; expected one of a_position, a_texCoord"
                        ))
                    })?;
                format!("layout(location = {location}) in {ty} {name};")
            }
            Some(Declaration::Varying { ty, name }) => {
                let direction = match stage {
                    Stage::Vertex => "out",
                    Stage::Fragment => "in",
                };
                let location = varying_location;
                varying_location += 1;
                format!("layout(location = {location}) {direction} {ty} {name};")
            }
            Some(Declaration::Uniform { ty, name }) => {
                check_uniform(ty, name).map_err(|log| fail(format!("line {line_number}: {log}")))?;
                String::new()
            }
        };
        body.push_str(&replacement);
        body.push('\n');
    }

    let header = match stage {
        Stage::Vertex => VERTEX_HEADER,
        Stage::Fragment => FRAGMENT_HEADER,
    };
    Ok(format!("{COMMON_HEADER}{header}#line 1\n{body}"))
}

fn check_uniform(ty: &str, name: &str) -> Result<(), String> {
    if SAMPLERS.contains(&name) {
        return if ty == "sampler2D" {
            Ok(())
        } else {
            Err(format!("uniform '{name}' must be a sampler2D, found {ty}"))
        };
    }
    match UNIFORMS.iter().find(|(known, _)| *known == name) {
        Some((_, expected)) if *expected == ty => Ok(()),
        Some((_, expected)) => Err(format!(
            "uniform '{name}' must be declared as {expected}, found {ty}"
        )),
        None => Err(format!("unsupported uniform '{name}'")),
    }
}

/// Uniform block shared by both stages. Member order and padding must match
/// `ParallaxUniforms`.
const COMMON_HEADER: &str = r"#version 450

layout(std140, set = 0, binding = 0) uniform ParallaxParams {
    float _u_scaleFactor;
    float _u_depthFactor;
    vec2 _u_shift;
    vec4 _inputSize;
    vec4 _outputFrame;
    vec3 _offset;
    float _scale;
    float _focus;
    float _enlarge;
    float _aspect;
    float _padding0;
    mat3 _projectionMatrix;
    mat3 _filterMatrix;
} params;

#define u_scaleFactor params._u_scaleFactor
#define u_depthFactor params._u_depthFactor
#define u_shift params._u_shift
#define inputSize params._inputSize
#define outputFrame params._outputFrame
#define offset params._offset
#define scale params._scale
#define focus params._focus
#define enlarge params._enlarge
#define aspect params._aspect
#define projectionMatrix params._projectionMatrix
#define filterMatrix params._filterMatrix
";

const VERTEX_HEADER: &str = "";

/// Texture types are declared before `texture2D` is redefined as the GLSL 450
/// sampling function.
const FRAGMENT_HEADER: &str = r"
layout(location = 0) out vec4 parallax_FragColor;

layout(set = 0, binding = 1) uniform texture2D parallax_image_texture;
layout(set = 0, binding = 2) uniform sampler parallax_image_sampler;
layout(set = 0, binding = 3) uniform texture2D parallax_map_texture;
layout(set = 0, binding = 4) uniform sampler parallax_map_sampler;

#define imageSampler sampler2D(parallax_image_texture, parallax_image_sampler)
#define mapSampler sampler2D(parallax_map_texture, parallax_map_sampler)
#define gl_FragColor parallax_FragColor
#define texture2D texture
";

#[cfg(test)]
mod tests {
    use super::*;

    const VERTEX: &str = r"
attribute vec2 a_position;
attribute vec2 a_texCoord;
varying vec2 v_texCoord;
void main() {
    gl_Position = vec4(a_position, 0.0, 1.0);
    v_texCoord = a_texCoord;
}
";

    const FRAGMENT: &str = r"
precision mediump float;
uniform sampler2D imageSampler;
uniform sampler2D mapSampler; // depth
uniform float u_scaleFactor;
uniform vec2 u_shift;
varying vec2 v_texCoord;
void main() {
    float depth = texture2D(mapSampler, v_texCoord).r;
    gl_FragColor = texture2D(imageSampler, v_texCoord + u_shift * depth * u_scaleFactor);
}
";

    const PAGE: &str = include_str!("../../../www/index.html");

    /// Source of the inline `<script>` block with the given id.
    fn embedded(id: &str) -> &'static str {
        let start = PAGE.find(&format!("id=\"{id}\"")).unwrap();
        let open = start + PAGE[start..].find('>').unwrap() + 1;
        let close = open + PAGE[open..].find("</script>").unwrap();
        &PAGE[open..close]
    }

    /// Runs wrapped source through naga's GLSL frontend and validator, as
    /// `compile_shader` does on the device.
    fn naga_check(stage: Stage, wrapped: &str) -> Result<(), String> {
        use wgpu::naga::front::glsl::{Frontend, Options};
        use wgpu::naga::valid::{Capabilities, ValidationFlags, Validator};

        let module = Frontend::default()
            .parse(&Options::from(stage.naga()), wrapped)
            .map_err(|err| format!("{err:?}"))?;
        Validator::new(ValidationFlags::all(), Capabilities::all())
            .validate(&module)
            .map_err(|err| format!("{err:?}"))?;
        Ok(())
    }

    fn body(wrapped: &str) -> &str {
        wrapped.split("#line 1\n").nth(1).unwrap()
    }

    #[test]
    fn vertex_attributes_get_quad_locations() {
        let wrapped = wrap_vertex(VERTEX).unwrap();
        let body = body(&wrapped);
        assert!(body.contains("layout(location = 0) in vec2 a_position;"));
        assert!(body.contains("layout(location = 1) in vec2 a_texCoord;"));
        assert!(body.contains("layout(location = 0) out vec2 v_texCoord;"));
        assert!(!body.contains("attribute"));
        assert!(body.contains("gl_Position = vec4(a_position, 0.0, 1.0);"));
    }

    #[test]
    fn fragment_declarations_are_replaced_by_header() {
        let wrapped = wrap_fragment(FRAGMENT).unwrap();
        let body = body(&wrapped);
        assert!(!body.contains("precision"));
        assert!(!body.contains("uniform"));
        assert!(body.contains("layout(location = 0) in vec2 v_texCoord;"));
        assert!(body.contains("texture2D(mapSampler, v_texCoord).r"));
        assert!(wrapped.starts_with("#version 450"));
        assert!(wrapped.contains("#define gl_FragColor parallax_FragColor"));
    }

    #[test]
    fn line_numbers_are_preserved() {
        let wrapped = wrap_fragment(FRAGMENT).unwrap();
        assert_eq!(body(&wrapped).lines().count(), FRAGMENT.lines().count());
    }

    #[test]
    fn rejects_unknown_uniform() {
        let err = wrap_fragment("uniform float u_time;\nvoid main() {}\n").unwrap_err();
        assert!(matches!(
            err,
            RenderError::ShaderCompile { stage: Stage::Fragment, ref log } if log.contains("u_time")
        ));
    }

    #[test]
    fn rejects_mistyped_uniform() {
        let err = wrap_fragment("uniform vec3 u_shift;\n").unwrap_err();
        assert!(err.to_string().contains("must be declared as vec2"));
    }

    #[test]
    fn rejects_attribute_in_fragment_stage() {
        let err = wrap_fragment("attribute vec2 a_position;\n").unwrap_err();
        assert!(matches!(err, RenderError::ShaderCompile { .. }));
    }

    #[test]
    fn rejects_unknown_attribute() {
        let err = wrap_vertex("attribute vec3 a_normal;\n").unwrap_err();
        assert!(err.to_string().contains("a_normal"));
    }

    #[test]
    fn header_aliases_every_uniform() {
        for (name, ty) in UNIFORMS {
            assert!(COMMON_HEADER.contains(&format!("{ty} _{name};")), "{name}");
            assert!(COMMON_HEADER.contains(&format!("#define {name} params._{name}")), "{name}");
        }
        for name in SAMPLERS {
            assert!(FRAGMENT_HEADER.contains(&format!("#define {name} sampler2D(")), "{name}");
        }
    }

    #[test]
    fn texture_types_precede_texture2d_alias() {
        let alias = FRAGMENT_HEADER.find("#define texture2D").unwrap();
        let last_texture = FRAGMENT_HEADER.rfind("uniform texture2D").unwrap();
        assert!(last_texture < alias);
    }

    #[test]
    fn parses_qualified_declarations() {
        assert_eq!(
            parse_declaration("  varying highp vec2 v_uv; // uv"),
            Some(Declaration::Varying {
                ty: "vec2",
                name: "v_uv"
            })
        );
        assert_eq!(parse_declaration("uniform float a, b;"), None);
        assert_eq!(parse_declaration("float x = 1.0;"), None);
    }

    #[test]
    fn page_shaders_compile_under_naga() {
        let vertex = wrap_vertex(embedded("vertex-shader-pix")).unwrap();
        naga_check(Stage::Vertex, &vertex).unwrap();
        for id in ["fragment-shader-pix", "fragment-shader-pix-alt"] {
            let fragment = wrap_fragment(embedded(id)).unwrap();
            if let Err(log) = naga_check(Stage::Fragment, &fragment) {
                panic!("{id}: {log}");
            }
        }
    }

    #[test]
    fn inline_shaders_compile_under_naga() {
        naga_check(Stage::Vertex, &wrap_vertex(VERTEX).unwrap()).unwrap();
        naga_check(Stage::Fragment, &wrap_fragment(FRAGMENT).unwrap()).unwrap();
    }

    #[test]
    fn naga_diagnostic_names_the_offending_symbol() {
        let source = "varying vec2 v_texCoord;\nvoid main() {\n    gl_FragColor = vec4(undefined_thing);\n}\n";
        let wrapped = wrap_fragment(source).unwrap();
        let log = naga_check(Stage::Fragment, &wrapped).unwrap_err();
        assert!(log.contains("undefined_thing"), "{log}");
    }
}
