//! WGSL shaders for point and line rendering
//!
//! Both pipelines read the same interleaved vertex layout (`vec3` position,
//! `vec4` colour) and the same per-draw uniform block.

/// Points are drawn as instanced squares: one instance per point, six
/// vertices per instance, offset in clip space so each square covers
/// `point_size` pixels regardless of depth.
pub const POINT_SHADER: &str = r#"
struct Uniforms {
    mvp: mat4x4<f32>,
    viewport: vec2<f32>,
    point_size: f32,
    _padding: f32,
};

@group(0) @binding(0) var<uniform> u: Uniforms;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_main(
    @builtin(vertex_index) corner: u32,
    @location(0) position: vec3<f32>,
    @location(1) color: vec4<f32>,
) -> VertexOutput {
    var corners = array<vec2<f32>, 6>(
        vec2<f32>(-0.5, -0.5),
        vec2<f32>(0.5, -0.5),
        vec2<f32>(0.5, 0.5),
        vec2<f32>(-0.5, -0.5),
        vec2<f32>(0.5, 0.5),
        vec2<f32>(-0.5, 0.5),
    );

    let clip = u.mvp * vec4<f32>(position, 1.0);
    let ndc_offset = corners[corner] * u.point_size * 2.0 / u.viewport;

    var out: VertexOutput;
    out.clip_position = vec4<f32>(clip.xy + ndc_offset * clip.w, clip.z, clip.w);
    out.color = color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;

/// Plain coloured line segments
pub const LINE_SHADER: &str = r#"
struct Uniforms {
    mvp: mat4x4<f32>,
    viewport: vec2<f32>,
    point_size: f32,
    _padding: f32,
};

@group(0) @binding(0) var<uniform> u: Uniforms;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_main(
    @location(0) position: vec3<f32>,
    @location(1) color: vec4<f32>,
) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = u.mvp * vec4<f32>(position, 1.0);
    out.color = color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;
