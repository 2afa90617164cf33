/// WGSL shader for the lit, instanced shapes.
pub const SHAPE_SHADER: &str = r#"
struct SceneUniforms {
    view_proj: mat4x4<f32>,
    camera_position: vec4<f32>,
    ambient: vec4<f32>,
    light_position: vec4<f32>,
    light_color: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> scene: SceneUniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct InstanceInput {
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
    @location(6) color: vec4<f32>,
    // x = metalness, y = roughness
    @location(7) surface: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) color: vec4<f32>,
    @location(3) surface: vec4<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    let world_pos = model * vec4<f32>(vertex.position, 1.0);

    var out: VertexOutput;
    out.clip_position = scene.view_proj * world_pos;
    out.world_position = world_pos.xyz;
    out.world_normal = (model * vec4<f32>(vertex.normal, 0.0)).xyz;
    out.color = instance.color;
    out.surface = instance.surface;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let metalness = in.surface.x;
    let roughness = in.surface.y;

    let n = normalize(in.world_normal);
    let l = normalize(scene.light_position.xyz - in.world_position);
    let v = normalize(scene.camera_position.xyz - in.world_position);
    let h = normalize(l + v);

    let albedo = in.color.rgb * (1.0 - metalness);
    let specular_color = mix(vec3<f32>(0.04), in.color.rgb, metalness);

    let diffuse = max(dot(n, l), 0.0);
    let shininess = mix(128.0, 4.0, roughness);
    let specular = pow(max(dot(n, h), 0.0), shininess) * (1.0 - roughness);

    let lit = albedo * scene.ambient.rgb
        + (albedo * diffuse + specular_color * specular) * scene.light_color.rgb;
    return vec4<f32>(lit, in.color.a);
}
"#;

/// WGSL shader for the cursor glow: a screen-space quad with radial falloff.
pub const GLOW_SHADER: &str = r#"
struct GlowUniforms {
    // Pixels, origin top-left.
    center: vec2<f32>,
    viewport: vec2<f32>,
    color: vec4<f32>,
    radius: f32,
};

@group(0) @binding(0)
var<uniform> glow: GlowUniforms;

struct GlowOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) offset: vec2<f32>,
};

@vertex
fn vs_glow(@builtin(vertex_index) index: u32) -> GlowOutput {
    var corners = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>( 1.0,  1.0),
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0,  1.0),
        vec2<f32>(-1.0,  1.0),
    );
    let corner = corners[index];
    let pixel = glow.center + corner * glow.radius;
    let ndc = vec2<f32>(
        pixel.x / glow.viewport.x * 2.0 - 1.0,
        1.0 - pixel.y / glow.viewport.y * 2.0,
    );

    var out: GlowOutput;
    out.clip_position = vec4<f32>(ndc, 0.0, 1.0);
    out.offset = corner;
    return out;
}

@fragment
fn fs_glow(in: GlowOutput) -> @location(0) vec4<f32> {
    let falloff = 1.0 - smoothstep(0.0, 1.0, length(in.offset));
    return vec4<f32>(glow.color.rgb, glow.color.a * falloff * falloff);
}
"#;
