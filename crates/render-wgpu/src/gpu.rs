use crate::context::GpuContext;
use crate::mesh::{self, Vertex};
use crate::shaders;
use backdrop_common::{GeometryKind, MaterialKind, Viewport};
use backdrop_input::CursorGlow;
use backdrop_render::{PerspectiveCamera, RenderTarget};
use backdrop_scene::{Scene, geometry_spec, material_params};
use bytemuck::{Pod, Zeroable};
use std::ops::Range;
use wgpu::util::DeviceExt;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
/// Glow radius in pixels.
const GLOW_RADIUS: f32 = 200.0;
/// Peak opacity of the glow, not premultiplied.
const GLOW_ALPHA: f32 = 0.18;

/// Linear primary colour at glow opacity.
fn glow_color() -> [f32; 4] {
    let [r, g, b] = material_params(MaterialKind::Primary).base_color;
    [r, g, b, GLOW_ALPHA]
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    camera_position: [f32; 4],
    ambient: [f32; 4],
    light_position: [f32; 4],
    light_color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct InstanceData {
    model_0: [f32; 4],
    model_1: [f32; 4],
    model_2: [f32; 4],
    model_3: [f32; 4],
    color: [f32; 4],
    surface: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct GlowUniforms {
    center: [f32; 2],
    viewport: [f32; 2],
    color: [f32; 4],
    radius: f32,
    _pad: [f32; 3],
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, kind: GeometryKind) -> Self {
        let data = mesh::build(geometry_spec(kind));
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("shape_vertex_buffer"),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("shape_index_buffer"),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        tracing::debug!(
            ?kind,
            vertices = data.vertices.len(),
            indices = data.indices.len(),
            "mesh uploaded"
        );
        Self {
            vertex_buffer,
            index_buffer,
            index_count: data.indices.len() as u32,
        }
    }
}

/// Group per-shape instance data by geometry so each geometry is one draw.
///
/// Returns the packed instances and, per geometry slot, the instance range.
fn pack_instances(scene: &Scene, max_instances: usize) -> (Vec<InstanceData>, [Range<u32>; 3]) {
    let mut buckets: [Vec<InstanceData>; 3] = Default::default();
    let group = scene.group();
    for shape in scene.shapes().iter().take(max_instances) {
        let cols = group.world_matrix(shape).to_cols_array_2d();
        let params = material_params(shape.material);
        let [r, g, b] = params.base_color;
        buckets[shape.geometry.index()].push(InstanceData {
            model_0: cols[0],
            model_1: cols[1],
            model_2: cols[2],
            model_3: cols[3],
            color: [r, g, b, 1.0],
            surface: [params.metalness, params.roughness, 0.0, 0.0],
        });
    }

    let mut instances = Vec::with_capacity(max_instances);
    let mut ranges: [Range<u32>; 3] = Default::default();
    for (slot, bucket) in buckets.into_iter().enumerate() {
        let start = instances.len() as u32;
        instances.extend(bucket);
        ranges[slot] = start..instances.len() as u32;
    }
    (instances, ranges)
}

/// wgpu renderer for the backdrop: lit shapes, then the cursor glow.
pub struct WgpuRenderer {
    shape_pipeline: wgpu::RenderPipeline,
    glow_pipeline: wgpu::RenderPipeline,
    scene_uniform_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    glow_uniform_buffer: wgpu::Buffer,
    glow_bind_group: wgpu::BindGroup,
    meshes: [GpuMesh; 3],
    instance_buffer: wgpu::Buffer,
    max_instances: u32,
    depth_texture: wgpu::TextureView,
    depth_size: Viewport,
}

impl WgpuRenderer {
    /// Build pipelines and upload the shared meshes. The instance buffer holds
    /// `max_instances` shapes; the population never grows past that.
    pub fn new(ctx: &GpuContext, max_instances: u32) -> Self {
        let device = ctx.device();
        let surface_format = ctx.surface_format();

        let scene_uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniform_buffer"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let (scene_layout, scene_bind_group) =
            uniform_binding(device, "scene", &scene_uniform_buffer);

        let glow_uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("glow_uniform_buffer"),
            size: std::mem::size_of::<GlowUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let (glow_layout, glow_bind_group) = uniform_binding(device, "glow", &glow_uniform_buffer);

        // Shape pipeline
        let shape_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shape_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::SHAPE_SHADER.into()),
        });
        let shape_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("shape_pipeline_layout"),
            bind_group_layouts: &[&scene_layout],
            push_constant_ranges: &[],
        });
        let shape_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("shape_pipeline"),
            layout: Some(&shape_layout),
            vertex: wgpu::VertexState {
                module: &shape_shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<Vertex>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![
                            0 => Float32x3,
                            1 => Float32x3,
                        ],
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<InstanceData>() as u64,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &wgpu::vertex_attr_array![
                            2 => Float32x4,
                            3 => Float32x4,
                            4 => Float32x4,
                            5 => Float32x4,
                            6 => Float32x4,
                            7 => Float32x4,
                        ],
                    },
                ],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shape_shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        // Glow pipeline: no vertex buffers, no depth, blended over the shapes.
        let glow_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("glow_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::GLOW_SHADER.into()),
        });
        let glow_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("glow_pipeline_layout"),
            bind_group_layouts: &[&glow_layout],
            push_constant_ranges: &[],
        });
        let glow_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("glow_pipeline"),
            layout: Some(&glow_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &glow_shader,
                entry_point: Some("vs_glow"),
                compilation_options: Default::default(),
                buffers: &[],
            },
            fragment: Some(wgpu::FragmentState {
                module: &glow_shader,
                entry_point: Some("fs_glow"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let meshes = GeometryKind::ALL.map(|kind| GpuMesh::upload(device, kind));

        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_buffer"),
            size: (max_instances.max(1) as u64) * std::mem::size_of::<InstanceData>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let depth_size = ctx.output_size();
        let depth_texture = create_depth_texture(device, depth_size);

        Self {
            shape_pipeline,
            glow_pipeline,
            scene_uniform_buffer,
            scene_bind_group,
            glow_uniform_buffer,
            glow_bind_group,
            meshes,
            instance_buffer,
            max_instances,
            depth_texture,
            depth_size,
        }
    }

    /// Render one frame into `view`: clear to transparent, draw the shapes,
    /// then the glow if the pointer has moved at least once.
    pub fn render(
        &mut self,
        ctx: &GpuContext,
        view: &wgpu::TextureView,
        scene: &Scene,
        camera: &PerspectiveCamera,
        glow: &CursorGlow,
    ) {
        let device = ctx.device();
        let queue = ctx.queue();
        let size = ctx.output_size();
        if size != self.depth_size {
            self.depth_texture = create_depth_texture(device, size);
            self.depth_size = size;
        }

        let lighting = scene.lighting();
        let [ar, ag, ab] = lighting.ambient.radiance();
        let [lr, lg, lb] = lighting.point.radiance();
        queue.write_buffer(
            &self.scene_uniform_buffer,
            0,
            bytemuck::bytes_of(&SceneUniforms {
                view_proj: camera.view_projection().to_cols_array_2d(),
                camera_position: camera.position.extend(1.0).to_array(),
                ambient: [ar, ag, ab, 1.0],
                light_position: lighting.point.position.extend(1.0).to_array(),
                light_color: [lr, lg, lb, 1.0],
            }),
        );

        let (instances, ranges) = pack_instances(scene, self.max_instances as usize);
        if !instances.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }

        let glow_center = glow.position();
        if let Some(center) = glow_center {
            queue.write_buffer(
                &self.glow_uniform_buffer,
                0,
                bytemuck::bytes_of(&GlowUniforms {
                    center: center.to_array(),
                    viewport: [size.width as f32, size.height as f32],
                    color: glow_color(),
                    radius: GLOW_RADIUS,
                    _pad: [0.0; 3],
                }),
            );
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("shape_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_pipeline(&self.shape_pipeline);
            pass.set_bind_group(0, &self.scene_bind_group, &[]);
            pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
            for (mesh, range) in self.meshes.iter().zip(ranges) {
                if range.is_empty() {
                    continue;
                }
                pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                pass.draw_indexed(0..mesh.index_count, 0, range);
            }
        }

        if glow_center.is_some() {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("glow_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });
            pass.set_pipeline(&self.glow_pipeline);
            pass.set_bind_group(0, &self.glow_bind_group, &[]);
            pass.draw(0..6, 0..1);
        }

        queue.submit(std::iter::once(encoder.finish()));
    }
}

/// Bind group layout and bind group for a single uniform buffer at binding 0.
fn uniform_binding(
    device: &wgpu::Device,
    name: &str,
    buffer: &wgpu::Buffer,
) -> (wgpu::BindGroupLayout, wgpu::BindGroup) {
    let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(&format!("{name}_bind_group_layout")),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    });
    let group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(&format!("{name}_bind_group")),
        layout: &layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
    });
    (layout, group)
}

fn create_depth_texture(device: &wgpu::Device, size: Viewport) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth_texture"),
        size: wgpu::Extent3d {
            width: size.width.max(1),
            height: size.height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&Default::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use backdrop_common::PointerState;

    #[test]
    fn instance_layout_sizes() {
        assert_eq!(std::mem::size_of::<SceneUniforms>(), 128);
        assert_eq!(std::mem::size_of::<GlowUniforms>(), 48);
        assert_eq!(std::mem::size_of::<InstanceData>(), 96);
    }

    #[test]
    fn instances_grouped_by_geometry() {
        let scene = Scene::with_seed(42);
        let (instances, ranges) = pack_instances(&scene, 64);
        assert_eq!(instances.len(), scene.shapes().len());
        for kind in GeometryKind::ALL {
            let range = &ranges[kind.index()];
            assert_eq!(range.len(), scene.count_geometry(kind));
        }
        assert_eq!(ranges[0].start, 0);
        assert_eq!(ranges[0].end, ranges[1].start);
        assert_eq!(ranges[1].end, ranges[2].start);
        assert_eq!(ranges[2].end as usize, instances.len());
    }

    #[test]
    fn instances_carry_material_params() {
        let scene = Scene::with_seed(3);
        let (instances, _) = pack_instances(&scene, 64);
        let accent = material_params(MaterialKind::Accent);
        let accent_instances = instances
            .iter()
            .filter(|i| i.surface[1] == accent.roughness)
            .count();
        assert_eq!(accent_instances, scene.count_material(MaterialKind::Accent));
    }

    #[test]
    fn instances_include_group_tilt() {
        let mut scene = Scene::with_seed(8);
        scene.advance_frame(PointerState::new(1.0, 1.0));
        let (instances, ranges) = pack_instances(&scene, 64);
        let group = scene.group();
        let first = scene
            .shapes()
            .iter()
            .find(|s| s.geometry == GeometryKind::Icosahedron);
        if let Some(shape) = first {
            let expected = group.world_matrix(shape).to_cols_array_2d();
            let slot = ranges[0].start as usize;
            assert_eq!(instances[slot].model_3, expected[3]);
        }
    }

    #[test]
    fn pack_respects_capacity() {
        let scene = Scene::with_seed(42);
        let (instances, ranges) = pack_instances(&scene, 10);
        assert_eq!(instances.len(), 10);
        let total: usize = ranges.iter().map(|r| r.len()).sum();
        assert_eq!(total, 10);
    }

    #[test]
    fn glow_uses_linear_primary_colour() {
        let primary = material_params(MaterialKind::Primary);
        let [r, g, b, a] = glow_color();
        assert_eq!([r, g, b], primary.base_color);
        assert_eq!(a, GLOW_ALPHA);
        // 0x5F in sRGB is well below 0x5F / 255 once linearized.
        assert!(r < 0x5F as f32 / 255.0);
    }
}
