//! Star renderer: draws the star cloud as camera-facing quads.
//!
//! One instance per star, six vertices per instance. Stars are blended
//! additively and depth-tested against the rings without writing depth, so they
//! are drawn after the opaque geometry.

use bytemuck::{Pod, Zeroable};
use ringlet_render::DepthBuffer;
use wgpu::util::DeviceExt;

use crate::{StarPoint, StarfieldPose};

/// Per-star instance data.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct StarInstance {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl StarInstance {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x3,
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

impl From<&StarPoint> for StarInstance {
    fn from(star: &StarPoint) -> Self {
        Self {
            position: star.position.to_array(),
            color: star.color,
        }
    }
}

/// Uniform buffer for the star pass.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct StarUniform {
    pub view_proj: [[f32; 4]; 4],
    /// Bulk rotation of the cloud.
    pub model: [[f32; 4]; 4],
    /// Camera right vector in world space (w unused).
    pub camera_right: [f32; 4],
    /// Camera up vector in world space (w unused).
    pub camera_up: [f32; 4],
    /// x = sprite edge length in world units, y = opacity.
    pub params: [f32; 4],
}

impl StarUniform {
    /// Build the uniform for one frame.
    ///
    /// `view` is the world-to-camera matrix; its first two rows are the
    /// camera's right and up axes.
    pub fn new(view_proj: glam::Mat4, view: glam::Mat4, pose: &StarfieldPose, sprite_size: f32) -> Self {
        let right = view.row(0).truncate().normalize_or(glam::Vec3::X);
        let up = view.row(1).truncate().normalize_or(glam::Vec3::Y);
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            model: pose.model_matrix().to_cols_array_2d(),
            camera_right: right.extend(0.0).to_array(),
            camera_up: up.extend(0.0).to_array(),
            params: [sprite_size, pose.opacity, 0.0, 0.0],
        }
    }
}

/// WGSL shader source for the star pass.
pub const STAR_SHADER_SOURCE: &str = r#"
struct StarUniform {
    view_proj: mat4x4<f32>,
    model: mat4x4<f32>,
    camera_right: vec4<f32>,
    camera_up: vec4<f32>,
    params: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> stars: StarUniform;

struct StarInput {
    @location(0) position: vec3<f32>,
    @location(1) color: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec3<f32>,
};

@vertex
fn vs_star(@builtin(vertex_index) idx: u32, star: StarInput) -> VertexOutput {
    var corners = array<vec2<f32>, 6>(
        vec2<f32>(-0.5, -0.5),
        vec2<f32>(0.5, -0.5),
        vec2<f32>(-0.5, 0.5),
        vec2<f32>(-0.5, 0.5),
        vec2<f32>(0.5, -0.5),
        vec2<f32>(0.5, 0.5),
    );
    let corner = corners[idx];

    let center = (stars.model * vec4<f32>(star.position, 1.0)).xyz;
    let offset = (stars.camera_right.xyz * corner.x + stars.camera_up.xyz * corner.y) * stars.params.x;

    var out: VertexOutput;
    out.clip_position = stars.view_proj * vec4<f32>(center + offset, 1.0);
    out.color = star.color;
    return out;
}

@fragment
fn fs_star(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(in.color, stars.params.y);
}
"#;

/// World-space sprite edge length that reproduces screen-space point sizing.
///
/// A point of `size` pixels-per-unit-distance covers the same screen area as a
/// quad of `size * tan(fov_y / 2)` world units at any depth.
pub fn sprite_world_size(size: f32, fov_y_radians: f32) -> f32 {
    size * (fov_y_radians * 0.5).tan()
}

/// GPU star renderer.
pub struct StarRenderer {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    instance_buffer: wgpu::Buffer,
    instance_count: u32,
}

impl StarRenderer {
    /// Create the pipeline and upload the star cloud.
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat, stars: &[StarPoint]) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("star-shader"),
            source: wgpu::ShaderSource::Wgsl(STAR_SHADER_SOURCE.into()),
        });

        let uniform_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("star-uniform-bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: std::num::NonZeroU64::new(
                        std::mem::size_of::<StarUniform>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("star-pipeline-layout"),
            bind_group_layouts: &[&uniform_bgl],
            immediate_size: 0,
        });

        let additive = wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::SrcAlpha,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
            alpha: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::Zero,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
        };

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("star-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_star"),
                buffers: &[StarInstance::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DepthBuffer::FORMAT,
                depth_write_enabled: false,
                depth_compare: DepthBuffer::COMPARE_FUNCTION,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_star"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(additive),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        let instances = instance_data(stars);
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("star-instances"),
            contents: bytemuck::cast_slice(&instances),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let uniform = StarUniform::new(
            glam::Mat4::IDENTITY,
            glam::Mat4::IDENTITY,
            &StarfieldPose::default(),
            1.0,
        );
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("star-uniform"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("star-uniform-bg"),
            layout: &uniform_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        log::info!("Star renderer initialized: {} stars", stars.len());

        Self {
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            instance_buffer,
            instance_count: stars.len() as u32,
        }
    }

    /// Upload this frame's camera and starfield pose.
    pub fn update(&self, queue: &wgpu::Queue, uniform: &StarUniform) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniform));
    }

    /// Number of stars drawn per frame.
    pub fn instance_count(&self) -> u32 {
        self.instance_count
    }

    /// Draw the stars. Must follow the opaque geometry in the same pass.
    pub fn render(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.instance_count == 0 {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.uniform_bind_group, &[]);
        pass.set_vertex_buffer(0, self.instance_buffer.slice(..));
        pass.draw(0..6, 0..self.instance_count);
    }
}

/// Per-star instance data. An empty buffer cannot be bound, so an empty
/// cloud still gets one zeroed slot; it is never drawn.
fn instance_data(stars: &[StarPoint]) -> Vec<StarInstance> {
    if stars.is_empty() {
        vec![StarInstance::zeroed()]
    } else {
        stars.iter().map(StarInstance::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StarfieldGenerator;

    #[test]
    fn test_star_uniform_size() {
        assert_eq!(std::mem::size_of::<StarUniform>(), 176);
    }

    #[test]
    fn test_instance_layout_stride() {
        let layout = StarInstance::layout();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.step_mode, wgpu::VertexStepMode::Instance);
        assert_eq!(layout.attributes.len(), 2);
        assert_eq!(layout.attributes[1].offset, 12);
    }

    #[test]
    fn test_sprite_world_size_at_45_degrees() {
        let size = sprite_world_size(2.0, 45f32.to_radians());
        assert!((size - 2.0 * (22.5f32).to_radians().tan()).abs() < 1e-6);
        assert!(size > 0.8 && size < 0.85);
    }

    #[test]
    fn test_uniform_carries_pose() {
        let pose = StarfieldPose::at_phase(1.0);
        let uniform = StarUniform::new(glam::Mat4::IDENTITY, glam::Mat4::IDENTITY, &pose, 0.5);
        assert_eq!(uniform.params[0], 0.5);
        assert_eq!(uniform.params[1], pose.opacity);
        assert_eq!(uniform.model, pose.model_matrix().to_cols_array_2d());
    }

    #[test]
    fn test_uniform_billboard_axes_follow_view() {
        let view = glam::Mat4::look_at_rh(glam::Vec3::new(10.0, 0.0, 0.0), glam::Vec3::ZERO, glam::Vec3::Y);
        let uniform = StarUniform::new(glam::Mat4::IDENTITY, view, &StarfieldPose::default(), 1.0);
        let right = glam::Vec3::from_slice(&uniform.camera_right[..3]);
        let up = glam::Vec3::from_slice(&uniform.camera_up[..3]);
        // Looking down -X, right is -Z.
        assert!((right - glam::Vec3::NEG_Z).length() < 1e-5);
        assert!((up - glam::Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn test_instance_from_star() {
        let stars = StarfieldGenerator::new(1, 1).generate();
        let instance = StarInstance::from(&stars[0]);
        assert_eq!(instance.position, stars[0].position.to_array());
        assert_eq!(instance.color, stars[0].color);
    }

    #[test]
    fn test_empty_cloud_keeps_one_zeroed_slot() {
        let data = instance_data(&[]);
        assert_eq!(data.len(), 1);
        assert!(bytemuck::cast_slice::<StarInstance, u8>(&data).iter().all(|b| *b == 0));

        let stars = StarfieldGenerator::new(5, 8).generate();
        assert_eq!(instance_data(&stars).len(), 8);
    }

    #[test]
    fn test_renderer_creation() {
        let Some((device, _queue)) = ringlet_render::headless_device_queue() else {
            return;
        };
        let stars = StarfieldGenerator::new(3, 64).generate();
        let renderer = StarRenderer::new(&device, wgpu::TextureFormat::Bgra8UnormSrgb, &stars);
        assert_eq!(renderer.instance_count(), 64);
    }

    #[test]
    fn test_renderer_accepts_empty_cloud() {
        let Some((device, _queue)) = ringlet_render::headless_device_queue() else {
            return;
        };
        let renderer = StarRenderer::new(&device, wgpu::TextureFormat::Bgra8UnormSrgb, &[]);
        assert_eq!(renderer.instance_count(), 0);
    }
}
