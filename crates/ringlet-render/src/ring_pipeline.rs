//! Textured PBR pipeline for the rings.
//!
//! Bind groups:
//! - group 0: camera (binding 0) and lights (binding 1), shared per frame
//! - group 1: material uniform, six maps, and the material sampler
//! - group 2: per-ring model and normal matrices
//!
//! Every material binds all six maps. Maps a set does not provide are bound
//! to 1x1 neutral textures so the shader never branches on missing data.

use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use ringlet_materials::{MapSlot, MaterialKind, MaterialSet, MaterialUniform};

use crate::buffer::{BufferAllocator, MeshBuffer, RingVertex};
use crate::depth::DepthBuffer;
use crate::texture::{GpuTexture, TextureError, TextureUploader, format_for_slot};

/// Per-ring transform data, 128 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ModelUniform {
    pub model: [[f32; 4]; 4],
    /// Inverse transpose of `model`, for transforming normals.
    pub normal_matrix: [[f32; 4]; 4],
}

impl ModelUniform {
    pub fn from_transform(model: Mat4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: model.inverse().transpose().to_cols_array_2d(),
        }
    }
}

impl Default for ModelUniform {
    fn default() -> Self {
        Self::from_transform(Mat4::IDENTITY)
    }
}

/// The ring render pipeline and its bind group layouts.
pub struct RingPipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub frame_layout: wgpu::BindGroupLayout,
    pub material_layout: wgpu::BindGroupLayout,
    pub model_layout: wgpu::BindGroupLayout,
}

fn uniform_entry(binding: u32, visibility: wgpu::ShaderStages, size: u64) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: NonZeroU64::new(size),
        },
        count: None,
    }
}

fn texture_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        // The displacement map is read in the vertex stage.
        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
        ty: wgpu::BindingType::Texture {
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
            view_dimension: wgpu::TextureViewDimension::D2,
            multisampled: false,
        },
        count: None,
    }
}

/// Binding index of a map within the material group.
fn map_binding(slot: MapSlot) -> u32 {
    1 + MapSlot::ALL.iter().position(|s| *s == slot).unwrap_or(0) as u32
}

const SAMPLER_BINDING: u32 = 1 + MapSlot::ALL.len() as u32;

impl RingPipeline {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("ring-frame-bgl"),
            entries: &[
                uniform_entry(
                    0,
                    wgpu::ShaderStages::VERTEX_FRAGMENT,
                    std::mem::size_of::<crate::camera::CameraUniform>() as u64,
                ),
                uniform_entry(
                    1,
                    wgpu::ShaderStages::FRAGMENT,
                    std::mem::size_of::<crate::lights::LightsUniform>() as u64,
                ),
            ],
        });

        let mut material_entries = vec![uniform_entry(
            0,
            wgpu::ShaderStages::VERTEX_FRAGMENT,
            std::mem::size_of::<MaterialUniform>() as u64,
        )];
        material_entries.extend(MapSlot::ALL.iter().map(|slot| texture_entry(map_binding(*slot))));
        material_entries.push(wgpu::BindGroupLayoutEntry {
            binding: SAMPLER_BINDING,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
            count: None,
        });
        let material_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("ring-material-bgl"),
            entries: &material_entries,
        });

        let model_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("ring-model-bgl"),
            entries: &[uniform_entry(
                0,
                wgpu::ShaderStages::VERTEX,
                std::mem::size_of::<ModelUniform>() as u64,
            )],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("ring-shader"),
            source: wgpu::ShaderSource::Wgsl(RING_SHADER_SOURCE.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("ring-pipeline-layout"),
            bind_group_layouts: &[&frame_layout, &material_layout, &model_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("ring-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_ring"),
                buffers: &[RingVertex::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(DepthBuffer::stencil_state(true)),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_ring"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        Self {
            pipeline,
            frame_layout,
            material_layout,
            model_layout,
        }
    }

    pub fn create_frame_bind_group(
        &self,
        device: &wgpu::Device,
        camera: &wgpu::Buffer,
        lights: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("ring-frame-bind-group"),
            layout: &self.frame_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: lights.as_entire_binding(),
                },
            ],
        })
    }

    pub fn create_model_bind_group(&self, device: &wgpu::Device, model: &wgpu::Buffer) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("ring-model-bind-group"),
            layout: &self.model_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: model.as_entire_binding(),
            }],
        })
    }

    /// Draw one ring mesh with the given material and transform.
    pub fn draw(
        &self,
        render_pass: &mut wgpu::RenderPass<'_>,
        frame: &wgpu::BindGroup,
        material: &GpuMaterial,
        model: &wgpu::BindGroup,
        mesh: &MeshBuffer,
    ) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, frame, &[]);
        render_pass.set_bind_group(1, &material.bind_group, &[]);
        render_pass.set_bind_group(2, model, &[]);
        mesh.bind(render_pass);
        mesh.draw(render_pass);
    }
}

/// A material set resident on the GPU.
pub struct GpuMaterial {
    /// `None` for the untextured placeholder.
    pub kind: Option<MaterialKind>,
    pub uniform_buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    textures: Vec<GpuTexture>,
}

impl GpuMaterial {
    /// Upload every map of `set`, filling absent maps with neutral textures.
    pub fn from_set(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        pipeline: &RingPipeline,
        uploader: &mut TextureUploader,
        set: &MaterialSet,
    ) -> Result<Self, TextureError> {
        let kind = set.kind();
        let mut textures = Vec::with_capacity(MapSlot::ALL.len());
        for slot in MapSlot::ALL {
            let label = format!("{kind}-{slot}");
            let texture = match set.map(slot) {
                Some(image) => uploader.upload(device, queue, &label, image, format_for_slot(slot))?,
                None => uploader.solid(device, queue, &label, slot.neutral_texel(), format_for_slot(slot)),
            };
            textures.push(texture);
        }
        log::info!("Material '{kind}' uploaded to the GPU");
        Ok(Self::assemble(
            device,
            pipeline,
            uploader,
            Some(kind),
            &set.uniform(),
            textures,
        ))
    }

    /// An untextured material of a single linear color.
    pub fn placeholder(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        pipeline: &RingPipeline,
        uploader: &TextureUploader,
        color: [f32; 3],
    ) -> Self {
        let textures = MapSlot::ALL
            .iter()
            .map(|slot| {
                uploader.solid(
                    device,
                    queue,
                    &format!("placeholder-{slot}"),
                    slot.neutral_texel(),
                    format_for_slot(*slot),
                )
            })
            .collect();
        Self::assemble(
            device,
            pipeline,
            uploader,
            None,
            &MaterialUniform::placeholder(color),
            textures,
        )
    }

    fn assemble(
        device: &wgpu::Device,
        pipeline: &RingPipeline,
        uploader: &TextureUploader,
        kind: Option<MaterialKind>,
        uniform: &MaterialUniform,
        textures: Vec<GpuTexture>,
    ) -> Self {
        let uniform_buffer = BufferAllocator::new(device).create_uniform("material-uniform", uniform);

        let mut entries = vec![wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }];
        entries.extend(MapSlot::ALL.iter().zip(&textures).map(|(slot, texture)| {
            wgpu::BindGroupEntry {
                binding: map_binding(*slot),
                resource: wgpu::BindingResource::TextureView(&texture.view),
            }
        }));
        entries.push(wgpu::BindGroupEntry {
            binding: SAMPLER_BINDING,
            resource: wgpu::BindingResource::Sampler(uploader.sampler()),
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("ring-material-bind-group"),
            layout: &pipeline.material_layout,
            entries: &entries,
        });

        Self {
            kind,
            uniform_buffer,
            bind_group,
            textures,
        }
    }

    pub fn texture(&self, slot: MapSlot) -> Option<&GpuTexture> {
        MapSlot::ALL
            .iter()
            .position(|s| *s == slot)
            .and_then(|i| self.textures.get(i))
    }
}

/// WGSL for the rings: vertex displacement, tangent-space normal mapping,
/// and Cook-Torrance shading under two point lights plus ambient.
pub const RING_SHADER_SOURCE: &str = r#"
const PI: f32 = 3.14159265359;
const MIN_ROUGHNESS: f32 = 0.0525;

struct CameraUniform {
    view_proj: mat4x4<f32>,
    position: vec4<f32>,
};

struct PointLight {
    position_cutoff: vec4<f32>,
    color_intensity: vec4<f32>,
    _padding: vec4<f32>,
};

struct Lights {
    point_lights: array<PointLight, 2>,
    ambient: vec4<f32>,
};

struct Material {
    base_color: vec4<f32>,
    // x = metalness, y = roughness, z = displacement scale
    scalars: vec4<f32>,
    // flags: x = albedo, y = ao, z = roughness, w = metalness
    surface_maps: vec4<f32>,
    // flags: x = normal, y = displacement
    geometry_maps: vec4<f32>,
};

struct Model {
    model: mat4x4<f32>,
    normal_matrix: mat4x4<f32>,
};

@group(0) @binding(0) var<uniform> camera: CameraUniform;
@group(0) @binding(1) var<uniform> lights: Lights;

@group(1) @binding(0) var<uniform> material: Material;
@group(1) @binding(1) var albedo_map: texture_2d<f32>;
@group(1) @binding(2) var ao_map: texture_2d<f32>;
@group(1) @binding(3) var normal_map: texture_2d<f32>;
@group(1) @binding(4) var roughness_map: texture_2d<f32>;
@group(1) @binding(5) var metalness_map: texture_2d<f32>;
@group(1) @binding(6) var displacement_map: texture_2d<f32>;
@group(1) @binding(7) var material_sampler: sampler;

@group(2) @binding(0) var<uniform> model: Model;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) tangent: vec4<f32>,
    @location(3) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) tangent: vec4<f32>,
    @location(3) uv: vec2<f32>,
};

fn distribution_ggx(n_dot_h: f32, roughness: f32) -> f32 {
    let a = roughness * roughness;
    let a2 = a * a;
    let denom = n_dot_h * n_dot_h * (a2 - 1.0) + 1.0;
    return a2 / (PI * denom * denom);
}

fn geometry_schlick_ggx(n_dot: f32, roughness: f32) -> f32 {
    let r = roughness + 1.0;
    let k = (r * r) / 8.0;
    return n_dot / (n_dot * (1.0 - k) + k);
}

fn geometry_smith(n_dot_v: f32, n_dot_l: f32, roughness: f32) -> f32 {
    return geometry_schlick_ggx(n_dot_v, roughness) * geometry_schlick_ggx(n_dot_l, roughness);
}

fn fresnel_schlick(cos_theta: f32, f0: vec3<f32>) -> vec3<f32> {
    return f0 + (1.0 - f0) * pow(clamp(1.0 - cos_theta, 0.0, 1.0), 5.0);
}

fn evaluate_brdf(
    light_dir: vec3<f32>,
    view_dir: vec3<f32>,
    normal: vec3<f32>,
    albedo: vec3<f32>,
    metallic: f32,
    roughness: f32,
) -> vec3<f32> {
    let half_vec = normalize(view_dir + light_dir);

    let n_dot_l = max(dot(normal, light_dir), 0.0);
    let n_dot_v = max(dot(normal, view_dir), 0.0);
    let n_dot_h = max(dot(normal, half_vec), 0.0);
    let h_dot_v = max(dot(half_vec, view_dir), 0.0);

    let f0 = mix(vec3<f32>(0.04), albedo, metallic);

    let d = distribution_ggx(n_dot_h, roughness);
    let g = geometry_smith(n_dot_v, n_dot_l, roughness);
    let f = fresnel_schlick(h_dot_v, f0);

    let specular = d * g * f / (4.0 * n_dot_v * n_dot_l + 0.0001);
    let k_d = (vec3<f32>(1.0) - f) * (1.0 - metallic);
    let diffuse = k_d * albedo / PI;

    return (diffuse + specular) * n_dot_l;
}

// Inverse square, windowed to zero at the cutoff distance.
fn point_light_falloff(dist: f32, cutoff: f32) -> f32 {
    let inverse_square = 1.0 / max(dist * dist, 0.01);
    if cutoff <= 0.0 {
        return inverse_square;
    }
    let ratio = dist / cutoff;
    let window = saturate(1.0 - ratio * ratio * ratio * ratio);
    return inverse_square * window * window;
}

@vertex
fn vs_ring(in: VertexInput) -> VertexOutput {
    let height = textureSampleLevel(displacement_map, material_sampler, in.uv, 0.0).r;
    let offset = height * material.scalars.z * material.geometry_maps.y;
    let local = in.position + in.normal * offset;

    let world = model.model * vec4<f32>(local, 1.0);

    var out: VertexOutput;
    out.clip_position = camera.view_proj * world;
    out.world_position = world.xyz;
    out.normal = normalize((model.normal_matrix * vec4<f32>(in.normal, 0.0)).xyz);
    out.tangent = vec4<f32>(normalize((model.model * vec4<f32>(in.tangent.xyz, 0.0)).xyz), in.tangent.w);
    out.uv = in.uv;
    return out;
}

@fragment
fn fs_ring(in: VertexOutput) -> @location(0) vec4<f32> {
    // Sample everything up front so sampling stays in uniform control flow.
    let albedo_texel = textureSample(albedo_map, material_sampler, in.uv);
    let ao_texel = textureSample(ao_map, material_sampler, in.uv);
    let normal_texel = textureSample(normal_map, material_sampler, in.uv);
    let roughness_texel = textureSample(roughness_map, material_sampler, in.uv);
    let metalness_texel = textureSample(metalness_map, material_sampler, in.uv);

    let albedo = material.base_color.rgb * mix(vec3<f32>(1.0), albedo_texel.rgb, material.surface_maps.x);
    let ao = mix(1.0, ao_texel.r, material.surface_maps.y);
    let roughness = max(
        material.scalars.y * mix(1.0, roughness_texel.g, material.surface_maps.z),
        MIN_ROUGHNESS,
    );
    let metallic = material.scalars.x * mix(1.0, metalness_texel.b, material.surface_maps.w);

    // Tangent frame, re-orthogonalized after interpolation.
    let n = normalize(in.normal);
    let t = normalize(in.tangent.xyz - n * dot(n, in.tangent.xyz));
    let b = cross(n, t) * in.tangent.w;
    let mapped = normalize(mat3x3<f32>(t, b, n) * (normal_texel.xyz * 2.0 - 1.0));
    let normal = normalize(mix(n, mapped, material.geometry_maps.x));

    let view_dir = normalize(camera.position.xyz - in.world_position);

    var color = vec3<f32>(0.0);
    for (var i = 0u; i < 2u; i++) {
        let light = lights.point_lights[i];
        let to_light = light.position_cutoff.xyz - in.world_position;
        let dist = length(to_light);
        let falloff = point_light_falloff(dist, light.position_cutoff.w);
        color += evaluate_brdf(normalize(to_light), view_dir, normal, albedo, metallic, roughness)
               * light.color_intensity.rgb * light.color_intensity.w * falloff;
    }

    let diffuse_color = albedo * (1.0 - metallic);
    color += lights.ambient.rgb * diffuse_color / PI * ao;

    return vec4<f32>(color, 1.0);
}
"#;
