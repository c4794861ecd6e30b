//! Texture upload with GPU mipmap generation.
//!
//! [`TextureUploader`] turns decoded RGBA8 images into sampled GPU textures.
//! Mip chains are produced on the GPU with a fullscreen blit per level; one
//! blit pipeline is built per target format and reused afterwards.

use std::collections::HashMap;

use ringlet_materials::{DecodedTexture, MapSlot};

/// A sampled GPU texture and its default view.
pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub dimensions: (u32, u32),
    pub format: wgpu::TextureFormat,
    pub mip_level_count: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("texture dimensions must be non-zero, got {width}x{height}")]
    ZeroDimensions { width: u32, height: u32 },

    #[error("texture data is {actual} bytes, expected {expected} for {width}x{height} RGBA8")]
    DataSizeMismatch {
        actual: usize,
        expected: usize,
        width: u32,
        height: u32,
    },
}

/// Number of levels in a full mip chain for the given dimensions.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// Albedo holds color and is stored as sRGB; the other maps hold linear data.
pub fn format_for_slot(slot: MapSlot) -> wgpu::TextureFormat {
    if slot.is_color() {
        wgpu::TextureFormat::Rgba8UnormSrgb
    } else {
        wgpu::TextureFormat::Rgba8Unorm
    }
}

const BLIT_SHADER_SOURCE: &str = r#"
@group(0) @binding(0) var src_texture: texture_2d<f32>;
@group(0) @binding(1) var src_sampler: sampler;

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_blit(@builtin(vertex_index) idx: u32) -> VertexOutput {
    let uv = vec2<f32>(f32((idx << 1u) & 2u), f32(idx & 2u));
    var out: VertexOutput;
    out.position = vec4<f32>(uv * 2.0 - 1.0, 0.0, 1.0);
    out.uv = vec2<f32>(uv.x, 1.0 - uv.y);
    return out;
}

@fragment
fn fs_blit(in: VertexOutput) -> @location(0) vec4<f32> {
    return textureSample(src_texture, src_sampler, in.uv);
}
"#;

/// Uploads textures and owns the shared material sampler.
pub struct TextureUploader {
    sampler: wgpu::Sampler,
    blit_shader: wgpu::ShaderModule,
    blit_layout: wgpu::BindGroupLayout,
    blit_pipeline_layout: wgpu::PipelineLayout,
    blit_sampler: wgpu::Sampler,
    blit_pipelines: HashMap<wgpu::TextureFormat, wgpu::RenderPipeline>,
}

impl TextureUploader {
    pub fn new(device: &wgpu::Device) -> Self {
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("material-sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Linear,
            ..Default::default()
        });

        let blit_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("mip-blit-layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let blit_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("mip-blit-shader"),
            source: wgpu::ShaderSource::Wgsl(BLIT_SHADER_SOURCE.into()),
        });

        let blit_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("mip-blit-pipeline-layout"),
            bind_group_layouts: &[&blit_layout],
            immediate_size: 0,
        });

        let blit_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("mip-blit-sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Self {
            sampler,
            blit_shader,
            blit_layout,
            blit_pipeline_layout,
            blit_sampler,
            blit_pipelines: HashMap::new(),
        }
    }

    /// Linear, mipmapped, repeating sampler used by every material map.
    pub fn sampler(&self) -> &wgpu::Sampler {
        &self.sampler
    }

    /// Upload a decoded map with a full mip chain.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        image: &DecodedTexture,
        format: wgpu::TextureFormat,
    ) -> Result<GpuTexture, TextureError> {
        self.upload_rgba(device, queue, label, &image.rgba, image.width, image.height, format)
    }

    /// A 1x1 texture holding `texel`, used where a set has no map.
    pub fn solid(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        texel: [u8; 4],
        format: wgpu::TextureFormat,
    ) -> GpuTexture {
        let texture = create_texture(device, label, 1, 1, format, 1);
        write_level0(queue, &texture, &texel, 1, 1);
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        GpuTexture {
            texture,
            view,
            dimensions: (1, 1),
            format,
            mip_level_count: 1,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn upload_rgba(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        data: &[u8],
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
    ) -> Result<GpuTexture, TextureError> {
        validate(data, width, height)?;

        let mip_levels = mip_level_count(width, height);
        let texture = create_texture(device, label, width, height, format, mip_levels);
        write_level0(queue, &texture, data, width, height);
        if mip_levels > 1 {
            self.generate_mipmaps(device, queue, &texture, format, mip_levels);
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        log::debug!("Uploaded texture '{label}' ({width}x{height}, {mip_levels} mips)");
        Ok(GpuTexture {
            texture,
            view,
            dimensions: (width, height),
            format,
            mip_level_count: mip_levels,
        })
    }

    fn blit_pipeline(
        &mut self,
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
    ) -> &wgpu::RenderPipeline {
        self.blit_pipelines.entry(format).or_insert_with(|| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("mip-blit-pipeline"),
                layout: Some(&self.blit_pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &self.blit_shader,
                    entry_point: Some("vs_blit"),
                    buffers: &[],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                primitive: wgpu::PrimitiveState::default(),
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                fragment: Some(wgpu::FragmentState {
                    module: &self.blit_shader,
                    entry_point: Some("fs_blit"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format,
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                multiview_mask: None,
                cache: None,
            })
        })
    }

    fn generate_mipmaps(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        texture: &wgpu::Texture,
        format: wgpu::TextureFormat,
        mip_count: u32,
    ) {
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("mip-encoder"),
        });

        // Built up front so the pipeline borrow does not overlap the loop.
        let views: Vec<wgpu::TextureView> = (0..mip_count)
            .map(|level| {
                texture.create_view(&wgpu::TextureViewDescriptor {
                    base_mip_level: level,
                    mip_level_count: Some(1),
                    ..Default::default()
                })
            })
            .collect();
        let bind_groups: Vec<wgpu::BindGroup> = views[..views.len() - 1]
            .iter()
            .map(|src| {
                device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("mip-blit-bind-group"),
                    layout: &self.blit_layout,
                    entries: &[
                        wgpu::BindGroupEntry {
                            binding: 0,
                            resource: wgpu::BindingResource::TextureView(src),
                        },
                        wgpu::BindGroupEntry {
                            binding: 1,
                            resource: wgpu::BindingResource::Sampler(&self.blit_sampler),
                        },
                    ],
                })
            })
            .collect();

        let pipeline = self.blit_pipeline(device, format);
        for (dst, bind_group) in views[1..].iter().zip(&bind_groups) {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("mip-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: dst,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });
            pass.set_pipeline(pipeline);
            pass.set_bind_group(0, bind_group, &[]);
            pass.draw(0..3, 0..1);
        }

        queue.submit(std::iter::once(encoder.finish()));
    }
}

fn create_texture(
    device: &wgpu::Device,
    label: &str,
    width: u32,
    height: u32,
    format: wgpu::TextureFormat,
    mip_level_count: u32,
) -> wgpu::Texture {
    device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::TEXTURE_BINDING
            | wgpu::TextureUsages::COPY_DST
            | wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    })
}

fn write_level0(queue: &wgpu::Queue, texture: &wgpu::Texture, data: &[u8], width: u32, height: u32) {
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        data,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(width * 4),
            rows_per_image: None,
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
}

fn validate(data: &[u8], width: u32, height: u32) -> Result<(), TextureError> {
    if width == 0 || height == 0 {
        return Err(TextureError::ZeroDimensions { width, height });
    }
    let expected = width as usize * height as usize * 4;
    if data.len() != expected {
        return Err(TextureError::DataSizeMismatch {
            actual: data.len(),
            expected,
            width,
            height,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::headless_device_queue;

    #[test]
    fn test_mip_level_count() {
        assert_eq!(mip_level_count(1, 1), 1);
        assert_eq!(mip_level_count(2, 2), 2);
        assert_eq!(mip_level_count(1024, 1024), 11);
        assert_eq!(mip_level_count(1024, 512), 11);
        assert_eq!(mip_level_count(300, 7), 9);
    }

    #[test]
    fn test_slot_formats() {
        assert_eq!(
            format_for_slot(MapSlot::Albedo),
            wgpu::TextureFormat::Rgba8UnormSrgb
        );
        for slot in [
            MapSlot::AmbientOcclusion,
            MapSlot::Normal,
            MapSlot::Roughness,
            MapSlot::Metalness,
            MapSlot::Displacement,
        ] {
            assert_eq!(format_for_slot(slot), wgpu::TextureFormat::Rgba8Unorm);
        }
    }

    #[test]
    fn test_validate_rejects_bad_input() {
        assert!(matches!(
            validate(&[], 0, 4),
            Err(TextureError::ZeroDimensions { width: 0, height: 4 })
        ));
        assert!(matches!(
            validate(&[0; 15], 2, 2),
            Err(TextureError::DataSizeMismatch {
                actual: 15,
                expected: 16,
                ..
            })
        ));
        assert!(validate(&[0; 16], 2, 2).is_ok());
    }

    #[test]
    fn test_upload_builds_mip_chain() {
        let Some((device, queue)) = headless_device_queue() else {
            return;
        };
        let mut uploader = TextureUploader::new(&device);
        let image = DecodedTexture {
            width: 8,
            height: 4,
            rgba: vec![200; 8 * 4 * 4],
        };
        let texture = uploader
            .upload(&device, &queue, "albedo", &image, wgpu::TextureFormat::Rgba8UnormSrgb)
            .unwrap();
        assert_eq!(texture.dimensions, (8, 4));
        assert_eq!(texture.mip_level_count, 4);
        assert_eq!(texture.texture.mip_level_count(), 4);
    }

    #[test]
    fn test_solid_texture_is_single_level() {
        let Some((device, queue)) = headless_device_queue() else {
            return;
        };
        let uploader = TextureUploader::new(&device);
        let texture = uploader.solid(
            &device,
            &queue,
            "neutral-normal",
            MapSlot::Normal.neutral_texel(),
            wgpu::TextureFormat::Rgba8Unorm,
        );
        assert_eq!(texture.dimensions, (1, 1));
        assert_eq!(texture.mip_level_count, 1);
    }
}
