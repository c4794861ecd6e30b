//! wgpu rendering for ringlet: device and surface setup, the reverse-Z camera
//! and depth buffer, mesh and texture upload, and the PBR ring pipeline.

pub mod buffer;
pub mod camera;
pub mod depth;
pub mod gpu;
pub mod lights;
pub mod pass;
pub mod ring_pipeline;
pub mod texture;

pub use buffer::{BufferAllocator, MeshBuffer, RingVertex};
pub use camera::{Camera, CameraUniform};
pub use depth::DepthBuffer;
pub use gpu::{
    RenderContext, RenderContextError, SurfaceError, headless_device_queue,
    init_render_context_blocking,
};
pub use lights::{LightsUniform, MAX_POINT_LIGHTS, PointLightGpu, point_light_falloff};
pub use pass::{RenderPassBuilder, SPACE_BLACK};
pub use ring_pipeline::{GpuMaterial, ModelUniform, RING_SHADER_SOURCE, RingPipeline};
pub use texture::{GpuTexture, TextureError, TextureUploader, format_for_slot, mip_level_count};
