//! GPU resources for the scene and the per-frame draw.
//!
//! Owns everything wgpu-side: the depth buffer, the ring pipeline with one
//! mesh and model uniform per ring, the placeholder and catalog materials,
//! and the star renderer. The scene state itself lives in [`SceneDriver`].

use std::collections::HashMap;

use ringlet_materials::{MaterialCatalog, MaterialKind};
use ringlet_render::{
    BufferAllocator, DepthBuffer, GpuMaterial, MeshBuffer, ModelUniform, RenderContext,
    RenderPassBuilder, RingPipeline, SPACE_BLACK, SurfaceError, TextureUploader,
};
use ringlet_scene::{BodyId, MaterialSlot, RotatingBody, SceneDriver, light_rig};
use ringlet_space::{StarPoint, StarRenderer, StarUniform, sprite_world_size};
use tracing::{info, warn};

struct RingResources {
    mesh: MeshBuffer,
    model_buffer: wgpu::Buffer,
    model_bind_group: wgpu::BindGroup,
    placeholder: GpuMaterial,
}

pub struct SceneRenderer {
    depth: DepthBuffer,
    pipeline: RingPipeline,
    uploader: TextureUploader,
    camera_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    rings: Vec<RingResources>,
    materials: HashMap<MaterialKind, GpuMaterial>,
    stars: StarRenderer,
    star_size: f32,
}

impl SceneRenderer {
    pub fn new(gpu: &RenderContext, scene: &SceneDriver, stars: &[StarPoint], star_size: f32) -> Self {
        let device = &gpu.device;
        let (width, height) = gpu.size();
        let allocator = BufferAllocator::new(device);

        let pipeline = RingPipeline::new(device, gpu.surface_format);
        let uploader = TextureUploader::new(device);

        let camera_buffer = allocator.create_uniform("camera-uniform", &scene.camera().to_uniform());
        let lights_buffer = allocator.create_uniform("lights-uniform", &light_rig());
        let frame_bind_group = pipeline.create_frame_bind_group(device, &camera_buffer, &lights_buffer);

        let rings = scene
            .bodies()
            .iter()
            .map(|body| {
                let id = body.id();
                let torus = body.spec().torus.build();
                let mesh = allocator.create_mesh(&format!("ring-{id}"), &torus.vertices, &torus.indices);
                let model_buffer = allocator.create_uniform(
                    &format!("ring-{id}-model"),
                    &ModelUniform::from_transform(body.transform()),
                );
                let model_bind_group = pipeline.create_model_bind_group(device, &model_buffer);
                let placeholder = GpuMaterial::placeholder(
                    device,
                    &gpu.queue,
                    &pipeline,
                    &uploader,
                    body.spec().placeholder_linear(),
                );
                RingResources {
                    mesh,
                    model_buffer,
                    model_bind_group,
                    placeholder,
                }
            })
            .collect();

        let stars = StarRenderer::new(device, gpu.surface_format, stars);
        info!(
            "Scene renderer ready: {} rings, {} stars",
            BodyId::ALL.len(),
            stars.instance_count()
        );

        Self {
            depth: DepthBuffer::new(device, width, height),
            pipeline,
            uploader,
            camera_buffer,
            frame_bind_group,
            rings,
            materials: HashMap::new(),
            stars,
            star_size,
        }
    }

    /// Upload every material set. A set that fails to upload is logged and
    /// its rings keep their placeholder.
    pub fn upload_catalog(&mut self, gpu: &RenderContext, catalog: &MaterialCatalog) {
        for set in catalog.iter() {
            match GpuMaterial::from_set(&gpu.device, &gpu.queue, &self.pipeline, &mut self.uploader, set) {
                Ok(material) => {
                    self.materials.insert(set.kind(), material);
                }
                Err(e) => warn!("Material '{}' could not be uploaded: {e}", set.kind()),
            }
        }
        info!("{} material sets resident on the GPU", self.materials.len());
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth.resize(device, width, height);
    }

    fn material_for(&self, index: usize, body: &RotatingBody) -> &GpuMaterial {
        match body.material() {
            MaterialSlot::Set(kind) => self
                .materials
                .get(&kind)
                .unwrap_or(&self.rings[index].placeholder),
            MaterialSlot::Placeholder => &self.rings[index].placeholder,
        }
    }

    /// Upload this frame's uniforms and draw the rings, then the stars.
    ///
    /// # Errors
    ///
    /// Returns the [`SurfaceError`] when no surface texture could be acquired.
    pub fn render(&self, gpu: &RenderContext, scene: &SceneDriver) -> Result<(), SurfaceError> {
        let camera = scene.camera();
        gpu.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::bytes_of(&camera.to_uniform()),
        );
        for (ring, body) in self.rings.iter().zip(scene.bodies()) {
            let model = ModelUniform::from_transform(body.transform());
            gpu.queue
                .write_buffer(&ring.model_buffer, 0, bytemuck::bytes_of(&model));
        }
        let star_uniform = StarUniform::new(
            camera.view_projection_matrix(),
            camera.view_matrix(),
            &scene.stars(),
            sprite_world_size(self.star_size, camera.fov_y),
        );
        self.stars.update(&gpu.queue, &star_uniform);

        let surface_texture = gpu.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });

        {
            let mut pass = RenderPassBuilder::new()
                .clear_color(SPACE_BLACK)
                .depth(&self.depth.view, DepthBuffer::CLEAR_VALUE)
                .label("scene-pass")
                .begin(&mut encoder, &view);

            for (index, (ring, body)) in self.rings.iter().zip(scene.bodies()).enumerate() {
                self.pipeline.draw(
                    &mut pass,
                    &self.frame_bind_group,
                    self.material_for(index, body),
                    &ring.model_bind_group,
                    &ring.mesh,
                );
            }
            self.stars.render(&mut pass);
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }
}
