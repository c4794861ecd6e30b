//! Vertex and index buffers for the ring meshes.

use bytemuck::{Pod, Zeroable};

/// Vertex format for the rings: position, normal, tangent, and UV.
///
/// `tangent.w` carries the bitangent sign so the shader can rebuild the
/// tangent frame for normal mapping.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct RingVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tangent: [f32; 4],
    pub uv: [f32; 2],
}

impl RingVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x3,
        2 => Float32x4,
        3 => Float32x2,
    ];

    pub fn from_parts(
        position: glam::Vec3,
        normal: glam::Vec3,
        tangent: glam::Vec4,
        uv: glam::Vec2,
    ) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            tangent: tangent.to_array(),
            uv: uv.to_array(),
        }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<RingVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// A mesh uploaded to the GPU, drawn with `u32` indices.
pub struct MeshBuffer {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl MeshBuffer {
    pub fn bind(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
    }

    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// Creates vertex, index, and uniform buffers on one device.
pub struct BufferAllocator<'a> {
    device: &'a wgpu::Device,
}

impl<'a> BufferAllocator<'a> {
    pub fn new(device: &'a wgpu::Device) -> Self {
        Self { device }
    }

    pub fn create_mesh(&self, label: &str, vertices: &[RingVertex], indices: &[u32]) -> MeshBuffer {
        MeshBuffer {
            vertex_buffer: self.create_buffer(
                &format!("{label}-vertices"),
                bytemuck::cast_slice(vertices),
                wgpu::BufferUsages::VERTEX,
            ),
            index_buffer: self.create_buffer(
                &format!("{label}-indices"),
                bytemuck::cast_slice(indices),
                wgpu::BufferUsages::INDEX,
            ),
            index_count: indices.len() as u32,
        }
    }

    /// A uniform buffer initialized with `value` and writable from the queue.
    pub fn create_uniform<T: Pod>(&self, label: &str, value: &T) -> wgpu::Buffer {
        self.create_buffer(
            label,
            bytemuck::bytes_of(value),
            wgpu::BufferUsages::UNIFORM,
        )
    }

    fn create_buffer(&self, label: &str, contents: &[u8], usage: wgpu::BufferUsages) -> wgpu::Buffer {
        use wgpu::util::DeviceExt;

        self.device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents,
                usage: usage | wgpu::BufferUsages::COPY_DST,
            })
    }
}

#[cfg(test)]
mod tests {
    use glam::{Vec2, Vec3, Vec4};

    use super::*;
    use crate::gpu::headless_device_queue;

    #[test]
    fn test_ring_vertex_size() {
        assert_eq!(std::mem::size_of::<RingVertex>(), 48);
    }

    #[test]
    fn test_layout_offsets() {
        let layout = RingVertex::layout();
        assert_eq!(layout.array_stride, 48);
        let offsets: Vec<_> = layout.attributes.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 12, 24, 40]);
        let locations: Vec<_> = layout.attributes.iter().map(|a| a.shader_location).collect();
        assert_eq!(locations, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_from_parts() {
        let v = RingVertex::from_parts(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::Y,
            Vec4::new(1.0, 0.0, 0.0, -1.0),
            Vec2::new(0.25, 0.75),
        );
        assert_eq!(v.position, [1.0, 2.0, 3.0]);
        assert_eq!(v.tangent[3], -1.0);
        assert_eq!(v.uv, [0.25, 0.75]);
    }

    #[test]
    fn test_create_mesh_counts_indices() {
        let Some((device, _queue)) = headless_device_queue() else {
            return;
        };
        let vertices = [RingVertex::zeroed(); 3];
        let mesh = BufferAllocator::new(&device).create_mesh("tri", &vertices, &[0, 1, 2]);
        assert_eq!(mesh.index_count, 3);
        assert_eq!(mesh.vertex_buffer.size(), 144);
        assert_eq!(mesh.index_buffer.size(), 12);
    }
}
