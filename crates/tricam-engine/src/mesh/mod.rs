//! Static triangle meshes.
//!
//! A mesh is three object-space positions. The CPU side is `Copy` data; the GPU
//! side (`GpuMesh`) is a vertex buffer created once with `VERTEX` usage only, so
//! nothing can write to it after the initial upload.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

/// Object-space vertex position.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { position: [x, y, z] }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// One triangle in object space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TriangleMesh {
    pub label: &'static str,
    pub vertices: [Vertex; 3],
}

impl TriangleMesh {
    pub const VERTEX_COUNT: u32 = 3;

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Points down: two vertices on top, apex at the bottom.
pub const TRIANGLE_1: TriangleMesh = TriangleMesh {
    label: "triangle 1",
    vertices: [
        Vertex::new(-0.5, 0.5, 0.0),
        Vertex::new(0.5, 0.5, 0.0),
        Vertex::new(0.0, -0.5, 0.0),
    ],
};

/// Points up: mirror image of `TRIANGLE_1`.
pub const TRIANGLE_2: TriangleMesh = TriangleMesh {
    label: "triangle 2",
    vertices: [
        Vertex::new(0.5, -0.5, 0.0),
        Vertex::new(-0.5, -0.5, 0.0),
        Vertex::new(0.0, 0.5, 0.0),
    ],
};

/// A mesh uploaded to the GPU.
pub struct GpuMesh {
    buffer: wgpu::Buffer,
    vertex_count: u32,
}

impl GpuMesh {
    pub fn upload(device: &wgpu::Device, mesh: &TriangleMesh) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(mesh.label),
            contents: mesh.as_bytes(),
            usage: wgpu::BufferUsages::VERTEX,
        });
        log::debug!("uploaded {} ({} bytes)", mesh.label, mesh.as_bytes().len());

        Self {
            buffer,
            vertex_count: TriangleMesh::VERTEX_COUNT,
        }
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }
}
