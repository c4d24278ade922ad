use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::mesh::Vertex;
use crate::render::RenderCtx;
use crate::shader::ProgramSource;

/// Uniform block of the vertex shader: one column-major 4×4 matrix.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MvpUniform {
    pub mvp: [[f32; 4]; 4],
}

impl MvpUniform {
    pub fn new(m: Mat4) -> Self {
        Self { mvp: m.to_cols_array_2d() }
    }
}

/// A linked program: render pipeline plus its own MVP uniform buffer.
///
/// Each program owns its uniform, so the matrix is written once per program
/// per frame.
pub struct GpuProgram {
    label: String,
    pipeline: wgpu::RenderPipeline,
    mvp_ubo: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl GpuProgram {
    pub fn new(ctx: &RenderCtx<'_>, source: &ProgramSource, sample_count: u32) -> Self {
        let label = source.label();

        let vs = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(source.vertex.name().as_str()),
            source: wgpu::ShaderSource::Wgsl(source.vertex.code.as_str().into()),
        });
        let fs = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(source.fragment.name().as_str()),
            source: wgpu::ShaderSource::Wgsl(source.fragment.code.as_str().into()),
        });

        let bind_group_layout = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("tricam mvp bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<MvpUniform>() as u64,
                        ),
                    },
                    count: None,
                }],
            });

        let pipeline_layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("tricam pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label.as_str()),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &vs,
                entry_point: Some(source.vertex.stage.entry_point()),
                compilation_options: Default::default(),
                buffers: &[Vertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &fs,
                entry_point: Some(source.fragment.stage.entry_point()),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            // Both windings are drawn: the camera sees the back of the
            // triangles for half of every orbit.
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: sample_count,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },

            multiview_mask: None,
            cache: None,
        });

        let mvp_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("tricam mvp ubo"),
            size: std::mem::size_of::<MvpUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("tricam mvp bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: mvp_ubo.as_entire_binding(),
            }],
        });

        Self {
            label,
            pipeline,
            mvp_ubo,
            bind_group,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    /// Writes `mvp` into this program's uniform buffer.
    pub fn write_mvp(&self, queue: &wgpu::Queue, mvp: Mat4) {
        queue.write_buffer(&self.mvp_ubo, 0, bytemuck::bytes_of(&MvpUniform::new(mvp)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_is_64_bytes_column_major() {
        assert_eq!(std::mem::size_of::<MvpUniform>(), 64);

        let m = Mat4::from_cols_array(&[
            1.0, 2.0, 3.0, 4.0, //
            5.0, 6.0, 7.0, 8.0, //
            9.0, 10.0, 11.0, 12.0, //
            13.0, 14.0, 15.0, 16.0,
        ]);
        let u = MvpUniform::new(m);
        let floats: &[f32] = bytemuck::cast_slice(bytemuck::bytes_of(&u));
        assert_eq!(floats[0..4], [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(floats[12..16], [13.0, 14.0, 15.0, 16.0]);
    }
}
