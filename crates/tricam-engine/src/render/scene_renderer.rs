use anyhow::{ensure, Result};

use crate::mesh::GpuMesh;
use crate::scene::TriangleScene;
use crate::shader::ProgramSource;

use super::msaa::MsaaTarget;
use super::program::GpuProgram;
use super::{RenderCtx, RenderTarget};

/// What one call to [`SceneRenderer::render`] submitted.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FrameStats {
    pub draw_calls: u32,
    pub vertices: u32,
}

/// GPU side of a [`TriangleScene`]: one program per draw item, one vertex
/// buffer per mesh, all created up front.
pub struct SceneRenderer {
    programs: Vec<GpuProgram>,
    meshes: Vec<GpuMesh>,
    sample_count: u32,
    msaa: Option<MsaaTarget>,
}

impl SceneRenderer {
    /// Creates pipelines for `programs` and uploads the scene meshes.
    ///
    /// Fails if the scene's draw plan references a program that was not supplied.
    pub fn new(
        ctx: &RenderCtx<'_>,
        scene: &TriangleScene,
        programs: &[ProgramSource],
        sample_count: u32,
    ) -> Result<Self> {
        let needed = scene.draws().iter().map(|d| d.program + 1).max().unwrap_or(0);
        ensure!(
            programs.len() >= needed,
            "scene draws with {needed} shader programs but {} were loaded",
            programs.len()
        );

        let programs = programs
            .iter()
            .map(|p| GpuProgram::new(ctx, p, sample_count))
            .collect();

        let meshes = scene
            .meshes()
            .iter()
            .map(|m| GpuMesh::upload(ctx.device, m))
            .collect();

        Ok(Self {
            programs,
            meshes,
            sample_count,
            msaa: None,
        })
    }

    pub fn programs(&self) -> &[GpuProgram] {
        &self.programs
    }

    /// Records one frame of `scene` at `elapsed` seconds into `target`.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        scene: &TriangleScene,
        elapsed: f64,
    ) -> FrameStats {
        let mvp = scene.mvp(elapsed);
        for program in &self.programs {
            program.write_mvp(ctx.queue, mvp);
        }

        let msaa = MsaaTarget::ensure(
            &mut self.msaa,
            ctx.device,
            ctx.surface_format,
            ctx.surface_size,
            self.sample_count,
        );

        let color_view = target.color_view;
        let (view, resolve_target, store) = match msaa {
            Some(m) => (m.view(), Some(color_view), wgpu::StoreOp::Discard),
            // Pipelines were built multisampled; nothing to draw into yet.
            None if self.sample_count > 1 => return FrameStats::default(),
            None => (color_view, None, wgpu::StoreOp::Store),
        };

        let load = target.take_load_op();
        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("tricam scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target,
                ops: wgpu::Operations { load, store },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        let mut stats = FrameStats::default();

        for item in scene.draws() {
            let Some(program) = self.programs.get(item.program) else { continue };
            let Some(mesh) = self.meshes.get(item.mesh) else { continue };

            let count = item.vertex_count.min(mesh.vertex_count());

            rpass.set_pipeline(program.pipeline());
            rpass.set_bind_group(0, program.bind_group(), &[]);
            rpass.set_vertex_buffer(0, mesh.buffer().slice(..));
            rpass.draw(0..count, 0..1);

            stats.draw_calls += 1;
            stats.vertices += count;
        }

        stats
    }
}
