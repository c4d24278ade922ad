use glam::Mat4;

use crate::camera::OrbitCamera;
use crate::mesh::{TriangleMesh, TRIANGLE_1, TRIANGLE_2};

use super::SceneConfig;

/// One draw call: program `program` renders mesh `mesh`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DrawItem {
    /// Index into the loaded shader programs.
    pub program: usize,
    /// Index into `TriangleScene::meshes`.
    pub mesh: usize,
    pub vertex_count: u32,
}

const DRAWS: [DrawItem; 2] = [
    DrawItem { program: 0, mesh: 0, vertex_count: TriangleMesh::VERTEX_COUNT },
    DrawItem { program: 1, mesh: 1, vertex_count: TriangleMesh::VERTEX_COUNT },
];

#[derive(Debug, Clone)]
pub struct TriangleScene {
    camera: OrbitCamera,
    projection: Mat4,
    model: Mat4,
    meshes: [TriangleMesh; 2],
}

impl TriangleScene {
    /// Builds the scene. The projection matrix is computed here, once.
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            camera: config.camera,
            projection: config.projection.matrix(),
            model: Mat4::IDENTITY,
            meshes: [TRIANGLE_1, TRIANGLE_2],
        }
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn meshes(&self) -> &[TriangleMesh; 2] {
        &self.meshes
    }

    /// Projection × View × Model for the camera at `elapsed` seconds.
    pub fn mvp(&self, elapsed: f64) -> Mat4 {
        self.projection * self.camera.view(elapsed) * self.model
    }

    /// Draw calls for one frame, in submission order.
    ///
    /// Always two items of three vertices: the plan does not depend on time.
    pub fn draws(&self) -> &'static [DrawItem] {
        &DRAWS
    }
}
