//! The two-triangle scene.
//!
//! `TriangleScene` is pure CPU state: projection (fixed at construction),
//! the orbit camera and the ordered list of (program, mesh) pairs. The GPU
//! side lives in `render::SceneRenderer`, which executes `TriangleScene::draws`.

mod config;
mod triangles;

pub use config::{SceneConfig, ShaderSet};
pub use triangles::{DrawItem, TriangleScene};
