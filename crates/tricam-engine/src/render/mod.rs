//! GPU rendering.
//!
//! `RenderCtx` carries the device/queue and surface description; `RenderTarget`
//! carries the frame's encoder and color view. `SceneRenderer` owns the
//! pipelines and buffers of the triangle scene and records its pass into a
//! target.

mod ctx;
mod msaa;
mod program;
mod scene_renderer;

pub use ctx::{RenderCtx, RenderTarget};
pub use program::{GpuProgram, MvpUniform};
pub use scene_renderer::{FrameStats, SceneRenderer};
