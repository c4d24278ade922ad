//! tricam engine crate.
//!
//! Platform + GPU runtime (window, device, input, timing, logging) and the
//! two-triangle orbit scene built on top of it (camera, meshes, shaders,
//! renderer).

pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod time;
pub mod window;

pub mod camera;
pub mod mesh;
pub mod paint;
pub mod render;
pub mod scene;
pub mod shader;
