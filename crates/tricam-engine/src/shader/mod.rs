//! Shader source loading.
//!
//! A shader program is a vertex + fragment WGSL pair read from disk. Both files
//! are parsed and validated with naga before anything touches the device, so
//! a missing file or a compile error surfaces as a `ShaderError` at startup.
//!
//! Entry point convention: `vs_main` for vertex, `fs_main` for fragment.

mod error;
mod source;

pub use error::ShaderError;
pub use source::{find_shader_dir, load_program, load_source, ProgramSource, ShaderSource, ShaderStage};
