use std::path::PathBuf;

use crate::camera::{OrbitCamera, Projection};
use crate::paint::Color;

/// Shader file names: one shared vertex shader and one fragment shader per triangle.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderSet {
    /// Directory the files are read from.
    pub dir: PathBuf,
    pub vertex: String,
    pub fragments: [String; 2],
}

impl Default for ShaderSet {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("shaders"),
            vertex: "simple_transform.vert.wgsl".to_string(),
            fragments: [
                "triangle1.frag.wgsl".to_string(),
                "triangle2.frag.wgsl".to_string(),
            ],
        }
    }
}

/// Everything the scene needs that is not a GPU handle.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub camera: OrbitCamera,
    pub projection: Projection,
    pub clear_color: Color,
    /// MSAA sample count; 1 disables multisampling.
    pub sample_count: u32,
    pub shaders: ShaderSet,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera: OrbitCamera::default(),
            projection: Projection::default(),
            clear_color: Color::DARK_BLUE,
            sample_count: 4,
            shaders: ShaderSet::default(),
        }
    }
}
