use std::path::PathBuf;

use winit::dpi::LogicalSize;

use tricam_engine::device::GpuInit;
use tricam_engine::input::Key;
use tricam_engine::scene::{SceneConfig, ShaderSet};
use tricam_engine::shader::find_shader_dir;
use tricam_engine::window::RuntimeConfig;

/// Overrides the shader directory.
pub const SHADER_DIR_ENV: &str = "TRICAM_SHADER_DIR";

pub const WINDOW_TITLE: &str = "hw2_triangles_with_camera";
pub const WINDOW_SIZE: (f64, f64) = (1024.0, 768.0);

pub fn runtime_config() -> RuntimeConfig {
    RuntimeConfig {
        title: WINDOW_TITLE.to_string(),
        initial_size: LogicalSize::new(WINDOW_SIZE.0, WINDOW_SIZE.1),
        exit_key: Some(Key::Escape),
    }
}

/// Linear (non-sRGB) surface: the clear color and the blend of the two
/// translucent triangles are written to the framebuffer as given.
pub fn gpu_init() -> GpuInit {
    GpuInit {
        prefer_srgb: false,
        ..GpuInit::default()
    }
}

pub fn scene_config() -> SceneConfig {
    let env_dir = std::env::var_os(SHADER_DIR_ENV).map(PathBuf::from);
    let dir = find_shader_dir(shader_dir_candidates(env_dir))
        .unwrap_or_else(|| PathBuf::from("shaders"));

    SceneConfig {
        shaders: ShaderSet {
            dir,
            ..ShaderSet::default()
        },
        ..SceneConfig::default()
    }
}

/// Search order: explicit override, `./shaders`, then the files shipped with
/// this crate.
fn shader_dir_candidates(env_dir: Option<PathBuf>) -> Vec<PathBuf> {
    let bundled = PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/shaders"));

    env_dir
        .into_iter()
        .chain([PathBuf::from("shaders"), bundled])
        .collect()
}
