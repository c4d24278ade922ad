use std::fmt;
use std::path::{Path, PathBuf};

use super::ShaderError;

/// Pipeline stage a source file is compiled for.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub const fn entry_point(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vs_main",
            ShaderStage::Fragment => "fs_main",
        }
    }

    fn naga_stage(self) -> naga::ShaderStage {
        match self {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        })
    }
}

/// A validated WGSL source file.
#[derive(Debug, Clone)]
pub struct ShaderSource {
    pub path: PathBuf,
    pub stage: ShaderStage,
    pub code: String,
}

impl ShaderSource {
    /// Parses and validates `code` as WGSL for `stage`.
    pub fn compile(path: impl Into<PathBuf>, stage: ShaderStage, code: String) -> Result<Self, ShaderError> {
        let path = path.into();

        let module = naga::front::wgsl::parse_str(&code).map_err(|e| ShaderError::Parse {
            path: path.clone(),
            message: e.emit_to_string(&code),
        })?;

        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::default(),
        )
        .validate(&module)
        .map_err(|e| ShaderError::Validation {
            path: path.clone(),
            message: e.emit_to_string(&code),
        })?;

        let entry_point = stage.entry_point();
        let has_entry = module
            .entry_points
            .iter()
            .any(|ep| ep.name == entry_point && ep.stage == stage.naga_stage());
        if !has_entry {
            return Err(ShaderError::MissingEntryPoint { path, stage, entry_point });
        }

        Ok(Self { path, stage, code })
    }

    /// File name for labels and log lines.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Reads and validates one shader file.
pub fn load_source(path: &Path, stage: ShaderStage) -> Result<ShaderSource, ShaderError> {
    let code = std::fs::read_to_string(path).map_err(|source| ShaderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ShaderSource::compile(path, stage, code)
}

/// Vertex + fragment source pair for one program.
#[derive(Debug, Clone)]
pub struct ProgramSource {
    pub vertex: ShaderSource,
    pub fragment: ShaderSource,
}

impl ProgramSource {
    /// `"vertex.wgsl + fragment.wgsl"`, used in labels and logs.
    pub fn label(&self) -> String {
        format!("{} + {}", self.vertex.name(), self.fragment.name())
    }
}

/// Loads a program from two files in `dir`.
pub fn load_program(dir: &Path, vertex_file: &str, fragment_file: &str) -> Result<ProgramSource, ShaderError> {
    let vertex = load_source(&dir.join(vertex_file), ShaderStage::Vertex)?;
    let fragment = load_source(&dir.join(fragment_file), ShaderStage::Fragment)?;

    let program = ProgramSource { vertex, fragment };
    log::info!("loaded shader program {}", program.label());
    Ok(program)
}

/// Returns the first candidate that is an existing directory.
///
/// When none exists the first candidate is returned anyway, so the subsequent
/// file read reports a path the user actually asked for.
pub fn find_shader_dir<I>(candidates: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = PathBuf>,
{
    let mut first = None;
    for dir in candidates {
        if dir.is_dir() {
            log::debug!("shader directory: {}", dir.display());
            return Some(dir);
        }
        first.get_or_insert(dir);
    }
    first
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERTEX: &str = r#"
struct Uniforms { mvp: mat4x4<f32> };
@group(0) @binding(0) var<uniform> u: Uniforms;

@vertex
fn vs_main(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
    return u.mvp * vec4<f32>(position, 1.0);
}
"#;

    const FRAGMENT: &str = r#"
@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 0.0, 0.0, 1.0);
}
"#;

    /// Fresh directory under the system temp dir, removed on drop.
    struct TempDir(PathBuf);

    impl TempDir {
        fn new(tag: &str) -> Self {
            let dir = std::env::temp_dir().join(format!(
                "tricam-shader-{tag}-{}-{:?}",
                std::process::id(),
                std::thread::current().id()
            ));
            let _ = std::fs::remove_dir_all(&dir);
            std::fs::create_dir_all(&dir).unwrap();
            Self(dir)
        }

        fn write(&self, name: &str, code: &str) {
            std::fs::write(self.0.join(name), code).unwrap();
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn valid_sources_compile() {
        assert!(ShaderSource::compile("v.wgsl", ShaderStage::Vertex, VERTEX.into()).is_ok());
        assert!(ShaderSource::compile("f.wgsl", ShaderStage::Fragment, FRAGMENT.into()).is_ok());
    }

    #[test]
    fn syntax_error_is_parse_error() {
        let err = ShaderSource::compile("bad.wgsl", ShaderStage::Fragment, "fn fs_main( {".into())
            .unwrap_err();
        assert!(matches!(err, ShaderError::Parse { .. }), "{err}");
        assert!(err.to_string().contains("bad.wgsl"));
    }

    #[test]
    fn type_error_is_validation_or_parse_error() {
        let code = "@fragment fn fs_main() -> @location(0) vec4<f32> { return 1.0; }";
        let err = ShaderSource::compile("t.wgsl", ShaderStage::Fragment, code.into()).unwrap_err();
        assert!(
            matches!(err, ShaderError::Parse { .. } | ShaderError::Validation { .. }),
            "{err}"
        );
    }

    #[test]
    fn wrong_stage_is_missing_entry_point() {
        let err = ShaderSource::compile("f.wgsl", ShaderStage::Vertex, FRAGMENT.into()).unwrap_err();
        match err {
            ShaderError::MissingEntryPoint { stage, entry_point, .. } => {
                assert_eq!(stage, ShaderStage::Vertex);
                assert_eq!(entry_point, "vs_main");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = TempDir::new("missing");
        let err = load_program(&dir.0, "nope.vert.wgsl", "nope.frag.wgsl").unwrap_err();
        assert!(matches!(err, ShaderError::Io { .. }));
        assert!(err.path().ends_with("nope.vert.wgsl"));
    }

    #[test]
    fn program_loads_from_directory() {
        let dir = TempDir::new("program");
        dir.write("a.vert.wgsl", VERTEX);
        dir.write("a.frag.wgsl", FRAGMENT);

        let program = load_program(&dir.0, "a.vert.wgsl", "a.frag.wgsl").unwrap();
        assert_eq!(program.vertex.stage, ShaderStage::Vertex);
        assert_eq!(program.fragment.stage, ShaderStage::Fragment);
        assert_eq!(program.label(), "a.vert.wgsl + a.frag.wgsl");
    }

    #[test]
    fn bad_fragment_fails_whole_program() {
        let dir = TempDir::new("badfrag");
        dir.write("a.vert.wgsl", VERTEX);
        dir.write("a.frag.wgsl", "not wgsl at all");

        let err = load_program(&dir.0, "a.vert.wgsl", "a.frag.wgsl").unwrap_err();
        assert!(err.path().ends_with("a.frag.wgsl"));
    }

    #[test]
    fn first_existing_directory_wins() {
        let dir = TempDir::new("find");
        let missing = dir.0.join("does-not-exist");
        let found = find_shader_dir([missing, dir.0.clone()]).unwrap();
        assert_eq!(found, dir.0);
    }

    #[test]
    fn first_candidate_returned_when_none_exist() {
        let dir = TempDir::new("none");
        let a = dir.0.join("a");
        let b = dir.0.join("b");
        assert_eq!(find_shader_dir([a.clone(), b]), Some(a));
        assert_eq!(find_shader_dir(Vec::<PathBuf>::new()), None);
    }
}
