use std::fmt;
use std::path::PathBuf;

use super::ShaderStage;

/// Failure while loading a shader source file.
#[derive(Debug)]
pub enum ShaderError {
    /// The file could not be read.
    Io { path: PathBuf, source: std::io::Error },

    /// WGSL did not parse. `message` is naga's rendered diagnostic.
    Parse { path: PathBuf, message: String },

    /// WGSL parsed but failed validation.
    Validation { path: PathBuf, message: String },

    /// The module has no entry point of the expected name and stage.
    MissingEntryPoint {
        path: PathBuf,
        stage: ShaderStage,
        entry_point: &'static str,
    },
}

impl ShaderError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            ShaderError::Io { path, .. }
            | ShaderError::Parse { path, .. }
            | ShaderError::Validation { path, .. }
            | ShaderError::MissingEntryPoint { path, .. } => path,
        }
    }
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Io { path, source } => {
                write!(f, "cannot read shader '{}': {source}", path.display())
            }
            ShaderError::Parse { path, message } => {
                write!(f, "shader '{}' failed to compile:\n{message}", path.display())
            }
            ShaderError::Validation { path, message } => {
                write!(f, "shader '{}' failed validation:\n{message}", path.display())
            }
            ShaderError::MissingEntryPoint { path, stage, entry_point } => write!(
                f,
                "shader '{}' has no {stage} entry point named '{entry_point}'",
                path.display()
            ),
        }
    }
}

impl std::error::Error for ShaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShaderError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
