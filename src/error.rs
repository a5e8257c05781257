use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BumpError {
    #[error("No suitable version source found in {}", .0.display())]
    MissingVersionSource(PathBuf),

    #[error("Version information not found in {}", .0.display())]
    VersionFieldNotFound(PathBuf),

    #[error("Version '{0}' format error")]
    MalformedVersion(String),

    #[error("Development suffix '{0}' is invalid")]
    InvalidSuffix(String),

    #[error("`{command}` exited with code {code}: {stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("Failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to push {tag}: {reason}")]
    PushFailure { tag: String, reason: String },

    #[error("Failed to parse {}: {source}", .file.display())]
    Manifest {
        file: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BumpError>;
