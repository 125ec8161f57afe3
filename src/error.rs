// src/error.rs

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong before the first frame is drawn.
///
/// Rendering itself never fails: a ray that escapes the map is a miss, not an error.
#[derive(Debug, Error)]
pub enum CasterError {
    #[error("unable to read level {path:?}: {source}")]
    Level {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to write level {path:?}: {source}")]
    LevelWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to load texture {path:?}: {source}")]
    Texture {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("texture {path:?} has no pixels")]
    EmptyTexture { path: PathBuf },

    #[error("unable to read config {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to build raycast worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    #[error("failed to write frame {path:?}: {source}")]
    Frame {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, CasterError>;
