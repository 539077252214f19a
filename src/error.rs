use std::path::PathBuf;

/// Failure to load a parameter file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Failure to locate the particle texture.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("texture {0} does not exist")]
    Missing(PathBuf),

    #[error("texture {0} is not a file")]
    NotAFile(PathBuf),

    #[error("texture {path} could not be decoded: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
