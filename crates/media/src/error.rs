use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("GStreamer initialisation failed: {0}")]
    Init(String),
    #[error("failed to create element {name}: {reason}")]
    Element { name: &'static str, reason: String },
    #[error("cannot build a file URI for {}", .0.display())]
    InvalidPath(PathBuf),
    #[error("probe failed: {0}")]
    Probe(String),
    #[error("state change failed: {0}")]
    StateChange(String),
    #[error("could not decode image {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
