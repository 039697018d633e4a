//! Errors raised before or around a render. Shading itself never fails.

use lumen_core::SceneError;
use thiserror::Error;

use crate::lint::Diagnostic;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid render setup: {}", summarize(.0))]
    InvalidConfig(Vec<Diagnostic>),

    #[error("Failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Failed to parse render config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    #[error("Failed to spawn render thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("Render thread panicked")]
    WorkerPanicked,
}

pub type RenderResult<T> = Result<T, RenderError>;

fn summarize(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
