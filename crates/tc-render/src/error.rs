use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    /// The host surface cannot perform the requested operation.
    #[error("unsupported by surface: {0}")]
    Unsupported(String),
}
