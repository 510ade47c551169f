use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to encode PDF content: {0}")]
    EncodeError(String),

    #[error("Failed to write PDF: {0}")]
    WriteError(String),

    #[error("Failed to load image: {0}")]
    ImageError(String),

    #[error("Failed to parse PDF: {0}")]
    ParseError(String),
}
