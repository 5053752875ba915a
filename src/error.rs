use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("sample corpus has no sentences for level `{0}`")]
    EmptyLevel(String),

    #[error("built-in sample corpus `{0}` is missing")]
    MissingBuiltin(String),
}

pub type Result<T> = std::result::Result<T, Error>;
