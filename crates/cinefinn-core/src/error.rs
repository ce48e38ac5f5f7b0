use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("API error: {0}")]
    Api(#[from] cinefinn_api::ApiError),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
