use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("invalid launch url: {0}")]
    LaunchUrl(#[from] url::ParseError),

    #[error("style sheet error: {0}")]
    StyleSheet(String),

    #[error("parent frame error: {0}")]
    Parent(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConsoleError>;
