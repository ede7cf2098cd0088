use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown curriculum code: {0}")]
    UnknownCurriculum(String),
    #[error("invalid table code: {0:?}")]
    InvalidTableCode(String),
    #[error("unknown locale: {0}")]
    UnknownLocale(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
