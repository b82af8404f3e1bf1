use thiserror::Error;

#[derive(Debug, Error)]
pub enum BiblioError {
    #[error(transparent)]
    Library(#[from] crate::library::LibraryError),

    #[error(transparent)]
    Store(#[from] crate::store::StoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type BiblioResult<T> = Result<T, BiblioError>;
