use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuakefeedError {
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::parser::ConfigError),

    #[error("Feed error: {0}")]
    Fetch(#[from] crate::datafeed::fetcher::FetchError),

    #[error("Mapping error: {0}")]
    Map(#[from] crate::datafeed::mapper::MapError),

    #[error("Store error: {0}")]
    Store(#[from] crate::database::StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
