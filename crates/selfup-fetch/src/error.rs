use url::Url;

/// Error type transports report failures with.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("base URL '{0}' cannot carry a path")]
    CannotBeABase(Url),

    #[error("failed to fetch {url}: {source}")]
    Fetch { url: Url, source: BoxError },

    #[error("failed to read response body from {url}: {source}")]
    Body { url: Url, source: std::io::Error },
}

pub type Result<T> = std::result::Result<T, Error>;
