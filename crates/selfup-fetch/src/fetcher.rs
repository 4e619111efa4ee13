use std::fmt;
use std::io::Read;

use url::Url;

use crate::error::BoxError;

/// Response body handed back by a transport.
pub type FetchReader = Box<dyn Read + Send>;

/// Blocking transport mapping a URL to a byte stream.
///
/// Implementations handle their own redirects, timeouts and status mapping.
/// A response that does not carry the artifact (HTTP 404, ...) must be
/// reported as an error rather than as an empty stream.
pub trait Fetch: Send + Sync {
    fn fetch(&self, url: &Url) -> Result<FetchReader, BoxError>;
}

impl<T: Fetch + ?Sized> Fetch for Box<T> {
    fn fetch(&self, url: &Url) -> Result<FetchReader, BoxError> {
        (**self).fetch(url)
    }
}

impl<T: Fetch + ?Sized> Fetch for std::sync::Arc<T> {
    fn fetch(&self, url: &Url) -> Result<FetchReader, BoxError> {
        (**self).fetch(url)
    }
}

/// [`Fetch`] backed by a closure. Built with [`fetch_fn`].
pub struct FnFetcher<F>(F);

/// Use a closure as the transport.
///
/// ```
/// use std::io::Cursor;
/// use selfup_fetch::{Fetch, Url, fetch_fn};
///
/// let fetcher = fetch_fn(|_url: &Url| Ok(Box::new(Cursor::new(b"archive".to_vec()))));
/// let url = Url::parse("https://releases.example.com/myapp").unwrap();
/// assert!(fetcher.fetch(&url).is_ok());
/// ```
pub fn fetch_fn<F>(f: F) -> FnFetcher<F>
where
    F: Fn(&Url) -> Result<FetchReader, BoxError> + Send + Sync,
{
    FnFetcher(f)
}

impl<F> Fetch for FnFetcher<F>
where
    F: Fn(&Url) -> Result<FetchReader, BoxError> + Send + Sync,
{
    fn fetch(&self, url: &Url) -> Result<FetchReader, BoxError> {
        (self.0)(url)
    }
}

impl<F> fmt::Debug for FnFetcher<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnFetcher")
    }
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use std::time::Duration;

    use reqwest::blocking::Client;

    use super::*;

    /// Default transport: a blocking `reqwest` client.
    ///
    /// Non-success HTTP statuses are reported as errors.
    #[derive(Debug, Clone)]
    pub struct ReqwestFetcher {
        client: Client,
    }

    impl ReqwestFetcher {
        pub fn new() -> Result<Self, reqwest::Error> {
            Ok(Self::from_client(Client::builder().build()?))
        }

        /// Bound every request, connect through last body byte, by `timeout`.
        pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
            Ok(Self::from_client(Client::builder().timeout(timeout).build()?))
        }

        pub fn from_client(client: Client) -> Self {
            Self { client }
        }
    }

    impl Fetch for ReqwestFetcher {
        fn fetch(&self, url: &Url) -> Result<FetchReader, BoxError> {
            let response = self.client.get(url.clone()).send()?.error_for_status()?;
            Ok(Box::new(response))
        }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::ReqwestFetcher;
