//! Download side of an update.
//!
//! The transport is abstracted behind [`Fetch`]: anything that turns a URL
//! into a byte stream. [`ReqwestFetcher`] is the default implementation;
//! tests and embedders inject their own with [`fetch_fn`].

mod artifact;
mod downloader;
mod error;
mod fetcher;

pub use artifact::artifact_url;
pub use downloader::Downloader;
pub use error::{BoxError, Error, Result};
#[cfg(feature = "reqwest")]
pub use fetcher::ReqwestFetcher;
pub use fetcher::{Fetch, FetchReader, FnFetcher, fetch_fn};
pub use url::Url;
