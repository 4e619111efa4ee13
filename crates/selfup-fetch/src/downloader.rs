use std::io::Read;

use tracing::debug;
use url::Url;

use crate::artifact::artifact_url;
use crate::error::{Error, Result};
use crate::fetcher::{Fetch, FetchReader};

/// Fetches release artifacts through a [`Fetch`] transport.
pub struct Downloader<'a> {
    fetcher: &'a dyn Fetch,
}

impl<'a> Downloader<'a> {
    pub fn new(fetcher: &'a dyn Fetch) -> Self {
        Self { fetcher }
    }

    pub fn download(&self, url: &Url) -> Result<FetchReader> {
        debug!(%url, "downloading");
        self.fetcher.fetch(url).map_err(|source| Error::Fetch {
            url: url.clone(),
            source,
        })
    }

    /// Download `url` and read the whole body, so a connection dropped
    /// mid-transfer is reported here and not by whoever parses the bytes.
    pub fn download_bytes(&self, url: &Url) -> Result<Vec<u8>> {
        let mut body = Vec::new();
        self.download(url)?
            .read_to_end(&mut body)
            .map_err(|source| Error::Body {
                url: url.clone(),
                source,
            })?;
        debug!(%url, bytes = body.len(), "downloaded");
        Ok(body)
    }

    /// Download `{base}/{command}/{version}/{file_name}`.
    pub fn download_artifact(
        &self,
        base: &Url,
        command: &str,
        version: &str,
        file_name: &str,
    ) -> Result<FetchReader> {
        let url = artifact_url(base, command, version, file_name)?;
        self.download(&url)
    }
}
