use url::Url;

use crate::error::{Error, Result};

/// `{base}/{command}/{version}/{file_name}`, with the version percent-encoded
/// as a single path segment.
///
/// Only the path of `base` is extended; its query and fragment are kept.
pub fn artifact_url(base: &Url, command: &str, version: &str, file_name: &str) -> Result<Url> {
    if base.cannot_be_a_base() {
        return Err(Error::CannotBeABase(base.clone()));
    }

    let path = format!(
        "{}/{}/{}/{}",
        base.path().trim_end_matches('/'),
        command,
        urlencoding::encode(version),
        file_name
    );
    let mut url = base.clone();
    url.set_path(&path);
    Ok(url)
}
