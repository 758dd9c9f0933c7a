use crate::error::DownloadError;
use crate::progress::{ProgressFormat, ProgressLine};
use crate::repository::RepositoryRef;
use futures::StreamExt;
use reqwest::Client;
use reqwest::header::{self, HeaderMap};
use std::io::Write;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use url::Url;

/// Base URL of the hosting provider. The run loop passes this through so
/// that tests can point the fetcher at a local server.
pub const GITHUB_BASE_URL: &str = "https://github.com";

const DEFAULT_CHUNK_SIZE: usize = 1024;
const DISPOSITION_PREFIX: &str = "attachment; filename=";

/// Per-download settings. Immutable for the duration of one fetch.
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    /// Size of the pieces the body is written in.
    pub chunk_size: usize,
    /// Suppresses the progress line on stdout.
    pub quiet: bool,
    /// Formatting of the numbers on the progress line.
    pub format: ProgressFormat,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            quiet: false,
            format: ProgressFormat::default(),
        }
    }
}

/// A successfully downloaded archive, ready for extraction.
#[derive(Debug, Clone)]
pub struct DownloadedArchive {
    pub filename: String,
    pub bytes_written: u64,
}

/// Builds the default-branch archive endpoint for a repository.
pub fn archive_url(base_url: &str, repository: &RepositoryRef) -> Result<Url, DownloadError> {
    let url = Url::parse(base_url)?.join(&format!(
        "{}/{}/archive/master.zip",
        repository.owner, repository.name
    ))?;
    Ok(url)
}

/// Downloads the default-branch archive of `repository` into `destination`,
/// streaming the body to disk in fixed-size pieces.
///
/// The response headers are validated before anything is written: the
/// content type must be exactly `application/zip`, the filename comes from
/// the `Content-Disposition` header when present, and a present but
/// unparseable `Content-Length` is an error. When the expected size is
/// unknown the progress line is disabled regardless of `options.quiet`.
///
/// Informational output (the progress line and the trailing separator) is
/// written to `out`; the binary binds it to stdout.
pub async fn fetch_archive<W: Write + ?Sized>(
    client: &Client,
    base_url: &str,
    repository: &RepositoryRef,
    destination: &Path,
    options: &DownloadOptions,
    out: &mut W,
) -> Result<DownloadedArchive, DownloadError> {
    let url = archive_url(base_url, repository)?;
    tracing::debug!(%url, "requesting archive");

    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(DownloadError::Status(status));
    }

    let headers = response.headers().clone();
    validate_content_type(&headers)?;
    let filename = resolve_filename(&headers, &repository.name)?;
    let expected = expected_length(&headers)?;

    let path = destination.join(&filename);
    let mut file = File::create(&path).await?;

    let progress = match (options.quiet, expected) {
        (false, Some(total)) => Some(ProgressLine::new(total, options.format.clone())),
        _ => None,
    };

    let chunk_size = options.chunk_size.max(1);
    let mut written: u64 = 0;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        for piece in chunk.chunks(chunk_size) {
            file.write_all(piece).await?;
            written += piece.len() as u64;
            if let Some(progress) = &progress {
                progress.update(out, written)?;
            }
        }
    }
    file.flush().await?;

    // Terminates the progress line and separates this repository's output
    // from the next.
    if !options.quiet {
        writeln!(out)?;
        out.flush()?;
    }

    tracing::debug!(filename = %filename, bytes = written, "archive downloaded");
    Ok(DownloadedArchive {
        filename,
        bytes_written: written,
    })
}

fn validate_content_type(headers: &HeaderMap) -> Result<(), DownloadError> {
    let found = headers
        .get(header::CONTENT_TYPE)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());
    match found.as_deref() {
        Some("application/zip") => Ok(()),
        _ => Err(DownloadError::InvalidContentType { found }),
    }
}

/// Resolves the output filename from the `Content-Disposition` header, or
/// falls back to `{repository}-master.zip` when the header is absent. A
/// header that does not match `attachment; filename=<value>`, or whose
/// value is empty or contains path separators, is an explicit error rather
/// than a silent fallback.
fn resolve_filename(headers: &HeaderMap, repository: &str) -> Result<String, DownloadError> {
    let Some(value) = headers.get(header::CONTENT_DISPOSITION) else {
        return Ok(format!("{repository}-master.zip"));
    };

    let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
    match value.strip_prefix(DISPOSITION_PREFIX) {
        Some(name) if !name.is_empty() && !name.contains(['/', '\\']) => Ok(name.to_string()),
        _ => Err(DownloadError::InvalidContentDisposition { value }),
    }
}

/// The expected body size from `Content-Length`, or `None` when the header
/// is absent.
fn expected_length(headers: &HeaderMap) -> Result<Option<u64>, DownloadError> {
    let Some(value) = headers.get(header::CONTENT_LENGTH) else {
        return Ok(None);
    };

    let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
    match value.trim().parse::<u64>() {
        Ok(length) => Ok(Some(length)),
        Err(_) => Err(DownloadError::InvalidContentLength { value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn headers_with(name: header::HeaderName, value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(name, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn builds_archive_endpoint() {
        let repository: RepositoryRef = "octocat/Hello-World".parse().unwrap();
        let url = archive_url(GITHUB_BASE_URL, &repository).unwrap();
        assert_eq!(
            url.as_str(),
            "https://github.com/octocat/Hello-World/archive/master.zip"
        );
    }

    #[test]
    fn accepts_zip_content_type_only() {
        let headers = headers_with(header::CONTENT_TYPE, "application/zip");
        assert!(validate_content_type(&headers).is_ok());

        let headers = headers_with(header::CONTENT_TYPE, "text/html");
        assert!(matches!(
            validate_content_type(&headers),
            Err(DownloadError::InvalidContentType { found: Some(found) }) if found == "text/html"
        ));

        assert!(matches!(
            validate_content_type(&HeaderMap::new()),
            Err(DownloadError::InvalidContentType { found: None })
        ));
    }

    #[test]
    fn filename_defaults_when_disposition_is_absent() {
        let filename = resolve_filename(&HeaderMap::new(), "Hello-World").unwrap();
        assert_eq!(filename, "Hello-World-master.zip");
    }

    #[test]
    fn filename_comes_from_disposition() {
        let headers = headers_with(header::CONTENT_DISPOSITION, "attachment; filename=foo.zip");
        let filename = resolve_filename(&headers, "Hello-World").unwrap();
        assert_eq!(filename, "foo.zip");
    }

    #[test]
    fn malformed_disposition_is_an_error() {
        for value in [
            "inline; filename=foo.zip",
            "attachment; filename=",
            "attachment; filename=../escape.zip",
        ] {
            let headers = headers_with(header::CONTENT_DISPOSITION, value);
            assert!(matches!(
                resolve_filename(&headers, "Hello-World"),
                Err(DownloadError::InvalidContentDisposition { .. })
            ));
        }
    }

    #[test]
    fn content_length_parses_or_fails() {
        assert_eq!(expected_length(&HeaderMap::new()).unwrap(), None);

        let headers = headers_with(header::CONTENT_LENGTH, "2048");
        assert_eq!(expected_length(&headers).unwrap(), Some(2048));

        let headers = headers_with(header::CONTENT_LENGTH, "not-a-number");
        assert!(matches!(
            expected_length(&headers),
            Err(DownloadError::InvalidContentLength { .. })
        ));
    }
}
