use crate::cli::args::RunOptions;
use crate::download::{DownloadOptions, fetch_archive};
use crate::error::HubzipError;
use crate::extract::{extract_archive, remove_archive};
use crate::repository::RepositoryRef;
use reqwest::Client;
use std::io::Write;
use std::path::Path;
use tracing;

/// Processes every repository token in order: download, extract, cleanup.
/// The first failure aborts the whole run; earlier tokens stay processed.
///
/// `base_url`, `working_dir` and `out` are passed in rather than hardcoded
/// so the loop can run against a local HTTP server, a scratch directory and
/// a capture buffer in tests. The binary passes the GitHub base URL, the
/// current directory and stdout.
pub async fn run<W: Write + ?Sized>(
    options: &RunOptions,
    base_url: &str,
    working_dir: &Path,
    out: &mut W,
) -> Result<(), HubzipError> {
    let client = Client::new();
    let download_options = DownloadOptions {
        quiet: options.quiet,
        ..DownloadOptions::default()
    };

    for token in &options.repositories {
        let repository: RepositoryRef =
            token
                .parse()
                .map_err(|source| HubzipError::InvalidReference {
                    token: token.clone(),
                    source,
                })?;

        if !options.quiet {
            // Informational only; a refused stdout must not fail the run.
            let _ = writeln!(out, "{repository}...");
            let _ = out.flush();
        }

        tracing::debug!(repository = %repository, "downloading archive");
        let archive = fetch_archive(
            &client,
            base_url,
            &repository,
            working_dir,
            &download_options,
            out,
        )
        .await
        .map_err(|source| HubzipError::Download {
            owner: repository.owner.clone(),
            repository: repository.name.clone(),
            source,
        })?;

        tracing::debug!(filename = %archive.filename, "decompressing archive");
        let archive_path = working_dir.join(&archive.filename);
        extract_archive(&archive_path, working_dir).map_err(|source| HubzipError::Extraction {
            filename: archive.filename.clone(),
            source,
        })?;

        if !options.keep {
            remove_archive(&archive_path)?;
        }
    }

    Ok(())
}

/// Reports a fatal error as two stderr lines: what failed, then why. Both
/// lines carry the program-name prefix; stderr is never suppressed.
pub fn report_error(program: &str, error: &HubzipError) {
    eprintln!("{program}: error: {error}");

    if let Some(cause) = std::error::Error::source(error) {
        let mut message = cause.to_string();
        let mut next = cause.source();
        while let Some(cause) = next {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            next = cause.source();
        }
        eprintln!("{program}: error: {message}");
    }
}
