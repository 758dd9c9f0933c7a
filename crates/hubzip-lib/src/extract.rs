use crate::error::{CleanupError, ExtractionError};
use std::fs::{self, File};
use std::io;
use std::path::Path;
use tracing::debug;
use zip::ZipArchive;

/// Extracts every entry of the zip archive at `archive_path` into
/// `destination`, preserving relative paths and creating intermediate
/// directories as needed. Entries whose name would escape the destination
/// are rejected.
pub fn extract_archive(archive_path: &Path, destination: &Path) -> Result<(), ExtractionError> {
    let file = File::open(archive_path).map_err(|source| ExtractionError::Open {
        path: archive_path.to_path_buf(),
        source,
    })?;

    let mut archive = ZipArchive::new(file).map_err(|source| ExtractionError::Archive {
        path: archive_path.to_path_buf(),
        source,
    })?;

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|source| ExtractionError::Archive {
                path: archive_path.to_path_buf(),
                source,
            })?;
        let name = entry.name().to_string();

        let Some(relative) = entry.enclosed_name() else {
            return Err(ExtractionError::UnsafeEntryPath { name });
        };
        let target = destination.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&target).map_err(|source| ExtractionError::Entry {
                name: name.clone(),
                source,
            })?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|source| ExtractionError::Entry {
                name: name.clone(),
                source,
            })?;
        }

        let mut output = File::create(&target).map_err(|source| ExtractionError::Entry {
            name: name.clone(),
            source,
        })?;
        io::copy(&mut entry, &mut output).map_err(|source| ExtractionError::Entry {
            name: name.clone(),
            source,
        })?;
    }

    debug!(path = %archive_path.display(), entries = archive.len(), "archive extracted");
    Ok(())
}

/// Deletes the downloaded archive after a successful extraction.
pub fn remove_archive(archive_path: &Path) -> Result<(), CleanupError> {
    fs::remove_file(archive_path).map_err(|source| CleanupError {
        path: archive_path.to_path_buf(),
        source,
    })
}
