//! Per-component acquisition
//!
//! Drives the source locator and the downloader registry for one component:
//! sets up the local destination directory, walks the candidate address
//! links in order and delegates to the downloader registered for the first
//! supported hosting scheme, falling back to later candidates on failure.

use std::path::{Path, PathBuf};

use crate::downloader::{DownloadRequest, DownloaderRegistry};
use crate::error::{KcmError, Result};
use crate::graph::{ComponentId, ComponentKind, GraphQueryGateway};
use crate::locator;

/// Filename of the local specification written next to downloaded material
pub const SPECIFICATION_FILENAME: &str = "specification.scs";

/// Acquire a component's source material into `base_dir`
///
/// The destination directory is `base_dir/<component id>`. For a reusable
/// specification only the specification file is fetched; a repository is
/// fetched whole.
///
/// Returns the destination directory on success.
///
/// # Errors
///
/// Locator errors propagate unchanged. Additionally:
/// - [`KcmError::DirectoryCreateFailed`] - the destination cannot be created
/// - [`KcmError::UnsupportedHostingScheme`] - no candidate link has a
///   registered downloader
/// - [`KcmError::DownloadFailed`] - every supported candidate failed; the
///   last failure is reported
pub fn acquire<G: GraphQueryGateway + ?Sized>(
    gateway: &G,
    registry: &DownloaderRegistry,
    id: &ComponentId,
    base_dir: &Path,
) -> Result<PathBuf> {
    let kind = gateway.classify(id);
    let links = locator::locate(gateway, id)?;

    // Only a specification narrows the fetch to its local filename
    let subpath = match kind {
        ComponentKind::ReusableSpecification => Some(SPECIFICATION_FILENAME),
        _ => None,
    };

    let dest_dir = base_dir.join(id.as_str());
    std::fs::create_dir_all(&dest_dir).map_err(|e| {
        KcmError::directory_create_failed(dest_dir.display().to_string(), e.to_string())
    })?;

    let mut last_failure: Option<KcmError> = None;
    let mut unsupported_scheme: Option<String> = None;

    for link in &links {
        let Some(downloader) = registry.get(&link.scheme_tag) else {
            unsupported_scheme.get_or_insert_with(|| link.scheme_tag.clone());
            continue;
        };

        let request = DownloadRequest {
            url: &link.url,
            subpath,
            dest_dir: &dest_dir,
        };
        match downloader.download(&request) {
            Ok(()) => return Ok(dest_dir),
            Err(err) => last_failure = Some(err),
        }
    }

    if let Some(err) = last_failure {
        return Err(err);
    }

    Err(KcmError::UnsupportedHostingScheme {
        id: id.to_string(),
        scheme: unsupported_scheme.unwrap_or_default(),
    })
}
