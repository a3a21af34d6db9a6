//! Pluggable downloaders for hosting schemes
//!
//! Each supported hosting scheme implements the [`Downloader`] trait and is
//! registered with a [`DownloaderRegistry`] under its scheme tag. The
//! orchestrator resolves the registry once at pipeline construction; new
//! schemes can be added without modifying the orchestrator.
//!
//! ## Re-invocation policy
//!
//! All downloaders overwrite deterministically: invoking the same download
//! twice against the same destination replaces files in place and produces
//! byte-identical output for an unchanged source.

pub mod drive;
pub mod git;

pub use drive::DriveDownloader;
pub use git::GitDownloader;

use std::collections::HashMap;
use std::path::Path;

use crate::error::Result;

/// Hosting-scheme tag of source-control hosted URLs
pub const GITHUB_URL_TAG: &str = "github_url";
/// Hosting-scheme tag of cloud-drive hosted URLs
pub const GOOGLE_DRIVE_URL_TAG: &str = "google_drive_url";

/// One remote fetch into a local destination directory
#[derive(Debug, Clone, Copy)]
pub struct DownloadRequest<'a> {
    /// Literal URL from the component's address link
    pub url: &'a str,
    /// Path inside the fetched tree to extract; the whole tree when `None`
    pub subpath: Option<&'a str>,
    /// Destination directory, created by the downloader if missing
    pub dest_dir: &'a Path,
}

/// A fetch implementation for one hosting scheme
///
/// Implementations produce the fetched content under `request.dest_dir` and
/// surface every failure as [`crate::error::KcmError::DownloadFailed`];
/// they never panic on transport errors.
pub trait Downloader {
    /// Fetch the resource into the destination directory
    fn download(&self, request: &DownloadRequest<'_>) -> Result<()>;
}

/// Registry mapping hosting-scheme tags to downloader implementations
pub struct DownloaderRegistry {
    downloaders: HashMap<String, Box<dyn Downloader>>,
}

impl DownloaderRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            downloaders: HashMap::new(),
        }
    }

    /// Create a registry with the default schemes registered
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(GITHUB_URL_TAG, Box::new(GitDownloader::new()));
        registry.register(GOOGLE_DRIVE_URL_TAG, Box::new(DriveDownloader::new()));
        registry
    }

    /// Register a downloader for a hosting-scheme tag
    ///
    /// Replaces any previously registered downloader for the same tag.
    pub fn register(&mut self, scheme_tag: impl Into<String>, downloader: Box<dyn Downloader>) {
        self.downloaders.insert(scheme_tag.into(), downloader);
    }

    /// Look up the downloader for a hosting-scheme tag
    pub fn get(&self, scheme_tag: &str) -> Option<&dyn Downloader> {
        self.downloaders.get(scheme_tag).map(Box::as_ref)
    }

    /// Whether a hosting-scheme tag has a registered downloader
    pub fn supports(&self, scheme_tag: &str) -> bool {
        self.downloaders.contains_key(scheme_tag)
    }

    /// Registered hosting-scheme tags, sorted
    pub fn schemes(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.downloaders.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }
}

impl Default for DownloaderRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    struct RecordingDownloader;

    impl Downloader for RecordingDownloader {
        fn download(&self, request: &DownloadRequest<'_>) -> Result<()> {
            std::fs::create_dir_all(request.dest_dir)?;
            std::fs::write(request.dest_dir.join("fetched"), request.url)?;
            Ok(())
        }
    }

    #[test]
    fn test_registry_defaults() {
        let registry = DownloaderRegistry::with_defaults();
        assert!(registry.supports(GITHUB_URL_TAG));
        assert!(registry.supports(GOOGLE_DRIVE_URL_TAG));
        assert!(!registry.supports("ftp_url"));
        assert_eq!(
            registry.schemes(),
            vec![GITHUB_URL_TAG, GOOGLE_DRIVE_URL_TAG]
        );
    }

    #[test]
    fn test_registry_register_custom_scheme() {
        let mut registry = DownloaderRegistry::new();
        assert!(!registry.supports("mirror_url"));

        registry.register("mirror_url", Box::new(RecordingDownloader));
        assert!(registry.supports("mirror_url"));
        assert!(registry.get("mirror_url").is_some());
    }

    #[test]
    fn test_registered_downloader_is_invocable() {
        let mut registry = DownloaderRegistry::new();
        registry.register("mirror_url", Box::new(RecordingDownloader));

        let temp = tempfile::tempdir().expect("tempdir");
        let request = DownloadRequest {
            url: "https://mirror.example.com/resource",
            subpath: None,
            dest_dir: temp.path(),
        };
        registry
            .get("mirror_url")
            .expect("registered")
            .download(&request)
            .expect("download should succeed");

        let fetched =
            std::fs::read_to_string(temp.path().join("fetched")).expect("file written");
        assert_eq!(fetched, "https://mirror.example.com/resource");
    }
}
