//! Source-control downloader
//!
//! Fetches a component's material from a git hosting service: shallow
//! clones the repository into a staging directory, then copies the working
//! tree (or the requested subtree/file) into the destination.
//!
//! Authentication is delegated to git's native credential system (SSH keys,
//! credential helpers).

use std::path::Path;

use git2::{Cred, CredentialType, FetchOptions, RemoteCallbacks, build::RepoBuilder};

use crate::common::fs::{CopyOptions, copy_dir_recursive};
use crate::downloader::{DownloadRequest, Downloader};
use crate::error::{KcmError, Result};

/// Downloader for git-hosted sources
#[derive(Debug, Default)]
pub struct GitDownloader;

impl GitDownloader {
    pub fn new() -> Self {
        Self
    }

    /// Shallow clone `url` into `staging`
    fn clone_into(url: &str, staging: &Path) -> Result<()> {
        let mut callbacks = RemoteCallbacks::new();
        callbacks.credentials(|remote_url, username_from_url, allowed| {
            if allowed.contains(CredentialType::SSH_KEY) {
                let username = username_from_url.unwrap_or("git");
                if let Ok(cred) = Cred::ssh_key_from_agent(username) {
                    return Ok(cred);
                }
            }
            if allowed.contains(CredentialType::USER_PASS_PLAINTEXT) {
                if let Ok(config) = git2::Config::open_default() {
                    if let Ok(cred) =
                        Cred::credential_helper(&config, remote_url, username_from_url)
                    {
                        return Ok(cred);
                    }
                }
            }
            Cred::default()
        });

        let mut fetch_options = FetchOptions::new();
        fetch_options.remote_callbacks(callbacks);

        // Shallow clone for remote URLs only
        // (not supported for local file:// URLs or local paths)
        let is_local = url.starts_with("file://")
            || url.starts_with('/')
            || Path::new(url).is_absolute();
        if !is_local {
            fetch_options.depth(1);
        }

        let mut builder = RepoBuilder::new();
        builder.fetch_options(fetch_options);

        builder
            .clone(url, staging)
            .map(|_| ())
            .map_err(|e| KcmError::download_failed(url, e.message()))
    }
}

impl Downloader for GitDownloader {
    fn download(&self, request: &DownloadRequest<'_>) -> Result<()> {
        let staging = tempfile::tempdir()
            .map_err(|e| KcmError::download_failed(request.url, e.to_string()))?;

        Self::clone_into(request.url, staging.path())?;

        std::fs::create_dir_all(request.dest_dir).map_err(|e| {
            KcmError::directory_create_failed(request.dest_dir.display().to_string(), e.to_string())
        })?;

        match request.subpath {
            // Extract one file or subtree out of the clone
            Some(subpath) => {
                let source = staging.path().join(subpath);
                if source.is_dir() {
                    copy_dir_recursive(
                        &source,
                        request.dest_dir.join(subpath),
                        &CopyOptions::exclude_git(),
                    )
                    .map_err(|e| KcmError::download_failed(request.url, e.to_string()))?;
                } else if source.is_file() {
                    std::fs::copy(&source, request.dest_dir.join(subpath))
                        .map_err(|e| KcmError::download_failed(request.url, e.to_string()))?;
                } else {
                    return Err(KcmError::download_failed(
                        request.url,
                        format!("path '{}' not found in repository", subpath),
                    ));
                }
            }
            None => {
                copy_dir_recursive(staging.path(), request.dest_dir, &CopyOptions::exclude_git())
                    .map_err(|e| KcmError::download_failed(request.url, e.to_string()))?;
            }
        }

        Ok(())
    }
}
