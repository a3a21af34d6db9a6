//! Cloud-drive downloader
//!
//! Fetches a single file over HTTP and writes it into the destination
//! directory. The local filename is the requested subpath when given,
//! otherwise the last path segment of the URL.

use std::io::Read;

use crate::downloader::{DownloadRequest, Downloader};
use crate::error::{KcmError, Result};

/// Cap on fetched file size, to keep a misbehaving remote from filling the disk
const MAX_DOWNLOAD_BYTES: u64 = 512 * 1024 * 1024;

/// Read the full body, failing if it exceeds `cap` bytes
fn read_capped(reader: impl Read, cap: u64, url: &str) -> Result<Vec<u8>> {
    let mut body = Vec::new();
    reader
        .take(cap + 1)
        .read_to_end(&mut body)
        .map_err(|e| KcmError::download_failed(url, e.to_string()))?;
    if body.len() as u64 > cap {
        return Err(KcmError::download_failed(
            url,
            format!("response exceeds the {cap} byte download limit"),
        ));
    }
    Ok(body)
}

/// Downloader for cloud-drive hosted files
#[derive(Debug, Default)]
pub struct DriveDownloader;

impl DriveDownloader {
    pub fn new() -> Self {
        Self
    }

    /// Derive the local filename from the request
    fn file_name(request: &DownloadRequest<'_>) -> String {
        if let Some(subpath) = request.subpath {
            return subpath.to_string();
        }
        request
            .url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .unwrap_or("download")
            .to_string()
    }
}

impl Downloader for DriveDownloader {
    fn download(&self, request: &DownloadRequest<'_>) -> Result<()> {
        let response = ureq::get(request.url)
            .call()
            .map_err(|e| KcmError::download_failed(request.url, e.to_string()))?;

        if response.status() != 200 {
            return Err(KcmError::download_failed(
                request.url,
                format!("server returned status {}", response.status()),
            ));
        }

        let body = read_capped(response.into_reader(), MAX_DOWNLOAD_BYTES, request.url)?;

        std::fs::create_dir_all(request.dest_dir).map_err(|e| {
            KcmError::directory_create_failed(request.dest_dir.display().to_string(), e.to_string())
        })?;

        let target = request.dest_dir.join(Self::file_name(request));
        std::fs::write(&target, body)
            .map_err(|e| KcmError::download_failed(request.url, e.to_string()))?;

        Ok(())
    }
}
