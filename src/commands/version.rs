//! Version command implementation

use crate::downloader::DownloaderRegistry;
use crate::error::Result;

/// Print the version and the hosting schemes this build supports
pub fn run() -> Result<()> {
    println!("kcm {}", env!("CARGO_PKG_VERSION"));

    let registry = DownloaderRegistry::with_defaults();
    println!("hosting schemes: {}", registry.schemes().join(", "));

    Ok(())
}
