//! Flash size detection from ESP-IDF `sdkconfig` files
use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};

use crate::constants::sdkconfig;
use crate::header::FlashSize;

/// Where the effective flash size came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeSource {
    /// Given on the command line
    Explicit,
    /// Found in a config file, by file name
    Config(&'static str),
    /// Nothing conclusive found
    Default,
}

impl fmt::Display for SizeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeSource::Explicit => write!(f, "command line"),
            SizeSource::Config(name) => write!(f, "{}", name),
            SizeSource::Default => write!(f, "default"),
        }
    }
}

/// Detect the flash size configured for the project rooted at `dir`.
///
/// `sdkconfig` takes priority over `sdkconfig.defaults`. Missing files are skipped.
pub fn detect_flash_size<P: AsRef<Path>>(dir: P) -> Result<(FlashSize, SizeSource)> {
    let dir = dir.as_ref();
    for name in [sdkconfig::PRIMARY, sdkconfig::DEFAULTS] {
        let path = dir.join(name);
        if !path.exists() {
            log::debug!("{} not found", path.display());
            continue;
        }
        let raw = std::fs::read(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        if let Some(size) = scan_markers(&String::from_utf8_lossy(&raw)) {
            log::debug!("{} selects {} flash", path.display(), size);
            return Ok((size, SizeSource::Config(name)));
        }
    }
    Ok((FlashSize::default(), SizeSource::Default))
}

// 8MB marker wins over 4MB if both are present
fn scan_markers(content: &str) -> Option<FlashSize> {
    if content.contains(sdkconfig::FLASHSIZE_8MB) {
        Some(FlashSize::Size8Mb)
    } else if content.contains(sdkconfig::FLASHSIZE_4MB) {
        Some(FlashSize::Size4Mb)
    } else {
        None
    }
}
