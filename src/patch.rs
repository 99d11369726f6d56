//! Rewrite the flash parameters byte of a bootloader image in place.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use scroll::{Pread, Pwrite};

use crate::config::{self, SizeSource};
use crate::constants::{BACKUP_SUFFIX, HEADER_FLASH_PARAMS_OFFSET, MIN_IMAGE_SIZE};
use crate::header::{self, FlashMode, FlashParams, FlashSize};

/// Outcome of a successful patch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    pub path: PathBuf,
    pub backup_path: PathBuf,
    pub old: FlashParams,
    pub new: FlashParams,
    /// Flash size as requested, before the codec's 4MB fallback
    pub flash_size_mb: i64,
    pub source: SizeSource,
}

/// `<path>.backup`
pub fn backup_path<P: AsRef<Path>>(path: P) -> PathBuf {
    let mut raw = path.as_ref().as_os_str().to_owned();
    raw.push(BACKUP_SUFFIX);
    PathBuf::from(raw)
}

/// Force the image at `path` to DIO mode and the given (or detected) flash size.
///
/// When `flash_size_mb` is `None` the size is detected from the `sdkconfig` files in
/// `config_dir`. The untouched image is saved next to `path` with a `.backup` suffix
/// before `path` is overwritten. Nothing is written if the image is missing or shorter
/// than [`MIN_IMAGE_SIZE`].
pub fn patch_image<P, D>(path: P, flash_size_mb: Option<i64>, config_dir: D) -> Result<Patch>
where
    P: AsRef<Path>,
    D: AsRef<Path>,
{
    let path = path.as_ref();
    anyhow::ensure!(path.exists(), "{} does not exist", path.display());

    let (flash_size_mb, source) = match flash_size_mb {
        Some(mb) => (mb, SizeSource::Explicit),
        None => {
            let (size, source) = config::detect_flash_size(config_dir)?;
            (size.megabytes(), source)
        }
    };

    let mut data =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    anyhow::ensure!(
        data.len() >= MIN_IMAGE_SIZE,
        "{} is too small ({} bytes, header needs at least {})",
        path.display(),
        data.len(),
        MIN_IMAGE_SIZE
    );
    log::debug!("Header: {}", hex::encode(&data[..MIN_IMAGE_SIZE]));

    let old = FlashParams(data.pread::<u8>(HEADER_FLASH_PARAMS_OFFSET)?);
    log::info!("Current flash params: {}", old);

    if FlashSize::from_megabytes(flash_size_mb).is_none() {
        log::warn!(
            "Unsupported flash size {}MB, encoding as {}",
            flash_size_mb,
            FlashSize::default()
        );
    }
    let new = FlashParams(header::encode(flash_size_mb, FlashMode::Dio.code()));
    log::info!(
        "New flash params: {} for {}MB from {}",
        new,
        flash_size_mb,
        source
    );
    if new == old {
        log::info!("Header already matches, rewriting anyway");
    }

    // backup holds the image exactly as read
    let backup_path = backup_path(path);
    std::fs::write(&backup_path, &data)
        .with_context(|| format!("failed to write backup {}", backup_path.display()))?;

    data.pwrite(new.raw(), HEADER_FLASH_PARAMS_OFFSET)?;
    std::fs::write(path, &data).with_context(|| format!("failed to write {}", path.display()))?;

    log::info!("Header patched, backup saved to {}", backup_path.display());
    Ok(Patch {
        path: path.to_path_buf(),
        backup_path,
        old,
        new,
        flash_size_mb,
        source,
    })
}
