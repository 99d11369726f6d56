//! ESP32 bootloader header patching.

pub mod config;
pub mod constants;
pub mod header;
pub mod patch;

pub use self::header::{FlashMode, FlashParams, FlashSize};
pub use self::patch::{Patch, patch_image};
