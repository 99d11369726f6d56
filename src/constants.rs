pub const HEADER_FLASH_PARAMS_OFFSET: usize = 3;
pub const MIN_IMAGE_SIZE: usize = 16;

pub const DEFAULT_BOOTLOADER_PATH: &str = "build/bootloader/bootloader.bin";
pub const BACKUP_SUFFIX: &str = ".backup";

pub mod sdkconfig {
    pub const PRIMARY: &str = "sdkconfig";
    pub const DEFAULTS: &str = "sdkconfig.defaults";

    pub const FLASHSIZE_8MB: &str = "CONFIG_ESPTOOLPY_FLASHSIZE_8MB=y";
    pub const FLASHSIZE_4MB: &str = "CONFIG_ESPTOOLPY_FLASHSIZE_4MB=y";
}
