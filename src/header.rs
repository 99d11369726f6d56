//! Flash parameters byte of the bootloader image header.
//!
//! The byte at [`HEADER_FLASH_PARAMS_OFFSET`](crate::constants::HEADER_FLASH_PARAMS_OFFSET)
//! packs a 5-bit flash size code above a 3-bit flash mode code:
//!
//! ```text
//!  7       3 2   0
//! +---------+-----+
//! |  size   | mode|
//! +---------+-----+
//! ```
use std::fmt;

bitfield::bitfield! {
    /// Raw flash parameters byte
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FlashParams(u8);
    impl Debug;
    u8;
    pub size_code, set_size_code: 7, 3;
    pub mode_code, set_mode_code: 2, 0;
}

impl FlashParams {
    pub const fn raw(&self) -> u8 {
        self.0
    }

    pub fn size(&self) -> Option<FlashSize> {
        FlashSize::from_size_code(self.size_code())
    }

    pub fn mode(&self) -> Option<FlashMode> {
        FlashMode::from_code(self.mode_code())
    }
}

impl fmt::Display for FlashParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02x} (size code: 0x{:x}", self.0, self.size_code())?;
        if let Some(size) = self.size() {
            write!(f, " [{}]", size)?;
        }
        write!(f, ", mode: {}", self.mode_code())?;
        if let Some(mode) = self.mode() {
            write!(f, " [{}]", mode)?;
        }
        write!(f, ")")
    }
}

/// Flash chip capacity understood by the boot ROM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FlashSize {
    #[default]
    Size4Mb,
    Size8Mb,
    Size16Mb,
}

impl FlashSize {
    pub const fn from_megabytes(mb: i64) -> Option<Self> {
        match mb {
            4 => Some(FlashSize::Size4Mb),
            8 => Some(FlashSize::Size8Mb),
            16 => Some(FlashSize::Size16Mb),
            _ => None,
        }
    }

    pub const fn from_size_code(code: u8) -> Option<Self> {
        match code {
            4 => Some(FlashSize::Size4Mb),
            5 => Some(FlashSize::Size8Mb),
            6 => Some(FlashSize::Size16Mb),
            _ => None,
        }
    }

    pub const fn megabytes(&self) -> i64 {
        match self {
            FlashSize::Size4Mb => 4,
            FlashSize::Size8Mb => 8,
            FlashSize::Size16Mb => 16,
        }
    }

    pub const fn size_code(&self) -> u8 {
        match self {
            FlashSize::Size4Mb => 4,
            FlashSize::Size8Mb => 5,
            FlashSize::Size16Mb => 6,
        }
    }
}

impl fmt::Display for FlashSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}MB", self.megabytes())
    }
}

/// SPI flash read mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FlashMode {
    Qio = 0,
    Qout = 1,
    /// Dual I/O, the mode this tool always writes
    Dio = 2,
    Dout = 3,
}

impl FlashMode {
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(FlashMode::Qio),
            1 => Some(FlashMode::Qout),
            2 => Some(FlashMode::Dio),
            3 => Some(FlashMode::Dout),
            _ => None,
        }
    }

    pub const fn code(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for FlashMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FlashMode::Qio => "QIO",
            FlashMode::Qout => "QOUT",
            FlashMode::Dio => "DIO",
            FlashMode::Dout => "DOUT",
        };
        f.write_str(name)
    }
}

/// Split a header byte into `(size_code, mode_code)`.
pub fn decode(byte: u8) -> (u8, u8) {
    let params = FlashParams(byte);
    (params.size_code(), params.mode_code())
}

/// Build a header byte from a capacity in megabytes and a raw mode code.
///
/// Capacities other than 4, 8 and 16 MB are encoded as 4 MB.
pub fn encode(size_mb: i64, mode_code: u8) -> u8 {
    let size = FlashSize::from_megabytes(size_mb).unwrap_or_default();
    let mut params = FlashParams(0);
    params.set_size_code(size.size_code());
    params.set_mode_code(mode_code);
    params.raw()
}
