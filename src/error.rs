use core::fmt;

/// Returned by [`crate::Console::load_rom`] when the cartridge header names a
/// controller this engine does not implement (MBC3, MBC6, MBC7, or any
/// reserved code).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RomNotSupported {
    pub header_byte: u8,
}

impl fmt::Display for RomNotSupported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cartridge header type 0x{:02x} is not a supported MBC",
            self.header_byte
        )
    }
}

impl core::error::Error for RomNotSupported {}
