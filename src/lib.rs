//! A Sharp LR35902 console emulator core: cartridge/MBC handling, CPU,
//! scanline PPU, timer, joypad, and a single-channel wave generator, driven
//! by the [`console::Console`] facade.

pub mod bus;
pub mod cartridge;
pub mod console;
pub mod cpu;
pub mod error;
pub mod ic;
pub mod joypad;
pub mod ppu;
pub mod timer;
pub mod wave;

pub use cartridge::Cartridge;
pub use console::Console;
pub use error::RomNotSupported;
pub use ppu::{HEIGHT, WIDTH};
