//! Interrupt-flag bits, shared by IF (0xFF0F) and IE (0xFFFF).

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct Ints: u8 {
        const VBLANK = 1 << 0;
        const LCD    = 1 << 1;
        const TIMER  = 1 << 2;
        const SERIAL = 1 << 3;
        const JOYPAD = 1 << 4;
    }
}

impl Ints {
    /// Service vectors in strict priority order, VBlank first.
    pub const PRIORITY: [Ints; 5] = [
        Ints::VBLANK,
        Ints::LCD,
        Ints::TIMER,
        Ints::SERIAL,
        Ints::JOYPAD,
    ];

    pub fn vector(self) -> u16 {
        match self {
            Ints::VBLANK => 0x0040,
            Ints::LCD => 0x0048,
            Ints::TIMER => 0x0050,
            Ints::SERIAL => 0x0058,
            Ints::JOYPAD => 0x0060,
            _ => unreachable!("vector() called on a non-singleton flag set"),
        }
    }
}
