//! Button state and P1 (0xFF00) nibble composition.
//!
//! Nibble assembly and active-low polarity follow `original_source`'s
//! `input.hpp`; the teacher's `JoypadFlags` select-bit layout is kept on the
//! bus side (`Bus::joypad_select_bits`/`set_joypad_line`).

use crate::bus::Bus;
use crate::ic::Ints;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Buttons {
    right: bool,
    left: bool,
    up: bool,
    down: bool,
    a: bool,
    b: bool,
    select: bool,
    start: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Joypad {
    current: Buttons,
    previous: Buttons,
}

impl Joypad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_button(&mut self, name: &str, pressed: bool) {
        let slot = match name {
            "right" => &mut self.current.right,
            "left" => &mut self.current.left,
            "up" => &mut self.current.up,
            "down" => &mut self.current.down,
            "a" => &mut self.current.a,
            "b" => &mut self.current.b,
            "select" => &mut self.current.select,
            "start" => &mut self.current.start,
            other => {
                log::warn!("ignoring unknown button name {other:?}");
                return;
            }
        };
        *slot = pressed;
    }

    pub fn tick(&mut self, bus: &mut Bus) {
        let select = bus.joypad_select_bits();
        let dpad_selected = select & 0x10 == 0;
        let buttons_selected = select & 0x20 == 0;

        let mut nibble = 0x0f;
        if dpad_selected {
            nibble &= !(u8::from(self.current.right))
                & !(u8::from(self.current.left) << 1)
                & !(u8::from(self.current.up) << 2)
                & !(u8::from(self.current.down) << 3);
        }
        if buttons_selected {
            nibble &= !(u8::from(self.current.a))
                & !(u8::from(self.current.b) << 1)
                & !(u8::from(self.current.select) << 2)
                & !(u8::from(self.current.start) << 3);
        }
        bus.set_joypad_line(nibble);

        if self.any_rising_edge() {
            bus.request_interrupt(Ints::JOYPAD);
        }
        self.previous = self.current;
    }

    fn any_rising_edge(&self) -> bool {
        let c = self.current;
        let p = self.previous;
        (c.right && !p.right)
            || (c.left && !p.left)
            || (c.up && !p.up)
            || (c.down && !p.down)
            || (c.a && !p.a)
            || (c.b && !p.b)
            || (c.select && !p.select)
            || (c.start && !p.start)
    }
}
