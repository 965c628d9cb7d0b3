//! DIV/TIMA prescaler state machine.
//!
//! The divisor table and overflow-then-reload behaviour follow the
//! teacher's `timer.rs`; the 16-cycle DIV increment and external-reset
//! handshake via `div_reset_pending` are new to fit the bus's
//! `write_external`/`write_internal` split.

use crate::bus::Bus;
use crate::ic::Ints;

#[derive(Debug, Clone, Copy, Default)]
pub struct Timer {
    div_prescaler: u16,
    tima_prescaler: u16,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    fn tima_divisor(tac: u8) -> u16 {
        match tac & 0b11 {
            0 => 1024,
            1 => 16,
            0b10 => 64,
            0b11 => 256,
            _ => unreachable!(),
        }
    }

    pub fn tick(&mut self, bus: &mut Bus) {
        if bus.div_reset_pending {
            self.div_prescaler = 0;
            self.tima_prescaler = 0;
            bus.div_reset_pending = false;
        } else {
            self.div_prescaler = self.div_prescaler.wrapping_add(1);
            if self.div_prescaler.is_multiple_of(16) {
                bus.write_internal(0xff04, bus.div.wrapping_add(1));
            }
        }

        if bus.tac & 0b100 == 0 {
            return;
        }

        self.tima_prescaler += 1;
        let divisor = Self::tima_divisor(bus.tac);
        if self.tima_prescaler < divisor {
            return;
        }
        self.tima_prescaler = 0;

        match bus.tima.checked_add(1) {
            Some(value) => bus.tima = value,
            None => {
                bus.tima = bus.tma;
                bus.request_interrupt(Ints::TIMER);
            }
        }
    }
}
