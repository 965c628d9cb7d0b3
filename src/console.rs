//! Top-level facade wiring cartridge, bus, and the four ticking subsystems
//! into a single console, replacing the teacher's `Emulator::execute`.

use crate::bus::Bus;
use crate::cartridge::Cartridge;
use crate::cpu::Cpu;
use crate::error::RomNotSupported;
use crate::joypad::Joypad;
use crate::ppu::{HEIGHT, Ppu, WIDTH};
use crate::timer::Timer;
use crate::wave::Wave;

pub const SCREEN_WIDTH: usize = WIDTH;
pub const SCREEN_HEIGHT: usize = HEIGHT;

fn blank_cartridge() -> Cartridge {
    // An all-zero header byte decodes as ROM-only, so this never fails;
    // `load_rom` replaces it with the guest's real cartridge.
    Cartridge::new(vec![0u8; 0x8000]).expect("placeholder cartridge header is always ROM-only")
}

#[derive(Debug, Clone)]
pub struct Console {
    bus: Bus,
    cpu: Cpu,
    timer: Timer,
    joypad: Joypad,
    ppu: Ppu,
    wave: Wave,
}

impl Default for Console {
    fn default() -> Self {
        Self {
            bus: Bus::new(blank_cartridge()),
            cpu: Cpu::new(),
            timer: Timer::new(),
            joypad: Joypad::new(),
            ppu: Ppu::new(),
            wave: Wave::new(),
        }
    }
}

impl Console {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_rom(&mut self, bytes: Vec<u8>) -> Result<(), RomNotSupported> {
        self.bus.cartridge = Cartridge::new(bytes)?;
        Ok(())
    }

    pub fn load_ram(&mut self, bytes: &[u8]) {
        self.bus.cartridge.load_ram(bytes);
    }

    pub fn ram(&self) -> &[u8] {
        self.bus.cartridge.ram()
    }

    /// Resets all subsystems: PC=0x0100, SP=0xFFFF, IF=0x00, IE=0xFF, and a
    /// zeroed framebuffer.
    pub fn power_on(&mut self) {
        self.bus.power_on();
        self.cpu.power_on();
        self.ppu.power_on();
    }

    /// Advances every subsystem by one master-clock tick, in the fixed order
    /// CPU, Joypad, Timer, PPU, Wave.
    pub fn tick(&mut self) {
        self.cpu.step(&mut self.bus);
        self.joypad.tick(&mut self.bus);
        self.timer.tick(&mut self.bus);
        self.ppu.tick(&mut self.bus);
        self.wave.tick(&mut self.bus);
    }

    pub fn is_vblank_complete(&self) -> bool {
        self.ppu.is_vblank_complete(&self.bus)
    }

    pub fn screen(&self) -> &[u8] {
        self.ppu.screen()
    }

    pub fn wave_samples(&self) -> &[f32] {
        self.wave.samples()
    }

    pub fn clear_sound(&mut self) {
        self.wave.clear();
    }

    pub fn set_button(&mut self, name: &str, pressed: bool) {
        self.joypad.set_button(name, pressed);
    }

    pub fn mem(&self, addr: u16) -> u8 {
        self.bus.read(addr)
    }
}
