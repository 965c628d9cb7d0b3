//! Scanline-based picture processing unit.
//!
//! Tile/color-index bit composition and OAM attribute layout follow the
//! teacher's `ppu.rs` (`get_color_from_tile`, `ObjectAttribute`); the
//! dot/mode state machine and rendering are a scanline-at-a-time model per
//! this crate's component design, not the teacher's per-dot pixel-FIFO
//! fetcher (`ppu/pixel_fetcher.rs`, `ppu/sprite_fetcher.rs`), which models
//! hardware timing this crate does not target.

use arrayvec::ArrayVec;

use crate::bus::{Bus, LcdControl, LcdStat, PpuMode};
use crate::ic::Ints;

pub const WIDTH: usize = 160;
pub const HEIGHT: usize = 144;

const DOTS_PER_SCANLINE: u16 = 450;
const SCANLINES_PER_FRAME: u8 = 154;

#[derive(Clone, Copy, PartialEq, Eq, Default)]
enum ColorIndex {
    #[default]
    Zero,
    One,
    Two,
    Three,
}

impl ColorIndex {
    fn from_bits(lsb: bool, msb: bool) -> Self {
        match (msb, lsb) {
            (true, true) => Self::Three,
            (true, false) => Self::Two,
            (false, true) => Self::One,
            (false, false) => Self::Zero,
        }
    }

    fn raw(self) -> u8 {
        self as u8
    }

    fn through_palette(self, palette: u8) -> u8 {
        (palette >> (2 * self.raw())) & 0b11
    }
}

fn tile_row(vram: &[u8], tile_base: usize, row: u8) -> [u8; 2] {
    let offset = tile_base + usize::from(row) * 2;
    [vram[offset], vram[offset + 1]]
}

fn color_in_row(row: [u8; 2], x: u8) -> ColorIndex {
    let bit = 0x80 >> x;
    ColorIndex::from_bits(row[0] & bit != 0, row[1] & bit != 0)
}

/// Resolves the VRAM offset of an 8x8 tile using LCDC's addressing mode.
fn bg_win_tile_base(vram: &[u8], lcdc: LcdControl, tile_index: u8) -> usize {
    if lcdc.contains(LcdControl::TILE_DATA) {
        usize::from(tile_index) * 16
    } else {
        (0x1000i32 + i32::from(tile_index as i8) * 16) as usize
    }
}

fn bg_pixel(bus: &Bus, lcdc: LcdControl, x: u8, y: u8) -> ColorIndex {
    let map_base = if lcdc.contains(LcdControl::BG_MAP) {
        0x1c00
    } else {
        0x1800
    };
    let px = x.wrapping_add(bus.scx);
    let py = y.wrapping_add(bus.scy);
    let (tx, ty) = (u16::from(px / 8), u16::from(py / 8));
    let tile_index = bus.vram()[map_base + usize::from(ty * 32 + tx)];
    let tile_base = bg_win_tile_base(bus.vram(), lcdc, tile_index);
    let row = tile_row(bus.vram(), tile_base, py % 8);
    color_in_row(row, px % 8)
}

fn window_pixel(bus: &Bus, lcdc: LcdControl, x: u8, ly: u8) -> ColorIndex {
    let map_base = if lcdc.contains(LcdControl::WINDOW_MAP) {
        0x1c00
    } else {
        0x1800
    };
    let wx = x + 7 - bus.wx;
    let wy = ly - bus.wy;
    let (tx, ty) = (u16::from(wx / 8), u16::from(wy / 8));
    let tile_index = bus.vram()[map_base + usize::from(ty * 32 + tx)];
    let tile_base = bg_win_tile_base(bus.vram(), lcdc, tile_index);
    let row = tile_row(bus.vram(), tile_base, wy % 8);
    color_in_row(row, wx % 8)
}

#[derive(Clone, Copy)]
struct Sprite {
    y: u8,
    x: u8,
    tile_index: u8,
    flags: u8,
}

impl Sprite {
    fn y_flip(self) -> bool {
        self.flags & (1 << 6) != 0
    }
    fn x_flip(self) -> bool {
        self.flags & (1 << 5) != 0
    }
    fn palette_1(self) -> bool {
        self.flags & (1 << 4) != 0
    }
    fn behind_bg(self) -> bool {
        self.flags & (1 << 7) != 0
    }
}

fn sprites_on_line(bus: &Bus, lcdc: LcdControl, ly: u8) -> ArrayVec<Sprite, 10> {
    let height: u8 = if lcdc.contains(LcdControl::OBJ_SIZE) { 16 } else { 8 };
    let mut found = ArrayVec::new();
    for chunk in bus.oam_bytes().chunks_exact(4) {
        if found.is_full() {
            break;
        }
        let screen_y = chunk[0].wrapping_sub(16);
        if ly.wrapping_sub(screen_y) < height {
            found.push(Sprite {
                y: chunk[0],
                x: chunk[1],
                tile_index: chunk[2],
                flags: chunk[3],
            });
        }
    }
    found
}

fn sprite_pixel(bus: &Bus, lcdc: LcdControl, sprite: Sprite, screen_x: u8, ly: u8) -> ColorIndex {
    let is_big = lcdc.contains(LcdControl::OBJ_SIZE);
    let screen_y = sprite.y.wrapping_sub(16);
    let mut row = ly.wrapping_sub(screen_y);
    if sprite.y_flip() {
        row = if is_big { 15 } else { 7 } - row;
    }
    let tile_index = if is_big {
        (sprite.tile_index & 0xfe) + u8::from(row >= 8)
    } else {
        sprite.tile_index
    };
    let row_in_tile = row % 8;
    let tile_base = usize::from(tile_index) * 16;
    let line = tile_row(bus.vram(), tile_base, row_in_tile);
    let col = screen_x.wrapping_sub(sprite.x.wrapping_sub(8));
    let col = if sprite.x_flip() { 7 - col } else { col };
    color_in_row(line, col)
}

#[derive(Debug, Clone, Default)]
pub struct Ppu {
    lx: u16,
    prev_mode: Option<PpuMode>,
    prev_lyc_match: bool,
    framebuffer: Vec<u8>,
}

impl Ppu {
    pub fn new() -> Self {
        Self {
            framebuffer: vec![0; WIDTH * HEIGHT],
            ..Default::default()
        }
    }

    pub fn power_on(&mut self) {
        self.lx = 0;
        self.prev_mode = None;
        self.prev_lyc_match = false;
        self.framebuffer.fill(0);
    }

    pub fn screen(&self) -> &[u8] {
        &self.framebuffer
    }

    pub fn is_vblank_complete(&self, bus: &Bus) -> bool {
        bus.ly == 0 && self.lx == 0
    }

    fn mode_for(ly: u8, lx: u16) -> PpuMode {
        if ly >= 144 {
            PpuMode::VBlank
        } else if lx < 160 {
            PpuMode::Drawing
        } else if lx < 360 {
            PpuMode::HBlank
        } else {
            PpuMode::OamScan
        }
    }

    pub fn tick(&mut self, bus: &mut Bus) {
        if !bus.lcdc.contains(LcdControl::LCD_ENABLE) {
            bus.set_ppu_mode(PpuMode::HBlank);
            return;
        }

        let ly = bus.ly;
        let mode = Self::mode_for(ly, self.lx);
        bus.set_ppu_mode(mode);

        if self.prev_mode != Some(mode) {
            let stat_bit = match mode {
                PpuMode::HBlank => Some(LcdStat::HBLANK_INT),
                PpuMode::VBlank => Some(LcdStat::VBLANK_INT),
                PpuMode::OamScan => Some(LcdStat::OAM_INT),
                PpuMode::Drawing => None,
            };
            if let Some(bit) = stat_bit
                && bus.stat.contains(bit)
            {
                bus.request_interrupt(Ints::LCD);
            }
            if mode == PpuMode::VBlank && self.lx == 0 {
                bus.request_interrupt(Ints::VBLANK);
            }
            if mode == PpuMode::Drawing && self.lx == 0 {
                self.render_scanline(bus, ly);
            }
        }

        let lyc_match = ly == bus.lyc;
        if lyc_match && !self.prev_lyc_match && bus.stat.contains(LcdStat::LYC_INT) {
            bus.request_interrupt(Ints::LCD);
        }
        self.prev_lyc_match = lyc_match;
        self.prev_mode = Some(mode);

        self.lx += 1;
        if self.lx >= DOTS_PER_SCANLINE {
            self.lx = 0;
            let next_ly = if ly + 1 >= SCANLINES_PER_FRAME { 0 } else { ly + 1 };
            bus.write_internal(0xff44, next_ly);
        }
    }

    fn render_scanline(&mut self, bus: &Bus, ly: u8) {
        let lcdc = bus.lcdc;
        let window_active = lcdc.contains(LcdControl::WINDOW_ENABLE)
            && bus.wx <= 166
            && bus.wy < 143
            && ly >= bus.wy;
        let sprites = if lcdc.contains(LcdControl::OBJ_ENABLE) {
            sprites_on_line(bus, lcdc, ly)
        } else {
            ArrayVec::new()
        };

        for x in 0..WIDTH as u8 {
            let bg_index = if lcdc.contains(LcdControl::BG_ENABLE) {
                if window_active && x + 7 >= bus.wx {
                    window_pixel(bus, lcdc, x, ly)
                } else {
                    bg_pixel(bus, lcdc, x, ly)
                }
            } else {
                ColorIndex::Zero
            };

            let mut sprite_hit: Option<(ColorIndex, Sprite)> = None;
            for sprite in &sprites {
                let sx = x.wrapping_sub(sprite.x.wrapping_sub(8));
                if sx >= 8 {
                    continue;
                }
                let color = sprite_pixel(bus, lcdc, *sprite, x, ly);
                if color != ColorIndex::Zero {
                    sprite_hit = Some((color, *sprite));
                    break;
                }
            }

            let final_index = match sprite_hit {
                Some((color, sprite))
                    if !sprite.behind_bg() || bg_index == ColorIndex::Zero =>
                {
                    let palette = if sprite.palette_1() { bus.obp1 } else { bus.obp0 };
                    color.through_palette(palette)
                }
                _ => bg_index.through_palette(bus.bgp),
            };

            self.framebuffer[usize::from(ly) * WIDTH + usize::from(x)] = final_index;
        }
    }
}
