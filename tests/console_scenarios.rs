//! End-to-end scenarios driving a whole `Console` with hand-assembled ROM
//! images, in the style of the teacher's `tests/blargg.rs` — no external ROM
//! fixtures, just enough bytes to exercise one behaviour.

use handheld_core::Console;

const ROM_BANK_SIZE: usize = 0x4000;

fn rom_only(program: &[u8]) -> Vec<u8> {
    let mut rom = vec![0u8; 0x8000];
    rom[0x0100..0x0100 + program.len()].copy_from_slice(program);
    rom
}

/// Scenario 1: a guest program prints "HI" over the serial data register and
/// then halts; a host polling SB/IF must recover the bytes in order.
#[test]
fn serial_capture_recovers_printed_bytes_in_order() {
    let mut program = Vec::new();
    for &byte in b"HI" {
        program.extend_from_slice(&[0x3e, byte]); // LD A,byte
        program.extend_from_slice(&[0xe0, 0x01]); // LDH (SB),A
        program.extend_from_slice(&[0x3e, 0x81]); // LD A,0x81
        program.extend_from_slice(&[0xe0, 0x02]); // LDH (SC),A -- completes synchronously
    }
    program.push(0x76); // HALT

    let mut console = Console::new();
    console.load_rom(rom_only(&program)).unwrap();
    console.power_on();

    let mut captured = Vec::new();
    let mut last_sb = None;
    for _ in 0..2_000 {
        console.tick();
        if console.mem(0xff0f) & 0x08 != 0 {
            let sb = console.mem(0xff01);
            if last_sb != Some(sb) {
                captured.push(sb);
                last_sb = Some(sb);
            }
        }
        if captured.len() == 2 {
            break;
        }
    }
    assert_eq!(captured, b"HI");
}

/// Running the same program twice from a fresh power-on must produce the
/// same captured bytes (§5's reproducibility property).
#[test]
fn serial_capture_is_deterministic_across_runs() {
    fn capture() -> Vec<u8> {
        let program: Vec<u8> = b"OK"
            .iter()
            .flat_map(|&b| [0x3e, b, 0xe0, 0x01, 0x3e, 0x81, 0xe0, 0x02])
            .chain([0x76])
            .collect();
        let mut console = Console::new();
        console.load_rom(rom_only(&program)).unwrap();
        console.power_on();
        let mut captured = Vec::new();
        let mut last_sb = None;
        for _ in 0..2_000 {
            console.tick();
            if console.mem(0xff0f) & 0x08 != 0 {
                let sb = console.mem(0xff01);
                if last_sb != Some(sb) {
                    captured.push(sb);
                    last_sb = Some(sb);
                }
            }
            if captured.len() == 2 {
                break;
            }
        }
        captured
    }
    assert_eq!(capture(), capture());
}

/// Scenario 2: MBC1 banking, driven end to end through the CPU rather than
/// poking cartridge internals directly.
#[test]
fn mbc1_bank_switch_is_visible_through_the_console() {
    let banks = 8u16; // 128 KiB
    let mut rom = vec![0u8; usize::from(banks) * ROM_BANK_SIZE];
    rom[0x0147] = 0x01; // MBC1
    rom[0x0148] = 2; // 2 << 2 == 8 banks
    rom[3 * ROM_BANK_SIZE] = 0x77; // byte 0 of physical bank 3
    let program = [
        0x3e, 0x03, // LD A,3
        0xea, 0x00, 0x20, // LD (0x2000),A  -- selects ROM bank 3
        0x76, // HALT
    ];
    rom[0x0100..0x0100 + program.len()].copy_from_slice(&program);

    let mut console = Console::new();
    console.load_rom(rom).unwrap();
    console.power_on();
    for _ in 0..100 {
        console.tick();
    }
    assert_eq!(console.mem(0x4000), 0x77);
}

/// Scenario 3: the wave channel, driven end to end through the bus (NR30..NR34
/// and wave RAM written by a guest program) rather than by poking `Wave`
/// fields directly, must actually produce sound once enabled.
#[test]
fn wave_channel_enabled_through_the_bus_emits_nonzero_samples() {
    let program = [
        0x3e, 0x80, // LD A,0x80
        0xe0, 0x1a, // LDH (NR30),A  -- DAC on
        0x3e, 0x01, // LD A,1
        0xe0, 0x1b, // LDH (NR31),A  -- length counter = 1
        0x3e, 0x20, // LD A,0x20
        0xe0, 0x1c, // LDH (NR32),A  -- full volume
        0x3e, 0x00, // LD A,0
        0xe0, 0x1d, // LDH (NR33),A
        0xe0, 0x1e, // LDH (NR34),A
        0x3e, 0xf0, // LD A,0xf0
        0xe0, 0x30, // LDH (wave RAM byte 0),A
        0x76, // HALT
    ];

    let mut console = Console::new();
    console.load_rom(rom_only(&program)).unwrap();
    console.power_on();
    for _ in 0..200 {
        console.tick();
    }
    assert!(console.wave_samples().iter().any(|&s| s != 0.0));
}
