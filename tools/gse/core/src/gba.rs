use bit_field::BitField;
use gba_hal::dma::decode_control;
use gba_hal::input::Keys;
use gba_hal::oam::{NUM_SPRITES, ObjAttr};
use gba_hal::regs::{Addr, BG_PALETTE, BgLayer, Hardware, KEYINPUT, OBJ_PALETTE, VCOUNT, screen_block};
use alloc::vec::Vec;
use log::{trace, warn};

use crate::bus::{self, Memory, Region};
use crate::input::InputScript;
use crate::io::{BgCnt, DispCnt, IoRegisters, index};

/// Busy-wait iterations that take one scanline.
pub const SPIN_ITERATIONS_PER_LINE: u32 = 10;

/// The whole device. Time only moves when the program looks at the clock or
/// burns cycles: every VCOUNT read and every [`Hardware::spin`] moves the beam.
#[derive(Debug, Default)]
pub struct Gba {
    pub io: IoRegisters,
    pub memory: Memory,
    pub script: InputScript,
    vblanks: u64,
    dma_count: u64,
    key_samples: u64,
    oam_commit_lines: Vec<u16>,
}

impl Gba {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_script(script: InputScript) -> Self {
        Self {
            script,
            ..Self::default()
        }
    }

    /// Times the beam has entered vertical blank.
    #[inline]
    pub fn vblanks(&self) -> u64 {
        self.vblanks
    }

    /// DMA transfers run so far.
    #[inline]
    pub fn dma_count(&self) -> u64 {
        self.dma_count
    }

    /// Scanline the beam was on for each DMA into sprite attribute memory,
    /// oldest first.
    pub fn oam_commit_lines(&self) -> &[u16] {
        &self.oam_commit_lines
    }

    /// Reads of the keypad register so far.
    #[inline]
    pub fn key_samples(&self) -> u64 {
        self.key_samples
    }

    pub fn scanline(&self) -> u16 {
        self.io.vcount()
    }

    /// Read memory without side effects.
    pub fn peek(&self, addr: Addr) -> u16 {
        match bus::decode(addr) {
            Some((Region::Io, i)) => self.io.read(i),
            Some((region, i)) => self.memory.region(region)[i],
            None => 0,
        }
    }

    pub fn dispcnt(&self) -> DispCnt {
        self.io.dispcnt()
    }

    pub fn bgcnt(&self, layer: BgLayer) -> BgCnt {
        self.io.bgcnt(layer)
    }

    pub fn scroll(&self, layer: BgLayer) -> (u16, u16) {
        self.io.scroll(layer)
    }

    pub fn bg_palette(&self, color: usize) -> u16 {
        self.peek(BG_PALETTE.offset(color as u32 * 2))
    }

    pub fn obj_palette(&self, color: usize) -> u16 {
        self.peek(OBJ_PALETTE.offset(color as u32 * 2))
    }

    /// Entry `index` of a 32x32 screen block.
    pub fn screen_block_entry(&self, block: u8, index: usize) -> u16 {
        self.peek(screen_block(block).offset(index as u32 * 2))
    }

    /// Sprite attribute memory as the display sees it.
    pub fn oam(&self) -> &[ObjAttr] {
        bytemuck::cast_slice(&self.memory.oam[..NUM_SPRITES * 4])
    }

    /// `(x, y)` of sprite `index` as the display sees it.
    pub fn oam_position(&self, index: usize) -> (u16, u16) {
        let attr = &self.oam()[index];
        (attr.attr1.get_bits(0..9), attr.attr0.get_bits(0..8))
    }

    fn step_lines(&mut self, lines: u32) {
        for _ in 0..lines {
            if self.io.step_line() {
                self.vblanks += 1;
            }
        }
    }

    fn store16(&mut self, addr: Addr, value: u16) {
        match bus::decode(addr) {
            Some((Region::Io, i)) => self.io.write(i, value),
            Some((region, i)) => self.memory.region_mut(region)[i] = value,
            None => warn!("Attempted to write unmapped memory at: ${:08X}", addr.0),
        }
    }
}

impl Hardware for Gba {
    fn read16(&mut self, addr: Addr) -> u16 {
        match addr {
            VCOUNT => {
                let line = self.io.vcount();
                self.step_lines(1);
                line
            }
            KEYINPUT => {
                let keys: Keys = self.script.next_keys();
                self.key_samples += 1;
                self.io.set_keys(keys.to_register());
                self.io.read(index(KEYINPUT))
            }
            _ => {
                if bus::decode(addr).is_none() {
                    warn!("Attempted to read unmapped memory at: ${:08X}", addr.0);
                }
                self.peek(addr)
            }
        }
    }

    fn write16(&mut self, addr: Addr, value: u16) {
        self.store16(addr, value);
    }

    fn dma3(&mut self, dst: Addr, src: &[u16], control: u32) {
        let (count, unit) = decode_control(control);
        let halfwords = count * unit.halfwords();
        if src.len() < halfwords {
            warn!("dma3 source is {} halfwords, control asks for {}", src.len(), halfwords);
        }
        trace!("dma3 {} halfwords to ${:08X}", halfwords, dst.0);
        if matches!(bus::decode(dst), Some((Region::Oam, _))) {
            self.oam_commit_lines.push(self.io.vcount());
        }
        for (i, value) in src.iter().take(halfwords).enumerate() {
            self.store16(dst.offset(i as u32 * 2), *value);
        }
        self.dma_count += 1;
    }

    fn spin(&mut self, iterations: u32) {
        self.step_lines(iterations / SPIN_ITERATIONS_PER_LINE);
    }
}
