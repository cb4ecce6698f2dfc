use bitfield::bitfield;
use gba_hal::regs::{Addr, BgLayer, DISPCNT, KEYINPUT, SCANLINES, SCREEN_HEIGHT, VCOUNT};
use log::warn;

use crate::bus::{IO_BASE, IO_SIZE};

bitfield! {
    #[derive(Copy, Clone, PartialEq, Eq)]
    pub struct DispCnt(u16);
    impl Debug;
    pub u8, mode, _: 2, 0;
    pub page, _: 4;
    pub obj_1d, _: 6;
    pub forced_blank, _: 7;
    pub bg0, _: 8;
    pub bg1, _: 9;
    pub bg2, _: 10;
    pub bg3, _: 11;
    pub obj, _: 12;
}

bitfield! {
    #[derive(Copy, Clone, PartialEq, Eq)]
    pub struct BgCnt(u16);
    impl Debug;
    pub u8, priority, _: 1, 0;
    pub u8, char_block, _: 3, 2;
    pub mosaic, _: 6;
    pub color_256, _: 7;
    pub u8, screen_block, _: 12, 8;
    pub wrap, _: 13;
    pub u8, size, _: 15, 14;
}

#[inline(always)]
pub(crate) fn index(addr: Addr) -> usize {
    ((addr.0 - IO_BASE) / 2) as usize
}

/// The I/O register file, plus the scanline counter that drives it.
#[derive(Debug)]
pub struct IoRegisters {
    regs: [u16; IO_SIZE as usize / 2],
}

impl Default for IoRegisters {
    fn default() -> Self {
        let mut regs = [0; IO_SIZE as usize / 2];
        // nothing held
        regs[index(KEYINPUT)] = 0x03FF;
        Self { regs }
    }
}

impl IoRegisters {
    #[inline(always)]
    pub fn read(&self, i: usize) -> u16 {
        self.regs[i]
    }

    pub fn write(&mut self, i: usize, value: u16) {
        match i {
            i if i == index(VCOUNT) || i == index(KEYINPUT) => {
                warn!("Attempted to write read-only register at: ${:08X}", IO_BASE + i as u32 * 2);
            }
            _ => self.regs[i] = value,
        }
    }

    #[inline(always)]
    pub fn vcount(&self) -> u16 {
        self.regs[index(VCOUNT)]
    }

    /// Move the beam down one line. Returns true when that line is the first
    /// of vertical blank.
    #[inline(always)]
    pub fn step_line(&mut self) -> bool {
        let line = (self.vcount() + 1) % SCANLINES;
        self.regs[index(VCOUNT)] = line;
        line == SCREEN_HEIGHT
    }

    #[inline(always)]
    pub(crate) fn set_keys(&mut self, raw: u16) {
        self.regs[index(KEYINPUT)] = raw;
    }

    pub fn dispcnt(&self) -> DispCnt {
        DispCnt(self.regs[index(DISPCNT)])
    }

    pub fn bgcnt(&self, layer: BgLayer) -> BgCnt {
        BgCnt(self.regs[index(layer.control())])
    }

    pub fn scroll(&self, layer: BgLayer) -> (u16, u16) {
        (self.regs[index(layer.h_offset())], self.regs[index(layer.v_offset())])
    }
}
