use alloc::boxed::Box;
use alloc::vec;
use gba_hal::regs::Addr;

pub const IO_BASE: u32 = 0x0400_0000;
pub const PALETTE_BASE: u32 = 0x0500_0000;
pub const VRAM_BASE: u32 = 0x0600_0000;
pub const OAM_BASE: u32 = 0x0700_0000;

// sizes in bytes
pub const IO_SIZE: u32 = 0x400;
pub const PALETTE_SIZE: u32 = 0x400;
pub const VRAM_SIZE: u32 = 0x1_8000;
pub const OAM_SIZE: u32 = 0x400;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Region {
    Io,
    Palette,
    Vram,
    Oam,
}

/// Which region `addr` falls in, and the halfword index inside it.
#[inline(always)]
pub fn decode(addr: Addr) -> Option<(Region, usize)> {
    let (region, base) = match addr.0 {
        a if (IO_BASE..IO_BASE + IO_SIZE).contains(&a) => (Region::Io, IO_BASE),
        a if (PALETTE_BASE..PALETTE_BASE + PALETTE_SIZE).contains(&a) => (Region::Palette, PALETTE_BASE),
        a if (VRAM_BASE..VRAM_BASE + VRAM_SIZE).contains(&a) => (Region::Vram, VRAM_BASE),
        a if (OAM_BASE..OAM_BASE + OAM_SIZE).contains(&a) => (Region::Oam, OAM_BASE),
        _ => return None,
    };
    Some((region, ((addr.0 - base) / 2) as usize))
}

/// Palette, video and sprite attribute memory.
// heap allocations to keep the simulator off the stack
#[derive(Debug)]
pub struct Memory {
    pub palette: Box<[u16]>,
    pub vram: Box<[u16]>,
    pub oam: Box<[u16]>,
}

impl Default for Memory {
    fn default() -> Self {
        Self {
            palette: vec![0; PALETTE_SIZE as usize / 2].into_boxed_slice(),
            vram: vec![0; VRAM_SIZE as usize / 2].into_boxed_slice(),
            oam: vec![0; OAM_SIZE as usize / 2].into_boxed_slice(),
        }
    }
}

impl Memory {
    #[inline(always)]
    pub fn region(&self, region: Region) -> &[u16] {
        match region {
            Region::Palette => &self.palette,
            Region::Vram => &self.vram,
            Region::Oam => &self.oam,
            Region::Io => &[],
        }
    }

    #[inline(always)]
    pub fn region_mut(&mut self, region: Region) -> &mut [u16] {
        match region {
            Region::Palette => &mut self.palette,
            Region::Vram => &mut self.vram,
            Region::Oam => &mut self.oam,
            Region::Io => &mut [],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gba_hal::regs::{BG_PALETTE, OAM, OBJ_PALETTE, VCOUNT, screen_block};

    #[test]
    fn decode_regions() {
        assert_eq!(decode(VCOUNT), Some((Region::Io, 3)));
        assert_eq!(decode(BG_PALETTE), Some((Region::Palette, 0)));
        assert_eq!(decode(OBJ_PALETTE), Some((Region::Palette, 256)));
        assert_eq!(decode(screen_block(16)), Some((Region::Vram, 0x4000)));
        assert_eq!(decode(OAM.offset(0x3FE)), Some((Region::Oam, 511)));
        assert_eq!(decode(OAM.offset(0x400)), None);
        assert_eq!(decode(Addr(0x0800_0000)), None);
    }
}
