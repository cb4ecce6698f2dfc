//! # Hardware Registers
//!
//! Every piece of the device the game touches lives at a fixed bus address.
//! This module names those addresses and defines [`Hardware`], the capability
//! the rest of the crate talks through. The real device is [`Mmio`](crate::mmio::Mmio);
//! the simulator in `gse-core` provides another.
//!
//! ## I/O Register Layout
//!
//! | Address      | Name       | Access | Description                                  |
//! |--------------|------------|--------|----------------------------------------------|
//! | `$0400_0000` | DISPCNT    | RW     | Video mode, layer enables, sprite mapping    |
//! | `$0400_0006` | VCOUNT     | RO     | Scanline currently being drawn (0-227)       |
//! | `$0400_0008` | BG0CNT     | RW     | Background layer 0 control                   |
//! | `$0400_000A` | BG1CNT     | RW     | Background layer 1 control                   |
//! | `$0400_0010` | BG0HOFS    | WO     | Background layer 0 horizontal scroll         |
//! | `$0400_0012` | BG0VOFS    | WO     | Background layer 0 vertical scroll           |
//! | `$0400_00D4` | DMA3SAD    | WO     | Bulk transfer source                         |
//! | `$0400_00D8` | DMA3DAD    | WO     | Bulk transfer destination                    |
//! | `$0400_00DC` | DMA3CNT    | WO     | Bulk transfer count/control, starts on write |
//! | `$0400_0130` | KEYINPUT   | RO     | Button state, active-low                     |
//!
//! Writes take effect on the next refresh. VCOUNT is live: it changes under
//! the program's feet, which is why reads take `&mut self`.

/// A bus address.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Addr(pub u32);

impl Addr {
    #[inline(always)]
    pub const fn offset(self, bytes: u32) -> Addr {
        Addr(self.0 + bytes)
    }
}

pub const DISPCNT: Addr = Addr(0x0400_0000);
pub const VCOUNT: Addr = Addr(0x0400_0006);
pub const BG0CNT: Addr = Addr(0x0400_0008);
pub const BG0HOFS: Addr = Addr(0x0400_0010);
pub const DMA3SAD: Addr = Addr(0x0400_00D4);
pub const DMA3DAD: Addr = Addr(0x0400_00D8);
pub const DMA3CNT: Addr = Addr(0x0400_00DC);
pub const KEYINPUT: Addr = Addr(0x0400_0130);

/// Background palette, 256 colors.
pub const BG_PALETTE: Addr = Addr(0x0500_0000);
/// Sprite palette, 256 colors.
pub const OBJ_PALETTE: Addr = Addr(0x0500_0200);
pub const VRAM: Addr = Addr(0x0600_0000);
/// Second bitmap page in mode 4.
pub const BITMAP_BACK_PAGE: Addr = Addr(0x0600_A000);
/// Sprite tile images.
pub const OBJ_TILES: Addr = Addr(0x0601_0000);
/// Sprite tile images usable in bitmap modes, where the pages cover the
/// first half of sprite tile memory.
pub const OBJ_TILES_BITMAP: Addr = Addr(0x0601_4000);
/// Sprite attribute memory.
pub const OAM: Addr = Addr(0x0700_0000);

pub const SCREEN_WIDTH: u16 = 240;
pub const SCREEN_HEIGHT: u16 = 160;
/// Scanlines per refresh, including the 68 lines of vertical blank.
pub const SCANLINES: u16 = 228;
/// Colors per palette. Always 256, even for 16 color layers.
pub const PALETTE_SIZE: usize = 256;

/// One of the 4 character blocks (0-3). Each is 16K.
#[inline(always)]
pub const fn char_block(block: u8) -> Addr {
    VRAM.offset(block as u32 * 0x4000)
}

/// One of the 32 screen blocks (0-31). Each is 2K.
#[inline(always)]
pub const fn screen_block(block: u8) -> Addr {
    VRAM.offset(block as u32 * 0x800)
}

/// The four tile background layers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BgLayer {
    Bg0,
    Bg1,
    Bg2,
    Bg3,
}

impl BgLayer {
    pub const ALL: [BgLayer; 4] = [BgLayer::Bg0, BgLayer::Bg1, BgLayer::Bg2, BgLayer::Bg3];

    #[inline(always)]
    pub const fn index(self) -> usize {
        match self {
            BgLayer::Bg0 => 0,
            BgLayer::Bg1 => 1,
            BgLayer::Bg2 => 2,
            BgLayer::Bg3 => 3,
        }
    }

    #[inline(always)]
    pub const fn control(self) -> Addr {
        BG0CNT.offset(self.index() as u32 * 2)
    }

    #[inline(always)]
    pub const fn h_offset(self) -> Addr {
        BG0HOFS.offset(self.index() as u32 * 4)
    }

    #[inline(always)]
    pub const fn v_offset(self) -> Addr {
        BG0HOFS.offset(self.index() as u32 * 4 + 2)
    }
}

/// Access to the device's memory-mapped registers and memories.
///
/// There are no error conditions: every call is an unconditional memory
/// access. Passing an address the device doesn't decode is a configuration
/// error, not something checked at runtime.
pub trait Hardware {
    /// Read a halfword. Reads of [`VCOUNT`] are live.
    fn read16(&mut self, addr: Addr) -> u16;

    /// Write a halfword.
    fn write16(&mut self, addr: Addr, value: u16);

    /// Start a DMA channel 3 transfer from `src` to `dst` with the given
    /// DMA3CNT control word. The engine starts on the control write and the
    /// call returns once the transfer has been issued.
    ///
    /// No completion signal exists: callers must not start another transfer
    /// that depends on this one having finished.
    fn dma3(&mut self, dst: Addr, src: &[u16], control: u32);

    /// Burn roughly `iterations` loop iterations.
    #[inline(never)]
    fn spin(&mut self, iterations: u32) {
        for _ in 0..iterations {
            core::hint::spin_loop();
        }
    }
}

impl<H: Hardware + ?Sized> Hardware for &mut H {
    #[inline(always)]
    fn read16(&mut self, addr: Addr) -> u16 {
        (**self).read16(addr)
    }

    #[inline(always)]
    fn write16(&mut self, addr: Addr, value: u16) {
        (**self).write16(addr, value)
    }

    #[inline(always)]
    fn dma3(&mut self, dst: Addr, src: &[u16], control: u32) {
        (**self).dma3(dst, src, control)
    }

    #[inline(always)]
    fn spin(&mut self, iterations: u32) {
        (**self).spin(iterations)
    }
}

/// Write the display control register.
#[inline(always)]
pub fn set_display_control<H: Hardware + ?Sized>(hw: &mut H, bits: u16) {
    hw.write16(DISPCNT, bits);
}

/// Write a background layer's control register.
#[inline(always)]
pub fn set_bg_control<H: Hardware + ?Sized>(hw: &mut H, layer: BgLayer, bits: u16) {
    hw.write16(layer.control(), bits);
}

/// Write a background layer's scroll offsets. Only the low 9 bits are used
/// by the device.
#[inline(always)]
pub fn set_scroll<H: Hardware + ?Sized>(hw: &mut H, layer: BgLayer, x: u16, y: u16) {
    hw.write16(layer.h_offset(), x & 0x1FF);
    hw.write16(layer.v_offset(), y & 0x1FF);
}

/// The scanline currently being drawn.
#[inline(always)]
pub fn scanline<H: Hardware + ?Sized>(hw: &mut H) -> u16 {
    hw.read16(VCOUNT)
}

/// Raw, active-low button state. A bit reading 0 means pressed.
#[inline(always)]
pub fn key_state<H: Hardware + ?Sized>(hw: &mut H) -> u16 {
    hw.read16(KEYINPUT)
}
