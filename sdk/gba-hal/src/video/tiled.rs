//! # Tile Layers
//!
//! In mode 0 the screen is built from up to four layers of 8x8 tiles. Each
//! layer reads tile images from a *character block* and a grid of tile
//! indices from a *screen block*; its control register says which.
//!
//! ```ignore
//! let bg0 = BgControl::new().priority(2).char_block(0).color_256().screen_block(16).wrap(true);
//! tiled.configure_layer(&mut hw, BgLayer::Bg0, bg0);
//! tiled.load_image(&mut hw, BgLayer::Bg0, &palette, &tiles)?;
//! tiled.fill_tilemap(&mut hw, 16, |i| i as u16);
//! ```
//!
//! ## BGxCNT Layout
//!
//! | Bits  | Field        | Meaning                                   |
//! |-------|--------------|-------------------------------------------|
//! | 0-1   | priority     | 0 is drawn in front, 3 at the back        |
//! | 2-3   | char block   | Tile image bank (0-3)                     |
//! | 6     | mosaic       |                                           |
//! | 7     | color mode   | 0 = 16 colors, 1 = 256 colors             |
//! | 8-12  | screen block | Tile index grid bank (0-31)               |
//! | 13    | wrap         | Wrap at the edges (affine layers only)    |
//! | 14-15 | size         | 0 = 256x256 ... 3 = 512x512               |

use bit_field::BitField;

use crate::dma;
use crate::regs::{self, BG_PALETTE, BgLayer, Hardware, PALETTE_SIZE, char_block, screen_block};
use crate::video::VideoError;

/// Character code that maps to tile 0 in the glyph tiles.
pub const GLYPH_BASE_OFFSET: u8 = b' ';

/// Entries in one 32x32 screen block.
pub const SCREEN_BLOCK_ENTRIES: usize = 32 * 32;

/// Tile grid dimensions of a layer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum BgSize {
    #[default]
    S256x256,
    S512x256,
    S256x512,
    S512x512,
}

impl BgSize {
    pub const fn bits(self) -> u16 {
        match self {
            BgSize::S256x256 => 0,
            BgSize::S512x256 => 1,
            BgSize::S256x512 => 2,
            BgSize::S512x512 => 3,
        }
    }

    /// Width and height in tiles.
    pub const fn tiles(self) -> (usize, usize) {
        match self {
            BgSize::S256x256 => (32, 32),
            BgSize::S512x256 => (64, 32),
            BgSize::S256x512 => (32, 64),
            BgSize::S512x512 => (64, 64),
        }
    }
}

/// Builder for a background control word.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BgControl {
    pub priority: u8,
    pub char_block: u8,
    pub mosaic: bool,
    pub color_256: bool,
    pub screen_block: u8,
    pub wrap: bool,
    pub size: BgSize,
}

impl BgControl {
    pub const fn new() -> Self {
        Self {
            priority: 0,
            char_block: 0,
            mosaic: false,
            color_256: false,
            screen_block: 0,
            wrap: false,
            size: BgSize::S256x256,
        }
    }

    pub const fn priority(mut self, priority: u8) -> Self {
        self.priority = priority & 0b11;
        self
    }

    pub const fn char_block(mut self, block: u8) -> Self {
        self.char_block = block & 0b11;
        self
    }

    pub const fn color_256(mut self) -> Self {
        self.color_256 = true;
        self
    }

    pub const fn color_16(mut self) -> Self {
        self.color_256 = false;
        self
    }

    pub const fn screen_block(mut self, block: u8) -> Self {
        self.screen_block = block & 0b1_1111;
        self
    }

    pub const fn wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    pub const fn size(mut self, size: BgSize) -> Self {
        self.size = size;
        self
    }

    pub fn bits(&self) -> u16 {
        let mut bits = 0u16;
        bits.set_bits(0..2, self.priority as u16);
        bits.set_bits(2..4, self.char_block as u16);
        bits.set_bit(6, self.mosaic);
        bits.set_bit(7, self.color_256);
        bits.set_bits(8..13, self.screen_block as u16);
        bits.set_bit(13, self.wrap);
        bits.set_bits(14..16, self.size.bits());
        bits
    }

    pub fn from_bits(bits: u16) -> Self {
        let size = match bits.get_bits(14..16) {
            0 => BgSize::S256x256,
            1 => BgSize::S512x256,
            2 => BgSize::S256x512,
            _ => BgSize::S512x512,
        };
        Self {
            priority: bits.get_bits(0..2) as u8,
            char_block: bits.get_bits(2..4) as u8,
            mosaic: bits.get_bit(6),
            color_256: bits.get_bit(7),
            screen_block: bits.get_bits(8..13) as u8,
            wrap: bits.get_bit(13),
            size,
        }
    }
}

/// Mode 0 presentation: two tile layers, a scrolling picture and a text overlay.
#[derive(Debug)]
pub struct TiledMode {
    layers: [BgControl; 4],
    text_layer: BgLayer,
}

impl TiledMode {
    pub const fn new(text_layer: BgLayer) -> Self {
        Self {
            layers: [BgControl::new(); 4],
            text_layer,
        }
    }

    /// The control word last written for `layer`.
    #[inline]
    pub fn control(&self, layer: BgLayer) -> BgControl {
        self.layers[layer.index()]
    }

    #[inline]
    pub fn text_layer(&self) -> BgLayer {
        self.text_layer
    }

    pub fn configure_layer<H: Hardware + ?Sized>(&mut self, hw: &mut H, layer: BgLayer, control: BgControl) {
        log::debug!("{:?} control {:#06x}", layer, control.bits());
        self.layers[layer.index()] = control;
        regs::set_bg_control(hw, layer, control.bits());
    }

    /// Copy a palette into background palette RAM and tile images into the
    /// layer's character block. Pixel data must match the layer's color mode.
    pub fn load_image<H: Hardware + ?Sized>(
        &mut self,
        hw: &mut H,
        layer: BgLayer,
        palette: &[u16; PALETTE_SIZE],
        tiles: &[u16],
    ) -> Result<(), VideoError> {
        dma::copy16(hw, BG_PALETTE, palette)?;
        let block = self.layers[layer.index()].char_block;
        dma::copy16(hw, char_block(block), tiles)?;
        Ok(())
    }

    /// Write every entry of a 32x32 screen block. `generator` gets the entry
    /// index and returns the tile index for it.
    pub fn fill_tilemap<H, F>(&mut self, hw: &mut H, block: u8, mut generator: F)
    where
        H: Hardware + ?Sized,
        F: FnMut(usize) -> u16,
    {
        let base = screen_block(block);
        for i in 0..SCREEN_BLOCK_ENTRIES {
            hw.write16(base.offset(i as u32 * 2), generator(i));
        }
    }

    /// Write `text` into the text layer's tile grid starting at `(row, col)`.
    ///
    /// Each character becomes tile `char - GLYPH_BASE_OFFSET`. Text does not
    /// wrap at the end of a row; it continues into the next one. Text that
    /// would run off the end of the grid is rejected before anything is written.
    pub fn write_text<H: Hardware + ?Sized>(
        &mut self,
        hw: &mut H,
        text: &str,
        row: usize,
        col: usize,
    ) -> Result<(), VideoError> {
        let control = self.layers[self.text_layer.index()];
        let (width, height) = control.size.tiles();
        let start = row * width + col;
        let len = text.len();
        if col >= width || start + len > width * height {
            return Err(VideoError::TextOutOfBounds { row, col, len });
        }
        if let Some(c) = text.bytes().find(|c| !(GLYPH_BASE_OFFSET..0x7F).contains(c)) {
            return Err(VideoError::UnmappedGlyph(c as char));
        }

        let base = screen_block(control.screen_block);
        for (i, c) in text.bytes().enumerate() {
            hw.write16(base.offset((start + i) as u32 * 2), (c - GLYPH_BASE_OFFSET) as u16);
        }
        Ok(())
    }

    /// Apply scroll offsets to a layer.
    #[inline]
    pub fn set_scroll<H: Hardware + ?Sized>(&mut self, hw: &mut H, layer: BgLayer, x: i32, y: i32) {
        regs::set_scroll(hw, layer, x as u16, y as u16);
    }
}

/// The tile under screen pixel `(x, y)` once a layer is scrolled by
/// `(xscroll, yscroll)`. The map wraps in both directions.
///
/// Returns `None` for an empty map size or a `tilemap` shorter than
/// `tilemap_w * tilemap_h`.
pub fn tile_lookup(
    x: i32,
    y: i32,
    xscroll: i32,
    yscroll: i32,
    tilemap: &[u16],
    tilemap_w: usize,
    tilemap_h: usize,
) -> Option<u16> {
    let w = i32::try_from(tilemap_w).ok().filter(|&w| w > 0)?;
    let h = i32::try_from(tilemap_h).ok().filter(|&h| h > 0)?;
    let tx = (x.wrapping_add(xscroll) >> 3).rem_euclid(w) as usize;
    let ty = (y.wrapping_add(yscroll) >> 3).rem_euclid(h) as usize;
    if tilemap.len() < tilemap_w.checked_mul(tilemap_h)? {
        return None;
    }
    tilemap.get(ty * tilemap_w + tx).copied()
}
