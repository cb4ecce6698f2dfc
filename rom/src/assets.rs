//! Image data for the scene.
//!
//! An [`ImageAsset`] is a 256-color palette plus 8bpp pixel data, two pixels
//! per halfword with the left pixel in the low byte. Tile images are cut into
//! 8x8 tiles; screen images are one linear bitmap page.
//!
//! The images here are generated at compile time so the game builds without
//! an art pipeline. Converted artwork with the same layout drops in.

use gba_hal::regs::{PALETTE_SIZE, SCREEN_HEIGHT, SCREEN_WIDTH};
use gba_hal::video::bitmap::PAGE_HALFWORDS;

/// Halfwords in one 8x8 8bpp tile.
pub const TILE_HALFWORDS: usize = 32;

/// Sprite tile index of the copter frame. Indices count 32-byte units.
pub const COPTER_TILE: u16 = 0;
/// Sprite tile index of the wall, right after the 16x16 copter.
pub const WALL_TILE: u16 = 8;

pub struct ImageAsset {
    pub width: u16,
    pub height: u16,
    pub palette: [u16; PALETTE_SIZE],
    pub data: &'static [u16],
}

impl ImageAsset {
    /// Number of 8x8 tiles in the pixel data.
    pub fn tiles(&self) -> usize {
        self.data.len() / TILE_HALFWORDS
    }
}

const BACKGROUND_TILES_WIDE: usize = 32;
const BACKGROUND_TILES_HIGH: usize = 8;

static BACKGROUND_DATA: [u16; BACKGROUND_TILES_WIDE * BACKGROUND_TILES_HIGH * TILE_HALFWORDS] = pack(Art::Sky);
static SPRITE_DATA: [u16; 8 * TILE_HALFWORDS] = pack(Art::Sprites);
static SCREEN_DATA: [u16; PAGE_HALFWORDS] = linear_sky();

/// The scrolling sky. Its top tile row is color 0 throughout so tile 0 is
/// clear, which the text overlay relies on.
pub static BACKGROUND: ImageAsset = ImageAsset {
    width: (BACKGROUND_TILES_WIDE * 8) as u16,
    height: (BACKGROUND_TILES_HIGH * 8) as u16,
    palette: sky_palette(),
    data: &BACKGROUND_DATA,
};

/// The sky as a full screen, for bitmap presentation.
pub static BACKGROUND_SCREEN: ImageAsset = ImageAsset {
    width: SCREEN_WIDTH,
    height: SCREEN_HEIGHT,
    palette: sky_palette(),
    data: &SCREEN_DATA,
};

/// Copter and wall frames, 16x16 each, stacked in 1D tile order.
pub static SPRITES: ImageAsset = ImageAsset {
    width: 16,
    height: 32,
    palette: sprite_palette(),
    data: &SPRITE_DATA,
};

const fn rgb15(r: u16, g: u16, b: u16) -> u16 {
    (r & 0x1F) | (g & 0x1F) << 5 | (b & 0x1F) << 10
}

const fn sky_palette() -> [u16; PALETTE_SIZE] {
    let mut palette = [0u16; PALETTE_SIZE];
    let mut i = 0;
    while i < 16 {
        palette[i] = rgb15(6 + i as u16, 14 + i as u16 / 2, 31);
        i += 1;
    }
    palette[16] = rgb15(31, 31, 31);
    palette
}

const fn sprite_palette() -> [u16; PALETTE_SIZE] {
    let mut palette = [0u16; PALETTE_SIZE];
    palette[1] = rgb15(31, 24, 0);
    palette[2] = rgb15(4, 4, 4);
    palette[3] = rgb15(16, 28, 31);
    palette[4] = rgb15(20, 8, 4);
    palette[5] = rgb15(12, 4, 2);
    palette
}

#[derive(Copy, Clone)]
enum Art {
    Sky,
    Sprites,
}

impl Art {
    /// Top-left pixel of tile `t`.
    const fn tile_origin(self, t: usize) -> (usize, usize) {
        match self {
            Art::Sky => ((t % BACKGROUND_TILES_WIDE) * 8, (t / BACKGROUND_TILES_WIDE) * 8),
            // 16x16 frames, 4 tiles each
            Art::Sprites => {
                let local = t % 4;
                ((local % 2) * 8, (t / 4) * 16 + (local / 2) * 8)
            }
        }
    }

    const fn pixel(self, x: usize, y: usize) -> u8 {
        match self {
            Art::Sky => sky(x, y),
            Art::Sprites if y < 16 => copter(x, y),
            Art::Sprites => wall(x, y - 16),
        }
    }
}

const fn sky(x: usize, y: usize) -> u8 {
    if y < 8 {
        return 0;
    }
    // a sparse band of clouds across the middle
    if y >= 24 && y < 40 && (x * 7 + y * 3) % 29 == 0 {
        return 16;
    }
    (y / 4) as u8 & 0x0F
}

const fn copter(x: usize, y: usize) -> u8 {
    match (x, y) {
        (2..14, 1) => 2,
        (7..9, 2..4) => 2,
        (9..12, 5..8) => 3,
        (3..13, 4..11) => 1,
        (0..3, 6..8) => 1,
        (5 | 10, 11) => 2,
        (3..13, 12) => 2,
        _ => 0,
    }
}

const fn wall(x: usize, y: usize) -> u8 {
    match (x, y) {
        (1, 0..9) => 4,
        (0 | 2, 0..9) => 5,
        _ => 0,
    }
}

const fn pack<const N: usize>(art: Art) -> [u16; N] {
    let mut out = [0u16; N];
    let mut t = 0;
    while t < N / TILE_HALFWORDS {
        let (ox, oy) = art.tile_origin(t);
        let mut py = 0;
        while py < 8 {
            let mut px = 0;
            while px < 8 {
                let left = art.pixel(ox + px, oy + py) as u16;
                let right = art.pixel(ox + px + 1, oy + py) as u16;
                out[t * TILE_HALFWORDS + py * 4 + px / 2] = left | right << 8;
                px += 2;
            }
            py += 1;
        }
        t += 1;
    }
    out
}

const fn linear_sky() -> [u16; PAGE_HALFWORDS] {
    let mut out = [0u16; PAGE_HALFWORDS];
    let width = SCREEN_WIDTH as usize;
    let mut i = 0;
    while i < PAGE_HALFWORDS {
        let (x, y) = ((i * 2) % width, (i * 2) / width);
        // repeat the 64 pixel tall band down the screen
        let y = y % (BACKGROUND_TILES_HIGH * 8);
        out[i] = sky(x, y) as u16 | (sky(x + 1, y) as u16) << 8;
        i += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_tile_zero_is_clear() {
        assert!(BACKGROUND.data[..TILE_HALFWORDS].iter().all(|&p| p == 0));
        assert_eq!(BACKGROUND.tiles(), 256);
        assert_eq!(BACKGROUND.data.len(), BACKGROUND.width as usize * BACKGROUND.height as usize / 2);
    }

    #[test]
    fn sprite_sheet_layout() {
        assert_eq!(SPRITES.tiles(), 8);
        // wall frame starts at tile 8 in 32-byte units: 4 tiles of 64 bytes in
        let wall = &SPRITES.data[WALL_TILE as usize * 16..];
        // first row of the wall: edge, core, edge
        assert_eq!(wall[0], 5 | 4 << 8);
        assert_eq!(wall[1], 5);
        // rotor row of the copter's top-left tile
        assert_eq!(SPRITES.data[4], 0);
        assert_eq!(SPRITES.data[5], 2 | 2 << 8);
    }

    #[test]
    fn screen_image_fills_a_page() {
        assert_eq!(BACKGROUND_SCREEN.data.len(), PAGE_HALFWORDS);
        // row 8 of the sky band is the first non-clear row
        assert_eq!(BACKGROUND_SCREEN.data[0], 0);
        assert_eq!(BACKGROUND_SCREEN.data[8 * 120], 2 | 2 << 8);
    }

    #[test]
    fn palettes_leave_index_zero_for_transparency() {
        assert_eq!(SPRITES.palette[0], 0);
        assert_ne!(SPRITES.palette[1], 0);
        assert_eq!(BACKGROUND.palette[15], rgb15(21, 21, 31));
    }
}
