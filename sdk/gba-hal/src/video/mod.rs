//! # Presentation
//!
//! There are two ways to get a background on screen, and a program picks one
//! at startup:
//!
//! - [`TiledMode`]: mode 0, tile layers with scroll and a text overlay.
//! - [`BitmapMode`]: mode 4, a full-screen double-buffered bitmap.
//!
//! Sprites work in both. [`Presentation`] holds whichever was chosen and
//! never switches at runtime; the display control word follows from it.

pub mod bitmap;
pub mod tiled;

use core::fmt;

use crate::dma::TransferError;
use crate::regs::{Addr, BgLayer, OBJ_TILES, OBJ_TILES_BITMAP};
use crate::scr::DisplayControl;

pub use bitmap::{BitmapMode, Page};
pub use tiled::{BgControl, BgSize, TiledMode};

/// Chosen once, at console start.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PresentationMode {
    #[default]
    Tiled,
    Bitmap,
}

#[derive(Debug)]
pub enum Presentation {
    Tiled(TiledMode),
    Bitmap(BitmapMode),
}

impl Presentation {
    pub const fn new(mode: PresentationMode) -> Self {
        match mode {
            PresentationMode::Tiled => Presentation::Tiled(TiledMode::new(BgLayer::Bg1)),
            PresentationMode::Bitmap => Presentation::Bitmap(BitmapMode::new()),
        }
    }

    pub fn mode(&self) -> PresentationMode {
        match self {
            Presentation::Tiled(_) => PresentationMode::Tiled,
            Presentation::Bitmap(_) => PresentationMode::Bitmap,
        }
    }

    /// Display control word for this presentation, sprites on with 1D mapping.
    pub fn display_control(&self) -> DisplayControl {
        let sprites = DisplayControl::OBJ | DisplayControl::OBJ_1D;
        match self {
            Presentation::Tiled(_) => DisplayControl::MODE_0 | DisplayControl::BG0 | DisplayControl::BG1 | sprites,
            Presentation::Bitmap(_) => DisplayControl::MODE_4 | DisplayControl::BG2 | sprites,
        }
    }

    /// Where sprite tile images go.
    pub fn obj_tiles(&self) -> Addr {
        match self {
            Presentation::Tiled(_) => OBJ_TILES,
            Presentation::Bitmap(_) => OBJ_TILES_BITMAP,
        }
    }

    /// Sprite tile index of the first tile at [`obj_tiles`](Self::obj_tiles).
    pub fn obj_tile_base(&self) -> u16 {
        match self {
            Presentation::Tiled(_) => 0,
            Presentation::Bitmap(_) => 512,
        }
    }

    pub fn tiled(&mut self) -> Option<&mut TiledMode> {
        match self {
            Presentation::Tiled(tiled) => Some(tiled),
            Presentation::Bitmap(_) => None,
        }
    }

    pub fn bitmap(&mut self) -> Option<&mut BitmapMode> {
        match self {
            Presentation::Tiled(_) => None,
            Presentation::Bitmap(bitmap) => Some(bitmap),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VideoError {
    Transfer(TransferError),
    /// Text would run past the end of the tile grid.
    TextOutOfBounds { row: usize, col: usize, len: usize },
    /// A character with no glyph tile.
    UnmappedGlyph(char),
    /// A bitmap image that isn't exactly one screen.
    ImageSize { expected: usize, actual: usize },
}

impl From<TransferError> for VideoError {
    fn from(e: TransferError) -> Self {
        VideoError::Transfer(e)
    }
}

impl fmt::Display for VideoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoError::Transfer(e) => write!(f, "{e}"),
            VideoError::TextOutOfBounds { row, col, len } => {
                write!(f, "{len} characters at row {row}, column {col} run off the tile grid")
            }
            VideoError::UnmappedGlyph(c) => write!(f, "no glyph tile for {c:?}"),
            VideoError::ImageSize { expected, actual } => {
                write!(f, "bitmap image is {actual} halfwords, expected {expected}")
            }
        }
    }
}

impl core::error::Error for VideoError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            VideoError::Transfer(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_control_follows_variant() {
        let tiled = Presentation::new(PresentationMode::Tiled);
        assert_eq!(tiled.display_control().bits(), 0x1340);
        assert_eq!(tiled.mode(), PresentationMode::Tiled);

        let bitmap = Presentation::new(PresentationMode::Bitmap);
        assert_eq!(bitmap.display_control().bits(), 0x1444);
        assert_eq!(bitmap.mode(), PresentationMode::Bitmap);
    }

    #[test]
    fn bitmap_sprites_start_past_the_pages() {
        let bitmap = Presentation::new(PresentationMode::Bitmap);
        // 32 bytes per tile index
        assert_eq!(OBJ_TILES.offset(bitmap.obj_tile_base() as u32 * 32), bitmap.obj_tiles());
        assert_eq!(Presentation::new(PresentationMode::Tiled).obj_tiles(), OBJ_TILES);
    }
}
