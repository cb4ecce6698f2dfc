//! # Bitmap Mode
//!
//! Mode 4 shows a 240x160 image with one byte per pixel indexing the
//! background palette. There are two pages; while one is on screen the other
//! can be drawn to, and [`BitmapMode::flip`] swaps them.
//!
//! ```ignore
//! let mut page = Page::Back;
//! loop {
//!     bitmap.draw_image(&mut hw, page, &frame)?;
//!     console.wait_vblank();
//!     page = bitmap.flip(&mut hw, &mut display, page);
//! }
//! ```

use crate::dma;
use crate::regs::{self, Addr, BG_PALETTE, BITMAP_BACK_PAGE, Hardware, PALETTE_SIZE, SCREEN_HEIGHT, SCREEN_WIDTH, VRAM};
use crate::scr::DisplayControl;
use crate::video::VideoError;

/// Halfwords in one full-screen 8bpp page (two pixels per halfword).
pub const PAGE_HALFWORDS: usize = SCREEN_WIDTH as usize * SCREEN_HEIGHT as usize / 2;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Page {
    Front,
    Back,
}

impl Page {
    #[inline(always)]
    pub const fn addr(self) -> Addr {
        match self {
            Page::Front => VRAM,
            Page::Back => BITMAP_BACK_PAGE,
        }
    }

    #[inline(always)]
    pub const fn other(self) -> Page {
        match self {
            Page::Front => Page::Back,
            Page::Back => Page::Front,
        }
    }
}

#[derive(Debug)]
pub struct BitmapMode {
    shown: Page,
}

impl Default for BitmapMode {
    fn default() -> Self {
        Self::new()
    }
}

impl BitmapMode {
    pub const fn new() -> Self {
        Self { shown: Page::Front }
    }

    /// The page currently on screen.
    #[inline]
    pub fn shown(&self) -> Page {
        self.shown
    }

    /// The page that can be drawn to without tearing.
    #[inline]
    pub fn hidden(&self) -> Page {
        self.shown.other()
    }

    /// Put `current` (the page just drawn) on screen and return the other
    /// page for the caller to draw into next.
    pub fn flip<H: Hardware + ?Sized>(&mut self, hw: &mut H, display: &mut DisplayControl, current: Page) -> Page {
        display.set(DisplayControl::PAGE_SELECT, current == Page::Back);
        regs::set_display_control(hw, display.bits());
        self.shown = current;
        current.other()
    }

    pub fn load_palette<H: Hardware + ?Sized>(&mut self, hw: &mut H, palette: &[u16; PALETTE_SIZE]) -> Result<(), VideoError> {
        dma::copy16(hw, BG_PALETTE, palette)?;
        Ok(())
    }

    /// Blit a full-screen 8bpp image into `page`.
    pub fn draw_image<H: Hardware + ?Sized>(&mut self, hw: &mut H, page: Page, pixels: &[u16]) -> Result<(), VideoError> {
        if pixels.len() != PAGE_HALFWORDS {
            return Err(VideoError::ImageSize {
                expected: PAGE_HALFWORDS,
                actual: pixels.len(),
            });
        }
        dma::copy16(hw, page.addr(), pixels)?;
        Ok(())
    }
}
