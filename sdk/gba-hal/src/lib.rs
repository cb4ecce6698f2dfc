//! # gba-hal
//!
//! Hardware abstraction for a small handheld with memory-mapped video,
//! a DMA engine and a 128-entry sprite table.
//!
//! All device access goes through the [`Hardware`](regs::Hardware) trait, so
//! the same code drives the real bus ([`Mmio`](mmio::Mmio)) or a simulated
//! one. [`Console`](console::Console) bundles the pieces a game needs:
//!
//! ```ignore
//! let mut console = Console::init(unsafe { Mmio::new() }, PresentationMode::Tiled);
//! loop {
//!     let keys = console.sample_input();
//!     // update the world, move sprites...
//!     console.wait_vblank();
//!     console.present();
//! }
//! ```

#![cfg_attr(not(test), no_std)]

pub mod boot;
pub mod console;
pub mod dma;
pub mod input;
pub mod mmio;
pub mod oam;
pub mod regs;
pub mod scr;
pub mod video;

#[cfg(test)]
mod testing;
