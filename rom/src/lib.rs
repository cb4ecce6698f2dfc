//! Helicopter: hold UP to climb, let go to sink, don't touch the walls.
//!
//! The game is written against [`gba_hal::regs::Hardware`], so it runs the
//! same on the device and on the `gse-core` simulator.

#![cfg_attr(not(test), no_std)]

pub mod assets;
pub mod collision;
pub mod config;
pub mod copter;
pub mod game;
pub mod scene;
pub mod wall;

pub use config::GameConfig;
pub use game::{Game, Outcome};
