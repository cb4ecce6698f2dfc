#![no_std]
extern crate alloc;

pub mod bus;
pub mod gba;
pub mod input;
pub mod io;

pub use gba::Gba;
pub use input::{InputScript, Segment};
