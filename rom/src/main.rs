#![cfg_attr(target_arch = "arm", no_std)]
#![cfg_attr(target_arch = "arm", no_main)]

#[cfg(target_arch = "arm")]
use gba_hal::mmio::Mmio;
#[cfg(target_arch = "arm")]
use heli::{Game, GameConfig, Outcome};

/// Called by the startup code once memory is set up.
#[cfg(target_arch = "arm")]
#[unsafe(no_mangle)]
extern "C" fn main() -> i32 {
    let hw = unsafe { Mmio::new() };
    let mut game = match Game::new(hw, GameConfig::DEFAULT) {
        Ok(game) => game,
        Err(_) => return -1,
    };
    match game.run() {
        Outcome::Aborted => 0,
        Outcome::Collision { .. } => 1,
        Outcome::Continuing => 2,
    }
}

#[cfg(not(target_arch = "arm"))]
fn main() {
    eprintln!("heli only runs on the handheld; use `gse` to play it on this machine");
}
