//! # Frame Loop
//!
//! One call to [`Game::tick`] is one frame, always in this order:
//!
//! 1. copy every wall's position into its sprite
//! 2. advance every wall one pixel left
//! 3. copy the copter's position into its sprite
//! 4. sample buttons: A ends the session, UP climbs, anything else sinks
//! 5. check every wall against the copter
//! 6. wait for vblank
//! 7. push the sprite table (and scroll, if enabled)
//! 8. burn the fixed delay
//!
//! Sprites are refreshed before entities move, so what reaches the screen
//! lags the simulation by one frame. Steps 6-8 only run when the session
//! continues.

use gba_hal::console::Console;
use gba_hal::input::Keys;
use gba_hal::regs::{BgLayer, Hardware};
use gba_hal::video::Presentation;

use crate::collision::first_collision;
use crate::config::{GameConfig, WALL_COUNT};
use crate::copter::{Copter, Step};
use crate::scene::{self, SceneError};
use crate::wall::{Advance, Wall};

/// How a frame ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Continuing,
    /// The copter hit the wall at this index.
    Collision { wall: usize },
    /// The player pressed A.
    Aborted,
}

impl Outcome {
    #[inline]
    pub fn is_over(self) -> bool {
        self != Outcome::Continuing
    }
}

/// Background scroll counter. Advances one pixel per frame while the copter
/// is flying, whether or not it is written to the display.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Scroll {
    pub x: i32,
    pub y: i32,
}

pub struct Game<H: Hardware> {
    pub console: Console<H>,
    pub copter: Copter,
    pub walls: [Wall; WALL_COUNT],
    pub scroll: Scroll,
    config: GameConfig,
    frame: u32,
}

impl<H: Hardware> Game<H> {
    /// Take over the console and build the opening scene.
    pub fn new(hw: H, config: GameConfig) -> Result<Self, SceneError> {
        let mut console = Console::init(hw, config.presentation);
        let (walls, copter) = scene::build(&mut console, &config)?;
        Ok(Self {
            console,
            copter,
            walls,
            scroll: Scroll::default(),
            config,
            frame: 0,
        })
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Frames presented so far.
    #[inline]
    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn tick(&mut self) -> Outcome {
        let sprites = &mut self.console.sprites;

        for wall in &self.walls {
            wall.update_sprite(sprites);
        }
        for (i, wall) in self.walls.iter_mut().enumerate() {
            if wall.advance() == Advance::Wrapped {
                log::trace!("frame {}: wall {} back to x={}", self.frame, i, wall.x);
            }
        }
        self.copter.update_sprite(sprites);

        let keys = self.console.sample_input();
        if keys.contains(Keys::A) {
            log::info!("frame {}: aborted", self.frame);
            return Outcome::Aborted;
        }
        let step = if keys.contains(Keys::UP) {
            self.copter.ascend()
        } else {
            self.copter.fall()
        };
        if step == Step::Boundary {
            log::trace!("frame {}: copter held at y={}", self.frame, self.copter.y);
        }
        self.scroll.x += 1;

        if let Some(wall) = first_collision(&self.copter, &self.walls, self.config.wall_height) {
            log::info!(
                "frame {}: wall {} at ({}, {}) hit the copter at ({}, {})",
                self.frame,
                wall,
                self.walls[wall].x,
                self.walls[wall].y,
                self.copter.x,
                self.copter.y
            );
            return Outcome::Collision { wall };
        }

        self.console.wait_vblank();
        if self.config.apply_scroll {
            self.apply_scroll();
        }
        self.console.present();
        self.console.delay(self.config.delay);

        self.frame += 1;
        Outcome::Continuing
    }

    /// Run frames until the session ends.
    pub fn run(&mut self) -> Outcome {
        loop {
            let outcome = self.tick();
            if outcome.is_over() {
                return outcome;
            }
        }
    }

    /// Write the scroll counter to the picture layer. Only tiled presentation scrolls.
    fn apply_scroll(&mut self) {
        if let Presentation::Tiled(tiled) = &mut self.console.video {
            tiled.set_scroll(&mut self.console.hw, BgLayer::Bg0, self.scroll.x, self.scroll.y);
        }
    }
}
