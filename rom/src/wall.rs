use gba_hal::oam::{SpriteHandle, SpriteTable};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Advance {
    Moved,
    /// Reached the left edge and jumped back to the spawn point.
    Wrapped,
}

/// An obstacle sliding in from the right, one pixel per frame.
#[derive(Debug)]
pub struct Wall {
    pub x: i32,
    pub y: i32,
    spawn: (i32, i32),
    sprite: SpriteHandle,
}

impl Wall {
    pub fn new(spawn: (i32, i32), sprite: SpriteHandle) -> Self {
        Self {
            x: spawn.0,
            y: spawn.1,
            spawn,
            sprite,
        }
    }

    #[inline]
    pub fn spawn(&self) -> (i32, i32) {
        self.spawn
    }

    #[inline]
    pub fn sprite(&self) -> SpriteHandle {
        self.sprite
    }

    pub fn advance(&mut self) -> Advance {
        if self.x <= 0 {
            self.x = self.spawn.0;
            Advance::Wrapped
        } else {
            self.x -= 1;
            Advance::Moved
        }
    }

    #[inline]
    pub fn update_sprite(&self, sprites: &mut SpriteTable) {
        sprites.set_position(self.sprite, self.x, self.y);
    }
}
