use gba_hal::oam::{SpriteHandle, SpriteTable};
use gba_hal::regs::SCREEN_HEIGHT;

use crate::config::GameConfig;

/// What a movement attempt did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Moved,
    /// Already at the limit; position unchanged.
    Boundary,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// The player. Climbs while UP is held, sinks otherwise.
#[derive(Debug)]
pub struct Copter {
    pub x: i32,
    pub y: i32,
    pub border: i32,
    /// Direction of the last move that went through, `None` after hitting a limit.
    pub movement: Option<Direction>,
    ceiling: i32,
    floor: i32,
    ascend_step: i32,
    fall_step: i32,
    sprite: SpriteHandle,
}

impl Copter {
    pub fn new(config: &GameConfig, sprite: SpriteHandle) -> Self {
        let (x, y) = config.copter_spawn;
        Self {
            x,
            y,
            border: config.copter_border,
            movement: None,
            ceiling: config.top_clearance,
            floor: SCREEN_HEIGHT as i32 - config.fall_margin - config.copter_border,
            ascend_step: config.ascend_step,
            fall_step: config.fall_step,
            sprite,
        }
    }

    #[inline]
    pub fn sprite(&self) -> SpriteHandle {
        self.sprite
    }

    /// Highest `y` at which ascending is blocked.
    #[inline]
    pub fn ceiling(&self) -> i32 {
        self.ceiling
    }

    /// Lowest `y` at which falling is blocked.
    #[inline]
    pub fn floor(&self) -> i32 {
        self.floor
    }

    pub fn ascend(&mut self) -> Step {
        if self.y <= self.ceiling {
            self.movement = None;
            return Step::Boundary;
        }
        self.y -= self.ascend_step;
        self.movement = Some(Direction::Up);
        Step::Moved
    }

    pub fn fall(&mut self) -> Step {
        if self.y >= self.floor {
            self.movement = None;
            return Step::Boundary;
        }
        self.y += self.fall_step;
        self.movement = Some(Direction::Down);
        Step::Moved
    }

    /// Copy the current position into the copter's sprite.
    #[inline]
    pub fn update_sprite(&self, sprites: &mut SpriteTable) {
        sprites.set_position(self.sprite, self.x, self.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gba_hal::oam::ObjShape;

    fn copter() -> Copter {
        let mut sprites = SpriteTable::new();
        let handle = sprites.allocate(30, 120, ObjShape::S16x16, false, false, 0, 0).unwrap();
        Copter::new(&GameConfig::DEFAULT, handle)
    }

    #[test]
    fn ascend_blocks_at_clearance() {
        let mut copter = copter();
        copter.y = copter.ceiling();
        assert_eq!(copter.ascend(), Step::Boundary);
        assert_eq!(copter.y, 19);
        assert_eq!(copter.movement, None);

        copter.y = copter.ceiling() + 1;
        assert_eq!(copter.ascend(), Step::Moved);
        assert_eq!(copter.y, 18);
        assert_eq!(copter.movement, Some(Direction::Up));
    }

    #[test]
    fn fall_blocks_at_floor() {
        let mut copter = copter();
        assert_eq!(copter.floor(), 123);

        copter.y = 122;
        assert_eq!(copter.fall(), Step::Moved);
        assert_eq!(copter.y, 123);
        assert_eq!(copter.movement, Some(Direction::Down));

        assert_eq!(copter.fall(), Step::Boundary);
        assert_eq!(copter.y, 123);
        assert_eq!(copter.movement, None);
    }

    #[test]
    fn holding_up_settles_at_top() {
        let mut copter = copter();
        while copter.ascend() == Step::Moved {}
        assert_eq!(copter.y, 18);
    }

    #[test]
    fn update_sprite_copies_position() {
        let mut sprites = SpriteTable::new();
        let handle = sprites.allocate(0, 0, ObjShape::S16x16, false, false, 0, 0).unwrap();
        let mut copter = Copter::new(&GameConfig::DEFAULT, handle);
        copter.fall();
        copter.update_sprite(&mut sprites);
        assert_eq!(sprites.position(handle), (30, 121));
    }
}
