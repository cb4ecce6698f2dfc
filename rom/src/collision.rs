use crate::copter::Copter;
use crate::wall::Wall;

/// A wall hits the copter when its left edge is inside the copter's
/// horizontal span and the copter's top is inside the wall's vertical span.
/// Both spans include their ends.
#[inline]
pub fn collides(copter: &Copter, wall: &Wall, wall_height: i32) -> bool {
    (copter.x..=copter.x + copter.border).contains(&wall.x) && (wall.y..=wall.y + wall_height).contains(&copter.y)
}

/// Index of the first wall hitting the copter, if any.
pub fn first_collision(copter: &Copter, walls: &[Wall], wall_height: i32) -> Option<usize> {
    walls.iter().position(|wall| collides(copter, wall, wall_height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use gba_hal::oam::{ObjShape, SpriteTable};

    fn scene(wall_at: (i32, i32)) -> (Copter, Wall) {
        let mut sprites = SpriteTable::new();
        let copter = sprites.allocate(30, 120, ObjShape::S16x16, false, false, 0, 0).unwrap();
        let wall = sprites.allocate(wall_at.0, wall_at.1, ObjShape::S16x16, false, false, 8, 0).unwrap();
        (Copter::new(&GameConfig::DEFAULT, copter), Wall::new(wall_at, wall))
    }

    #[test]
    fn copter_inside_wall_span() {
        let (mut copter, wall) = scene((40, 120));
        assert_eq!((copter.x, copter.border), (30, 18));

        copter.y = 125;
        assert!(collides(&copter, &wall, 8));
        copter.y = 135;
        assert!(!collides(&copter, &wall, 8));
    }

    #[test]
    fn span_ends_are_inclusive() {
        let (mut copter, mut wall) = scene((30, 120));
        copter.y = 120;
        assert!(collides(&copter, &wall, 8));
        copter.y = 128;
        assert!(collides(&copter, &wall, 8));
        copter.y = 129;
        assert!(!collides(&copter, &wall, 8));

        copter.y = 120;
        wall.x = 48;
        assert!(collides(&copter, &wall, 8));
        wall.x = 49;
        assert!(!collides(&copter, &wall, 8));
        wall.x = 29;
        assert!(!collides(&copter, &wall, 8));
    }

    #[test]
    fn first_collision_picks_lowest_index() {
        let mut sprites = SpriteTable::new();
        let handle = sprites.allocate(30, 120, ObjShape::S16x16, false, false, 0, 0).unwrap();
        let copter = Copter::new(&GameConfig::DEFAULT, handle);
        let walls = [Wall::new((200, 120), handle), Wall::new((35, 118), handle), Wall::new((40, 115), handle)];
        assert_eq!(first_collision(&copter, &walls, 8), Some(1));
        assert_eq!(first_collision(&copter, &walls[..1], 8), None);
    }
}
