use gba_hal::video::PresentationMode;

/// Number of walls in play.
pub const WALL_COUNT: usize = 3;

/// Tuning knobs for one session. [`GameConfig::DEFAULT`] is the shipped game;
/// the host runner overrides fields from its command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub presentation: PresentationMode,
    /// Busy-wait units burned after every presented frame. Paces the game.
    pub delay: u32,

    pub copter_spawn: (i32, i32),
    /// Width of the copter's hit span, also used as its height for the floor.
    pub copter_border: i32,
    pub ascend_step: i32,
    pub fall_step: i32,
    /// Ascending is blocked once `y <= top_clearance`.
    pub top_clearance: i32,
    /// Falling is blocked once `y >= SCREEN_HEIGHT - fall_margin - copter_border`.
    pub fall_margin: i32,

    pub wall_spawns: [(i32, i32); WALL_COUNT],
    /// Vertical extent of a wall's hit span.
    pub wall_height: i32,

    /// Write the scroll counter to the background layer every frame.
    /// Off in the shipped game: the counter runs but the picture stays put.
    pub apply_scroll: bool,

    pub title: &'static str,
    pub title_row: usize,
    pub title_col: usize,
}

impl GameConfig {
    pub const DEFAULT: GameConfig = GameConfig {
        presentation: PresentationMode::Tiled,
        delay: 300,

        copter_spawn: (30, 120),
        copter_border: 18,
        ascend_step: 2,
        fall_step: 1,
        top_clearance: 19,
        fall_margin: 19,

        wall_spawns: [(240, 40), (320, 70), (360, 100)],
        wall_height: 8,

        apply_scroll: false,

        title: "HELICOPTER",
        title_row: 1,
        title_col: 10,
    };
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
