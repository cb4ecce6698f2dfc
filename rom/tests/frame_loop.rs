use gba_hal::input::Keys;
use gba_hal::regs::{BgLayer, SCREEN_HEIGHT, SCREEN_WIDTH};
use gba_hal::video::PresentationMode;
use gse_core::{Gba, InputScript, Segment};
use heli::copter::Direction;
use heli::{Game, GameConfig, Outcome};

const COPTER_SPRITE: usize = 3;
// DMA transfers made while building the tiled scene: two for the
// background, two for the sprite graphics
const SETUP_TRANSFERS: u64 = 4;

fn game_with(config: GameConfig, segments: &[Segment]) -> Game<Gba> {
    let script = InputScript::from_segments(segments).unwrap();
    Game::new(Gba::with_script(script), config).unwrap()
}

fn hold(keys: Keys, frames: u32) -> Segment {
    Segment { keys, frames }
}

#[test]
fn scene_setup_matches_layout() {
    let game = game_with(GameConfig::DEFAULT, &[]);
    let gba = &game.console.hw;

    assert_eq!(gba.dispcnt().mode(), 0);
    assert!(gba.dispcnt().bg0() && gba.dispcnt().bg1() && gba.dispcnt().obj());

    let bg0 = gba.bgcnt(BgLayer::Bg0);
    assert_eq!((bg0.priority(), bg0.screen_block()), (2, 16));
    assert!(bg0.color_256() && bg0.wrap());
    let bg1 = gba.bgcnt(BgLayer::Bg1);
    assert_eq!((bg1.priority(), bg1.screen_block()), (1, 24));

    assert_eq!(gba.screen_block_entry(16, 0), 0);
    assert_eq!(gba.screen_block_entry(16, 1023), 1023);
    assert_eq!(gba.screen_block_entry(24, 0), 0);
    assert_eq!(gba.screen_block_entry(24, 32 + 10), (b'H' - b' ') as u16);
    assert_eq!(gba.screen_block_entry(24, 32 + 19), (b'R' - b' ') as u16);

    assert_ne!(gba.obj_palette(1), 0);
    assert_eq!(gba.dma_count(), SETUP_TRANSFERS);
    assert_eq!(game.console.sprites.len(), 4);
}

#[test]
fn first_frame_commits_sprites_once() {
    let mut game = game_with(GameConfig::DEFAULT, &[]);
    assert_eq!(game.tick(), Outcome::Continuing);

    let gba = &game.console.hw;
    assert_eq!(gba.dma_count(), SETUP_TRANSFERS + 1);
    assert!(gba.vblanks() >= 1);
    // sprites show where entities were at the start of the frame
    assert_eq!(gba.oam_position(0), (240, 40));
    assert_eq!(gba.oam_position(1), (320, 70));
    assert_eq!(gba.oam_position(2), (360, 100));
    assert_eq!(gba.oam_position(COPTER_SPRITE), (30, 120));
    for slot in COPTER_SPRITE + 1..128 {
        assert_eq!(gba.oam_position(slot), (SCREEN_WIDTH, SCREEN_HEIGHT));
    }

    assert_eq!(game.walls[0].x, 239);
    assert_eq!(game.copter.y, 121);
    assert_eq!(game.copter.movement, Some(Direction::Down));
    assert_eq!(game.frame(), 1);
}

#[test]
fn sprites_are_committed_inside_vblank() {
    let mut game = game_with(GameConfig::DEFAULT, &[hold(Keys::UP, 20)]);
    assert!(game.console.hw.oam_commit_lines().is_empty());
    for _ in 0..40 {
        assert_eq!(game.tick(), Outcome::Continuing);
    }

    let lines = game.console.hw.oam_commit_lines();
    assert_eq!(lines.len(), 40);
    for (frame, &line) in lines.iter().enumerate() {
        assert!(line >= SCREEN_HEIGHT, "frame {frame} committed sprites on visible line {line}");
    }
}

#[test]
fn bitmap_commits_wait_for_vblank_too() {
    let config = GameConfig {
        presentation: PresentationMode::Bitmap,
        ..GameConfig::DEFAULT
    };
    let mut game = game_with(config, &[]);
    for _ in 0..10 {
        game.tick();
    }
    let lines = game.console.hw.oam_commit_lines();
    assert_eq!(lines.len(), 10);
    assert!(lines.iter().all(|&line| line >= SCREEN_HEIGHT));
}

#[test]
fn a_aborts_before_vblank() {
    let mut game = game_with(GameConfig::DEFAULT, &[hold(Keys::A, 1)]);
    assert_eq!(game.tick(), Outcome::Aborted);

    let gba = &game.console.hw;
    assert_eq!(gba.vblanks(), 0);
    assert_eq!(gba.dma_count(), SETUP_TRANSFERS);
    assert_eq!(game.frame(), 0);
    // the copter didn't move, but the walls did
    assert_eq!(game.copter.y, 120);
    assert_eq!(game.walls[0].x, 239);
}

#[test]
fn up_climbs_two_and_settles_under_clearance() {
    let mut game = game_with(GameConfig::DEFAULT, &[hold(Keys::UP, 60)]);
    assert_eq!(game.tick(), Outcome::Continuing);
    assert_eq!(game.copter.y, 118);
    assert_eq!(game.copter.movement, Some(Direction::Up));

    for _ in 1..60 {
        assert_eq!(game.tick(), Outcome::Continuing);
    }
    assert_eq!(game.copter.y, 18);
    assert_eq!(game.copter.movement, None);
    assert_eq!(game.scroll.x, 60);
}

#[test]
fn walls_wrap_to_their_own_spawn() {
    let mut game = game_with(GameConfig::DEFAULT, &[]);
    for _ in 0..241 {
        assert_eq!(game.tick(), Outcome::Continuing);
    }
    assert_eq!(game.walls[0].x, 240);
    assert_eq!(game.walls[1].x, 320 - 241);
    assert_eq!(game.walls[2].x, 360 - 241);
    assert_eq!(game.copter.y, game.copter.floor());
    assert!(game.console.hw.vblanks() >= 241);
}

#[test]
fn collision_ends_the_session() {
    let config = GameConfig {
        wall_spawns: [(60, 120), (400, 40), (400, 70)],
        ..GameConfig::DEFAULT
    };
    let mut game = game_with(config, &[]);
    for _ in 0..11 {
        assert_eq!(game.tick(), Outcome::Continuing);
    }
    let dma_before = game.console.hw.dma_count();
    assert_eq!(game.tick(), Outcome::Collision { wall: 0 });
    assert_eq!(game.walls[0].x, 48);
    // no present on the final frame
    assert_eq!(game.console.hw.dma_count(), dma_before);
    assert_eq!(game.frame(), 11);
}

#[test]
fn run_returns_the_terminal_outcome() {
    let mut game = game_with(GameConfig::DEFAULT, &[hold(Keys::empty(), 5), hold(Keys::A, 1)]);
    assert_eq!(game.run(), Outcome::Aborted);
    assert_eq!(game.frame(), 5);
    assert!(game.console.hw.script.is_finished());
}

#[test]
fn scroll_counter_reaches_the_display_only_when_enabled() {
    let mut game = game_with(GameConfig::DEFAULT, &[]);
    for _ in 0..3 {
        game.tick();
    }
    assert_eq!(game.scroll.x, 3);
    assert_eq!(game.console.hw.scroll(BgLayer::Bg0), (0, 0));

    let config = GameConfig {
        apply_scroll: true,
        ..GameConfig::DEFAULT
    };
    let mut game = game_with(config, &[]);
    for _ in 0..3 {
        game.tick();
    }
    assert_eq!(game.console.hw.scroll(BgLayer::Bg0), (3, 0));
}

#[test]
fn bitmap_presentation_flips_every_frame() {
    let config = GameConfig {
        presentation: PresentationMode::Bitmap,
        ..GameConfig::DEFAULT
    };
    let mut game = game_with(config, &[]);
    let gba = &game.console.hw;
    assert_eq!(gba.dispcnt().mode(), 4);
    assert!(gba.dispcnt().bg2());
    assert!(!gba.dispcnt().page());
    assert_ne!(gba.bg_palette(2), 0);

    game.tick();
    assert!(game.console.hw.dispcnt().page());
    game.tick();
    assert!(!game.console.hw.dispcnt().page());
    assert_eq!(game.console.hw.oam_position(COPTER_SPRITE), (30, 121));
}
