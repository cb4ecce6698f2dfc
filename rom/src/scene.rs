//! Builds the opening scene: background, sprite graphics, title, entities.

use core::fmt;

use gba_hal::console::Console;
use gba_hal::dma;
use gba_hal::oam::{ObjShape, OamError, SpriteTable};
use gba_hal::regs::{BgLayer, Hardware, OBJ_PALETTE};
use gba_hal::video::{BgControl, Page, Presentation, VideoError};

use crate::assets::{BACKGROUND, BACKGROUND_SCREEN, COPTER_TILE, ImageAsset, SPRITES, WALL_TILE};
use crate::config::{GameConfig, WALL_COUNT};
use crate::copter::Copter;
use crate::wall::Wall;

/// Screen block holding the picture layer's tile grid.
pub const PICTURE_SCREEN_BLOCK: u8 = 16;
/// Screen block holding the text overlay's tile grid.
pub const TEXT_SCREEN_BLOCK: u8 = 24;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SceneError {
    Video(VideoError),
    Sprite(OamError),
}

impl From<VideoError> for SceneError {
    fn from(e: VideoError) -> Self {
        SceneError::Video(e)
    }
}

impl From<OamError> for SceneError {
    fn from(e: OamError) -> Self {
        SceneError::Sprite(e)
    }
}

impl From<dma::TransferError> for SceneError {
    fn from(e: dma::TransferError) -> Self {
        SceneError::Video(e.into())
    }
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::Video(e) => write!(f, "scene setup: {e}"),
            SceneError::Sprite(e) => write!(f, "scene setup: {e}"),
        }
    }
}

impl core::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            SceneError::Video(e) => Some(e),
            SceneError::Sprite(e) => Some(e),
        }
    }
}

/// Picture layer: behind the overlay, 256 colors, wraps.
pub const PICTURE_LAYER: BgControl = BgControl::new()
    .priority(2)
    .char_block(0)
    .color_256()
    .screen_block(PICTURE_SCREEN_BLOCK)
    .wrap(true);

/// Text overlay: in front of the picture, shares its tile images.
pub const TEXT_LAYER: BgControl = BgControl::new()
    .priority(1)
    .char_block(0)
    .color_256()
    .screen_block(TEXT_SCREEN_BLOCK)
    .wrap(true);

/// Set up whichever background the console presents. Tiled presentation
/// takes tile data; bitmap presentation takes one screen of linear pixels.
pub fn setup_background<H: Hardware>(console: &mut Console<H>, image: &ImageAsset) -> Result<(), SceneError> {
    let hw = &mut console.hw;
    match &mut console.video {
        Presentation::Tiled(tiled) => {
            tiled.configure_layer(hw, BgLayer::Bg0, PICTURE_LAYER);
            tiled.configure_layer(hw, BgLayer::Bg1, TEXT_LAYER);
            tiled.load_image(hw, BgLayer::Bg0, &image.palette, image.data)?;
            tiled.fill_tilemap(hw, PICTURE_SCREEN_BLOCK, |i| i as u16);
            tiled.fill_tilemap(hw, TEXT_SCREEN_BLOCK, |_| 0);
        }
        Presentation::Bitmap(bitmap) => {
            // same picture on both pages so flipping never shows a blank one
            bitmap.load_palette(hw, &image.palette)?;
            bitmap.draw_image(hw, Page::Front, image.data)?;
            bitmap.draw_image(hw, Page::Back, image.data)?;
        }
    }
    Ok(())
}

/// Copy sprite palette and tile images into sprite memory.
pub fn setup_sprite_image<H: Hardware>(console: &mut Console<H>, image: &ImageAsset) -> Result<(), SceneError> {
    let tiles = console.video.obj_tiles();
    dma::copy16(&mut console.hw, OBJ_PALETTE, &image.palette)?;
    dma::copy16(&mut console.hw, tiles, image.data)?;
    Ok(())
}

/// Put the title on the text overlay. Bitmap presentation has no overlay.
pub fn write_title<H: Hardware>(console: &mut Console<H>, config: &GameConfig) -> Result<(), SceneError> {
    if let Presentation::Tiled(tiled) = &mut console.video {
        tiled.write_text(&mut console.hw, config.title, config.title_row, config.title_col)?;
    }
    Ok(())
}

/// Allocate sprites for the walls, then the copter, in that order.
/// `tile_base` is the sprite tile index the sprite graphics were loaded at.
pub fn spawn_entities(
    sprites: &mut SpriteTable,
    config: &GameConfig,
    tile_base: u16,
) -> Result<([Wall; WALL_COUNT], Copter), SceneError> {
    let [a, b, c] = config.wall_spawns;
    let walls = [
        spawn_wall(sprites, a, tile_base)?,
        spawn_wall(sprites, b, tile_base)?,
        spawn_wall(sprites, c, tile_base)?,
    ];

    let (x, y) = config.copter_spawn;
    let handle = sprites.allocate(x, y, ObjShape::S16x16, false, false, tile_base + COPTER_TILE, 0)?;
    Ok((walls, Copter::new(config, handle)))
}

fn spawn_wall(sprites: &mut SpriteTable, spawn: (i32, i32), tile_base: u16) -> Result<Wall, OamError> {
    let handle = sprites.allocate(spawn.0, spawn.1, ObjShape::S16x16, false, false, tile_base + WALL_TILE, 0)?;
    Ok(Wall::new(spawn, handle))
}

/// Full scene build, in order: background, sprite graphics, sprite reset,
/// title, entities.
pub fn build<H: Hardware>(console: &mut Console<H>, config: &GameConfig) -> Result<([Wall; WALL_COUNT], Copter), SceneError> {
    let background = match console.video {
        Presentation::Tiled(_) => &BACKGROUND,
        Presentation::Bitmap(_) => &BACKGROUND_SCREEN,
    };
    setup_background(console, background)?;
    setup_sprite_image(console, &SPRITES)?;
    console.sprites.reset_all();
    write_title(console, config)?;
    let tile_base = console.video.obj_tile_base();
    let entities = spawn_entities(&mut console.sprites, config, tile_base)?;
    log::info!(
        "scene ready in {:?} mode: {} sprites",
        console.video.mode(),
        console.sprites.len()
    );
    Ok(entities)
}
