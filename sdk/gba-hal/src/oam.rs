//! # Sprite Attribute Table
//!
//! The device draws up to 128 sprites, each described by a packed 4-halfword
//! record in OAM (`$0700_0000`). [`SpriteTable`] keeps a RAM copy of all 128
//! records; game code mutates it freely during the frame and [`SpriteTable::commit`]
//! pushes the whole table in a single DMA transfer, ideally during vblank.
//!
//! ## Record Layout
//!
//! ```text
//! attr0: [15-14 shape][13 8bpp][12 mosaic][11-10 gfx mode][9-8 render mode][7-0 y]
//! attr1: [15-14 size ][13 vflip][12 hflip][11-9 affine   ][8-0 x]
//! attr2: [15-12 palette bank][11-10 priority][9-0 tile index]
//! attr3: affine parameter, unused here
//! ```
//!
//! Slots are handed out by a monotonic counter. A slot's [`SpriteHandle`]
//! stays valid until [`SpriteTable::reset_all`]; slots are never freed one at
//! a time.
//!
//! ```ignore
//! let heli = console.sprites.allocate(30, 120, ObjShape::S16x16, false, false, 0, 0)?;
//! console.sprites.move_by(heli, 0, -2);
//! console.wait_vblank();
//! console.sprites.commit(&mut console.hw);
//! ```

use core::fmt;

use bit_field::BitField;
use bytemuck::{Pod, Zeroable};

use crate::dma::{self, TransferUnit};
use crate::regs::{Hardware, OAM, SCREEN_HEIGHT, SCREEN_WIDTH};

/// There are 128 sprites on the device.
pub const NUM_SPRITES: usize = 128;

const Y_MASK: u16 = 0x00FF;
const X_MASK: u16 = 0x01FF;
const TILE_MASK: u16 = 0x03FF;

/// One packed sprite record, exactly as OAM stores it.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct ObjAttr {
    pub attr0: u16,
    pub attr1: u16,
    pub attr2: u16,
    pub attr3: u16,
}

/// The 12 width x height combinations a sprite can have.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ObjShape {
    S8x8,
    S16x16,
    S32x32,
    S64x64,
    S16x8,
    S32x8,
    S32x16,
    S64x32,
    S8x16,
    S8x32,
    S16x32,
    S32x64,
}

impl ObjShape {
    /// `(shape_bits, size_bits)`, the attr0 and attr1 encodings.
    pub const fn bits(self) -> (u16, u16) {
        match self {
            ObjShape::S8x8 => (0, 0),
            ObjShape::S16x16 => (0, 1),
            ObjShape::S32x32 => (0, 2),
            ObjShape::S64x64 => (0, 3),
            ObjShape::S16x8 => (1, 0),
            ObjShape::S32x8 => (1, 1),
            ObjShape::S32x16 => (1, 2),
            ObjShape::S64x32 => (1, 3),
            ObjShape::S8x16 => (2, 0),
            ObjShape::S8x32 => (2, 1),
            ObjShape::S16x32 => (2, 2),
            ObjShape::S32x64 => (2, 3),
        }
    }

    /// Width and height in pixels.
    pub const fn dimensions(self) -> (u16, u16) {
        match self {
            ObjShape::S8x8 => (8, 8),
            ObjShape::S16x16 => (16, 16),
            ObjShape::S32x32 => (32, 32),
            ObjShape::S64x64 => (64, 64),
            ObjShape::S16x8 => (16, 8),
            ObjShape::S32x8 => (32, 8),
            ObjShape::S32x16 => (32, 16),
            ObjShape::S64x32 => (64, 32),
            ObjShape::S8x16 => (8, 16),
            ObjShape::S8x32 => (8, 32),
            ObjShape::S16x32 => (16, 32),
            ObjShape::S32x64 => (32, 64),
        }
    }

    /// Inverse of [`ObjShape::bits`]. Shape 3 is prohibited by the hardware.
    pub const fn from_bits(shape: u16, size: u16) -> Option<ObjShape> {
        Some(match (shape, size) {
            (0, 0) => ObjShape::S8x8,
            (0, 1) => ObjShape::S16x16,
            (0, 2) => ObjShape::S32x32,
            (0, 3) => ObjShape::S64x64,
            (1, 0) => ObjShape::S16x8,
            (1, 1) => ObjShape::S32x8,
            (1, 2) => ObjShape::S32x16,
            (1, 3) => ObjShape::S64x32,
            (2, 0) => ObjShape::S8x16,
            (2, 1) => ObjShape::S8x32,
            (2, 2) => ObjShape::S16x32,
            (2, 3) => ObjShape::S32x64,
            _ => return None,
        })
    }
}

/// Sprite color depth.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ColorMode {
    /// 16 colors, palette bank chosen per sprite.
    Bpp4,
    /// 256 colors from the full sprite palette.
    Bpp8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    const fn bit(self) -> usize {
        match self {
            Axis::Horizontal => 12,
            Axis::Vertical => 13,
        }
    }
}

/// Stable index of an allocated slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SpriteHandle(u8);

impl SpriteHandle {
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OamError {
    /// All 128 slots have been handed out since the last reset.
    Exhausted,
    /// A value doesn't fit its bit field.
    FieldOutOfRange { field: &'static str, value: i32 },
}

impl fmt::Display for OamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OamError::Exhausted => write!(f, "all {NUM_SPRITES} sprite slots are allocated"),
            OamError::FieldOutOfRange { field, value } => {
                write!(f, "sprite {field} {value} does not fit its field")
            }
        }
    }
}

impl core::error::Error for OamError {}

pub struct SpriteTable {
    slots: [ObjAttr; NUM_SPRITES],
    next: usize,
    color_mode: ColorMode,
}

impl Default for SpriteTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SpriteTable {
    /// A table with every slot hidden off-screen.
    pub const fn new() -> Self {
        Self {
            slots: [ObjAttr {
                attr0: SCREEN_HEIGHT,
                attr1: SCREEN_WIDTH,
                attr2: 0,
                attr3: 0,
            }; NUM_SPRITES],
            next: 0,
            color_mode: ColorMode::Bpp8,
        }
    }

    /// Color depth used by subsequent [`allocate`](Self::allocate) calls.
    pub fn set_color_mode(&mut self, mode: ColorMode) {
        self.color_mode = mode;
    }

    /// Reserve the next slot and encode a sprite into it.
    ///
    /// The position follows the same wrap rules as [`set_position`](Self::set_position).
    pub fn allocate(
        &mut self,
        x: i32,
        y: i32,
        shape: ObjShape,
        hflip: bool,
        vflip: bool,
        tile_index: u16,
        priority: u8,
    ) -> Result<SpriteHandle, OamError> {
        if self.next >= NUM_SPRITES {
            return Err(OamError::Exhausted);
        }
        if tile_index > TILE_MASK {
            return Err(OamError::FieldOutOfRange {
                field: "tile index",
                value: tile_index as i32,
            });
        }
        if priority > 3 {
            return Err(OamError::FieldOutOfRange {
                field: "priority",
                value: priority as i32,
            });
        }

        let index = self.next;
        self.next += 1;

        let (shape_bits, size_bits) = shape.bits();
        let mut attr = ObjAttr::default();

        // rendering mode, gfx mode and mosaic all stay 0
        attr.attr0.set_bits(0..8, (y as u16) & Y_MASK);
        attr.attr0.set_bit(13, self.color_mode == ColorMode::Bpp8);
        attr.attr0.set_bits(14..16, shape_bits);

        // affine flag stays 0
        attr.attr1.set_bits(0..9, (x as u16) & X_MASK);
        attr.attr1.set_bit(Axis::Horizontal.bit(), hflip);
        attr.attr1.set_bit(Axis::Vertical.bit(), vflip);
        attr.attr1.set_bits(14..16, size_bits);

        // palette bank only matters for 16 color sprites
        attr.attr2.set_bits(0..10, tile_index);
        attr.attr2.set_bits(10..12, priority as u16);

        self.slots[index] = attr;
        log::debug!("sprite {} allocated at ({}, {}) as {:?}", index, x, y, shape);
        Ok(SpriteHandle(index as u8))
    }

    /// Set a sprite's position. Values outside the 9-bit x / 8-bit y fields
    /// wrap by truncation: x lands on `x mod 512`, y on `y mod 256`.
    #[inline]
    pub fn set_position(&mut self, handle: SpriteHandle, x: i32, y: i32) {
        let slot = &mut self.slots[handle.index()];
        slot.attr0.set_bits(0..8, (y as u16) & Y_MASK);
        slot.attr1.set_bits(0..9, (x as u16) & X_MASK);
    }

    /// Like [`set_position`](Self::set_position), but rejects coordinates that
    /// don't fit their fields instead of wrapping them.
    pub fn try_set_position(&mut self, handle: SpriteHandle, x: i32, y: i32) -> Result<(), OamError> {
        if !(0..=X_MASK as i32).contains(&x) {
            return Err(OamError::FieldOutOfRange { field: "x", value: x });
        }
        if !(0..=Y_MASK as i32).contains(&y) {
            return Err(OamError::FieldOutOfRange { field: "y", value: y });
        }
        self.set_position(handle, x, y);
        Ok(())
    }

    /// The `(x, y)` fields as stored.
    #[inline]
    pub fn position(&self, handle: SpriteHandle) -> (u16, u16) {
        let slot = &self.slots[handle.index()];
        (slot.attr1.get_bits(0..9), slot.attr0.get_bits(0..8))
    }

    /// Move a sprite by a delta. No clamping beyond the field truncation.
    pub fn move_by(&mut self, handle: SpriteHandle, dx: i32, dy: i32) {
        let (x, y) = self.position(handle);
        self.set_position(handle, x as i32 + dx, y as i32 + dy);
    }

    #[inline]
    pub fn set_flip(&mut self, handle: SpriteHandle, axis: Axis, flipped: bool) {
        self.slots[handle.index()].attr1.set_bit(axis.bit(), flipped);
    }

    #[inline]
    pub fn flip(&self, handle: SpriteHandle, axis: Axis) -> bool {
        self.slots[handle.index()].attr1.get_bit(axis.bit())
    }

    /// Point the sprite at another tile, e.g. the next animation frame.
    /// Only the low 10 bits are kept.
    #[inline]
    pub fn set_tile_offset(&mut self, handle: SpriteHandle, offset: u16) {
        self.slots[handle.index()].attr2.set_bits(0..10, offset & TILE_MASK);
    }

    #[inline]
    pub fn tile_offset(&self, handle: SpriteHandle) -> u16 {
        self.slots[handle.index()].attr2.get_bits(0..10)
    }

    pub fn set_priority(&mut self, handle: SpriteHandle, priority: u8) -> Result<(), OamError> {
        if priority > 3 {
            return Err(OamError::FieldOutOfRange {
                field: "priority",
                value: priority as i32,
            });
        }
        self.slots[handle.index()].attr2.set_bits(10..12, priority as u16);
        Ok(())
    }

    #[inline]
    pub fn shape(&self, handle: SpriteHandle) -> Option<ObjShape> {
        let slot = &self.slots[handle.index()];
        ObjShape::from_bits(slot.attr0.get_bits(14..16), slot.attr1.get_bits(14..16))
    }

    /// Forget every allocation and move all 128 slots off-screen so stale
    /// sprites disappear on the next commit.
    pub fn reset_all(&mut self) {
        self.next = 0;
        for slot in self.slots.iter_mut() {
            *slot = ObjAttr {
                attr0: SCREEN_HEIGHT,
                attr1: SCREEN_WIDTH,
                attr2: 0,
                attr3: 0,
            };
        }
    }

    /// Slots handed out since the last reset.
    #[inline]
    pub fn len(&self) -> usize {
        self.next
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.next == 0
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        NUM_SPRITES
    }

    #[inline]
    pub fn slot(&self, handle: SpriteHandle) -> &ObjAttr {
        &self.slots[handle.index()]
    }

    #[inline]
    pub fn slots(&self) -> &[ObjAttr; NUM_SPRITES] {
        &self.slots
    }

    /// The table as the 512 halfwords OAM expects.
    #[inline]
    pub fn as_halfwords(&self) -> &[u16] {
        bytemuck::cast_slice(&self.slots)
    }

    /// Copy the entire table to OAM in one transfer.
    ///
    /// This is the only point where sprite changes become visible. The table
    /// isn't double buffered, so call it once per frame, after all entity
    /// updates, during vblank.
    pub fn commit<H: Hardware + ?Sized>(&self, hw: &mut H) {
        let words = self.as_halfwords();
        hw.dma3(OAM, words, dma::control_word(words.len(), TransferUnit::Half));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FlatMemory;

    fn table_with(n: usize) -> (SpriteTable, [Option<SpriteHandle>; 4]) {
        let mut table = SpriteTable::new();
        let mut handles = [None; 4];
        for i in 0..n {
            handles[i] = Some(table.allocate(0, 0, ObjShape::S16x16, false, false, 0, 0).unwrap());
        }
        (table, handles)
    }

    #[test]
    fn position_wraps_by_mask() {
        let (mut table, handles) = table_with(1);
        let h = handles[0].unwrap();
        for &(x, y) in &[(0, 0), (239, 159), (511, 255), (512, 256), (600, 300), (-1, -1), (-16, -40)] {
            table.set_position(h, x, y);
            assert_eq!(
                table.position(h),
                (x.rem_euclid(512) as u16, y.rem_euclid(256) as u16),
                "({x}, {y})"
            );
        }
    }

    #[test]
    fn position_write_leaves_other_fields_alone() {
        let mut table = SpriteTable::new();
        let h = table.allocate(5, 5, ObjShape::S32x64, true, true, 0x155, 2).unwrap();
        table.set_position(h, -3, 1000);
        assert_eq!(table.shape(h), Some(ObjShape::S32x64));
        assert!(table.flip(h, Axis::Horizontal));
        assert!(table.flip(h, Axis::Vertical));
        assert_eq!(table.tile_offset(h), 0x155);
        assert!(table.slot(h).attr0.get_bit(13));
    }

    #[test]
    fn allocate_packs_attributes() {
        let mut table = SpriteTable::new();
        let h = table.allocate(30, 120, ObjShape::S16x16, false, false, 8, 1).unwrap();
        let slot = table.slot(h);
        assert_eq!(slot.attr0, 120 | (1 << 13));
        assert_eq!(slot.attr1, 30 | (1 << 14));
        assert_eq!(slot.attr2, 8 | (1 << 10));
    }

    #[test]
    fn every_shape_round_trips_its_bits() {
        let mut table = SpriteTable::new();
        for shape in [
            ObjShape::S8x8,
            ObjShape::S16x16,
            ObjShape::S32x32,
            ObjShape::S64x64,
            ObjShape::S16x8,
            ObjShape::S32x8,
            ObjShape::S32x16,
            ObjShape::S64x32,
            ObjShape::S8x16,
            ObjShape::S8x32,
            ObjShape::S16x32,
            ObjShape::S32x64,
        ] {
            let h = table.allocate(0, 0, shape, false, false, 0, 0).unwrap();
            assert_eq!(table.shape(h), Some(shape));
        }
    }

    #[test]
    fn move_by_adds_delta() {
        let (mut table, handles) = table_with(1);
        let h = handles[0].unwrap();
        table.set_position(h, 100, 100);
        table.move_by(h, -2, 1);
        assert_eq!(table.position(h), (98, 101));
        table.set_position(h, 0, 0);
        table.move_by(h, -1, -1);
        assert_eq!(table.position(h), (511, 255));
    }

    #[test]
    fn flips_and_tile_offset_are_independent() {
        let (mut table, handles) = table_with(1);
        let h = handles[0].unwrap();
        table.set_flip(h, Axis::Vertical, true);
        assert!(!table.flip(h, Axis::Horizontal));
        assert!(table.flip(h, Axis::Vertical));
        table.set_flip(h, Axis::Vertical, false);
        assert!(!table.flip(h, Axis::Vertical));

        table.set_priority(h, 3).unwrap();
        table.set_tile_offset(h, 0x7FF);
        assert_eq!(table.tile_offset(h), 0x3FF);
        assert_eq!(table.slot(h).attr2.get_bits(10..12), 3);
    }

    #[test]
    fn reset_then_allocate_hands_out_sequential_handles() {
        let mut table = SpriteTable::new();
        for _ in 0..10 {
            table.allocate(10, 10, ObjShape::S8x8, false, false, 0, 0).unwrap();
        }
        table.reset_all();
        assert!(table.is_empty());

        let n = 5;
        for i in 0..n {
            let h = table.allocate(10, 10, ObjShape::S8x8, false, false, 0, 0).unwrap();
            assert_eq!(h.index(), i);
        }
        for slot in &table.slots()[n..] {
            let x = slot.attr1.get_bits(0..9);
            let y = slot.attr0.get_bits(0..8);
            assert!(x >= SCREEN_WIDTH || y >= SCREEN_HEIGHT, "slot visible at ({x}, {y})");
        }
    }

    #[test]
    fn pool_exhaustion_is_an_error() {
        let mut table = SpriteTable::new();
        for _ in 0..NUM_SPRITES {
            table.allocate(0, 0, ObjShape::S8x8, false, false, 0, 0).unwrap();
        }
        assert_eq!(
            table.allocate(0, 0, ObjShape::S8x8, false, false, 0, 0),
            Err(OamError::Exhausted)
        );
        assert_eq!(table.len(), NUM_SPRITES);
    }

    #[test]
    fn out_of_range_fields_are_rejected() {
        let mut table = SpriteTable::new();
        assert!(matches!(
            table.allocate(0, 0, ObjShape::S8x8, false, false, 1024, 0),
            Err(OamError::FieldOutOfRange { field: "tile index", .. })
        ));
        assert!(matches!(
            table.allocate(0, 0, ObjShape::S8x8, false, false, 0, 4),
            Err(OamError::FieldOutOfRange { field: "priority", .. })
        ));
        assert!(table.is_empty());

        let h = table.allocate(0, 0, ObjShape::S8x8, false, false, 0, 0).unwrap();
        assert!(table.try_set_position(h, 511, 255).is_ok());
        assert_eq!(
            table.try_set_position(h, -1, 0),
            Err(OamError::FieldOutOfRange { field: "x", value: -1 })
        );
        assert_eq!(
            table.try_set_position(h, 0, 256),
            Err(OamError::FieldOutOfRange { field: "y", value: 256 })
        );
        assert_eq!(table.position(h), (511, 255));
    }

    #[test]
    fn commit_sends_whole_table_in_one_transfer() {
        let mut hw = FlatMemory::new();
        let mut table = SpriteTable::new();
        let h = table.allocate(30, 120, ObjShape::S16x16, false, false, 0, 0).unwrap();
        table.set_position(h, 31, 121);
        table.commit(&mut hw);

        assert_eq!(hw.transfers, 1);
        assert_eq!(table.as_halfwords().len(), NUM_SPRITES * 4);
        assert_eq!(hw.peek(OAM) & 0xFF, 121);
        assert_eq!(hw.peek(OAM.offset(2)) & 0x1FF, 31);
        // last slot is still parked off-screen
        assert_eq!(hw.peek(OAM.offset((NUM_SPRITES as u32 - 1) * 8)), SCREEN_HEIGHT);
    }
}
