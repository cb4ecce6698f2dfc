//! # Display Control Flags
//!
//! Bitflags for the display control register (`DISPCNT`, `$0400_0000`).
//!
//! | Flag           | Effect                                              |
//! |----------------|-----------------------------------------------------|
//! | `MODE_0`       | Four regular tile layers                            |
//! | `MODE_4`       | One 240x160 8bpp bitmap, double buffered            |
//! | `PAGE_SELECT`  | Which bitmap page goes to the screen (mode 4 only)  |
//! | `OBJ_1D`       | Sprite tiles laid out linearly instead of as a grid |
//! | `BG0`..`BG3`   | Layer enables                                       |
//! | `OBJ`          | Sprite enable                                       |
//!
//! The register is read/write, but the SDK keeps a shadow copy in
//! [`Console`](crate::console::Console) and only ever writes it whole.

bitflags::bitflags! {
    /// Display control flags at `$0400_0000`.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct DisplayControl: u16 {
        // Bits 0-2: video mode
        const MODE_0        = 0b0000_0000_0000_0000;
        const MODE_1        = 0b0000_0000_0000_0001;
        const MODE_3        = 0b0000_0000_0000_0011;
        const MODE_4        = 0b0000_0000_0000_0100;

        /// Show the back bitmap page. Toggle each frame for double buffering.
        const PAGE_SELECT   = 0b0000_0000_0001_0000;
        /// One-dimensional sprite tile mapping.
        const OBJ_1D        = 0b0000_0000_0100_0000;
        /// Blank the screen, giving the CPU full speed access to video memory.
        const FORCED_BLANK  = 0b0000_0000_1000_0000;

        const BG0           = 0b0000_0001_0000_0000;
        const BG1           = 0b0000_0010_0000_0000;
        const BG2           = 0b0000_0100_0000_0000;
        const BG3           = 0b0000_1000_0000_0000;
        const OBJ           = 0b0001_0000_0000_0000;
    }
}

impl DisplayControl {
    /// The video mode field (bits 0-2).
    #[inline(always)]
    pub const fn mode(&self) -> u16 {
        self.bits() & 0b111
    }
}
