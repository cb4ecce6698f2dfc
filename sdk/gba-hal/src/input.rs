use crate::regs::{self, Hardware};

/// Bits of `KEYINPUT` that carry buttons.
pub const KEY_MASK: u16 = 0x03FF;

bitflags::bitflags! {
    /// Buttons, one bit each, in `KEYINPUT` order. Set means pressed.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct Keys: u16 {
        const A      = 1 << 0;
        const B      = 1 << 1;
        const SELECT = 1 << 2;
        const START  = 1 << 3;
        const RIGHT  = 1 << 4;
        const LEFT   = 1 << 5;
        const UP     = 1 << 6;
        const DOWN   = 1 << 7;
        const R      = 1 << 8;
        const L      = 1 << 9;
    }
}

impl Keys {
    /// Decode the active-low register: a 0 bit means pressed.
    #[inline(always)]
    pub const fn from_register(raw: u16) -> Keys {
        Keys::from_bits_truncate(!raw & KEY_MASK)
    }

    /// Encode as the register would read with these buttons held.
    #[inline(always)]
    pub const fn to_register(self) -> u16 {
        !self.bits() & KEY_MASK
    }
}

/// Button state, sampled once per frame.
///
/// Sampling once per frame is all the debouncing there is: a bounce shorter
/// than a frame is never seen. The previous sample is kept so edges can be
/// detected.
#[derive(Debug, Default)]
pub struct KeyPad {
    pub keys: Keys,
    pub keys_last: Keys,
}

impl KeyPad {
    pub const fn new() -> Self {
        Self {
            keys: Keys::empty(),
            keys_last: Keys::empty(),
        }
    }

    /// Read `KEYINPUT` and make it the current sample.
    #[inline(always)]
    pub fn sample<H: Hardware + ?Sized>(&mut self, hw: &mut H) -> Keys {
        self.keys_last = self.keys;
        self.keys = Keys::from_register(regs::key_state(hw));
        self.keys
    }

    #[inline]
    pub fn is_pressed(&self, keys: Keys) -> bool {
        self.keys.intersects(keys)
    }

    #[inline]
    pub fn was_pressed(&self, keys: Keys) -> bool {
        self.keys_last.intersects(keys)
    }

    /// Returns true only on the frame the button was first pressed (edge-trigger).
    #[inline]
    pub fn just_pressed(&self, keys: Keys) -> bool {
        self.is_pressed(keys) && !self.was_pressed(keys)
    }

    /// Returns true only on the frame the button was released (edge-trigger).
    #[inline]
    pub fn just_released(&self, keys: Keys) -> bool {
        !self.is_pressed(keys) && self.was_pressed(keys)
    }
}
