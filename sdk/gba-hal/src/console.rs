use crate::{
    input::{KeyPad, Keys},
    oam::SpriteTable,
    regs::{self, Hardware, SCREEN_HEIGHT},
    scr::DisplayControl,
    video::{Presentation, PresentationMode},
};

/// Iterations of [`Hardware::spin`] per unit of [`Console::delay`].
pub const DELAY_SCALE: u32 = 10;

/// Everything a program needs from the device, in one place.
pub struct Console<H: Hardware> {
    pub hw: H,
    /// Shadow copy of the display control register.
    pub display: DisplayControl,
    pub sprites: SpriteTable,
    pub keypad: KeyPad,
    pub video: Presentation,
}

impl<H: Hardware> Console<H> {
    /// Take over the device: pick the presentation and write the display
    /// control register.
    ///
    /// The sprite table starts with every slot parked off-screen, but only
    /// in RAM: hardware OAM keeps whatever it held at boot until the first
    /// [`present`](Self::present).
    pub fn init(hw: H, mode: PresentationMode) -> Console<H> {
        let video = Presentation::new(mode);
        let display = video.display_control();

        let mut console = Self {
            hw,
            display,
            sprites: SpriteTable::new(),
            keypad: KeyPad::new(),
            video,
        };
        console.write_display_control();
        log::info!("console up in {:?} mode, dispcnt {:#06x}", mode, display.bits());
        console
    }

    /// Write the current display control shadow to hardware.
    #[inline(always)]
    pub fn write_display_control(&mut self) {
        regs::set_display_control(&mut self.hw, self.display.bits());
    }

    /// Block until the scanline counter reaches the bottom of the visible
    /// screen. There is no timeout: without a display driving the counter
    /// this never returns.
    #[inline(always)]
    pub fn wait_vblank(&mut self) {
        while regs::scanline(&mut self.hw) < SCREEN_HEIGHT {}
    }

    /// Sample the buttons for this frame.
    #[inline(always)]
    pub fn sample_input(&mut self) -> Keys {
        self.keypad.sample(&mut self.hw)
    }

    /// Make this frame visible: push the sprite table and, in bitmap mode,
    /// swap pages. Call during vblank.
    pub fn present(&mut self) {
        self.sprites.commit(&mut self.hw);
        if let Presentation::Bitmap(bitmap) = &mut self.video {
            let hidden = bitmap.hidden();
            bitmap.flip(&mut self.hw, &mut self.display, hidden);
        }
    }

    /// Busy-wait for `amount` delay units.
    #[inline(always)]
    pub fn delay(&mut self, amount: u32) {
        self.hw.spin(amount.saturating_mul(DELAY_SCALE));
    }
}
