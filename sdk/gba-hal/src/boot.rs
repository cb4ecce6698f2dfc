//! Interrupt table and panic handler.
//!
//! The startup code looks up `IntrTable` by name and jumps through it when an
//! interrupt fires. Nothing is wired up: every slot returns immediately, and
//! the frame loop polls `VCOUNT` instead of waiting on the vblank interrupt.

#[cfg(target_arch = "arm")]
use core::panic::PanicInfo;

pub type InterruptHandler = extern "C" fn();

/// One slot per interrupt source.
pub const INTERRUPT_COUNT: usize = 13;

/// Interrupt sources, in table order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Interrupt {
    VBlank = 0,
    HBlank,
    VCounter,
    Timer0,
    Timer1,
    Timer2,
    Timer3,
    Serial,
    Dma0,
    Dma1,
    Dma2,
    Dma3,
    Keypad,
}

impl Interrupt {
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }
}

pub extern "C" fn interrupt_ignore() {}

pub const INTERRUPT_TABLE: [InterruptHandler; INTERRUPT_COUNT] = [interrupt_ignore as InterruptHandler; INTERRUPT_COUNT];

#[cfg(target_arch = "arm")]
#[unsafe(export_name = "IntrTable")]
#[used]
pub static INTR_TABLE: [InterruptHandler; INTERRUPT_COUNT] = INTERRUPT_TABLE;

#[cfg(target_arch = "arm")]
#[panic_handler]
fn panic(_panic: &PanicInfo<'_>) -> ! {
    loop {}
}
