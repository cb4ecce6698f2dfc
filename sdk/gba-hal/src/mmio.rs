//! # Memory-Mapped Device
//!
//! The real hardware backend. Registers and video memories are accessed with
//! volatile reads and writes at their fixed addresses; the DMA channel is a
//! write-only register block.

use volatile_register::WO;

use crate::regs::{Addr, DMA3SAD, Hardware};

/// DMA channel register layout (`$0400_00D4-$0400_00DF` for channel 3).
#[repr(C)]
pub struct DmaChannel {
    /// Source address.
    pub src: WO<u32>,
    /// Destination address.
    pub dst: WO<u32>,
    /// Count in the low half, control flags in the high half.
    /// The transfer starts as soon as the enable bit is written.
    pub cnt: WO<u32>,
}

impl DmaChannel {
    #[inline(always)]
    pub(crate) unsafe fn dma3() -> &'static mut DmaChannel {
        unsafe { &mut *(DMA3SAD.0 as usize as *mut DmaChannel) }
    }
}

/// The physical device.
pub struct Mmio {
    dma3: &'static mut DmaChannel,
}

impl Mmio {
    /// # Safety
    ///
    /// Only valid on the device itself, and only one `Mmio` may exist.
    pub unsafe fn new() -> Mmio {
        Mmio {
            dma3: unsafe { DmaChannel::dma3() },
        }
    }
}

impl Hardware for Mmio {
    #[inline(always)]
    fn read16(&mut self, addr: Addr) -> u16 {
        unsafe { core::ptr::read_volatile(addr.0 as usize as *const u16) }
    }

    #[inline(always)]
    fn write16(&mut self, addr: Addr, value: u16) {
        unsafe { core::ptr::write_volatile(addr.0 as usize as *mut u16, value) }
    }

    #[inline(always)]
    fn dma3(&mut self, dst: Addr, src: &[u16], control: u32) {
        unsafe {
            self.dma3.src.write(src.as_ptr() as usize as u32);
            self.dma3.dst.write(dst.0);
            self.dma3.cnt.write(control);
        }
    }
}
