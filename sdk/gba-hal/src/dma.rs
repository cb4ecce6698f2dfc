//! # Bulk Transfers
//!
//! DMA channel 3 copies blocks of halfwords or words into device memory
//! without the CPU touching each one. It's used for palettes, tile images,
//! bitmap pages and the whole sprite table.
//!
//! ```ignore
//! dma::copy16(&mut hw, regs::BG_PALETTE, &palette)?;
//! ```
//!
//! The engine starts as soon as the control word is written. Nothing here
//! waits for it to finish, so don't re-trigger a transfer whose source or
//! destination overlaps one that may still be running.

use core::fmt;

use crate::regs::{Addr, Hardware};

bitflags::bitflags! {
    /// High half of `DMA3CNT`.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct DmaControl: u32 {
        /// Transfer 32-bit words instead of 16-bit halfwords.
        const WORD   = 1 << 26;
        /// Start the transfer.
        const ENABLE = 1 << 31;
    }
}

/// Largest transfer DMA3 can do in one go. Encoded as a count of 0.
pub const MAX_UNITS: usize = 0x1_0000;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TransferUnit {
    Half,
    Word,
}

impl TransferUnit {
    /// Halfwords per unit.
    #[inline(always)]
    pub const fn halfwords(self) -> usize {
        match self {
            TransferUnit::Half => 1,
            TransferUnit::Word => 2,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TransferError {
    /// A count of zero means "the maximum" to the hardware; we don't allow it.
    Empty,
    /// More units than one transfer can carry.
    TooLong { count: usize },
    /// The source slice ends before `count` units.
    SourceTooShort { needed: usize, available: usize },
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferError::Empty => write!(f, "empty transfer"),
            TransferError::TooLong { count } => {
                write!(f, "transfer of {count} units exceeds the {MAX_UNITS} unit limit")
            }
            TransferError::SourceTooShort { needed, available } => {
                write!(f, "transfer needs {needed} halfwords but the source has {available}")
            }
        }
    }
}

impl core::error::Error for TransferError {}

/// Build the `DMA3CNT` word for an immediate transfer.
#[inline(always)]
pub const fn control_word(count: usize, unit: TransferUnit) -> u32 {
    let mut control = (count as u32) & 0xFFFF;
    if let TransferUnit::Word = unit {
        control |= DmaControl::WORD.bits();
    }
    control | DmaControl::ENABLE.bits()
}

/// Split a `DMA3CNT` word back into its unit count and unit size.
#[inline(always)]
pub fn decode_control(control: u32) -> (usize, TransferUnit) {
    let flags = DmaControl::from_bits_truncate(control);
    let count = match (control & 0xFFFF) as usize {
        0 => MAX_UNITS,
        n => n,
    };
    let unit = if flags.contains(DmaControl::WORD) {
        TransferUnit::Word
    } else {
        TransferUnit::Half
    };
    (count, unit)
}

/// Copy `count` units from `src` to `dst`.
pub fn transfer<H: Hardware + ?Sized>(
    hw: &mut H,
    dst: Addr,
    src: &[u16],
    count: usize,
    unit: TransferUnit,
) -> Result<(), TransferError> {
    if count == 0 {
        return Err(TransferError::Empty);
    }
    if count > MAX_UNITS {
        return Err(TransferError::TooLong { count });
    }
    let needed = count * unit.halfwords();
    if needed > src.len() {
        return Err(TransferError::SourceTooShort {
            needed,
            available: src.len(),
        });
    }

    log::trace!("dma3 {} x {:?} -> {:#010x}", count, unit, dst.0);
    hw.dma3(dst, &src[..needed], control_word(count, unit));
    Ok(())
}

/// Copy all of `src` to `dst` as halfwords.
#[inline]
pub fn copy16<H: Hardware + ?Sized>(hw: &mut H, dst: Addr, src: &[u16]) -> Result<(), TransferError> {
    transfer(hw, dst, src, src.len(), TransferUnit::Half)
}
