//! Minimal flat-memory device for this crate's unit tests.

use std::collections::HashMap;
use std::vec::Vec;

use crate::dma::decode_control;
use crate::regs::{Addr, Hardware, KEYINPUT, SCANLINES, VCOUNT};

pub(crate) struct FlatMemory {
    memory: HashMap<u32, u16>,
    pub vcount: u16,
    pub keys: u16,
    pub transfers: usize,
    pub writes: Vec<(Addr, u16)>,
}

impl FlatMemory {
    pub fn new() -> Self {
        Self {
            memory: HashMap::new(),
            vcount: 0,
            keys: 0x03FF,
            transfers: 0,
            writes: Vec::new(),
        }
    }

    pub fn peek(&self, addr: Addr) -> u16 {
        self.memory.get(&addr.0).copied().unwrap_or(0)
    }
}

impl Hardware for FlatMemory {
    fn read16(&mut self, addr: Addr) -> u16 {
        match addr {
            VCOUNT => {
                let line = self.vcount;
                self.vcount = (self.vcount + 1) % SCANLINES;
                line
            }
            KEYINPUT => self.keys,
            _ => self.peek(addr),
        }
    }

    fn write16(&mut self, addr: Addr, value: u16) {
        self.writes.push((addr, value));
        self.memory.insert(addr.0, value);
    }

    fn dma3(&mut self, dst: Addr, src: &[u16], control: u32) {
        let (count, unit) = decode_control(control);
        let halfwords = count * unit.halfwords();
        for (i, value) in src.iter().take(halfwords).enumerate() {
            self.memory.insert(dst.0 + i as u32 * 2, *value);
        }
        self.transfers += 1;
    }
}
