use core::fmt;

use gba_hal::input::Keys;
use heapless::Deque;

pub const SCRIPT_CAPACITY: usize = 32;

/// Hold `keys` for the next `frames` samples.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub keys: Keys,
    pub frames: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScriptFull;

impl fmt::Display for ScriptFull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "input script holds at most {SCRIPT_CAPACITY} segments")
    }
}

impl core::error::Error for ScriptFull {}

/// Scripted button presses, consumed one step per keypad read. The game reads
/// the keypad once per frame, so a step is a frame. Once the script runs out
/// no buttons are held.
#[derive(Debug, Default)]
pub struct InputScript {
    segments: Deque<Segment, SCRIPT_CAPACITY>,
}

impl InputScript {
    pub const fn new() -> Self {
        Self { segments: Deque::new() }
    }

    pub fn from_segments(segments: &[Segment]) -> Result<Self, ScriptFull> {
        let mut script = Self::new();
        for segment in segments {
            script.push(segment.keys, segment.frames)?;
        }
        Ok(script)
    }

    /// Append a segment. Zero-length segments are dropped.
    pub fn push(&mut self, keys: Keys, frames: u32) -> Result<(), ScriptFull> {
        if frames == 0 {
            return Ok(());
        }
        self.segments.push_back(Segment { keys, frames }).map_err(|_| ScriptFull)
    }

    /// Buttons held this step.
    pub fn current(&self) -> Keys {
        self.segments.front().map_or(Keys::empty(), |s| s.keys)
    }

    /// Return this step's buttons and move to the next step.
    pub fn next_keys(&mut self) -> Keys {
        let Some(segment) = self.segments.front_mut() else {
            return Keys::empty();
        };
        let keys = segment.keys;
        segment.frames -= 1;
        if segment.frames == 0 {
            self.segments.pop_front();
        }
        keys
    }

    pub fn remaining_frames(&self) -> u32 {
        self.segments.iter().map(|s| s.frames).sum()
    }

    pub fn is_finished(&self) -> bool {
        self.segments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plays_segments_in_order() {
        let mut script = InputScript::from_segments(&[
            Segment { keys: Keys::UP, frames: 2 },
            Segment { keys: Keys::empty(), frames: 0 },
            Segment { keys: Keys::A, frames: 1 },
        ])
        .unwrap();
        assert_eq!(script.remaining_frames(), 3);
        assert_eq!(script.current(), Keys::UP);

        assert_eq!(script.next_keys(), Keys::UP);
        assert_eq!(script.next_keys(), Keys::UP);
        assert_eq!(script.next_keys(), Keys::A);
        assert!(script.is_finished());
        assert_eq!(script.next_keys(), Keys::empty());
    }

    #[test]
    fn capacity_is_bounded() {
        let mut script = InputScript::new();
        for _ in 0..SCRIPT_CAPACITY {
            script.push(Keys::UP, 1).unwrap();
        }
        assert_eq!(script.push(Keys::UP, 1), Err(ScriptFull));
    }
}
