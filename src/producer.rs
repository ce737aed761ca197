use crate::{
    bits::BitCursor,
    pcg::{Pcg32, WordSource},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    High,
    Low,
}

impl Level {
    /// A set bit drives the line low, a clear bit leaves it high, so a line
    /// with a pull-up sees its first edge on the first set bit.
    pub const fn from_bit(bit: bool) -> Self {
        if bit {
            Self::Low
        } else {
            Self::High
        }
    }

    pub const fn is_high(&self) -> bool {
        matches!(self, Level::High)
    }

    /// The bit that produces this level.
    pub const fn bit(&self) -> bool {
        matches!(self, Level::Low)
    }
}

/// Producer side of a lock-step test: the level to drive on each bit-period.
///
/// Each call to `next` corresponds to one toggle; the caller writes the level
/// to its output line and then sleeps for one bit-period.
#[derive(Debug, Clone)]
pub struct ToggleSequence<G = Pcg32> {
    cursor: BitCursor<G>,
    level: Level,
}

impl<G: WordSource> ToggleSequence<G> {
    /// Level of the line before the first toggle.
    pub const IDLE: Level = Level::High;

    pub fn new(source: G) -> Self {
        Self {
            cursor: BitCursor::new(source),
            level: Self::IDLE,
        }
    }

    /// The most recently emitted level, or [`Self::IDLE`] before the first.
    pub const fn level(&self) -> Level {
        self.level
    }

    pub const fn bits_emitted(&self) -> u64 {
        self.cursor.bits_consumed()
    }
}

impl<G: WordSource> Iterator for ToggleSequence<G> {
    type Item = Level;

    fn next(&mut self) -> Option<Level> {
        let level = Level::from_bit(self.cursor.next_bit());
        if level != self.level {
            log::trace!(
                "producer edge to {level:?} at bit {}",
                self.cursor.bits_consumed()
            );
        }
        self.level = level;
        Some(level)
    }
}
