use crate::pcg::WordSource;

const WORD_BITS: u32 = u32::BITS;

/// Bit-level view over a [`WordSource`].
///
/// Bits are handed out least-significant first. A fresh word is drawn as
/// soon as the previous one is exhausted, before the next bit is returned, so
/// there is never a gap or a repeat at a word boundary.
#[derive(Debug, Clone)]
pub struct BitCursor<G> {
    source: G,
    word: u32,
    idx: u32,
    consumed: u64,
}

impl<G: WordSource> BitCursor<G> {
    /// Wrap `source`, drawing its first word immediately.
    pub fn new(mut source: G) -> Self {
        let word = source.next_word();
        log::trace!("bit cursor loaded first word {word:#010x}");
        Self {
            source,
            word,
            idx: 0,
            consumed: 0,
        }
    }

    pub fn next_bit(&mut self) -> bool {
        if self.idx == WORD_BITS {
            self.word = self.source.next_word();
            self.idx = 0;
            log::trace!(
                "bit cursor loaded word {:#010x} after {} bits",
                self.word,
                self.consumed
            );
        }

        let bit = (self.word >> self.idx) & 1 == 1;
        self.idx += 1;
        self.consumed += 1;
        bit
    }

    /// Index of the next bit within the current word, `0..=32`.
    ///
    /// `32` means the current word is spent and the next call to
    /// [`next_bit`](Self::next_bit) will draw a new one.
    pub const fn bit_index(&self) -> u32 {
        self.idx
    }

    /// The word currently being consumed.
    pub const fn current_word(&self) -> u32 {
        self.word
    }

    /// Total number of bits handed out since construction.
    pub const fn bits_consumed(&self) -> u64 {
        self.consumed
    }

    pub fn source(&self) -> &G {
        &self.source
    }

    pub fn into_source(self) -> G {
        self.source
    }
}

impl<G: WordSource> Iterator for BitCursor<G> {
    type Item = bool;

    #[inline]
    fn next(&mut self) -> Option<bool> {
        Some(self.next_bit())
    }
}
