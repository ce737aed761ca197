// Copyright (c) 2018 The rust-gpio-cdev Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Seed-reproducible 32-bit word sources.
//!
//! The producer and the predictor only stay in lock-step if both draw the
//! exact same words, so the generator here is PCG-XSH-RR 64/32 with the
//! recurrence written out in full:
//!
//! ```text
//! state' = state * 6364136223846793005 + inc          (mod 2^64)
//! out    = rotr32(((state >> 18) ^ state) >> 27, state >> 59)
//! ```
//!
//! where `out` is computed from the state *before* the update. Seeding with
//! `(initstate, initseq)` sets `state = 0`, `inc = (initseq << 1) | 1`, steps
//! once, adds `initstate` to the state and steps again. Any other
//! implementation following these steps produces the same sequence.

/// Anything that can hand out a reproducible stream of 32-bit words.
///
/// Bit cursors, predictors and producers are generic over this so the
/// generator algorithm can be swapped, as long as both ends of a test agree.
pub trait WordSource {
    fn next_word(&mut self) -> u32;
}

impl<G: WordSource + ?Sized> WordSource for &mut G {
    #[inline(always)]
    fn next_word(&mut self) -> u32 {
        (**self).next_word()
    }
}

impl<G: WordSource + ?Sized> WordSource for Box<G> {
    #[inline(always)]
    fn next_word(&mut self) -> u32 {
        (**self).next_word()
    }
}

const MULTIPLIER: u64 = 6364136223846793005;

#[inline(always)]
const fn advance(state: u64, inc: u64) -> u64 {
    state.wrapping_mul(MULTIPLIER).wrapping_add(inc)
}

/// PCG-XSH-RR generator with 64 bits of state and 32-bit output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pcg32 {
    state: u64,
    inc: u64,
}

impl Pcg32 {
    /// Raw state of the reference static initializer.
    pub const INITIALIZER_STATE: u64 = 0x853c49e6748fea9b;
    /// Raw increment of the reference static initializer.
    pub const INITIALIZER_INC: u64 = 0xda3e39cb94b95bdb;

    /// Seed a generator from an initial state and a stream selector.
    ///
    /// Two generators seeded with the same pair emit identical sequences on
    /// every platform.
    pub const fn seed(seed_value: u64, sequence_id: u64) -> Self {
        let inc = (sequence_id << 1) | 1;
        let state = advance(0, inc);
        let state = advance(state.wrapping_add(seed_value), inc);
        Self { state, inc }
    }

    /// Build a generator from its raw internal state, bypassing seeding.
    ///
    /// `inc` must be odd for the generator to reach its full period; the low
    /// bit is forced on.
    pub const fn from_raw(state: u64, inc: u64) -> Self {
        Self {
            state,
            inc: inc | 1,
        }
    }

    pub const fn state(&self) -> u64 {
        self.state
    }

    pub const fn increment(&self) -> u64 {
        self.inc
    }

    #[inline]
    pub fn next_word(&mut self) -> u32 {
        let old = self.state;
        self.state = advance(old, self.inc);
        let xorshifted = (((old >> 18) ^ old) >> 27) as u32;
        let rot = (old >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl Default for Pcg32 {
    fn default() -> Self {
        Self::from_raw(Self::INITIALIZER_STATE, Self::INITIALIZER_INC)
    }
}

impl WordSource for Pcg32 {
    #[inline(always)]
    fn next_word(&mut self) -> u32 {
        Pcg32::next_word(self)
    }
}

impl Iterator for Pcg32 {
    type Item = u32;

    #[inline]
    fn next(&mut self) -> Option<u32> {
        Some(Pcg32::next_word(self))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reference_vector() {
        let mut rng = Pcg32::seed(42, 54);
        let words: Vec<u32> = (0..6).map(|_| rng.next_word()).collect();

        assert_eq!(
            words,
            [0xa15c02b7, 0x7b47f409, 0xba1d3330, 0x83d2f293, 0xbfa4784b, 0xcbed606e]
        );
    }

    #[test]
    fn reference_seeds() {
        let mut rng = Pcg32::seed(Pcg32::INITIALIZER_STATE, Pcg32::INITIALIZER_INC);
        let words: Vec<u32> = rng.by_ref().take(4).collect();

        assert_eq!(words, [0x1bbeb4f2, 0xe82e89e9, 0x681cfdeb, 0xe00fa2ec]);
    }

    #[test]
    fn same_seed_same_words() {
        let a = Pcg32::seed(0xdead_beef, 7);
        let b = Pcg32::seed(0xdead_beef, 7);

        assert!(a.take(10_000).eq(b.take(10_000)));
    }

    #[test]
    fn stream_selector_changes_sequence() {
        let a = Pcg32::seed(42, 54);
        let b = Pcg32::seed(42, 55);

        assert!(!a.take(16).eq(b.take(16)));
    }

    #[test]
    fn from_raw_forces_odd_increment() {
        let rng = Pcg32::from_raw(1, 2);
        assert_eq!(rng.increment(), 3);
        assert_eq!(Pcg32::default().increment(), Pcg32::INITIALIZER_INC);
    }

    #[test]
    fn seed_is_const() {
        const RNG: Pcg32 = Pcg32::seed(42, 54);
        assert_eq!(RNG, Pcg32::seed(42, 54));
    }
}
