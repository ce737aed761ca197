use std::time::Duration;

use crate::{
    bits::BitCursor,
    errors::Result,
    pcg::{Pcg32, WordSource},
    timing::bit_periods_to_duration,
};

/// Replays a producer's bit stream and reports how many bit-periods remain
/// until the simulated level next changes.
///
/// A predictor and the producer it follows never talk to each other: they
/// stay aligned only because both consume exactly one bit per bit-period from
/// identically seeded generators. A missed or spurious event on the observed
/// line desynchronizes them for good.
#[derive(Debug, Clone)]
pub struct TransitionPredictor<G = Pcg32> {
    cursor: BitCursor<G>,
    last_value: bool,
    total_periods: u64,
    transitions: u64,
}

impl<G: WordSource> TransitionPredictor<G> {
    /// The level a producer's line rests at before its first toggle.
    pub const IDLE_VALUE: bool = false;

    /// Start predicting from `initial`, at bit 0 of the source's first word.
    pub fn new(source: G, initial: bool) -> Self {
        Self {
            cursor: BitCursor::new(source),
            last_value: initial,
            total_periods: 0,
            transitions: 0,
        }
    }

    /// Create a predictor that has already run its priming pass.
    ///
    /// The first transition of a fresh producer is the first one that can be
    /// observed, so it only anchors the timing and is not itself predicted.
    pub fn primed(source: G) -> Self {
        let mut predictor = Self::new(source, Self::IDLE_VALUE);
        predictor.prime();
        predictor
    }

    /// Run one throwaway prediction, returning the discarded count.
    pub fn prime(&mut self) -> u32 {
        let skipped = self.predict_next_transition();
        log::debug!(
            "predictor primed: skipped {skipped} bit-periods, level now {}",
            self.last_value
        );
        skipped
    }

    /// Count the bit-periods until the simulated value differs from the last
    /// one, consuming every bit up to and including the differing bit.
    ///
    /// Always returns at least 1. The scan is unbounded: it ends with
    /// probability 1 for any source with unbiased bits (mean 2), but never
    /// ends for a source that emits a constant stream.
    pub fn predict_next_transition(&mut self) -> u32 {
        let mut n = 1;

        loop {
            let value = self.cursor.next_bit();
            if value != self.last_value {
                self.last_value = value;
                self.total_periods += u64::from(n);
                self.transitions += 1;
                log::trace!(
                    "transition {} to {value} in {n} bit-periods",
                    self.transitions
                );
                return n;
            }
            n += 1;
        }
    }

    /// Predict the delay until the next transition for a given bit-period.
    pub fn predict_next_delay(&mut self, period: Duration) -> Result<Duration> {
        let n = self.predict_next_transition();
        bit_periods_to_duration(u64::from(n), period)
    }

    /// The value reached by the most recently predicted transition.
    pub const fn last_value(&self) -> bool {
        self.last_value
    }

    /// Sum of every count returned so far, priming included.
    pub const fn total_periods(&self) -> u64 {
        self.total_periods
    }

    /// Number of transitions predicted so far, priming included.
    pub const fn transitions(&self) -> u64 {
        self.transitions
    }

    pub const fn bits_consumed(&self) -> u64 {
        self.cursor.bits_consumed()
    }

    pub fn cursor(&self) -> &BitCursor<G> {
        &self.cursor
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const S1: u64 = 0x853c49e6748fea9b;
    const S2: u64 = 0xda3e39cb94b95bdb;

    /// Counts following the priming pass for `Pcg32::seed(S1, S2)`.
    const REFERENCE_COUNTS: [u32; 19] = [1, 2, 4, 2, 1, 1, 2, 1, 1, 1, 5, 1, 3, 1, 2, 3, 1, 2, 1];

    #[test]
    fn priming_reference() {
        let mut predictor = TransitionPredictor::new(Pcg32::seed(S1, S2), false);

        // First word is 0x1bbeb4f2: bit 0 clear, bit 1 set.
        assert_eq!(predictor.prime(), 2);
        assert!(predictor.last_value());
        assert_eq!(predictor.bits_consumed(), 2);

        let counts: Vec<u32> = (0..REFERENCE_COUNTS.len())
            .map(|_| predictor.predict_next_transition())
            .collect();
        assert_eq!(counts, REFERENCE_COUNTS);
    }

    #[test]
    fn primed_matches_manual_priming() {
        let mut a = TransitionPredictor::primed(Pcg32::seed(S1, S2));
        let mut b = TransitionPredictor::new(Pcg32::seed(S1, S2), false);
        b.prime();

        assert_eq!(a.bits_consumed(), b.bits_consumed());
        for _ in 0..100 {
            assert_eq!(a.predict_next_transition(), b.predict_next_transition());
        }
    }

    #[test]
    fn counts_are_positive_and_average_two() {
        const CALLS: u32 = 100_000;
        let mut predictor = TransitionPredictor::new(Pcg32::seed(7, 11), false);

        let mut sum = 0u64;
        for _ in 0..CALLS {
            let n = predictor.predict_next_transition();
            assert!(n >= 1);
            sum += u64::from(n);
        }

        let mean = sum as f64 / f64::from(CALLS);
        assert!((mean - 2.0).abs() < 0.03, "mean transition count {mean}");
        assert_eq!(predictor.total_periods(), sum);
        assert_eq!(predictor.bits_consumed(), sum);
    }

    #[test]
    fn lock_step_totals() {
        let mut a = TransitionPredictor::primed(Pcg32::seed(S1, S2));
        let mut b = TransitionPredictor::primed(Pcg32::seed(S1, S2));

        let (mut total_a, mut total_b) = (0u64, 0u64);
        for step in 0..1_000 {
            total_a += u64::from(a.predict_next_transition());
            total_b += u64::from(b.predict_next_transition());
            assert_eq!(total_a, total_b, "diverged at step {step}");
        }
    }

    #[test]
    fn runs_across_word_boundaries() {
        struct Words(std::vec::IntoIter<u32>);

        impl WordSource for Words {
            fn next_word(&mut self) -> u32 {
                self.0.next().unwrap_or(u32::MAX)
            }
        }

        // 31 clear bits then a set top bit, a word of zeros, then bit 0 set.
        let words = Words(vec![0x8000_0000, 0, 1].into_iter());
        let mut predictor = TransitionPredictor::new(words, false);

        assert_eq!(predictor.predict_next_transition(), 32);
        assert_eq!(predictor.predict_next_transition(), 1);
        assert_eq!(predictor.predict_next_transition(), 32);
        assert_eq!(predictor.bits_consumed(), 65);
    }

    #[test]
    fn delay_scales_with_period() {
        let mut predictor = TransitionPredictor::new(Pcg32::seed(S1, S2), false);
        let delay = predictor.predict_next_delay(Duration::from_micros(250)).unwrap();

        assert_eq!(delay, Duration::from_micros(500));
    }
}
