use std::time::Duration;

use crate::{pcg::Pcg32, predict::TransitionPredictor, producer::ToggleSequence};

/// The constants a producer and its predictor must agree on.
///
/// Nothing else is shared between the two sides, so building both from the
/// same `TestParams` is what keeps them in lock-step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestParams {
    seed: u64,
    sequence: u64,
    period: Duration,
}

impl TestParams {
    pub const DEFAULT_SEED: u64 = Pcg32::INITIALIZER_STATE;
    pub const DEFAULT_SEQUENCE: u64 = Pcg32::INITIALIZER_INC;
    pub const DEFAULT_PERIOD: Duration = Duration::from_millis(100);

    pub const fn new() -> Self {
        Self {
            seed: Self::DEFAULT_SEED,
            sequence: Self::DEFAULT_SEQUENCE,
            period: Self::DEFAULT_PERIOD,
        }
    }

    pub const fn with_seed(self, seed: u64) -> Self {
        Self { seed, ..self }
    }

    pub const fn with_sequence(self, sequence: u64) -> Self {
        Self { sequence, ..self }
    }

    /// Length of one bit-period, i.e. the producer's sleep between toggles.
    pub const fn with_period(self, period: Duration) -> Self {
        Self { period, ..self }
    }

    pub const fn seed(&self) -> u64 {
        self.seed
    }

    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    pub const fn period(&self) -> Duration {
        self.period
    }

    pub const fn generator(&self) -> Pcg32 {
        Pcg32::seed(self.seed, self.sequence)
    }

    pub fn producer(&self) -> ToggleSequence {
        ToggleSequence::new(self.generator())
    }

    /// A predictor for this parameter set, already primed.
    pub fn predictor(&self) -> TransitionPredictor {
        TransitionPredictor::primed(self.generator())
    }
}

impl Default for TestParams {
    fn default() -> Self {
        Self::new()
    }
}
