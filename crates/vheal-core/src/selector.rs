//! Task selection policies.

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use vheal_contracts::checklist::DischargeTask;

use crate::traits::TaskSelector;

/// Uniform random choice among the open tasks.
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Seeded from OS entropy.
    pub fn new() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    /// Reproducible sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for RandomSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskSelector for RandomSelector {
    fn select(&mut self, incomplete: &[DischargeTask]) -> Option<DischargeTask> {
        incomplete.choose(&mut self.rng).copied()
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

/// Always the first open task in declared checklist order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstDeclaredSelector;

impl TaskSelector for FirstDeclaredSelector {
    fn select(&mut self, incomplete: &[DischargeTask]) -> Option<DischargeTask> {
        incomplete.first().copied()
    }

    fn name(&self) -> &'static str {
        "first-declared"
    }
}
