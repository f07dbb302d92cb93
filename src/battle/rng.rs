use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of every random draw the engine makes.
///
/// Each call returns a value in `[0, 1)`. The `reason` names the roll so
/// scripted sources can report which draw ran out.
pub trait BattleRng {
    fn next_roll(&mut self, reason: &str) -> f64;
}

/// A fixed sequence of rolls for deterministic tests.
#[derive(Debug, Clone)]
pub struct TurnRng {
    outcomes: Vec<f64>,
    index: usize,
}

impl TurnRng {
    pub fn new_for_test(outcomes: Vec<f64>) -> Self {
        Self { outcomes, index: 0 }
    }

    /// Number of rolls not yet consumed.
    pub fn remaining(&self) -> usize {
        self.outcomes.len().saturating_sub(self.index)
    }
}

impl BattleRng for TurnRng {
    fn next_roll(&mut self, reason: &str) -> f64 {
        if self.index >= self.outcomes.len() {
            panic!(
                "TurnRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                reason
            );
        }
        let outcome = self.outcomes[self.index];

        #[cfg(test)]
        println!("[RNG] Consumed {} for: {}", outcome, reason);

        self.index += 1;
        outcome
    }
}

/// Live randomness backed by `StdRng`.
#[derive(Debug, Clone)]
pub struct RandomRng {
    inner: StdRng,
}

impl RandomRng {
    pub fn new() -> Self {
        Self {
            inner: StdRng::from_os_rng(),
        }
    }

    /// Reproducible stream, used for statistical tests and replays.
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomRng {
    fn default() -> Self {
        Self::new()
    }
}

impl BattleRng for RandomRng {
    fn next_roll(&mut self, reason: &str) -> f64 {
        let roll = self.inner.random::<f64>();
        tracing::trace!(roll, reason, "rng roll");
        roll
    }
}
