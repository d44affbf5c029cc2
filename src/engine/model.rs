use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::engine::chance::SuccessChance;
use crate::engine::feature::Feature;
use crate::engine::statistics::{OutcomeKey, RoundStatistics};

pub const MAX_ATTEMPTS: u32 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("feature {0} has no attempts left this round")]
    FeatureExhausted(Feature),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttemptOutcome {
    pub feature: Feature,
    pub success: bool,
    pub roll: f64,
    pub chance_before: SuccessChance,
    pub chance_after: SuccessChance,
}

/// Per-feature success counts of a finished round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoundOutcome {
    pub successes: [u32; 3],
}

impl RoundOutcome {
    pub fn get(&self, feature: Feature) -> u32 {
        self.successes[feature.index()]
    }
}

/// Numeric state of the game: the round in progress, the rolling success
/// chance and the outcome tally for the whole process.
pub struct Model<R = SmallRng> {
    attempts: [u32; 3],
    stone: [u32; 3],
    chance: SuccessChance,
    statistics: RoundStatistics,
    last_outcome: Option<RoundOutcome>,
    rng: R,
}

impl Model<SmallRng> {
    /// Deterministic when `seed` is given, entropy-seeded otherwise.
    pub fn seeded(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self::new(rng)
    }
}

impl<R: Rng> Model<R> {
    pub fn new(rng: R) -> Self {
        Self {
            attempts: [0; 3],
            stone: [0; 3],
            chance: SuccessChance::default(),
            statistics: RoundStatistics::default(),
            last_outcome: None,
            rng,
        }
    }

    pub fn attempt(&mut self, feature: Feature) -> Result<AttemptOutcome, ModelError> {
        let idx = feature.index();
        if self.attempts[idx] >= MAX_ATTEMPTS {
            return Err(ModelError::FeatureExhausted(feature));
        }
        self.attempts[idx] += 1;

        let chance_before = self.chance;
        let roll: f64 = self.rng.gen_range(0.0..1.0);
        let success = chance_before.admits(roll);
        if success {
            self.stone[idx] += 1;
            self.chance = chance_before.after_success();
        } else {
            self.chance = chance_before.after_failure();
        }

        log::debug!(
            "attempt {feature}: roll {roll:.3} vs {chance_before} -> {} (now {})",
            if success { "success" } else { "failure" },
            self.chance
        );

        Ok(AttemptOutcome {
            feature,
            success,
            roll,
            chance_before,
            chance_after: self.chance,
        })
    }

    /// Features with attempts left, in feature order.
    pub fn available_features(&self) -> Vec<Feature> {
        Feature::ALL
            .into_iter()
            .filter(|f| self.attempts[f.index()] < MAX_ATTEMPTS)
            .collect()
    }

    pub fn is_round_complete(&self) -> bool {
        self.available_features().is_empty()
    }

    pub fn outcome_key(&self) -> OutcomeKey {
        (self.stone[Feature::A.index()], self.stone[Feature::B.index()])
    }

    pub fn record_round_outcome(&mut self) {
        let key = self.outcome_key();
        self.statistics.record(key);
        log::info!(
            "recorded round outcome {key:?} (counter {})",
            self.statistics.get(key).unwrap_or(0)
        );
    }

    /// Records the finished round and starts a fresh one. The success chance
    /// carries over.
    pub fn reset_round(&mut self) {
        self.record_round_outcome();
        self.last_outcome = Some(RoundOutcome {
            successes: self.stone,
        });
        self.attempts = [0; 3];
        self.stone = [0; 3];
    }

    pub fn attempts(&self, feature: Feature) -> u32 {
        self.attempts[feature.index()]
    }

    pub fn successes(&self, feature: Feature) -> u32 {
        self.stone[feature.index()]
    }

    pub fn chance(&self) -> SuccessChance {
        self.chance
    }

    pub fn statistics(&self) -> &RoundStatistics {
        &self.statistics
    }

    pub fn last_outcome(&self) -> Option<RoundOutcome> {
        self.last_outcome
    }
}
