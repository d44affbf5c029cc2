use std::fmt;

pub const MIN_PERCENT: u8 = 25;
pub const MAX_PERCENT: u8 = 75;
pub const STEP_PERCENT: u8 = 10;

/// Success probability of the next attempt, kept in whole percent so the
/// +/-10 steps stay exact. Always within [MIN_PERCENT, MAX_PERCENT].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct SuccessChance(u8);

impl Default for SuccessChance {
    fn default() -> Self {
        Self(MAX_PERCENT)
    }
}

impl SuccessChance {
    pub fn from_percent(percent: u8) -> Self {
        Self(percent.clamp(MIN_PERCENT, MAX_PERCENT))
    }

    pub fn percent(self) -> u8 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// A success makes the next one less likely.
    pub fn after_success(self) -> Self {
        Self::from_percent(self.0.saturating_sub(STEP_PERCENT))
    }

    /// A failure makes the next success more likely.
    pub fn after_failure(self) -> Self {
        Self::from_percent(self.0.saturating_add(STEP_PERCENT))
    }

    /// `roll` is expected in [0, 1).
    pub fn admits(self, roll: f64) -> bool {
        roll < self.as_f64()
    }
}

impl fmt::Display for SuccessChance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
