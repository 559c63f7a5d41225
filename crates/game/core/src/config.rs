/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Number of challenges generated for each level.
    pub challenges_per_level: usize,

    /// Submissions allowed per challenge before it is marked exhausted.
    pub max_attempts: u32,

    /// Points awarded for a correct answer on the first attempt.
    pub points_first_attempt: u32,

    /// Points awarded for a correct answer on a retry. Must be less than
    /// `points_first_attempt` so a perfect score is only reachable without
    /// retries.
    pub points_second_attempt: u32,
}

impl GameConfig {
    // ===== compile-time bounds =====
    /// Largest proton count any level table may ask the generator for.
    /// Matches the extent of the stable-isotope table.
    pub const MAX_PROTON_COUNT: u32 = 18;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_CHALLENGES_PER_LEVEL: usize = 5;
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 2;
    pub const DEFAULT_POINTS_FIRST_ATTEMPT: u32 = 2;
    pub const DEFAULT_POINTS_SECOND_ATTEMPT: u32 = 1;

    pub fn new() -> Self {
        Self {
            challenges_per_level: Self::DEFAULT_CHALLENGES_PER_LEVEL,
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            points_first_attempt: Self::DEFAULT_POINTS_FIRST_ATTEMPT,
            points_second_attempt: Self::DEFAULT_POINTS_SECOND_ATTEMPT,
        }
    }

    /// Points awarded for a correct answer made on attempt `attempts_made`
    /// (1-based, counted after the winning submission).
    pub fn points_for_attempt(&self, attempts_made: u32) -> u32 {
        if attempts_made <= 1 {
            self.points_first_attempt
        } else {
            self.points_second_attempt
        }
    }

    /// Highest score a level can yield: every challenge solved first try.
    pub fn max_level_score(&self) -> u32 {
        self.challenges_per_level as u32 * self.points_first_attempt
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
