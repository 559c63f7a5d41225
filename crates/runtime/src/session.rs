//! Per-level session state.

use std::time::Duration;

use nucleon_core::{Challenge, LevelId};

/// State of one level run: the generated challenge sequence, the cursor into
/// it, and the running score and clock.
///
/// Owned exclusively by the [`SessionController`](crate::SessionController);
/// everything else sees it read-only. `challenge_index == challenges.len()`
/// exactly when the level is complete.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSession {
    pub level: LevelId,
    pub score: u32,
    pub challenge_index: usize,
    pub challenges: Vec<Challenge>,
    pub elapsed: Duration,
    pub timer_enabled: bool,
}

impl GameSession {
    pub fn new(level: LevelId, challenges: Vec<Challenge>, timer_enabled: bool) -> Self {
        Self {
            level,
            score: 0,
            challenge_index: 0,
            challenges,
            elapsed: Duration::ZERO,
            timer_enabled,
        }
    }

    /// The challenge currently being played, or `None` once the level is
    /// complete.
    pub fn active_challenge(&self) -> Option<&Challenge> {
        self.challenges.get(self.challenge_index)
    }

    pub(crate) fn active_challenge_mut(&mut self) -> Option<&mut Challenge> {
        self.challenges.get_mut(self.challenge_index)
    }

    pub fn is_complete(&self) -> bool {
        self.challenge_index >= self.challenges.len()
    }

    /// Theoretical maximum for this session: every challenge solved on the
    /// first attempt.
    pub fn max_score(&self, points_first_attempt: u32) -> u32 {
        self.challenges.len() as u32 * points_first_attempt
    }
}
