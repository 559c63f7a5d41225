//! Quiz challenges: the answer value, its evaluation rule, and the
//! retry/give-up state machine.
//!
//! A [`Challenge`] is created by a factory in `PresentingChallenge` with zero
//! attempts and is mutated only through [`Challenge::submit`] and
//! [`Challenge::acknowledge`]. The presentation layer reads it; it never
//! writes.

mod answer;
mod kind;
mod state;

pub use answer::{AnswerCheck, CheckDetail, ShapeMismatchError, SubmittedAnswer, evaluate};
pub use kind::{AnswerShape, ChallengeKind};
pub use state::{ChallengeError, ChallengeState};

use std::fmt;

use crate::atom::NumberAtom;
use crate::config::GameConfig;

/// Unique identifier for a challenge within one factory's lifetime.
///
/// Stable across the challenge's life, so collaborators holding
/// per-challenge resources can match the retirement signal to the
/// presentation they created.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChallengeId(pub u32);

impl fmt::Display for ChallengeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Everything a submission produces: the verdict, the state the challenge
/// landed in, and the points the success was worth (zero otherwise).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubmitOutcome {
    pub check: AnswerCheck,
    pub state: ChallengeState,
    pub attempts_made: u32,
    pub points_awarded: u32,
}

/// Error from [`Challenge::submit`].
///
/// Both cases leave the challenge unchanged: an illegal-state submission is
/// rejected outright, and a shape mismatch is detected before any attempt is
/// consumed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    State(#[from] ChallengeError),

    #[error(transparent)]
    Shape(#[from] ShapeMismatchError),
}

/// One quiz item: an answer atom, a challenge-type tag, and transient
/// life-cycle state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Challenge {
    id: ChallengeId,
    kind: ChallengeKind,
    answer: NumberAtom,
    state: ChallengeState,
    attempts_made: u32,
}

impl Challenge {
    pub fn new(id: ChallengeId, kind: ChallengeKind, answer: NumberAtom) -> Self {
        Self {
            id,
            kind,
            answer,
            state: ChallengeState::PresentingChallenge,
            attempts_made: 0,
        }
    }

    pub fn id(&self) -> ChallengeId {
        self.id
    }

    pub fn kind(&self) -> ChallengeKind {
        self.kind
    }

    /// The correct answer. Exposed so the view can display it once the
    /// challenge has reached `DisplayingCorrectAnswer`.
    pub fn answer(&self) -> &NumberAtom {
        &self.answer
    }

    pub fn state(&self) -> ChallengeState {
        self.state
    }

    pub fn attempts_made(&self) -> u32 {
        self.attempts_made
    }

    /// Evaluates a submission and advances the state machine.
    ///
    /// Exactly one attempt is consumed per accepted call. A correct answer
    /// lands in `ChallengeSolvedCorrectly` and reports the points it earned
    /// under `config`'s schedule; an incorrect one moves to
    /// `PresentingTryAgain` or, once `config.max_attempts` is reached,
    /// `AttemptsExhausted`.
    pub fn submit(
        &mut self,
        submitted: &SubmittedAnswer,
        config: &GameConfig,
    ) -> Result<SubmitOutcome, SubmitError> {
        if !self.state.accepts_submission() {
            return Err(ChallengeError::SubmitInState { state: self.state }.into());
        }

        // Shape checking happens before attempt accounting so a UI wiring
        // bug cannot burn the player's attempts.
        let check = evaluate(self.kind, &self.answer, submitted)?;

        self.attempts_made += 1;
        let points_awarded = if check.is_correct {
            self.state = ChallengeState::ChallengeSolvedCorrectly;
            config.points_for_attempt(self.attempts_made)
        } else {
            self.state = if self.attempts_made < config.max_attempts {
                ChallengeState::PresentingTryAgain
            } else {
                ChallengeState::AttemptsExhausted
            };
            0
        };

        Ok(SubmitOutcome {
            check,
            state: self.state,
            attempts_made: self.attempts_made,
            points_awarded,
        })
    }

    /// Acknowledges an exhausted challenge, moving it to
    /// `DisplayingCorrectAnswer`. Consumes no attempt.
    pub fn acknowledge(&mut self) -> Result<(), ChallengeError> {
        if self.state != ChallengeState::AttemptsExhausted {
            return Err(ChallengeError::AcknowledgeInState { state: self.state });
        }
        self.state = ChallengeState::DisplayingCorrectAnswer;
        Ok(())
    }
}
