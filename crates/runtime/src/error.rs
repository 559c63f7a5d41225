//! Unified error types surfaced by the session API.
//!
//! Every failure is synchronous and leaves prior state unchanged, so the
//! caller can always retry with corrected input. Nothing here is shown to
//! the end user directly; the presentation layer translates.

use thiserror::Error;

use nucleon_core::{ChallengeError, GenerateError, LevelId, ShapeMismatchError, SubmitError};

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("level `{level}` is not present in the level table")]
    InvalidLevel { level: LevelId },

    #[error("no level is in progress")]
    NoActiveSession,

    #[error("the level is complete; no challenge is active")]
    NoActiveChallenge,

    #[error(transparent)]
    InvalidState(#[from] ChallengeError),

    #[error(transparent)]
    ShapeMismatch(#[from] ShapeMismatchError),

    #[error(transparent)]
    Generation(#[from] GenerateError),
}

impl From<SubmitError> for SessionError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::State(e) => Self::InvalidState(e),
            SubmitError::Shape(e) => Self::ShapeMismatch(e),
        }
    }
}
