//! Typed events pushed to the presentation layer.
//!
//! The controller publishes on a `tokio::sync::broadcast` channel; delivery
//! is best-effort and a send with no subscribers is not an error. All events
//! are emitted synchronously at the call that caused the change, so a
//! subscriber draining with `try_recv` after each call sees a complete,
//! ordered account of the session.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use nucleon_core::{AnswerCheck, ChallengeId, ChallengeKind, ChallengeState, LevelId, NumberAtom};

/// How a completed level turned out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelOutcome {
    /// Completed with less than the maximum score.
    Normal,
    /// Every challenge solved on the first attempt; triggers the best-time
    /// update and the celebratory signal.
    Perfect,
}

impl fmt::Display for LevelOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LevelOutcome::Normal => "normal",
            LevelOutcome::Perfect => "perfect",
        };
        f.write_str(label)
    }
}

/// Observable session changes, in the order the controller makes them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A level was started and its challenge pool generated.
    LevelStarted {
        level: LevelId,
        challenge_count: usize,
    },

    /// A challenge became the active one.
    ChallengePresented {
        challenge_id: ChallengeId,
        index: usize,
        kind: ChallengeKind,
    },

    /// A submission was evaluated. Carries the state and cumulative score
    /// after the attempt so views need not track them separately.
    AnswerEvaluated {
        challenge_id: ChallengeId,
        check: AnswerCheck,
        state: ChallengeState,
        attempts_made: u32,
        points_awarded: u32,
        score: u32,
    },

    /// An exhausted challenge was acknowledged; the view should now show the
    /// correct answer.
    CorrectAnswerShown {
        challenge_id: ChallengeId,
        answer: NumberAtom,
    },

    /// A challenge left play (advanced past, or discarded by a reset).
    /// Collaborators holding per-challenge resources release them on this.
    ChallengeRetired { challenge_id: ChallengeId },

    /// The last challenge was consumed.
    LevelCompleted {
        level: LevelId,
        outcome: LevelOutcome,
        score: u32,
        elapsed: Duration,
        /// Best time for this level after any update, if one is recorded.
        best_time: Option<Duration>,
    },

    /// The session was discarded ("new game" or a fresh level start).
    SessionReset,
}
