//! Session runtime for the atomic-structure quiz engine.
//!
//! `nucleon-runtime` owns the game session and exposes the boundary the
//! presentation layer drives: start a level, forward submissions, advance,
//! tick the clock, subscribe to typed change events. Game rules themselves
//! live in `nucleon-core`; this crate only orchestrates them.

mod controller;
mod error;
mod events;
mod session;

pub use controller::{SessionController, SessionControllerBuilder};
pub use error::{Result, SessionError};
pub use events::{GameEvent, LevelOutcome};
pub use session::GameSession;

// Re-exported so callers can build submissions and fixtures without naming
// the core crate separately.
pub use nucleon_core as core;
pub use nucleon_core::{
    AnswerCheck, AnswerShape, Challenge, ChallengeFactory, ChallengeId, ChallengeKind,
    ChallengeState, CheckDetail, FixedChallengeFactory, GameConfig, LevelId, LevelSpec,
    LevelTable, NeutralOrIon, NumberAtom, RandomChallengeFactory, SubmitOutcome, SubmittedAnswer,
};
