//! Deterministic quiz rules for the atomic-structure game.
//!
//! `nucleon-core` defines the canonical game content (atoms, challenge
//! kinds, answer evaluation, the challenge state machine, level tables) and
//! the pool generator, all as pure APIs with no clocks or I/O. The session
//! runtime drives everything through the types re-exported here.
pub mod atom;
pub mod challenge;
pub mod config;
pub mod generator;
pub mod level;
pub mod rng;

pub use atom::{NeutralOrIon, NumberAtom, element_symbol};
pub use challenge::{
    AnswerCheck, AnswerShape, Challenge, ChallengeError, ChallengeId, ChallengeKind,
    ChallengeState, CheckDetail, ShapeMismatchError, SubmitError, SubmitOutcome, SubmittedAnswer,
};
pub use config::GameConfig;
pub use generator::{
    ChallengeFactory, FixedChallengeFactory, GenerateError, RandomChallengeFactory,
};
pub use level::{LevelId, LevelSpec, LevelTable};
pub use rng::{PcgRng, RngOracle, compute_seed};
