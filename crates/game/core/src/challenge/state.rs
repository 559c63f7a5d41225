//! Challenge life-cycle states and the operations legal in each.

/// Life-cycle state of a single challenge.
///
/// ```text
/// PresentingChallenge ──correct──────────────► ChallengeSolvedCorrectly
///         │ incorrect                                   ▲ correct
///         ▼                                             │
/// PresentingTryAgain ──incorrect─► AttemptsExhausted ──acknowledge─► DisplayingCorrectAnswer
/// ```
///
/// `ChallengeSolvedCorrectly` and `DisplayingCorrectAnswer` are terminal; the
/// only exit is the session controller advancing past the challenge.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ChallengeState {
    #[default]
    PresentingChallenge,
    ChallengeSolvedCorrectly,
    PresentingTryAgain,
    AttemptsExhausted,
    DisplayingCorrectAnswer,
}

impl ChallengeState {
    /// True if no further submissions are accepted in this state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::ChallengeSolvedCorrectly | Self::DisplayingCorrectAnswer
        )
    }

    /// True if the challenge is waiting for a submission.
    pub fn accepts_submission(&self) -> bool {
        matches!(self, Self::PresentingChallenge | Self::PresentingTryAgain)
    }

    /// True if the session controller may advance past this challenge.
    pub fn allows_advance(&self) -> bool {
        self.is_terminal()
    }
}

/// Operation attempted in a state where it is illegal.
///
/// These guard against UI double-submission and out-of-order calls; the
/// failed operation leaves the challenge untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChallengeError {
    #[error("cannot submit an answer to a challenge in state `{state}`")]
    SubmitInState { state: ChallengeState },

    #[error("cannot acknowledge a challenge in state `{state}`; expected `attempts_exhausted`")]
    AcknowledgeInState { state: ChallengeState },

    #[error("cannot advance past a challenge in state `{state}`")]
    AdvanceInState { state: ChallengeState },
}
