//! Submitted answers and the per-kind evaluation rules.
//!
//! Evaluation is a pure function of `(answer, submitted)`; the state machine
//! in [`super::state`] decides what a verdict means for the challenge's life
//! cycle. The three rules:
//!
//! - counting kinds: all three particle counts must match exactly;
//! - to-element kinds: protons and neutrons must match and the declared
//!   neutral/ion classification must agree with the answer's charge sign;
//! - symbol-entry kinds: the notation fields are converted to an equivalent
//!   atom (`neutrons = mass − protons`, `electrons = protons − charge`) and
//!   then compared three-way.

use crate::atom::{NeutralOrIon, NumberAtom};

use super::kind::{AnswerShape, ChallengeKind};

/// A player submission in one of the three shapes a challenge can require.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SubmittedAnswer {
    /// A full particle-count atom.
    Counts(NumberAtom),

    /// An atom plus the player's neutral/ion declaration.
    Element {
        atom: NumberAtom,
        classification: NeutralOrIon,
    },

    /// Chemical symbol notation as entered by the player.
    Symbol {
        proton_count: u32,
        mass_number: u32,
        charge: i32,
    },
}

impl SubmittedAnswer {
    pub fn shape(&self) -> AnswerShape {
        match self {
            Self::Counts(_) => AnswerShape::Counts,
            Self::Element { .. } => AnswerShape::Element,
            Self::Symbol { .. } => AnswerShape::Symbol,
        }
    }

    /// Builds the submission that exactly matches `atom` in the shape `kind`
    /// expects. Useful for scripted collaborators and round-trip tests.
    pub fn matching(kind: ChallengeKind, atom: &NumberAtom) -> Self {
        match kind.input_shape() {
            AnswerShape::Counts => Self::Counts(*atom),
            AnswerShape::Element => Self::Element {
                atom: *atom,
                classification: atom.classification(),
            },
            AnswerShape::Symbol => Self::Symbol {
                proton_count: atom.proton_count,
                mass_number: atom.mass_number(),
                charge: atom.charge(),
            },
        }
    }

    /// Interprets the submission as a plain atom where possible.
    ///
    /// Symbol notation that would imply a negative neutron or electron count
    /// denotes no representable atom and yields `None`; such a submission can
    /// never equal a valid answer.
    fn as_atom(&self) -> Option<NumberAtom> {
        match *self {
            Self::Counts(atom) | Self::Element { atom, .. } => Some(atom),
            Self::Symbol {
                proton_count,
                mass_number,
                charge,
            } => {
                let neutron_count = mass_number.checked_sub(proton_count)?;
                let electron_count = u32::try_from(proton_count as i64 - charge as i64).ok()?;
                Some(NumberAtom::new(proton_count, neutron_count, electron_count))
            }
        }
    }
}

/// Verdict of one evaluation: the pass/fail boolean plus a detail the view
/// layer can use to explain the mistake.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnswerCheck {
    pub is_correct: bool,
    pub detail: CheckDetail,
}

/// What distinguished the submission from the answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CheckDetail {
    /// Submission matched the answer under the kind's rule.
    Matched,

    /// One or more particle counts differ from the answer.
    CountsMismatch,

    /// Counts were acceptable but the declared neutral/ion classification
    /// contradicts the answer's charge sign. Carries both labels so the view
    /// can explain the mistake; it never alters the pass/fail boolean, which
    /// is already false whenever this detail is reported.
    Classification {
        submitted: NeutralOrIon,
        correct: NeutralOrIon,
    },
}

/// The submitted shape does not match what the challenge kind expects.
///
/// Raised before any attempt is consumed; a shape mismatch is a caller bug
/// (typically UI wiring), not a wrong answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("challenge expects a `{expected}` submission, got `{got}`")]
pub struct ShapeMismatchError {
    pub expected: AnswerShape,
    pub got: AnswerShape,
}

/// Evaluates a submission against the answer under `kind`'s rule.
///
/// Pure: no state is touched. The caller (the challenge state machine) is
/// responsible for attempt accounting and transitions.
pub fn evaluate(
    kind: ChallengeKind,
    answer: &NumberAtom,
    submitted: &SubmittedAnswer,
) -> Result<AnswerCheck, ShapeMismatchError> {
    let expected = kind.input_shape();
    if submitted.shape() != expected {
        return Err(ShapeMismatchError {
            expected,
            got: submitted.shape(),
        });
    }

    let check = match *submitted {
        SubmittedAnswer::Element {
            atom,
            classification,
        } => {
            let counts_ok = atom.proton_count == answer.proton_count
                && atom.neutron_count == answer.neutron_count;
            let correct_classification = answer.classification();
            let classification_ok = classification == correct_classification;
            let detail = if counts_ok && classification_ok {
                CheckDetail::Matched
            } else if counts_ok {
                CheckDetail::Classification {
                    submitted: classification,
                    correct: correct_classification,
                }
            } else {
                CheckDetail::CountsMismatch
            };
            AnswerCheck {
                is_correct: counts_ok && classification_ok,
                detail,
            }
        }
        _ => {
            let is_correct = submitted.as_atom().is_some_and(|atom| atom == *answer);
            AnswerCheck {
                is_correct,
                detail: if is_correct {
                    CheckDetail::Matched
                } else {
                    CheckDetail::CountsMismatch
                },
            }
        }
    };

    Ok(check)
}
