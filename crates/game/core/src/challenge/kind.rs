//! Challenge type enumeration.
//!
//! Each kind names how the question is presented (particle counts, a
//! schematic atom, or a chemical symbol) and what the player must produce.
//! The presentation itself is the view layer's business; the engine only
//! cares about the required input shape and the evaluation rule, both of
//! which are keyed off this tag.

/// The fixed set of quiz item types.
///
/// Naming convention is `<what is shown>_to_<what is asked>`. The
/// `*_to_element` pair additionally asks for a neutral/ion declaration; the
/// `*_to_symbol_*` kinds take their input as symbol notation fields.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ChallengeKind {
    SchematicToElement,
    CountsToElement,
    CountsToCharge,
    CountsToMass,
    SchematicToCharge,
    SchematicToMass,
    CountsToSymbolCharge,
    CountsToSymbolMass,
    CountsToSymbolAll,
    SchematicToSymbolCharge,
    SchematicToSymbolMassNumber,
    SchematicToSymbolProtonCount,
    SchematicToSymbolAll,
    SymbolToCounts,
    SymbolToSchematic,
}

impl ChallengeKind {
    /// The submission shape this kind accepts. A submission of any other
    /// shape is a contract violation, not a wrong answer.
    pub fn input_shape(&self) -> AnswerShape {
        match self {
            Self::SchematicToElement | Self::CountsToElement => AnswerShape::Element,
            Self::CountsToSymbolCharge
            | Self::CountsToSymbolMass
            | Self::CountsToSymbolAll
            | Self::SchematicToSymbolCharge
            | Self::SchematicToSymbolMassNumber
            | Self::SchematicToSymbolProtonCount
            | Self::SchematicToSymbolAll => AnswerShape::Symbol,
            Self::CountsToCharge
            | Self::CountsToMass
            | Self::SchematicToCharge
            | Self::SchematicToMass
            | Self::SymbolToCounts
            | Self::SymbolToSchematic => AnswerShape::Counts,
        }
    }
}

/// Shape of the value a challenge expects from the player.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AnswerShape {
    /// A full particle-count atom.
    Counts,
    /// A particle-count atom plus a declared neutral/ion classification.
    Element,
    /// Symbol notation: proton count, mass number, and charge.
    Symbol,
}
