//! Level identifiers and the per-level generation constraints.
//!
//! A level is a named grouping with its own allowed challenge kinds and
//! difficulty framing. The standard table defines the four-mode
//! progression, but the whole mapping is a value the session controller is
//! constructed with, so tests and alternative configurations can override
//! it freely.

use std::collections::HashMap;
use std::ops::RangeInclusive;

use crate::challenge::ChallengeKind;

/// The fixed set of named levels.
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
pub enum LevelId {
    /// Identify the element (and neutral/ion status) from its particles.
    PeriodicTable,
    /// Work out mass numbers and net charges.
    MassAndCharge,
    /// Read and complete chemical symbol notation.
    Symbol,
    /// Full symbol notation plus reverse (symbol-to-atom) challenges.
    AdvancedSymbol,
}

/// Generation constraints for one level.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelSpec {
    /// Challenge kinds the generator may draw from. Must be non-empty.
    pub allowed_kinds: Vec<ChallengeKind>,

    /// Proton counts the generator may use for answer atoms. Lower levels
    /// stay with light elements the player can comfortably build.
    pub proton_range: RangeInclusive<u32>,
}

impl LevelSpec {
    pub fn new(allowed_kinds: Vec<ChallengeKind>, proton_range: RangeInclusive<u32>) -> Self {
        Self {
            allowed_kinds,
            proton_range,
        }
    }
}

/// Mapping from level to its generation constraints.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelTable {
    specs: HashMap<LevelId, LevelSpec>,
}

impl LevelTable {
    /// An empty table; levels must be added with [`LevelTable::set`].
    pub fn empty() -> Self {
        Self::default()
    }

    /// The standard four-level progression.
    pub fn standard() -> Self {
        use ChallengeKind::*;

        let mut table = Self::empty();
        table.set(
            LevelId::PeriodicTable,
            LevelSpec::new(vec![SchematicToElement, CountsToElement], 1..=10),
        );
        table.set(
            LevelId::MassAndCharge,
            LevelSpec::new(
                vec![CountsToCharge, CountsToMass, SchematicToCharge, SchematicToMass],
                1..=10,
            ),
        );
        table.set(
            LevelId::Symbol,
            LevelSpec::new(
                vec![
                    CountsToSymbolCharge,
                    CountsToSymbolMass,
                    SchematicToSymbolCharge,
                    SchematicToSymbolMassNumber,
                    SchematicToSymbolProtonCount,
                ],
                1..=18,
            ),
        );
        table.set(
            LevelId::AdvancedSymbol,
            LevelSpec::new(
                vec![CountsToSymbolAll, SchematicToSymbolAll, SymbolToCounts, SymbolToSchematic],
                1..=18,
            ),
        );
        table
    }

    pub fn get(&self, level: LevelId) -> Option<&LevelSpec> {
        self.specs.get(&level)
    }

    /// Inserts or replaces the spec for a level.
    pub fn set(&mut self, level: LevelId, spec: LevelSpec) {
        self.specs.insert(level, spec);
    }

    pub fn contains(&self, level: LevelId) -> bool {
        self.specs.contains_key(&level)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use strum::IntoEnumIterator;

    #[test]
    fn standard_table_covers_every_level() {
        let table = LevelTable::standard();
        for level in LevelId::iter() {
            let spec = table.get(level).expect("missing level");
            assert!(!spec.allowed_kinds.is_empty());
            assert!(*spec.proton_range.start() >= 1);
            assert!(*spec.proton_range.end() <= GameConfig::MAX_PROTON_COUNT);
        }
    }

    #[test]
    fn standard_table_covers_every_kind_once() {
        let table = LevelTable::standard();
        let mut seen = Vec::new();
        for level in LevelId::iter() {
            seen.extend(table.get(level).unwrap().allowed_kinds.iter().copied());
        }
        for kind in ChallengeKind::iter() {
            assert_eq!(
                seen.iter().filter(|k| **k == kind).count(),
                1,
                "{kind} should appear in exactly one standard level"
            );
        }
    }

    #[test]
    fn overrides_replace_specs() {
        let mut table = LevelTable::standard();
        table.set(
            LevelId::Symbol,
            LevelSpec::new(vec![ChallengeKind::SymbolToCounts], 1..=2),
        );
        assert_eq!(
            table.get(LevelId::Symbol).unwrap().allowed_kinds,
            vec![ChallengeKind::SymbolToCounts]
        );
    }
}
