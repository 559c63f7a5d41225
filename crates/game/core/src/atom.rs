//! Atomic configuration value types.
//!
//! [`NumberAtom`] describes an atom purely by its particle counts. It is the
//! currency of the whole engine: challenge answers are immutable `NumberAtom`
//! values, and player submissions are compared against them count-by-count.

use std::fmt;

/// Chemical symbols indexed by proton count (1-based), up to argon.
///
/// The generator only produces atoms within this range, so lookups past it
/// fall back to a placeholder rather than panicking.
const ELEMENT_SYMBOLS: [&str; 18] = [
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S", "Cl",
    "Ar",
];

/// Returns the chemical symbol for a proton count, if it is one the
/// simulation supports.
pub fn element_symbol(proton_count: u32) -> Option<&'static str> {
    if proton_count == 0 {
        return None;
    }
    ELEMENT_SYMBOLS.get(proton_count as usize - 1).copied()
}

/// An atomic configuration described by particle counts.
///
/// Mass number and charge are derived, never stored, so the three counts are
/// the single source of truth. Two atoms are equivalent iff all three counts
/// match, which is exactly the derived `PartialEq`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NumberAtom {
    pub proton_count: u32,
    pub neutron_count: u32,
    pub electron_count: u32,
}

impl NumberAtom {
    pub const fn new(proton_count: u32, neutron_count: u32, electron_count: u32) -> Self {
        Self {
            proton_count,
            neutron_count,
            electron_count,
        }
    }

    /// Total nucleon count (protons + neutrons).
    pub const fn mass_number(&self) -> u32 {
        self.proton_count + self.neutron_count
    }

    /// Net charge (protons − electrons). Positive for cations, negative for
    /// anions.
    pub const fn charge(&self) -> i32 {
        self.proton_count as i32 - self.electron_count as i32
    }

    pub const fn is_neutral(&self) -> bool {
        self.charge() == 0
    }

    /// Neutral/ion classification derived from the charge sign.
    pub const fn classification(&self) -> NeutralOrIon {
        if self.is_neutral() {
            NeutralOrIon::Neutral
        } else {
            NeutralOrIon::Ion
        }
    }

    /// True if both atoms denote the same element (proton count only —
    /// neutrons and electrons never change element identity).
    pub const fn same_element(&self, other: &NumberAtom) -> bool {
        self.proton_count == other.proton_count
    }
}

impl fmt::Display for NumberAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = element_symbol(self.proton_count).unwrap_or("?");
        write!(
            f,
            "{}(p{} n{} e{})",
            symbol, self.proton_count, self.neutron_count, self.electron_count
        )
    }
}

/// Whether an atom is electrically neutral or an ion.
///
/// The to-element challenge family asks the player to declare this alongside
/// their element pick; only the sign class matters, not the magnitude.
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
pub enum NeutralOrIon {
    #[default]
    Neutral,
    Ion,
}
