//! Challenge pool generation.
//!
//! The session controller asks a [`ChallengeFactory`] for a level's worth of
//! challenges at level start. The production implementation draws kinds and
//! answer atoms through the deterministic [`RngOracle`](crate::rng::RngOracle);
//! tests swap in [`FixedChallengeFactory`] to script exact pools.

use std::collections::{HashSet, VecDeque};

use crate::atom::NumberAtom;
use crate::challenge::{Challenge, ChallengeId, ChallengeKind};
use crate::config::GameConfig;
use crate::level::{LevelId, LevelSpec};
use crate::rng::{PcgRng, RngOracle, compute_seed};

/// Neutron counts of naturally occurring isotopes, indexed by proton count
/// (1-based, hydrogen through argon). Generated answer atoms stay within
/// this table so every challenge shows a chemically sensible nucleus.
const STABLE_NEUTRON_COUNTS: [&[u32]; 18] = [
    &[0, 1],        // H
    &[1, 2],        // He
    &[3, 4],        // Li
    &[5],           // Be
    &[5, 6],        // B
    &[6, 7],        // C
    &[7, 8],        // N
    &[8, 9, 10],    // O
    &[10],          // F
    &[10, 11, 12],  // Ne
    &[12],          // Na
    &[12, 13, 14],  // Mg
    &[14],          // Al
    &[14, 15, 16],  // Si
    &[16],          // P
    &[16, 17, 18],  // S
    &[18, 20],      // Cl
    &[18, 20, 22],  // Ar
];

/// Draws an answer atom may retry to avoid duplicating an earlier challenge
/// before giving up and permitting the duplicate.
const DUPLICATE_RETRY_LIMIT: u32 = 12;

/// Produces the ordered challenge sequence for a level.
pub trait ChallengeFactory: Send {
    /// Generates exactly `count` challenges satisfying `spec`, all in the
    /// initial state with zero attempts made.
    fn generate(
        &mut self,
        level: LevelId,
        spec: &LevelSpec,
        count: usize,
    ) -> Result<Vec<Challenge>, GenerateError>;
}

/// Challenge generation failed outright.
///
/// These indicate a broken level table or an exhausted test script, never
/// bad luck: running out of distinct configurations degrades to permitting
/// duplicates instead of failing the level.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GenerateError {
    #[error("level `{level}` allows no challenge kinds")]
    EmptyKindSet { level: LevelId },

    #[error(
        "level `{level}` has proton range outside 1..={max} or empty",
        max = GameConfig::MAX_PROTON_COUNT
    )]
    InvalidProtonRange { level: LevelId },

    #[error("fixture factory has no script left for level `{level}`")]
    ScriptExhausted { level: LevelId },
}

/// Random factory backed by a seed-addressed RNG oracle.
///
/// Deterministic for a given base seed and call sequence, so a seeded
/// instance reproduces a pool exactly while a randomly seeded one gives
/// normal play. Kind selection is uniform over the allowed set; answer
/// atoms combine a proton count from the level's range, a naturally
/// occurring neutron count, and a charge in −1..=+1.
pub struct RandomChallengeFactory {
    rng: Box<dyn RngOracle>,
    base_seed: u64,
    draws: u64,
    next_id: u32,
}

impl RandomChallengeFactory {
    pub fn new(base_seed: u64) -> Self {
        Self::with_rng(base_seed, Box::new(PcgRng))
    }

    pub fn with_rng(base_seed: u64, rng: Box<dyn RngOracle>) -> Self {
        Self {
            rng,
            base_seed,
            draws: 0,
            next_id: 0,
        }
    }

    fn validate(level: LevelId, spec: &LevelSpec) -> Result<(), GenerateError> {
        if spec.allowed_kinds.is_empty() {
            return Err(GenerateError::EmptyKindSet { level });
        }
        let (start, end) = (*spec.proton_range.start(), *spec.proton_range.end());
        if start < 1 || end > GameConfig::MAX_PROTON_COUNT || start > end {
            return Err(GenerateError::InvalidProtonRange { level });
        }
        Ok(())
    }

    /// One random decision; each call consumes a draw index so retries never
    /// repeat earlier outcomes.
    fn draw(&mut self, context: u32, min: u32, max: u32) -> u32 {
        let seed = compute_seed(self.base_seed, self.draws, context);
        self.draws += 1;
        self.rng.range(seed, min, max)
    }

    fn draw_charge(&mut self) -> i32 {
        let seed = compute_seed(self.base_seed, self.draws, 3);
        self.draws += 1;
        self.rng.range_i32(seed, -1, 1)
    }

    fn draw_atom(&mut self, spec: &LevelSpec) -> NumberAtom {
        let proton_count = self.draw(1, *spec.proton_range.start(), *spec.proton_range.end());
        let isotopes = STABLE_NEUTRON_COUNTS[proton_count as usize - 1];
        let neutron_count = isotopes[self.draw(2, 0, isotopes.len() as u32 - 1) as usize];
        let charge = self.draw_charge();
        // proton_count >= 1 and charge >= -1, so this never underflows
        let electron_count = (proton_count as i32 - charge) as u32;
        NumberAtom::new(proton_count, neutron_count, electron_count)
    }

    fn next_id(&mut self) -> ChallengeId {
        let id = ChallengeId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl ChallengeFactory for RandomChallengeFactory {
    fn generate(
        &mut self,
        level: LevelId,
        spec: &LevelSpec,
        count: usize,
    ) -> Result<Vec<Challenge>, GenerateError> {
        Self::validate(level, spec)?;

        let mut used: HashSet<NumberAtom> = HashSet::with_capacity(count);
        let mut challenges = Vec::with_capacity(count);
        for _ in 0..count {
            let kind_index = self.draw(0, 0, spec.allowed_kinds.len() as u32 - 1);
            let kind = spec.allowed_kinds[kind_index as usize];

            let mut atom = self.draw_atom(spec);
            let mut retries = 0;
            while used.contains(&atom) && retries < DUPLICATE_RETRY_LIMIT {
                atom = self.draw_atom(spec);
                retries += 1;
            }
            used.insert(atom);

            challenges.push(Challenge::new(self.next_id(), kind, atom));
        }
        Ok(challenges)
    }
}

/// Factory that replays explicit `(kind, answer)` scripts, one per level
/// start, in order. Exists so end-to-end tests are fully deterministic.
#[derive(Default)]
pub struct FixedChallengeFactory {
    scripts: VecDeque<Vec<(ChallengeKind, NumberAtom)>>,
    next_id: u32,
}

impl FixedChallengeFactory {
    pub fn new(scripts: Vec<Vec<(ChallengeKind, NumberAtom)>>) -> Self {
        Self {
            scripts: scripts.into(),
            next_id: 0,
        }
    }

    /// Convenience for a single scripted level.
    pub fn single(script: Vec<(ChallengeKind, NumberAtom)>) -> Self {
        Self::new(vec![script])
    }
}

impl ChallengeFactory for FixedChallengeFactory {
    fn generate(
        &mut self,
        level: LevelId,
        _spec: &LevelSpec,
        _count: usize,
    ) -> Result<Vec<Challenge>, GenerateError> {
        let script = self
            .scripts
            .pop_front()
            .ok_or(GenerateError::ScriptExhausted { level })?;
        Ok(script
            .into_iter()
            .map(|(kind, answer)| {
                let id = ChallengeId(self.next_id);
                self.next_id += 1;
                Challenge::new(id, kind, answer)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::challenge::ChallengeState;
    use crate::level::LevelTable;

    fn symbol_spec() -> LevelSpec {
        LevelTable::standard()
            .get(LevelId::Symbol)
            .cloned()
            .unwrap()
    }

    #[test]
    fn generates_requested_count_in_initial_state() {
        let mut factory = RandomChallengeFactory::new(1234);
        let challenges = factory.generate(LevelId::Symbol, &symbol_spec(), 5).unwrap();

        assert_eq!(challenges.len(), 5);
        for challenge in &challenges {
            assert_eq!(challenge.state(), ChallengeState::PresentingChallenge);
            assert_eq!(challenge.attempts_made(), 0);
        }
    }

    #[test]
    fn respects_level_constraints() {
        let spec = symbol_spec();
        let mut factory = RandomChallengeFactory::new(99);
        let challenges = factory.generate(LevelId::Symbol, &spec, 20).unwrap();

        for challenge in &challenges {
            assert!(spec.allowed_kinds.contains(&challenge.kind()));
            let atom = challenge.answer();
            assert!(spec.proton_range.contains(&atom.proton_count));
            let isotopes = STABLE_NEUTRON_COUNTS[atom.proton_count as usize - 1];
            assert!(isotopes.contains(&atom.neutron_count));
            assert!((-1..=1).contains(&atom.charge()));
        }
    }

    #[test]
    fn same_seed_reproduces_the_pool() {
        let spec = symbol_spec();
        let first = RandomChallengeFactory::new(7)
            .generate(LevelId::Symbol, &spec, 5)
            .unwrap();
        let second = RandomChallengeFactory::new(7)
            .generate(LevelId::Symbol, &spec, 5)
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn avoids_duplicate_answers_when_pool_is_wide() {
        let spec = symbol_spec();
        for seed in 0..20 {
            let mut factory = RandomChallengeFactory::new(seed);
            let challenges = factory.generate(LevelId::Symbol, &spec, 5).unwrap();
            let distinct: HashSet<NumberAtom> =
                challenges.iter().map(|c| *c.answer()).collect();
            assert_eq!(distinct.len(), challenges.len(), "seed {seed} repeated an atom");
        }
    }

    #[test]
    fn degrades_to_duplicates_when_pool_is_tiny() {
        // One element, one isotope, three charges: at most 3 distinct atoms,
        // yet a 6-challenge request still succeeds.
        let spec = LevelSpec::new(vec![ChallengeKind::CountsToCharge], 9..=9);
        let mut factory = RandomChallengeFactory::new(5);
        let challenges = factory.generate(LevelId::MassAndCharge, &spec, 6).unwrap();
        assert_eq!(challenges.len(), 6);
    }

    #[test]
    fn empty_kind_set_fails() {
        let spec = LevelSpec::new(vec![], 1..=10);
        let err = RandomChallengeFactory::new(0)
            .generate(LevelId::PeriodicTable, &spec, 5)
            .unwrap_err();
        assert_eq!(
            err,
            GenerateError::EmptyKindSet {
                level: LevelId::PeriodicTable
            }
        );
    }

    #[test]
    fn out_of_table_proton_range_fails() {
        let spec = LevelSpec::new(vec![ChallengeKind::CountsToMass], 1..=40);
        let err = RandomChallengeFactory::new(0)
            .generate(LevelId::Symbol, &spec, 5)
            .unwrap_err();
        assert_eq!(err, GenerateError::InvalidProtonRange { level: LevelId::Symbol });
    }

    #[test]
    fn fixed_factory_replays_scripts_in_order() {
        let carbon = NumberAtom::new(6, 6, 6);
        let oxygen = NumberAtom::new(8, 8, 8);
        let mut factory = FixedChallengeFactory::new(vec![
            vec![(ChallengeKind::CountsToElement, carbon)],
            vec![(ChallengeKind::CountsToMass, oxygen)],
        ]);
        let spec = symbol_spec();

        let first = factory.generate(LevelId::PeriodicTable, &spec, 1).unwrap();
        assert_eq!(first[0].kind(), ChallengeKind::CountsToElement);
        assert_eq!(*first[0].answer(), carbon);

        let second = factory.generate(LevelId::MassAndCharge, &spec, 1).unwrap();
        assert_eq!(*second[0].answer(), oxygen);
        assert_ne!(first[0].id(), second[0].id());

        let err = factory
            .generate(LevelId::Symbol, &spec, 1)
            .unwrap_err();
        assert_eq!(err, GenerateError::ScriptExhausted { level: LevelId::Symbol });
    }
}
