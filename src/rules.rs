use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::grid::CellState;

/// Errors raised when constructing or parsing rules.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuleError {
    /// Birth/survival counts are Moore neighbor counts, 0..=8.
    #[error("neighbor count {0} out of range 0..=8")]
    NeighborCountOutOfRange(u8),
    /// Probabilities must lie in [0, 1].
    #[error("probability {0} out of range 0.0..=1.0")]
    InvalidProbability(f64),
    /// B/S notation the parser could not understand.
    #[error("malformed rule label: {0:?}")]
    BadLabel(String),
}

/// Birth/survival rules for the dynamical system. Standard Conway is B3/S23.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rules {
    /// Bitmask: bit `i` set means a dead cell with `i` neighbors becomes alive.
    pub birth: u16,
    /// Bitmask: bit `i` set means a live cell with `i` neighbors survives.
    pub survival: u16,
}

impl Rules {
    /// Standard Conway's Game of Life: B3/S23
    pub fn conway() -> Self {
        Self {
            birth: 1 << 3,
            survival: (1 << 2) | (1 << 3),
        }
    }

    /// HighLife: B36/S23 - known for its replicator pattern
    pub fn highlife() -> Self {
        Self {
            birth: (1 << 3) | (1 << 6),
            survival: (1 << 2) | (1 << 3),
        }
    }

    /// Seeds: B2/S (no survival) - every cell dies, only birth
    pub fn seeds() -> Self {
        Self {
            birth: 1 << 2,
            survival: 0,
        }
    }

    /// Day & Night: B3678/S34678 - symmetric under on/off inversion
    pub fn day_and_night() -> Self {
        Self {
            birth: (1 << 3) | (1 << 6) | (1 << 7) | (1 << 8),
            survival: (1 << 3) | (1 << 4) | (1 << 6) | (1 << 7) | (1 << 8),
        }
    }

    /// Life without Death: B3/S012345678 - cells never die
    pub fn life_without_death() -> Self {
        Self {
            birth: 1 << 3,
            survival: 0x1FF, // bits 0-8 all set
        }
    }

    /// Builds a rule from explicit birth/survival neighbor-count sets.
    /// Counts above 8 are rejected.
    pub fn custom(birth: &[u8], survival: &[u8]) -> Result<Self, RuleError> {
        Ok(Self {
            birth: mask_from_counts(birth)?,
            survival: mask_from_counts(survival)?,
        })
    }

    /// True if a dead cell with `neighbors` live neighbors becomes alive.
    pub fn births_on(&self, neighbors: u8) -> bool {
        (self.birth >> neighbors) & 1 == 1
    }

    /// True if a live cell with `neighbors` live neighbors survives.
    pub fn survives_on(&self, neighbors: u8) -> bool {
        (self.survival >> neighbors) & 1 == 1
    }

    /// Pure transition: `(state, live-neighbor count) -> next state`.
    pub fn next_state(&self, current: CellState, neighbors: u8) -> CellState {
        let alive = if current.is_alive() {
            self.survives_on(neighbors)
        } else {
            self.births_on(neighbors)
        };
        CellState::from(alive)
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::conway()
    }
}

/// Build a bitmask with bits set for each listed neighbor count.
fn mask_from_counts(counts: &[u8]) -> Result<u16, RuleError> {
    let mut mask = 0u16;
    for &n in counts {
        if n > 8 {
            return Err(RuleError::NeighborCountOutOfRange(n));
        }
        mask |= 1 << n;
    }
    Ok(mask)
}

// ── B/S notation ────────────────────────────────────────────────────────────

impl fmt::Display for Rules {
    /// Human-readable B/S label, e.g. `B3/S23` (Seeds renders as `B2/S`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = |mask: u16| -> String {
            (0..=8u8)
                .filter(|&i| (mask >> i) & 1 == 1)
                .map(|i| i.to_string())
                .collect()
        };
        write!(f, "B{}/S{}", digits(self.birth), digits(self.survival))
    }
}

impl FromStr for Rules {
    type Err = RuleError;

    /// Parses a B/S label such as `B36/S23` back into a rule value.
    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let bad = || RuleError::BadLabel(label.to_string());

        let (birth_str, survival_str) = label.split_once('/').ok_or_else(bad)?;
        let birth_str = birth_str.strip_prefix('B').ok_or_else(bad)?;
        let survival_str = survival_str.strip_prefix('S').ok_or_else(bad)?;

        let digits = |s: &str| -> Result<u16, RuleError> {
            let mut mask = 0u16;
            for c in s.chars() {
                let n = c.to_digit(10).ok_or_else(bad)?;
                if n > 8 {
                    return Err(bad());
                }
                mask |= 1 << n;
            }
            Ok(mask)
        };

        Ok(Self {
            birth: digits(birth_str)?,
            survival: digits(survival_str)?,
        })
    }
}

// ── Probabilistic wrapper ───────────────────────────────────────────────────

/// Wraps a base rule so that every Alive outcome must additionally pass a
/// Bernoulli trial. A Dead proposal from the base rule is final: death by
/// over/underpopulation is never probabilistically overridden.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbabilisticRules {
    base: Rules,
    survival_probability: f64,
    birth_probability: f64,
}

impl ProbabilisticRules {
    /// Both probabilities must lie in [0, 1].
    pub fn new(
        base: Rules,
        survival_probability: f64,
        birth_probability: f64,
    ) -> Result<Self, RuleError> {
        for p in [survival_probability, birth_probability] {
            if !(0.0..=1.0).contains(&p) {
                return Err(RuleError::InvalidProbability(p));
            }
        }
        Ok(Self {
            base,
            survival_probability,
            birth_probability,
        })
    }

    pub fn base(&self) -> &Rules {
        &self.base
    }

    /// Transition with an injected randomness source. Each call is one
    /// independent Bernoulli trial; pass a seeded RNG for reproducibility.
    pub fn next_state<R: Rng>(&self, current: CellState, neighbors: u8, rng: &mut R) -> CellState {
        let proposal = self.base.next_state(current, neighbors);
        if !proposal.is_alive() {
            return CellState::Dead;
        }
        let p = if current.is_alive() {
            self.survival_probability
        } else {
            self.birth_probability
        };
        CellState::from(rng.gen_range(0.0..1.0) < p)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    // ── Builtin families ──

    #[test]
    fn conway_masks() {
        let rules = Rules::conway();
        assert!(rules.births_on(3));
        assert!(!rules.births_on(2));
        assert!(rules.survives_on(2));
        assert!(rules.survives_on(3));
        assert!(!rules.survives_on(4));
    }

    #[test]
    fn seeds_has_no_survival() {
        let rules = Rules::seeds();
        for n in 0..=8 {
            assert!(!rules.survives_on(n));
        }
        assert!(rules.births_on(2));
    }

    #[test]
    fn life_without_death_survives_everything() {
        let rules = Rules::life_without_death();
        for n in 0..=8 {
            assert!(rules.survives_on(n));
        }
        assert!(rules.births_on(3));
        assert!(!rules.births_on(6));
    }

    #[test]
    fn default_is_conway() {
        assert_eq!(Rules::default(), Rules::conway());
    }

    // ── next_state ──

    #[test]
    fn conway_transitions() {
        let rules = Rules::conway();
        assert_eq!(rules.next_state(CellState::Alive, 1), CellState::Dead);
        assert_eq!(rules.next_state(CellState::Alive, 2), CellState::Alive);
        assert_eq!(rules.next_state(CellState::Alive, 4), CellState::Dead);
        assert_eq!(rules.next_state(CellState::Dead, 3), CellState::Alive);
        assert_eq!(rules.next_state(CellState::Dead, 2), CellState::Dead);
    }

    // ── Custom rules ──

    #[test]
    fn custom_matches_equivalent_builtin() {
        let custom = Rules::custom(&[3, 6], &[2, 3]).unwrap();
        assert_eq!(custom, Rules::highlife());
    }

    #[test]
    fn custom_accepts_zero_birth() {
        let rules = Rules::custom(&[0], &[]).unwrap();
        assert!(rules.births_on(0));
    }

    #[test]
    fn custom_rejects_count_above_eight() {
        assert_eq!(
            Rules::custom(&[9], &[]),
            Err(RuleError::NeighborCountOutOfRange(9))
        );
        assert_eq!(
            Rules::custom(&[3], &[12]),
            Err(RuleError::NeighborCountOutOfRange(12))
        );
    }

    // ── B/S labels ──

    #[test]
    fn builtin_labels_round_trip() {
        for (rules, label) in [
            (Rules::conway(), "B3/S23"),
            (Rules::highlife(), "B36/S23"),
            (Rules::seeds(), "B2/S"),
            (Rules::day_and_night(), "B3678/S34678"),
            (Rules::life_without_death(), "B3/S012345678"),
        ] {
            assert_eq!(rules.to_string(), label);
            assert_eq!(label.parse::<Rules>().unwrap(), rules);
        }
    }

    #[test]
    fn parse_rejects_malformed_labels() {
        for label in ["", "nonsense", "X3/Y2", "B3S23", "B9/S2", "B3/S2a"] {
            assert!(label.parse::<Rules>().is_err(), "accepted {label:?}");
        }
    }

    // ── Probabilistic wrapper ──

    #[test]
    fn probability_one_matches_base() {
        let rules = ProbabilisticRules::new(Rules::conway(), 1.0, 1.0).unwrap();
        let mut rng = StdRng::seed_from_u64(99);
        for state in [CellState::Alive, CellState::Dead] {
            for n in 0..=8 {
                assert_eq!(
                    rules.next_state(state, n, &mut rng),
                    Rules::conway().next_state(state, n)
                );
            }
        }
    }

    #[test]
    fn probability_zero_kills_alive_proposals() {
        let rules = ProbabilisticRules::new(Rules::conway(), 0.0, 0.0).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            rules.next_state(CellState::Alive, 2, &mut rng),
            CellState::Dead
        );
        assert_eq!(
            rules.next_state(CellState::Dead, 3, &mut rng),
            CellState::Dead
        );
    }

    #[test]
    fn dead_proposal_is_final() {
        // Overpopulation death stands even with survival probability 1.
        let rules = ProbabilisticRules::new(Rules::conway(), 1.0, 1.0).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(
            rules.next_state(CellState::Alive, 8, &mut rng),
            CellState::Dead
        );
    }

    #[test]
    fn invalid_probability_rejected() {
        assert_eq!(
            ProbabilisticRules::new(Rules::conway(), 1.5, 0.5),
            Err(RuleError::InvalidProbability(1.5))
        );
        assert_eq!(
            ProbabilisticRules::new(Rules::conway(), 0.5, -0.1),
            Err(RuleError::InvalidProbability(-0.1))
        );
    }

    #[test]
    fn same_seed_gives_same_sequence() {
        let rules = ProbabilisticRules::new(Rules::conway(), 0.5, 0.5).unwrap();
        let run = |seed: u64| -> Vec<CellState> {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..32)
                .map(|_| rules.next_state(CellState::Alive, 2, &mut rng))
                .collect()
        };
        assert_eq!(run(1234), run(1234));
    }
}
