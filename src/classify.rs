use std::fmt;

use crate::grid::Grid;
use crate::rules::Rules;

/// Classification of a pattern's multi-generation behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternType {
    /// Unchanged after one generation (period 1).
    StillLife,
    /// Recurs exactly after a fixed period greater than 1.
    Oscillator,
    /// Recurs in shape but translated. Never produced by the period-based
    /// classifier here; kept as the extension point for translation-aware
    /// detection.
    Spaceship,
    /// Anything else within the observed horizon: dying, chaotic, or moving.
    Unknown,
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternType::StillLife => write!(f, "StillLife"),
            PatternType::Oscillator => write!(f, "Oscillator"),
            PatternType::Spaceship => write!(f, "Spaceship"),
            PatternType::Unknown => write!(f, "Unknown"),
        }
    }
}

impl PatternType {
    /// All pattern types in display order.
    pub fn all() -> &'static [PatternType] {
        &[
            PatternType::StillLife,
            PatternType::Oscillator,
            PatternType::Spaceship,
            PatternType::Unknown,
        ]
    }

    /// Parse from string representation.
    pub fn from_str(s: &str) -> Option<PatternType> {
        match s {
            "StillLife" => Some(PatternType::StillLife),
            "Oscillator" => Some(PatternType::Oscillator),
            "Spaceship" => Some(PatternType::Spaceship),
            "Unknown" => Some(PatternType::Unknown),
            _ => None,
        }
    }
}

/// True iff one generation leaves the grid unchanged.
pub fn is_still_life(grid: &Grid, rules: &Rules) -> bool {
    grid.step(rules) == *grid
}

/// Finds the smallest generation count after which the grid returns to its
/// initial configuration, up to `max_generations`. Period 1 is a still life;
/// a dying pattern, a spaceship, or a period beyond the horizon all come
/// back as `None`.
pub fn find_period(grid: &Grid, rules: &Rules, max_generations: usize) -> Option<usize> {
    let mut current = grid.clone();
    for generation in 1..=max_generations {
        current = current.step(rules);
        if current == *grid {
            log::debug!("pattern recurred after {generation} generation(s)");
            return Some(generation);
        }
    }
    None
}

/// Classifies a pattern by observing up to `generations` generations.
///
/// Spaceships are reported as `Unknown`: recurrence is checked against the
/// exact initial configuration, so a translated copy never matches.
pub fn classify_pattern(grid: &Grid, rules: &Rules, generations: usize) -> PatternType {
    if is_still_life(grid, rules) {
        return PatternType::StillLife;
    }
    match find_period(grid, rules, generations) {
        Some(period) if period > 1 => PatternType::Oscillator,
        _ => PatternType::Unknown,
    }
}
