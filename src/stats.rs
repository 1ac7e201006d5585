use std::fmt;

use crate::grid::Grid;
use crate::rules::Rules;

/// The earliest generation achieving the maximum population.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopulationPeak {
    pub generation: usize,
    pub population: usize,
}

impl fmt::Display for PopulationPeak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Peak at generation {} with population {}",
            self.generation, self.population
        )
    }
}

/// Population counts over `generations` evolution steps. The result has
/// length `generations + 1`; index 0 is the initial population.
pub fn track_population(initial: &Grid, rules: &Rules, generations: usize) -> Vec<usize> {
    let mut series = Vec::with_capacity(generations + 1);
    let mut current = initial.clone();
    series.push(current.population());
    for _ in 0..generations {
        current = current.step(rules);
        series.push(current.population());
    }
    series
}

/// The earliest generation with the maximum population. The series always
/// contains at least the initial generation, so a peak always exists.
pub fn population_peak(initial: &Grid, rules: &Rules, max_generations: usize) -> PopulationPeak {
    let series = track_population(initial, rules, max_generations);
    let mut peak = PopulationPeak {
        generation: 0,
        population: series[0],
    };
    for (generation, &population) in series.iter().enumerate().skip(1) {
        if population > peak.population {
            peak = PopulationPeak {
                generation,
                population,
            };
        }
    }
    peak
}

/// Arithmetic mean of the tracked population series.
pub fn average_population(initial: &Grid, rules: &Rules, generations: usize) -> f64 {
    let series = track_population(initial, rules, generations);
    series.iter().sum::<usize>() as f64 / series.len() as f64
}

/// First generation where the population count holds steady for 3 consecutive
/// generations. This measures count stability only: an oscillator with a
/// constant population reports as stabilized while its shape keeps changing.
pub fn stabilization_point(
    initial: &Grid,
    rules: &Rules,
    max_generations: usize,
) -> Option<usize> {
    let series = track_population(initial, rules, max_generations);
    let point = series
        .windows(3)
        .position(|w| w[0] == w[1] && w[1] == w[2]);
    if let Some(generation) = point {
        log::debug!("population stabilized at generation {generation}");
    }
    point
}

/// Coefficient of variation (stddev / mean) of the tracked population series.
/// A dead or empty series reports 0.0.
pub fn population_variation(initial: &Grid, rules: &Rules, generations: usize) -> f64 {
    let series = track_population(initial, rules, generations);
    let n = series.len() as f64;
    let mean = series.iter().sum::<usize>() as f64 / n;
    if mean < 1e-9 {
        return 0.0;
    }
    let variance = series
        .iter()
        .map(|&p| (p as f64 - mean).powi(2))
        .sum::<f64>()
        / n;
    variance.sqrt() / mean
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blinker() -> Grid {
        Grid::from_pattern("...\n***\n...").unwrap()
    }

    fn glider() -> Grid {
        Grid::from_pattern(".*.\n..*\n***").unwrap()
    }

    #[test]
    fn test_blinker_population_is_constant() {
        let series = track_population(&blinker(), &Rules::conway(), 5);
        assert_eq!(series, vec![3, 3, 3, 3, 3, 3]);
    }

    #[test]
    fn test_track_zero_generations_is_initial_only() {
        let series = track_population(&blinker(), &Rules::conway(), 0);
        assert_eq!(series, vec![3]);
    }

    #[test]
    fn test_dying_pattern_population_drops_to_zero() {
        let mut lone = Grid::new(3, 3).unwrap();
        lone.set(crate::grid::Cell::new(1, 1), crate::grid::CellState::Alive);
        let series = track_population(&lone, &Rules::conway(), 3);
        assert_eq!(series, vec![1, 0, 0, 0]);
    }

    #[test]
    fn test_peak_is_earliest_maximum() {
        // Blinker stays at 3 forever; the earliest generation wins.
        let peak = population_peak(&blinker(), &Rules::conway(), 10);
        assert_eq!(
            peak,
            PopulationPeak {
                generation: 0,
                population: 3
            }
        );
    }

    #[test]
    fn test_peak_of_growing_pattern() {
        // Under Life without Death the blinker grows monotonically:
        // 3 -> 5 -> 9 on its 3x3 board.
        let peak = population_peak(&blinker(), &Rules::life_without_death(), 2);
        assert_eq!(
            peak,
            PopulationPeak {
                generation: 2,
                population: 9
            }
        );
    }

    #[test]
    fn test_peak_display() {
        let peak = PopulationPeak {
            generation: 4,
            population: 12,
        };
        assert_eq!(peak.to_string(), "Peak at generation 4 with population 12");
    }

    #[test]
    fn test_average_population_of_blinker() {
        let avg = average_population(&blinker(), &Rules::conway(), 5);
        assert!((avg - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_average_population_of_dying_cell() {
        let mut lone = Grid::new(3, 3).unwrap();
        lone.set(crate::grid::Cell::new(1, 1), crate::grid::CellState::Alive);
        // Series [1, 0, 0, 0] averages to 0.25.
        let avg = average_population(&lone, &Rules::conway(), 3);
        assert!((avg - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stabilization_at_start_for_constant_count() {
        // An oscillator with constant population counts as stabilized even
        // though its configuration keeps changing.
        assert_eq!(stabilization_point(&blinker(), &Rules::conway(), 5), Some(0));
    }

    #[test]
    fn test_stabilization_after_transient() {
        // Glider on 3x3: 5 -> 4 -> 3 -> 4 -> 4 -> 4, settling into a block.
        assert_eq!(stabilization_point(&glider(), &Rules::conway(), 5), Some(3));
    }

    #[test]
    fn test_no_stabilization_within_horizon() {
        assert_eq!(stabilization_point(&glider(), &Rules::conway(), 3), None);
    }

    #[test]
    fn test_variation_zero_for_still_life() {
        let block = Grid::from_pattern("**\n**").unwrap();
        assert_eq!(population_variation(&block, &Rules::conway(), 10), 0.0);
    }

    #[test]
    fn test_variation_zero_for_empty_grid() {
        let empty = Grid::new(4, 4).unwrap();
        assert_eq!(population_variation(&empty, &Rules::conway(), 10), 0.0);
    }

    #[test]
    fn test_variation_positive_for_changing_series() {
        let v = population_variation(&glider(), &Rules::conway(), 5);
        assert!(v > 0.0, "expected positive variation, got {v}");
    }
}
