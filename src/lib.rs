//! Cellular automaton engine on a bounded rectangular grid.
//!
//! The grid stores only live cells, rules are birth/survival bitmask values
//! (standard Conway is B3/S23), and every multi-generation procedure is
//! bounded by an explicit horizon.
//!
//! # Example
//!
//! ```
//! use lifegrid::{classify, patterns::Pattern, Rules};
//!
//! let blinker = Pattern::Blinker.grid();
//! let period = classify::find_period(&blinker, &Rules::conway(), 10);
//! assert_eq!(period, Some(2));
//! ```

pub mod analyze;
pub mod classify;
pub mod grid;
pub mod patterns;
pub mod rules;
pub mod stats;
pub mod transform;

pub use classify::PatternType;
pub use grid::{Cell, CellState, Grid, GridError};
pub use rules::{ProbabilisticRules, RuleError, Rules};
pub use stats::PopulationPeak;
