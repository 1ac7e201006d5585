use std::fmt;

use crate::grid::Grid;

/// The canonical fixture patterns, stored as pattern text.
///
/// Each converts to a `Grid` sized to its own bounding box; note that on
/// such a bounded board a pattern's free-space behavior can differ (the
/// glider, for instance, has nowhere to go).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pattern {
    Block,
    Beehive,
    Loaf,
    Boat,
    Blinker,
    Toad,
    Beacon,
    Pulsar,
    Glider,
    LightweightSpaceship,
}

impl Pattern {
    /// All patterns in catalog order.
    pub fn all() -> &'static [Pattern] {
        &[
            Pattern::Block,
            Pattern::Beehive,
            Pattern::Loaf,
            Pattern::Boat,
            Pattern::Blinker,
            Pattern::Toad,
            Pattern::Beacon,
            Pattern::Pulsar,
            Pattern::Glider,
            Pattern::LightweightSpaceship,
        ]
    }

    /// The pattern text (`*` alive, `.` dead, one line per row).
    pub fn text(self) -> &'static str {
        match self {
            Pattern::Block => "**\n\
                               **",
            Pattern::Beehive => ".**..\n\
                                 *..*.\n\
                                 .**..",
            Pattern::Loaf => ".**..\n\
                              *..*\n\
                              .*.*\n\
                              ..*..",
            Pattern::Boat => "**.\n\
                              *.*\n\
                              .*.",
            Pattern::Blinker => "...\n\
                                 ***\n\
                                 ...",
            Pattern::Toad => ".***\n\
                              ***",
            Pattern::Beacon => "**..\n\
                                **..\n\
                                ..**\n\
                                ..**",
            Pattern::Pulsar => "..***...***..\n\
                                .............\n\
                                *....*.*.....\n\
                                *....*.*.....\n\
                                *....*.*.....\n\
                                ..***...***..\n\
                                .............\n\
                                ..***...***..\n\
                                *....*.*.....\n\
                                *....*.*.....\n\
                                *....*.*.....\n\
                                .............\n\
                                ..***...***..",
            Pattern::Glider => ".*.\n\
                                ..*\n\
                                ***",
            Pattern::LightweightSpaceship => ".*..*\n\
                                              *....\n\
                                              *...*\n\
                                              ****",
        }
    }

    /// The pattern as a grid sized to its bounding box.
    pub fn grid(self) -> Grid {
        Grid::from_pattern(self.text()).expect("catalog pattern text is valid")
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Block => write!(f, "Block"),
            Pattern::Beehive => write!(f, "Beehive"),
            Pattern::Loaf => write!(f, "Loaf"),
            Pattern::Boat => write!(f, "Boat"),
            Pattern::Blinker => write!(f, "Blinker"),
            Pattern::Toad => write!(f, "Toad"),
            Pattern::Beacon => write!(f, "Beacon"),
            Pattern::Pulsar => write!(f, "Pulsar"),
            Pattern::Glider => write!(f, "Glider"),
            Pattern::LightweightSpaceship => write!(f, "Lightweight Spaceship"),
        }
    }
}
