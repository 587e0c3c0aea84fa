// patterns.rs - Catalog of named starting patterns

use std::fmt;

use crate::error::LifeResult;
use crate::grid::Grid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    StillLife,
    Oscillator,
    Spaceship,
    Methuselah,
    InfiniteGrowth,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::StillLife,
        Category::Oscillator,
        Category::Spaceship,
        Category::Methuselah,
        Category::InfiniteGrowth,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::StillLife      => "Still Lifes",
            Category::Oscillator     => "Oscillators",
            Category::Spaceship      => "Spaceships",
            Category::Methuselah     => "Methuselahs",
            Category::InfiniteGrowth => "Infinite Growth",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Source form of a pattern: rows of `.` and `#`.
pub struct PatternDef {
    pub name: &'static str,
    pub category: Category,
    pub rows: &'static [&'static str],
}

pub const PATTERNS: &[PatternDef] = &[
    // Still lifes
    PatternDef {
        name: "Block",
        category: Category::StillLife,
        rows: &["##", "##"],
    },
    PatternDef {
        name: "Beehive",
        category: Category::StillLife,
        rows: &[".##.", "#..#", ".##."],
    },
    PatternDef {
        name: "Loaf",
        category: Category::StillLife,
        rows: &[".##.", "#..#", ".#.#", "..#."],
    },
    PatternDef {
        name: "Boat",
        category: Category::StillLife,
        rows: &["##.", "#.#", ".#."],
    },
    PatternDef {
        name: "Tub",
        category: Category::StillLife,
        rows: &[".#.", "#.#", ".#."],
    },
    // Oscillators
    PatternDef {
        name: "Blinker",
        category: Category::Oscillator,
        rows: &["###"],
    },
    PatternDef {
        name: "Toad",
        category: Category::Oscillator,
        rows: &[".###", "###."],
    },
    PatternDef {
        name: "Beacon",
        category: Category::Oscillator,
        rows: &["##..", "##..", "..##", "..##"],
    },
    PatternDef {
        name: "Pulsar",
        category: Category::Oscillator,
        rows: &[
            "..###...###..",
            ".............",
            "#....#.#....#",
            "#....#.#....#",
            "#....#.#....#",
            "..###...###..",
            ".............",
            "..###...###..",
            "#....#.#....#",
            "#....#.#....#",
            "#....#.#....#",
            ".............",
            "..###...###..",
        ],
    },
    PatternDef {
        name: "Pentadecathlon",
        category: Category::Oscillator,
        rows: &["..#....#..", "##.####.##", "..#....#.."],
    },
    // Spaceships
    PatternDef {
        name: "Glider",
        category: Category::Spaceship,
        rows: &[".#.", "..#", "###"],
    },
    PatternDef {
        name: "Lightweight Spaceship",
        category: Category::Spaceship,
        rows: &[".#..#", "#....", "#...#", "####."],
    },
    PatternDef {
        name: "Middleweight Spaceship",
        category: Category::Spaceship,
        rows: &["...#..", ".#...#", "#.....", "#....#", "#####."],
    },
    PatternDef {
        name: "Heavyweight Spaceship",
        category: Category::Spaceship,
        rows: &["...##..", ".#....#", "#......", "#.....#", "######."],
    },
    // Methuselahs
    PatternDef {
        name: "R-pentomino",
        category: Category::Methuselah,
        rows: &[".##", "##.", ".#."],
    },
    PatternDef {
        name: "Diehard",
        category: Category::Methuselah,
        rows: &["......#.", "##......", ".#...###"],
    },
    PatternDef {
        name: "Acorn",
        category: Category::Methuselah,
        rows: &[".#.....", "...#...", "##..###"],
    },
    // Infinite growth
    PatternDef {
        name: "Gosper Glider Gun",
        category: Category::InfiniteGrowth,
        rows: &[
            "........................#...........",
            "......................#.#...........",
            "............##......##............##",
            "...........#...#....##............##",
            "##........#.....#...##..............",
            "##........#...#.##....#.#...........",
            "..........#.....#.......#...........",
            "...........#...#....................",
            "............##......................",
        ],
    },
    PatternDef {
        name: "5x5 Infinite",
        category: Category::InfiniteGrowth,
        rows: &["###.#", "#....", "...##", ".##.#", "#.#.#"],
    },
    PatternDef {
        name: "One-line Infinite",
        category: Category::InfiniteGrowth,
        rows: &["########.#####...###......#######.#####"],
    },
];

/// A parsed, immutable library entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    pub category: Category,
    grid: Grid,
}

impl Pattern {
    pub fn grid(&self) -> &Grid {
        &self.grid
    }
}

impl PatternDef {
    pub fn parse(&self) -> LifeResult<Pattern> {
        Ok(Pattern {
            name: self.name,
            category: self.category,
            grid: Grid::parse(self.name, self.rows)?,
        })
    }
}

/// Every entry of [`PATTERNS`], parsed once.
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    patterns: Vec<Pattern>,
}

impl PatternLibrary {
    pub fn load() -> LifeResult<Self> {
        let patterns = PATTERNS
            .iter()
            .map(PatternDef::parse)
            .collect::<LifeResult<Vec<_>>>()?;
        log::debug!("loaded {} library patterns", patterns.len());
        Ok(Self { patterns })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pattern> + '_ {
        self.patterns.iter()
    }

    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &Pattern> + '_ {
        self.patterns.iter().filter(move |p| p.category == category)
    }

    pub fn find(&self, name: &str) -> Option<&Pattern> {
        self.patterns.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
