//! Threshold ladders.
//!
//! A ladder is an ordered list of cuts over a numeric domain. Each cut maps to an integer
//! severity score and the first cut that accepts a value decides its score. A ladder always
//! carries a fallback score, so every input resolves to exactly one band.
//!
//! Ladders are declared as `const` items next to the calculator that uses them and are never
//! mutated, so they can be shared freely across threads.

/// A single boundary test within a ladder.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cut {
    /// Accepts `value >= bound`.
    AtLeast(f64),
    /// Accepts `value < bound`.
    Below(f64),
    /// Accepts `value <= bound`.
    AtMost(f64),
}

impl Cut {
    fn accepts(self, value: f64) -> bool {
        match self {
            Cut::AtLeast(bound) => value >= bound,
            Cut::Below(bound) => value < bound,
            Cut::AtMost(bound) => value <= bound,
        }
    }
}

/// One band of a ladder.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rung {
    pub cut: Cut,
    pub score: u8,
}

impl Rung {
    pub const fn new(cut: Cut, score: u8) -> Self {
        Self { cut, score }
    }
}

/// An ordered partition of a numeric domain into scored bands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThresholdLadder {
    rungs: &'static [Rung],
    otherwise: u8,
}

impl ThresholdLadder {
    /// Build a ladder from rungs evaluated in order, with `otherwise` as the score for any
    /// value no rung accepts.
    pub const fn new(rungs: &'static [Rung], otherwise: u8) -> Self {
        Self { rungs, otherwise }
    }

    /// Score a value. NaN is accepted by no cut and resolves to the fallback band.
    pub fn score(&self, value: f64) -> u8 {
        self.rungs
            .iter()
            .find(|rung| rung.cut.accepts(value))
            .map_or(self.otherwise, |rung| rung.score)
    }
}
