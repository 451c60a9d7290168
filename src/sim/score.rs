//! Score accumulator.
//!
//! `run` counts points earned in the current pass through the levels.
//! `total` is the lifetime sum of finished runs and survives run restarts.

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct ScoreBoard {
    pub run: u32,
    pub total: u32,
}

impl ScoreBoard {
    pub fn new() -> Self {
        ScoreBoard { run: 0, total: 0 }
    }

    /// No upper bound; saturates rather than wrapping.
    pub fn award_points(&mut self, n: u32) {
        self.run = self.run.saturating_add(n);
    }

    /// Add the run score into the total. The run score is left as is.
    pub fn fold_run_into_total(&mut self) {
        self.total = self.total.saturating_add(self.run);
    }

    pub fn reset_run(&mut self) {
        self.run = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn award_accumulates() {
        let mut s = ScoreBoard::new();
        s.award_points(10);
        s.award_points(5);
        assert_eq!(s.run, 15);
        assert_eq!(s.total, 0);
    }

    #[test]
    fn fold_keeps_run_score() {
        let mut s = ScoreBoard { run: 40, total: 25 };
        s.fold_run_into_total();
        assert_eq!(s, ScoreBoard { run: 40, total: 65 });
    }

    #[test]
    fn reset_run_keeps_total() {
        let mut s = ScoreBoard { run: 40, total: 65 };
        s.reset_run();
        assert_eq!(s, ScoreBoard { run: 0, total: 65 });
    }

    #[test]
    fn award_saturates() {
        let mut s = ScoreBoard { run: u32::MAX - 1, total: 0 };
        s.award_points(10);
        assert_eq!(s.run, u32::MAX);
    }
}
