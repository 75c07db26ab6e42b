//! Scoring module - classic line-clear points and level progression
//!
//! Points for a clear are `LINE_SCORES[n] * (level + 1)`. A settle's points
//! first land in the "current" bucket and are folded into the total when the
//! next tile settles, so presentation layers can show the last award.

use serde::{Deserialize, Serialize};

use crate::types::{GRAVITY_MIN_MS, LEVEL_GRAVITY_MS, LINES_PER_LEVEL, LINE_SCORES};

/// Calculate line clear score
/// lines: number of lines cleared (1-4)
/// level: current level (0-based)
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines > 4 {
        return 0;
    }
    LINE_SCORES[lines] * (level + 1)
}

/// Level reached after clearing `lines` in total.
pub fn level_for_lines(lines: u32) -> u32 {
    lines / LINES_PER_LEVEL
}

/// Gravity period for a level when level gravity is enabled.
pub fn gravity_interval_ms(level: u32) -> u32 {
    let idx = (level as usize).min(LEVEL_GRAVITY_MS.len() - 1);
    LEVEL_GRAVITY_MS[idx].max(GRAVITY_MIN_MS)
}

/// Running score of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    /// Points awarded by the most recent settle
    pub current: u32,
    /// Points from every earlier settle
    pub total: u32,
}

impl Score {
    /// Move the current award into the total.
    pub fn fold(&mut self) {
        self.total += self.current;
        self.current = 0;
    }

    pub fn award(&mut self, points: u32) {
        self.current += points;
    }

    /// Grand total including the pending award.
    pub fn points(&self) -> u32 {
        self.total + self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_scores_level_0() {
        assert_eq!(calculate_line_score(0, 0), 0);
        assert_eq!(calculate_line_score(1, 0), 40);
        assert_eq!(calculate_line_score(2, 0), 100);
        assert_eq!(calculate_line_score(3, 0), 300);
        assert_eq!(calculate_line_score(4, 0), 1200);
        assert_eq!(calculate_line_score(5, 0), 0);
    }

    #[test]
    fn test_line_scores_scale_with_level() {
        for level in 0..5 {
            for (n, base) in [(1, 40), (2, 100), (3, 300), (4, 1200)] {
                assert_eq!(calculate_line_score(n, level), base * (level + 1));
            }
        }
    }

    #[test]
    fn test_level_and_gravity() {
        assert_eq!(level_for_lines(9), 0);
        assert_eq!(level_for_lines(10), 1);
        assert_eq!(gravity_interval_ms(0), 1000);
        assert_eq!(gravity_interval_ms(3), 500);
        assert_eq!(gravity_interval_ms(40), 160);
    }

    #[test]
    fn test_fold_moves_current_into_total() {
        let mut s = Score::default();
        s.award(40);
        assert_eq!(s.points(), 40);
        s.fold();
        assert_eq!(s, Score { current: 0, total: 40 });
        s.award(100);
        assert_eq!(s.points(), 140);
    }
}
