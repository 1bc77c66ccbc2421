// SPDX-License-Identifier: MIT OR Apache-2.0

//! Score calculation for the scored variant

use serde::{Deserialize, Serialize};

/// Score of a game finished instantly without clicking
pub const BASE_SCORE: u32 = 10_000;
/// Points lost per elapsed second
pub const TIME_PENALTY_PER_SECOND: u32 = 10;
/// Points lost per accepted link
pub const CLICK_PENALTY: u32 = 100;

/// Score for a race that took `elapsed_secs` seconds and `clicks` links
///
/// `max(0, 10000 - 10 * elapsed_secs - 100 * clicks)`
pub fn calculate_score(elapsed_secs: u64, clicks: u32) -> u32 {
    ScoreBreakdown::new(elapsed_secs, clicks).score
}

/// How a score was arrived at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub base: u32,
    pub time_penalty: u64,
    pub click_penalty: u64,
    pub score: u32,
}

impl ScoreBreakdown {
    pub fn new(elapsed_secs: u64, clicks: u32) -> Self {
        let time_penalty = elapsed_secs.saturating_mul(u64::from(TIME_PENALTY_PER_SECOND));
        let click_penalty = u64::from(clicks).saturating_mul(u64::from(CLICK_PENALTY));
        let remaining = u64::from(BASE_SCORE)
            .saturating_sub(time_penalty)
            .saturating_sub(click_penalty);

        Self {
            base: BASE_SCORE,
            time_penalty,
            click_penalty,
            // never above BASE_SCORE
            score: u32::try_from(remaining).unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_run_keeps_base_score() {
        assert_eq!(calculate_score(0, 0), BASE_SCORE);
    }

    #[test]
    fn penalties_are_applied() {
        // 10000 - 10 * 42 - 100 * 5
        assert_eq!(calculate_score(42, 5), 9080);

        let breakdown = ScoreBreakdown::new(42, 5);
        assert_eq!(breakdown.time_penalty, 420);
        assert_eq!(breakdown.click_penalty, 500);
    }

    #[test]
    fn score_floors_at_zero() {
        assert_eq!(calculate_score(1_000, 0), 0);
        assert_eq!(calculate_score(0, 100), 0);
        assert_eq!(calculate_score(999, 1), 0);
        assert_eq!(calculate_score(u64::MAX, u32::MAX), 0);
    }
}
