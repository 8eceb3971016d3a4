//! Scoring module - level-scaled modern scoring rules
//!
//! Rules applied per placement:
//! - Line clears and T-Spins use fixed base tables multiplied by the level.
//! - The level is derived from the cumulative line count including this clear.
//! - Back-to-back applies a 3/2 multiplier (floored) to the action score of a
//!   difficult clear that follows another difficult clear.
//! - Combo bonus is `COMBO_BASE * (combo - 1)` with no level multiplier.
//! - A perfect clear adds a flat bonus plus a per-line bonus and forces B2B on.

use serde::{Deserialize, Serialize};

use crate::types::{
    TSpinClass, B2B_DENOMINATOR, B2B_NUMERATOR, COMBO_BASE, HARD_DROP_SCORE,
    LEVEL_SPEED_FRAMES, LINES_PER_LEVEL, LINE_SCORES, PERFECT_CLEAR_BASE,
    PERFECT_CLEAR_LINE_BONUS, SOFT_DROP_SCORE, TARGET_FPS, TSPIN_MINI_SCORES, TSPIN_SCORES,
};

/// Running score of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreState {
    pub score: u32,
    pub lines_cleared: u32,
    pub level: u32,
    pub combo_count: u32,
    pub back_to_back: bool,
    /// Whether the last placement was a perfect clear; not accumulated
    pub perfect_clear: bool,
}

impl Default for ScoreState {
    fn default() -> Self {
        Self {
            score: 0,
            lines_cleared: 0,
            level: 1,
            combo_count: 0,
            back_to_back: false,
            perfect_clear: false,
        }
    }
}

/// One placement, as seen by the scoring engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreEvent {
    pub lines_cleared: u32,
    pub tspin: TSpinClass,
    pub is_perfect_clear: bool,
}

/// Breakdown of the points a placement awarded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Base clear (or zero-line T-Spin) points times level, B2B included
    pub action_score: u32,
    pub combo_bonus: u32,
    pub perfect_clear_bonus: u32,
    pub total: u32,
    /// Tetris or T-Spin clear
    pub difficult: bool,
    pub b2b_applied: bool,
}

/// Level for a cumulative line count: `min(max_level, lines / 10 + 1)`
pub fn calculate_level(total_lines: u32, max_level: u32) -> u32 {
    (total_lines / LINES_PER_LEVEL + 1).min(max_level.max(1))
}

/// Gravity step interval for a level (ms); levels clamp to the table range
pub fn gravity_interval_ms(level: u32) -> u32 {
    let idx = (level.max(1) as usize - 1).min(LEVEL_SPEED_FRAMES.len() - 1);
    LEVEL_SPEED_FRAMES[idx] * 1000 / TARGET_FPS
}

/// Drop score: soft drop +1 per cell, hard drop +2 per cell
pub fn calculate_drop_score(cells: u32, is_hard_drop: bool) -> u32 {
    if is_hard_drop {
        cells * HARD_DROP_SCORE
    } else {
        cells * SOFT_DROP_SCORE
    }
}

/// Base points before the level multiplier
pub fn base_points(lines: u32, tspin: TSpinClass) -> u32 {
    let lines = lines as usize;
    match tspin {
        TSpinClass::None => LINE_SCORES.get(lines).copied().unwrap_or(0),
        TSpinClass::Mini if lines < TSPIN_MINI_SCORES.len() => TSPIN_MINI_SCORES[lines],
        TSpinClass::Mini | TSpinClass::Regular => {
            TSPIN_SCORES[lines.min(TSPIN_SCORES.len() - 1)]
        }
    }
}

/// Tetris or any T-Spin that cleared lines
pub fn is_difficult(lines: u32, tspin: TSpinClass) -> bool {
    match tspin {
        TSpinClass::None => lines == 4,
        TSpinClass::Mini | TSpinClass::Regular => lines > 0,
    }
}

/// Apply the B2B multiplier (3/2, floored) to a point value
pub fn apply_b2b_multiplier(points: u32) -> u32 {
    points.saturating_mul(B2B_NUMERATOR) / B2B_DENOMINATOR
}

/// Score one placement, returning the new state and the point breakdown
pub fn score_event(state: &ScoreState, event: ScoreEvent, max_level: u32) -> (ScoreState, ScoreResult) {
    let mut next = *state;
    let mut result = ScoreResult::default();

    next.lines_cleared = state.lines_cleared + event.lines_cleared;
    next.level = calculate_level(next.lines_cleared, max_level);
    next.perfect_clear = event.is_perfect_clear;
    let level = next.level;

    if event.lines_cleared == 0 {
        next.combo_count = 0;
        if event.tspin != TSpinClass::None {
            result.action_score = base_points(0, event.tspin) * level;
        }
    } else {
        next.combo_count = state.combo_count + 1;
        result.combo_bonus = COMBO_BASE * (next.combo_count - 1);

        let difficult = is_difficult(event.lines_cleared, event.tspin);
        let mut action = base_points(event.lines_cleared, event.tspin) * level;
        if difficult && state.back_to_back {
            action = apply_b2b_multiplier(action);
            result.b2b_applied = true;
        }
        result.action_score = action;
        result.difficult = difficult;
        next.back_to_back = difficult;
    }

    if event.is_perfect_clear {
        result.perfect_clear_bonus =
            PERFECT_CLEAR_BASE + event.lines_cleared * PERFECT_CLEAR_LINE_BONUS * level;
        next.back_to_back = true;
    }

    result.total = result
        .action_score
        .saturating_add(result.combo_bonus)
        .saturating_add(result.perfect_clear_bonus);
    next.score = state.score.saturating_add(result.total);
    (next, result)
}

/// Score one placement
pub fn apply(state: &ScoreState, event: ScoreEvent, max_level: u32) -> ScoreState {
    score_event(state, event, max_level).0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MAX_LEVEL;

    fn clear(lines: u32, tspin: TSpinClass) -> ScoreEvent {
        ScoreEvent {
            lines_cleared: lines,
            tspin,
            is_perfect_clear: false,
        }
    }

    #[test]
    fn test_single_at_level_one() {
        let state = ScoreState::default();
        let (next, result) = score_event(&state, clear(1, TSpinClass::None), MAX_LEVEL);
        assert_eq!(result.total, 100);
        assert_eq!(next.score, 100);
        assert_eq!(next.combo_count, 1);
        assert!(!next.back_to_back);
    }

    #[test]
    fn test_back_to_back_tetris() {
        let state = ScoreState {
            back_to_back: true,
            ..ScoreState::default()
        };
        let (next, result) = score_event(&state, clear(4, TSpinClass::None), MAX_LEVEL);
        assert_eq!(result.action_score, 1200);
        assert!(result.b2b_applied);
        assert!(next.back_to_back);
        assert_eq!(next.score, 1200);
    }

    #[test]
    fn test_consecutive_tetrises() {
        let state = ScoreState::default();
        let first = apply(&state, clear(4, TSpinClass::None), MAX_LEVEL);
        assert_eq!(first.score, 800);
        let (second, result) = score_event(&first, clear(4, TSpinClass::None), MAX_LEVEL);
        // 1200 action plus the second combo step
        assert_eq!(result.action_score, 1200);
        assert_eq!(result.combo_bonus, 50);
        assert_eq!(second.score, 800 + 1250);
    }

    #[test]
    fn test_tspin_double_without_b2b() {
        let (next, result) =
            score_event(&ScoreState::default(), clear(2, TSpinClass::Regular), MAX_LEVEL);
        assert_eq!(result.action_score, 1200);
        assert!(!result.b2b_applied);
        assert!(next.back_to_back);
    }

    #[test]
    fn test_non_difficult_clear_breaks_b2b() {
        let state = ScoreState {
            back_to_back: true,
            ..ScoreState::default()
        };
        let next = apply(&state, clear(2, TSpinClass::None), MAX_LEVEL);
        assert!(!next.back_to_back);
        assert_eq!(next.score, 300);
    }

    #[test]
    fn test_zero_line_placement_keeps_b2b_and_resets_combo() {
        let state = ScoreState {
            combo_count: 3,
            back_to_back: true,
            ..ScoreState::default()
        };
        let next = apply(&state, ScoreEvent::default(), MAX_LEVEL);
        assert_eq!(next.combo_count, 0);
        assert!(next.back_to_back);
        assert_eq!(next.score, 0);
    }

    #[test]
    fn test_zero_line_tspins() {
        let mini = apply(&ScoreState::default(), clear(0, TSpinClass::Mini), MAX_LEVEL);
        assert_eq!(mini.score, 100);
        let regular = apply(&ScoreState::default(), clear(0, TSpinClass::Regular), MAX_LEVEL);
        assert_eq!(regular.score, 400);
        assert!(!regular.back_to_back);
    }

    #[test]
    fn test_combo_sequence() {
        let mut state = ScoreState::default();
        let mut combos = Vec::new();
        for _ in 0..3 {
            state = apply(&state, clear(1, TSpinClass::None), MAX_LEVEL);
            combos.push(state.combo_count);
        }
        state = apply(&state, clear(0, TSpinClass::None), MAX_LEVEL);
        combos.push(state.combo_count);
        assert_eq!(combos, vec![1, 2, 3, 0]);
        // 100 + 150 + 200
        assert_eq!(state.score, 450);
    }

    #[test]
    fn test_perfect_clear_forces_b2b() {
        let event = ScoreEvent {
            lines_cleared: 2,
            tspin: TSpinClass::None,
            is_perfect_clear: true,
        };
        let (next, result) = score_event(&ScoreState::default(), event, MAX_LEVEL);
        assert_eq!(result.perfect_clear_bonus, 1000 + 2 * 200);
        assert_eq!(result.total, 300 + 1400);
        assert!(next.back_to_back);
        assert!(next.perfect_clear);

        let after = apply(&next, clear(1, TSpinClass::None), MAX_LEVEL);
        assert!(!after.perfect_clear);
    }

    #[test]
    fn test_level_uses_updated_line_count() {
        let state = ScoreState {
            lines_cleared: 8,
            ..ScoreState::default()
        };
        let (next, result) = score_event(&state, clear(2, TSpinClass::None), MAX_LEVEL);
        assert_eq!(next.level, 2);
        assert_eq!(result.action_score, 600);
    }

    #[test]
    fn test_level_caps_at_max() {
        assert_eq!(calculate_level(0, 20), 1);
        assert_eq!(calculate_level(19, 20), 2);
        assert_eq!(calculate_level(500, 20), 20);
        assert_eq!(calculate_level(500, 5), 5);
    }

    #[test]
    fn test_gravity_curve() {
        assert_eq!(gravity_interval_ms(1), 800);
        assert_eq!(gravity_interval_ms(0), 800);
        assert_eq!(gravity_interval_ms(10), 100);
        assert_eq!(gravity_interval_ms(20), 33);
        assert_eq!(gravity_interval_ms(99), 33);
    }

    #[test]
    fn test_drop_score() {
        assert_eq!(calculate_drop_score(5, false), 5);
        assert_eq!(calculate_drop_score(5, true), 10);
    }

    #[test]
    fn test_mini_tables() {
        assert_eq!(base_points(1, TSpinClass::Mini), 200);
        assert_eq!(base_points(2, TSpinClass::Mini), 400);
        assert_eq!(base_points(3, TSpinClass::Regular), 1600);
        assert!(is_difficult(1, TSpinClass::Mini));
        assert!(!is_difficult(3, TSpinClass::None));
    }
}
