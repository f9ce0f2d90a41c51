use crate::goals::{Goal, SummaryStats};

/// Computes the aggregate statistics over `goals`.
///
/// Goals that report no progress (see [`Goal::progress_contribution`]) are
/// left out of the average entirely rather than counted as zero.
pub fn summarize(goals: &[Goal]) -> SummaryStats {
    let total_goals = goals.len();
    let completed_goals = goals.iter().filter(|g| g.completed).count();

    let (sum, contributors) = goals
        .iter()
        .filter_map(Goal::progress_contribution)
        .fold((0.0_f64, 0_usize), |(sum, n), pct| (sum + pct, n + 1));

    let avg_completion_rate = if contributors == 0 {
        0
    } else {
        round_half_up(sum / contributors as f64)
    };

    SummaryStats {
        total_goals,
        completed_goals,
        in_progress_goals: total_goals - completed_goals,
        avg_completion_rate,
    }
}

/// Rounds to the nearest integer with halves going up, clamping negatives
/// (only reachable through negative counter values) to zero.
fn round_half_up(value: f64) -> u32 {
    let rounded = (value + 0.5).floor();
    if rounded <= 0.0 {
        0
    } else {
        rounded as u32
    }
}
