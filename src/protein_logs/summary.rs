//! Daily and weekly protein progress.
//!
//! Both reports are recomputed from the raw logs on every read; nothing here
//! is cached, so adding or deleting a log is reflected immediately.

use time::{Date, Duration};
use tracing::debug;

use super::dto::{DailySummary, DailyTotal, ProteinLogOut, WeeklySummary};
use super::repo::ProteinLog;
use crate::{
    dates::{utc_day, weekday_abbrev},
    rounding::round_to,
};

/// Number of days in a weekly report, anchor day included.
pub const WEEK_DAYS: i64 = 7;

/// Inclusive `[anchor - 6 days, anchor]` window of a weekly report.
pub fn week_window(anchor: Date) -> (Date, Date) {
    (anchor - Duration::days(WEEK_DAYS - 1), anchor)
}

/// Reduces one user's logs for `date` into a progress report.
///
/// `remaining` never goes below zero and `progress_percent` is capped at 100.
/// A goal of zero yields a progress of 0 rather than dividing by zero.
pub fn daily_summary(date: Date, goal: i32, logs: Vec<ProteinLog>) -> DailySummary {
    let total: f64 = logs.iter().map(|l| l.protein_amount).sum();
    let goal_grams = f64::from(goal);
    let remaining = (goal_grams - total).max(0.0);
    let progress = if goal > 0 {
        (total / goal_grams * 100.0).min(100.0)
    } else {
        0.0
    };

    debug!(%date, log_count = logs.len(), total, goal, "daily summary computed");

    DailySummary {
        date,
        total_protein: round_to(total, 1),
        goal,
        remaining: round_to(remaining, 1),
        progress_percent: round_to(progress, 1),
        log_count: logs.len(),
        logs: logs.into_iter().map(ProteinLogOut::from).collect(),
    }
}

/// Builds the seven-day trend ending on `anchor` from the logs of that window.
///
/// Logs outside the window are ignored. Empty days count as zero, and the
/// average always divides by seven.
pub fn weekly_summary(anchor: Date, goal: i32, logs: &[ProteinLog]) -> WeeklySummary {
    let (week_start, week_end) = week_window(anchor);
    let goal_grams = f64::from(goal);

    let daily_totals: Vec<DailyTotal> = (0..WEEK_DAYS)
        .map(|offset| {
            let day = week_start + Duration::days(offset);
            let total: f64 = logs
                .iter()
                .filter(|l| utc_day(l.logged_at) == day)
                .map(|l| l.protein_amount)
                .sum();
            DailyTotal {
                date: day,
                day_name: weekday_abbrev(day).to_string(),
                protein: round_to(total, 1),
                goal_met: total >= goal_grams,
            }
        })
        .collect();

    let total_weekly: f64 = daily_totals.iter().map(|d| d.protein).sum();
    let days_goal_met = daily_totals.iter().filter(|d| d.goal_met).count();

    debug!(%week_start, %week_end, total_weekly, days_goal_met, "weekly summary computed");

    WeeklySummary {
        week_start,
        week_end,
        daily_totals,
        total_weekly_protein: round_to(total_weekly, 1),
        average_daily: round_to(total_weekly / WEEK_DAYS as f64, 1),
        days_goal_met,
        goal,
    }
}
