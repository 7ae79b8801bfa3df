use crate::heatmap::date_key;
use crate::models::{ActivityMap, ChallengeProgress, ChallengeSettings, WorkoutRecord};
use chrono::{Days, NaiveDate};

pub const MAX_WINDOW_DAYS: u32 = 3650;

/// Completed workouts per day, the shape the heatmap consumes.
///
/// Keys are re-rendered as zero padded `YYYY-MM-DD`; unparseable dates are skipped.
pub fn activity_map(workouts: &[WorkoutRecord]) -> ActivityMap {
    let mut activity = ActivityMap::new();
    for date in completed_dates(workouts) {
        let entry = activity.entry(date_key(date)).or_insert(0);
        *entry = entry.saturating_add(1);
    }
    activity
}

pub fn completed_in_window(workouts: &[WorkoutRecord], today: NaiveDate, window_days: u32) -> u32 {
    let cutoff = today
        .checked_sub_days(Days::new(window_days.into()))
        .unwrap_or(NaiveDate::MIN);
    let count = completed_dates(workouts)
        .filter(|date| *date >= cutoff && *date <= today)
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

fn completed_dates(workouts: &[WorkoutRecord]) -> impl Iterator<Item = NaiveDate> + '_ {
    workouts
        .iter()
        .filter(|workout| workout.completed)
        .filter_map(|workout| NaiveDate::parse_from_str(workout.date.trim(), "%Y-%m-%d").ok())
}

pub fn progress_percent(completed: u32, goal: Option<u32>) -> u32 {
    match goal {
        Some(goal) if goal > 0 => {
            let percent = (f64::from(completed) / f64::from(goal) * 100.0).round();
            percent.min(100.0) as u32
        }
        _ => 0,
    }
}

pub fn build_progress(
    settings: &ChallengeSettings,
    workouts: &[WorkoutRecord],
    today: NaiveDate,
) -> ChallengeProgress {
    let completed = completed_in_window(workouts, today, settings.window_days);
    ChallengeProgress {
        goal: settings.goal.filter(|goal| *goal > 0),
        window_days: settings.window_days,
        label: settings.label.clone(),
        completed,
        percent: progress_percent(completed, settings.goal),
    }
}
