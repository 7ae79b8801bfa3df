use crate::heatmap::date_key;
use crate::models::ActivityMap;
use chrono::{Duration, NaiveDate};
use std::collections::BTreeSet;

/// Consecutive active days ending today, or ending yesterday when nothing
/// has been logged today yet.
pub fn current_streak(activity: &ActivityMap, today: NaiveDate) -> u32 {
    let active = |date: NaiveDate| activity.get(&date_key(date)).is_some_and(|count| *count > 0);

    let mut cursor = if active(today) {
        today
    } else {
        match today.pred_opt() {
            Some(yesterday) => yesterday,
            None => return 0,
        }
    };
    let mut streak = 0;
    while active(cursor) {
        streak += 1;
        match cursor.pred_opt() {
            Some(previous) => cursor = previous,
            None => break,
        }
    }
    streak
}

pub fn longest_streak(activity: &ActivityMap) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;

    let dates: BTreeSet<NaiveDate> = activity
        .iter()
        .filter(|(_, count)| **count > 0)
        .filter_map(|(key, _)| NaiveDate::parse_from_str(key, "%Y-%m-%d").ok())
        .collect();

    for date in dates {
        run = match previous {
            Some(prev) if date - prev == Duration::days(1) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(date);
    }
    longest
}
