//! Calendar heatmap layout.
//!
//! Turns a sparse [`ActivityMap`] and a caller supplied "today" into a
//! week-column / weekday-row grid covering the trailing twelve calendar
//! months. Nothing in here reads the clock.

use crate::models::{
    ActivityMap, ColorBucket, DayCell, GridSlot, HeatmapDay, HeatmapGrid, HeatmapLayout,
    MonthLabelSpan,
};
use chrono::{Datelike, Months, NaiveDate};

pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tues", "Wed", "Thurs", "Fri", "Sat"];

const DAYS_PER_WEEK: usize = 7;
const WINDOW_MONTHS: u32 = 12;

/// First day of the month eleven months back through the last day of
/// `today`'s month. `None` only at the edges of the representable calendar.
pub fn window_bounds(today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let month_start = today.with_day(1)?;
    let start = month_start.checked_sub_months(Months::new(WINDOW_MONTHS - 1))?;
    let end = month_start.checked_add_months(Months::new(1))?.pred_opt()?;
    Some((start, end))
}

/// Every calendar date of the display window, in order.
pub fn compute_window(today: NaiveDate) -> Vec<NaiveDate> {
    let Some((start, end)) = window_bounds(today) else {
        return Vec::new();
    };
    start.iter_days().take_while(|date| *date <= end).collect()
}

pub fn short_month_label(date: NaiveDate) -> String {
    date.format("%b").to_string()
}

pub fn build_day_cells(dates: &[NaiveDate], activity: &ActivityMap, today: NaiveDate) -> Vec<DayCell> {
    build_day_cells_with(dates, activity, today, short_month_label)
}

/// Like [`build_day_cells`] with a caller chosen month label.
///
/// Dates after `today` always get a zero count, whatever the map holds.
pub fn build_day_cells_with<F>(
    dates: &[NaiveDate],
    activity: &ActivityMap,
    today: NaiveDate,
    month_label: F,
) -> Vec<DayCell>
where
    F: Fn(NaiveDate) -> String,
{
    dates
        .iter()
        .map(|&date| {
            let key = date_key(date);
            let count = if date > today {
                0
            } else {
                activity.get(&key).copied().unwrap_or(0)
            };
            DayCell {
                month: month_label(date),
                count,
                weekday_index: date.weekday().num_days_from_sunday(),
                date: key,
            }
        })
        .collect()
}

pub fn build_grid(day_cells: &[DayCell]) -> HeatmapGrid {
    let Some(first) = day_cells.first() else {
        return HeatmapGrid::default();
    };

    let offset = first.weekday_index as usize % DAYS_PER_WEEK;
    let total = day_cells.len();
    let column_count = (offset + total).div_ceil(DAYS_PER_WEEK);

    let slots = (0..column_count * DAYS_PER_WEEK)
        .map(|slot| GridSlot {
            column: slot / DAYS_PER_WEEK,
            row: slot % DAYS_PER_WEEK,
            day: slot_day(slot, offset, total),
        })
        .collect();

    let month_spans = (0..column_count)
        .filter_map(|column| {
            (0..DAYS_PER_WEEK)
                .find_map(|row| slot_day(column * DAYS_PER_WEEK + row, offset, total))
                .map(|index| (column, day_cells[index].month.as_str()))
        })
        .fold(SpanFold::default(), SpanFold::push)
        .finish();

    HeatmapGrid {
        column_count,
        slots,
        month_spans,
    }
}

/// Highest count in the window, never below one.
pub fn max_count(day_cells: &[DayCell]) -> u64 {
    day_cells
        .iter()
        .map(|cell| cell.count)
        .max()
        .unwrap_or(0)
        .max(1)
}

pub fn color_bucket(count: u64, max_count: u64) -> ColorBucket {
    if count == 0 {
        return ColorBucket::Empty;
    }
    let ratio = count as f64 / max_count.max(1) as f64;
    if ratio < 0.25 {
        ColorBucket::Low
    } else if ratio < 0.5 {
        ColorBucket::Mid
    } else if ratio < 0.75 {
        ColorBucket::High
    } else {
        ColorBucket::Max
    }
}

pub fn build_layout(activity: &ActivityMap, today: NaiveDate) -> HeatmapLayout {
    let dates = compute_window(today);
    let cells = build_day_cells(&dates, activity, today);
    let grid = build_grid(&cells);
    let max = max_count(&cells);

    let days = cells
        .into_iter()
        .map(|cell| HeatmapDay {
            bucket: color_bucket(cell.count, max),
            cell,
        })
        .collect();

    HeatmapLayout {
        today: date_key(today),
        start: dates.first().copied().map(date_key),
        end: dates.last().copied().map(date_key),
        max_count: max,
        column_count: grid.column_count,
        days,
        slots: grid.slots,
        month_spans: grid.month_spans,
    }
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn slot_day(slot: usize, offset: usize, total: usize) -> Option<usize> {
    (slot >= offset && slot - offset < total).then(|| slot - offset)
}

#[derive(Default)]
struct SpanFold {
    current: Option<MonthLabelSpan>,
    completed: Vec<MonthLabelSpan>,
}

impl SpanFold {
    fn push(mut self, (column, month): (usize, &str)) -> Self {
        if let Some(span) = self.current.as_mut().filter(|span| span.month == month) {
            span.column_span += 1;
            return self;
        }
        let next = MonthLabelSpan {
            month: month.to_string(),
            start_column: column,
            column_span: 1,
        };
        if let Some(done) = self.current.replace(next) {
            self.completed.push(done);
        }
        self
    }

    fn finish(mut self) -> Vec<MonthLabelSpan> {
        self.completed.extend(self.current);
        self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn window_is_contiguous_and_spans_twelve_months() {
        for year in 2019..=2026 {
            for month in 1..=12 {
                for day in [1, 15, 28] {
                    let today = date(year, month, day);
                    let window = compute_window(today);
                    assert!((337..=366).contains(&window.len()), "{today}: {}", window.len());

                    let first = window[0];
                    let last = *window.last().unwrap();
                    assert_eq!(first.day(), 1);
                    assert_eq!(last.month(), today.month());
                    assert_eq!(last.year(), today.year());
                    assert_ne!((last + Duration::days(1)).month(), today.month());
                    assert!(window.windows(2).all(|pair| pair[1] - pair[0] == Duration::days(1)));
                }
            }
        }
    }

    #[test]
    fn window_rolls_back_across_year_boundary() {
        let window = compute_window(date(2025, 1, 20));
        assert_eq!(window[0], date(2024, 2, 1));
        assert_eq!(*window.last().unwrap(), date(2025, 1, 31));
        assert!(window.contains(&date(2024, 2, 29)));
        assert_eq!(window.len(), 366);
    }

    #[test]
    fn day_cells_cover_window_once() {
        let today = date(2024, 6, 15);
        let dates = compute_window(today);
        let cells = build_day_cells(&dates, &ActivityMap::new(), today);
        assert_eq!(cells.len(), dates.len());
        assert_eq!(cells[0].date, "2023-07-01");
        assert_eq!(cells.last().unwrap().date, "2024-06-30");
        let mut keys: Vec<_> = cells.iter().map(|cell| cell.date.clone()).collect();
        keys.dedup();
        assert_eq!(keys.len(), cells.len());
    }

    #[test]
    fn future_days_are_zeroed() {
        let today = date(2024, 6, 15);
        let mut activity = ActivityMap::new();
        activity.insert("2024-06-20".into(), 5);
        activity.insert("2024-06-15".into(), 2);
        activity.insert("2020-01-01".into(), 9);

        let cells = build_day_cells(&compute_window(today), &activity, today);
        let find = |key: &str| cells.iter().find(|cell| cell.date == key).unwrap();
        assert_eq!(find("2024-06-20").count, 0);
        assert_eq!(find("2024-06-15").count, 2);
        assert_eq!(max_count(&cells), 2);
    }

    #[test]
    fn day_cell_fields() {
        let today = date(2024, 6, 15);
        let cells = build_day_cells(&[date(2024, 1, 7)], &ActivityMap::new(), today);
        assert_eq!(cells[0].month, "Jan");
        assert_eq!(cells[0].weekday_index, 0);
    }

    #[test]
    fn month_label_is_injectable() {
        let today = date(2024, 6, 15);
        let dates = compute_window(today);
        let cells = build_day_cells_with(&dates, &ActivityMap::new(), today, |d| {
            format!("{}/{}", d.month(), d.year())
        });
        let grid = build_grid(&cells);
        assert_eq!(grid.month_spans[0].month, "7/2023");
        assert_eq!(grid.month_spans.last().unwrap().month, "6/2024");
    }

    #[test]
    fn first_day_lands_on_its_weekday_row() {
        // 2024-05-01 is a Wednesday.
        let today = date(2025, 4, 10);
        let cells = build_day_cells(&compute_window(today), &ActivityMap::new(), today);
        assert_eq!(cells[0].date, "2024-05-01");
        assert_eq!(cells[0].weekday_index, 3);

        let grid = build_grid(&cells);
        for row in 0..3 {
            assert_eq!(grid.slots[row], GridSlot { column: 0, row, day: None });
        }
        assert_eq!(grid.slots[3], GridSlot { column: 0, row: 3, day: Some(0) });
    }

    #[test]
    fn grid_dimensions_and_trailing_padding() {
        let today = date(2024, 6, 15);
        let cells = build_day_cells(&compute_window(today), &ActivityMap::new(), today);
        let grid = build_grid(&cells);

        // Saturday start: 6 + 366 slots.
        assert_eq!(grid.column_count, 54);
        assert_eq!(grid.slots.len(), 54 * 7);
        let occupied: Vec<_> = grid.slots.iter().filter_map(|slot| slot.day).collect();
        assert_eq!(occupied, (0..cells.len()).collect::<Vec<_>>());
        assert!(grid.slots[6 + 366..].iter().all(|slot| slot.day.is_none()));
        for slot in grid.slots.iter().filter(|slot| slot.day.is_some()) {
            let cell = &cells[slot.day.unwrap()];
            assert_eq!(cell.weekday_index as usize, slot.row);
        }
    }

    #[test]
    fn month_spans_are_ordered_and_cover_columns() {
        let today = date(2024, 6, 15);
        let cells = build_day_cells(&compute_window(today), &ActivityMap::new(), today);
        let grid = build_grid(&cells);
        let spans = &grid.month_spans;

        assert_eq!(spans.len(), 12);
        assert_eq!(spans[0].month, "Jul");
        assert_eq!(spans[0].start_column, 0);
        assert_eq!(spans[0].column_span, 6);
        assert_eq!(spans[0].display_column(), 1);
        assert_eq!(spans[1].month, "Aug");
        assert_eq!(spans[1].start_column, 6);
        assert_eq!(spans.last().unwrap().month, "Jun");

        let total: usize = spans.iter().map(|span| span.column_span).sum();
        assert_eq!(total, grid.column_count);
        for pair in spans.windows(2) {
            assert_eq!(pair[0].start_column + pair[0].column_span, pair[1].start_column);
        }
    }

    #[test]
    fn build_grid_is_deterministic() {
        let today = date(2023, 3, 2);
        let mut activity = ActivityMap::new();
        activity.insert("2023-02-14".into(), 3);
        let cells = build_day_cells(&compute_window(today), &activity, today);
        assert_eq!(build_grid(&cells), build_grid(&cells));
    }

    #[test]
    fn empty_input_yields_empty_grid() {
        let grid = build_grid(&[]);
        assert_eq!(grid.column_count, 0);
        assert!(grid.slots.is_empty());
        assert!(grid.month_spans.is_empty());
        assert_eq!(max_count(&[]), 1);
    }

    #[test]
    fn color_bucket_boundaries() {
        assert_eq!(color_bucket(0, 100), ColorBucket::Empty);
        assert_eq!(color_bucket(24, 100), ColorBucket::Low);
        assert_eq!(color_bucket(25, 100), ColorBucket::Mid);
        assert_eq!(color_bucket(49, 100), ColorBucket::Mid);
        assert_eq!(color_bucket(50, 100), ColorBucket::High);
        assert_eq!(color_bucket(74, 100), ColorBucket::High);
        assert_eq!(color_bucket(75, 100), ColorBucket::Max);
        assert_eq!(color_bucket(100, 100), ColorBucket::Max);
        assert_eq!(color_bucket(3, 0), ColorBucket::Max);
    }

    #[test]
    fn empty_map_layout_is_all_empty() {
        let layout = build_layout(&ActivityMap::new(), date(2024, 2, 29));
        assert_eq!(layout.max_count, 1);
        assert_eq!(layout.start.as_deref(), Some("2023-03-01"));
        assert_eq!(layout.end.as_deref(), Some("2024-02-29"));
        assert!(layout.days.iter().all(|day| day.cell.count == 0));
        assert!(layout.days.iter().all(|day| day.bucket == ColorBucket::Empty));
        assert_eq!(layout.slots.len(), layout.column_count * 7);
    }

    #[test]
    fn layout_buckets_relative_to_window_max() {
        let today = date(2024, 6, 15);
        let mut activity = ActivityMap::new();
        activity.insert("2024-06-01".into(), 4);
        activity.insert("2024-06-02".into(), 1);
        activity.insert("2024-06-03".into(), 2);
        let layout = build_layout(&activity, today);
        let bucket = |key: &str| {
            layout
                .days
                .iter()
                .find(|day| day.cell.date == key)
                .map(|day| day.bucket)
                .unwrap()
        };
        assert_eq!(layout.max_count, 4);
        assert_eq!(bucket("2024-06-01"), ColorBucket::Max);
        assert_eq!(bucket("2024-06-02"), ColorBucket::Mid);
        assert_eq!(bucket("2024-06-03"), ColorBucket::High);
        assert_eq!(bucket("2024-06-04"), ColorBucket::Empty);
    }
}
