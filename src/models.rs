use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sparse `YYYY-MM-DD -> completed workouts` mapping. Missing dates count as zero.
pub type ActivityMap = BTreeMap<String, u64>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkoutRecord {
    pub date: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChallengeSettings {
    pub goal: Option<u32>,
    #[serde(default = "default_window_days")]
    pub window_days: u32,
    #[serde(default)]
    pub label: String,
}

impl Default for ChallengeSettings {
    fn default() -> Self {
        Self {
            goal: None,
            window_days: default_window_days(),
            label: String::new(),
        }
    }
}

pub fn default_window_days() -> u32 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    #[serde(default)]
    pub workouts: Vec<WorkoutRecord>,
    #[serde(default)]
    pub challenge: ChallengeSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayCell {
    pub date: String,
    pub month: String,
    pub count: u64,
    pub weekday_index: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GridSlot {
    pub column: usize,
    pub row: usize,
    /// Index into the day cell sequence, `None` for padding.
    pub day: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthLabelSpan {
    pub month: String,
    pub start_column: usize,
    pub column_span: usize,
}

impl MonthLabelSpan {
    /// Column in a grid whose first column holds the weekday labels.
    pub fn display_column(&self) -> usize {
        self.start_column + 1
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct HeatmapGrid {
    pub column_count: usize,
    pub slots: Vec<GridSlot>,
    pub month_spans: Vec<MonthLabelSpan>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ColorBucket {
    Empty,
    Low,
    Mid,
    High,
    Max,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HeatmapDay {
    #[serde(flatten)]
    pub cell: DayCell,
    pub bucket: ColorBucket,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HeatmapLayout {
    pub today: String,
    pub start: Option<String>,
    pub end: Option<String>,
    pub max_count: u64,
    pub column_count: usize,
    pub days: Vec<HeatmapDay>,
    pub slots: Vec<GridSlot>,
    pub month_spans: Vec<MonthLabelSpan>,
}

#[derive(Debug, Deserialize)]
pub struct LayoutRequest {
    #[serde(default)]
    pub activity: ActivityMap,
    pub today: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TodayQuery {
    pub today: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LogWorkoutRequest {
    pub date: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ChallengeUpdate {
    pub goal: Option<u32>,
    pub window_days: Option<u32>,
    pub label: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChallengeProgress {
    pub goal: Option<u32>,
    pub window_days: u32,
    pub label: String,
    pub completed: u32,
    pub percent: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChallengeResponse {
    pub today: String,
    pub progress: ChallengeProgress,
    pub current_streak: u32,
    pub longest_streak: u32,
}
