use crate::challenge::{activity_map, build_progress, MAX_WINDOW_DAYS};
use crate::errors::AppError;
use crate::heatmap::{build_layout, date_key};
use crate::models::{
    ActivityMap, AppData, ChallengeResponse, ChallengeUpdate, HeatmapLayout, LayoutRequest,
    LogWorkoutRequest, TodayQuery, WorkoutRecord,
};
use crate::state::AppState;
use crate::storage::persist_data;
use crate::streak::{current_streak, longest_streak};
use crate::ui::render_index;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use chrono::{Local, NaiveDate};
use tracing::{debug, info};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let today = today();
    let data = state.data.lock().await;
    let layout = build_layout(&activity_map(&data.workouts), today);
    let challenge = challenge_response(&data, today);
    Html(render_index(&layout, &challenge))
}

pub async fn get_heatmap(
    State(state): State<AppState>,
    Query(query): Query<TodayQuery>,
) -> Result<Json<HeatmapLayout>, AppError> {
    let today = resolve_today(query.today.as_deref())?;
    let data = state.data.lock().await;
    let layout = build_layout(&activity_map(&data.workouts), today);
    debug!(columns = layout.column_count, %today, "built heatmap");
    Ok(Json(layout))
}

pub async fn layout_heatmap(Json(payload): Json<LayoutRequest>) -> Result<Json<HeatmapLayout>, AppError> {
    let today = resolve_today(payload.today.as_deref())?;
    Ok(Json(build_layout(&payload.activity, today)))
}

pub async fn get_activity(State(state): State<AppState>) -> Json<ActivityMap> {
    let data = state.data.lock().await;
    Json(activity_map(&data.workouts))
}

pub async fn log_workout(
    State(state): State<AppState>,
    Json(payload): Json<LogWorkoutRequest>,
) -> Result<(StatusCode, Json<WorkoutRecord>), AppError> {
    let date = resolve_today(payload.date.as_deref())?;
    let record = WorkoutRecord {
        date: date_key(date),
        completed: payload.completed.unwrap_or(true),
    };

    let mut data = state.data.lock().await;
    data.workouts.push(record.clone());
    persist_data(&state.data_path, &data).await?;

    info!(date = %record.date, completed = record.completed, "logged workout");
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn get_challenge(
    State(state): State<AppState>,
    Query(query): Query<TodayQuery>,
) -> Result<Json<ChallengeResponse>, AppError> {
    let today = resolve_today(query.today.as_deref())?;
    let data = state.data.lock().await;
    Ok(Json(challenge_response(&data, today)))
}

pub async fn update_challenge(
    State(state): State<AppState>,
    Json(payload): Json<ChallengeUpdate>,
) -> Result<Json<ChallengeResponse>, AppError> {
    if let Some(window_days) = payload.window_days {
        if !(1..=MAX_WINDOW_DAYS).contains(&window_days) {
            return Err(AppError::bad_request(format!(
                "window_days must be between 1 and {MAX_WINDOW_DAYS}"
            )));
        }
    }

    let mut data = state.data.lock().await;
    let challenge = &mut data.challenge;
    challenge.goal = payload.goal;
    if let Some(window_days) = payload.window_days {
        challenge.window_days = window_days;
    }
    if let Some(label) = payload.label {
        challenge.label = label.trim().to_string();
    }
    persist_data(&state.data_path, &data).await?;

    info!(goal = ?data.challenge.goal, window_days = data.challenge.window_days, "updated challenge");
    Ok(Json(challenge_response(&data, today())))
}

pub async fn clear_challenge(State(state): State<AppState>) -> Result<Json<ChallengeResponse>, AppError> {
    let mut data = state.data.lock().await;
    data.challenge.goal = None;
    persist_data(&state.data_path, &data).await?;

    info!("cleared challenge");
    Ok(Json(challenge_response(&data, today())))
}

fn challenge_response(data: &AppData, today: NaiveDate) -> ChallengeResponse {
    let activity = activity_map(&data.workouts);
    ChallengeResponse {
        today: date_key(today),
        progress: build_progress(&data.challenge, &data.workouts, today),
        current_streak: current_streak(&activity, today),
        longest_streak: longest_streak(&activity),
    }
}

fn resolve_today(value: Option<&str>) -> Result<NaiveDate, AppError> {
    match value.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => Ok(NaiveDate::parse_from_str(value, "%Y-%m-%d")?),
        None => Ok(today()),
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
