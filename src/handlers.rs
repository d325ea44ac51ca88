use crate::day::{date_key, day_view, reset_day, toggle_task, today_key};
use crate::errors::AppError;
use crate::models::{
    CheckForm, DateRangeQuery, DayView, ReportRow, ResetRequest, TaskName, TaskSummary,
    ToggleRequest,
};
use crate::reminders::{default_schedule, Reminder};
use crate::report::{render_report_text, report_rows};
use crate::state::AppState;
use crate::stats::{filtered_dates, previous_days, weekly_summary};
use crate::ui::render_index;
use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse, Redirect},
    Form, Json,
};
use chrono::NaiveDate;
use tracing::info;

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let date = open_today(&state).await?;
    let (view, summary) = state
        .read(|store| (day_view(store, &date), weekly_summary(store)))
        .await;
    Ok(Html(render_index(&view, &summary)))
}

pub async fn get_today(State(state): State<AppState>) -> Result<Json<DayView>, AppError> {
    let date = open_today(&state).await?;
    Ok(Json(state.read(|store| day_view(store, &date)).await))
}

pub async fn toggle(
    State(state): State<AppState>,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<DayView>, AppError> {
    let task: TaskName = payload.task.parse()?;
    let date = resolve_date(payload.date)?;
    Ok(Json(apply_toggle(&state, date, task).await?))
}

pub async fn reset(
    State(state): State<AppState>,
    Json(payload): Json<ResetRequest>,
) -> Result<Json<DayView>, AppError> {
    let date = resolve_date(payload.date)?;
    Ok(Json(apply_reset(&state, date).await?))
}

pub async fn check_form(
    State(state): State<AppState>,
    Form(form): Form<CheckForm>,
) -> Result<Redirect, AppError> {
    let task: TaskName = form.task.parse()?;
    apply_toggle(&state, today_key(), task).await?;
    Ok(Redirect::to("/"))
}

pub async fn reset_form(State(state): State<AppState>) -> Result<Redirect, AppError> {
    apply_reset(&state, today_key()).await?;
    Ok(Redirect::to("/"))
}

pub async fn get_summary(State(state): State<AppState>) -> Json<Vec<TaskSummary>> {
    Json(state.read(weekly_summary).await)
}

pub async fn get_days(
    State(state): State<AppState>,
    Query(range): Query<DateRangeQuery>,
) -> Result<Json<Vec<DayView>>, AppError> {
    let start = parse_bound(range.start)?;
    let end = parse_bound(range.end)?;
    let today = today_key();

    let views: Vec<DayView> = state
        .read(|store| {
            filtered_dates(store, &today, start.as_deref(), end.as_deref())
                .iter()
                .map(|date| day_view(store, date))
                .collect()
        })
        .await;
    Ok(Json(views))
}

pub async fn get_history(State(state): State<AppState>) -> Json<Vec<DayView>> {
    let today = today_key();
    let views: Vec<DayView> = state
        .read(|store| {
            previous_days(store, &today)
                .iter()
                .map(|date| day_view(store, date))
                .collect()
        })
        .await;
    Json(views)
}

pub async fn get_report(State(state): State<AppState>) -> Json<Vec<ReportRow>> {
    Json(state.read(report_rows).await)
}

pub async fn download_report(State(state): State<AppState>) -> impl IntoResponse {
    let rows = state.read(report_rows).await;
    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"hair-care-report.txt\"",
            ),
        ],
        render_report_text(&rows),
    )
}

pub async fn get_reminders() -> Json<Vec<Reminder>> {
    Json(default_schedule())
}

/// Today's key, with its record created on first sight.
async fn open_today(state: &AppState) -> Result<String, AppError> {
    let date = today_key();
    if state.ensure_day(&date).await? {
        info!(%date, "started a new day");
    }
    Ok(date)
}

async fn apply_toggle(
    state: &AppState,
    date: String,
    task: TaskName,
) -> Result<DayView, AppError> {
    let (done, view) = state
        .update(|store| {
            let done = toggle_task(store, &date, task);
            (done, day_view(store, &date))
        })
        .await?;
    info!(%date, %task, done, "task toggled");
    Ok(view)
}

async fn apply_reset(state: &AppState, date: String) -> Result<DayView, AppError> {
    let view = state
        .update(|store| {
            reset_day(store, &date);
            day_view(store, &date)
        })
        .await?;
    info!(%date, "day reset");
    Ok(view)
}

/// Defaults to today when no date is given.
fn resolve_date(date: Option<String>) -> Result<String, AppError> {
    Ok(parse_bound(date)?.unwrap_or_else(today_key))
}

fn parse_bound(value: Option<String>) -> Result<Option<String>, AppError> {
    let Some(value) = value.filter(|value| !value.trim().is_empty()) else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map(|date| Some(date_key(date)))
        .map_err(|_| AppError::invalid_date(&value))
}
