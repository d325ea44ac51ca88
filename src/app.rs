use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/check", post(handlers::check_form))
        .route("/reset", post(handlers::reset_form))
        .route("/report.txt", get(handlers::download_report))
        .route("/api/today", get(handlers::get_today))
        .route("/api/toggle", post(handlers::toggle))
        .route("/api/reset", post(handlers::reset))
        .route("/api/summary", get(handlers::get_summary))
        .route("/api/days", get(handlers::get_days))
        .route("/api/history", get(handlers::get_history))
        .route("/api/report", get(handlers::get_report))
        .route("/api/reminders", get(handlers::get_reminders))
        .with_state(state)
}
