//! JSON endpoints under `/api`.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::db::Database;
use crate::error::ApiError;
use crate::models::{Day, NewDay, NewTask, RowId, ScheduledDay, Task, TaskFields};
use crate::AppState;

type ApiResult<T> = Result<Json<T>, ApiError>;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/days", get(list_days).post(create_day))
        .route("/days/:id", patch(update_day).delete(delete_day))
        .route("/tasks", post(create_task))
        .route("/tasks/:id", patch(update_task).delete(delete_task))
}

fn open(state: &AppState) -> Result<Database, ApiError> {
    Ok(Database::connect(&state.db_path)?)
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

fn row_id(path: Result<Path<RowId>, PathRejection>) -> Result<RowId, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

async fn list_days(State(state): State<AppState>) -> ApiResult<Vec<ScheduledDay>> {
    let schedule = open(&state)?.list_schedule()?;
    Ok(Json(schedule))
}

async fn create_day(
    State(state): State<AppState>,
    payload: Result<Json<NewDay>, JsonRejection>,
) -> ApiResult<Day> {
    let new = body(payload)?;
    new.validate()?;
    let day = open(&state)?.add_day(&new)?;
    tracing::info!(id = day.id, date = %day.date, "day created");
    Ok(Json(day))
}

async fn update_day(
    State(state): State<AppState>,
    id: Result<Path<RowId>, PathRejection>,
    payload: Result<Json<NewDay>, JsonRejection>,
) -> ApiResult<Day> {
    let id = row_id(id)?;
    let changes = body(payload)?;
    changes.validate()?;
    let day = open(&state)?
        .update_day(id, &changes)?
        .ok_or(ApiError::NotFound("Day"))?;
    tracing::info!(id, "day updated");
    Ok(Json(day))
}

async fn delete_day(
    State(state): State<AppState>,
    id: Result<Path<RowId>, PathRejection>,
) -> ApiResult<Value> {
    let id = row_id(id)?;
    if !open(&state)?.delete_day(id)? {
        return Err(ApiError::NotFound("Day"));
    }
    tracing::info!(id, "day deleted");
    Ok(Json(json!({ "message": "Day deleted" })))
}

async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<NewTask>, JsonRejection>,
) -> ApiResult<Task> {
    let new = body(payload)?;
    new.fields.validate()?;
    let task = open(&state)?.add_task(&new)?;
    tracing::info!(id = task.id, day_id = task.day_id, "task created");
    Ok(Json(task))
}

async fn update_task(
    State(state): State<AppState>,
    id: Result<Path<RowId>, PathRejection>,
    payload: Result<Json<TaskFields>, JsonRejection>,
) -> ApiResult<Task> {
    let id = row_id(id)?;
    let changes = body(payload)?;
    changes.validate()?;
    let task = open(&state)?
        .update_task(id, &changes)?
        .ok_or(ApiError::NotFound("Task"))?;
    tracing::info!(id, "task updated");
    Ok(Json(task))
}

async fn delete_task(
    State(state): State<AppState>,
    id: Result<Path<RowId>, PathRejection>,
) -> ApiResult<Value> {
    let id = row_id(id)?;
    if !open(&state)?.delete_task(id)? {
        return Err(ApiError::NotFound("Task"));
    }
    tracing::info!(id, "task deleted");
    Ok(Json(json!({ "message": "Task deleted" })))
}
