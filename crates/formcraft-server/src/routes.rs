//! Route table and handlers for `/forms`.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tracing::instrument;

use formcraft_core::Form;

use crate::error::ApiError;
use crate::AppState;

pub const DELETED_MESSAGE: &str = "Form deleted";

#[derive(Debug, Serialize)]
pub struct Deleted {
    pub message: &'static str,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/forms", get(list_forms).post(create_form))
        .route(
            "/forms/{id}",
            get(get_form).put(update_form).delete(delete_form),
        )
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

#[instrument(skip_all)]
async fn list_forms(State(state): State<AppState>) -> Json<Vec<Form>> {
    Json(state.repo.list())
}

#[instrument(skip(state))]
async fn get_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Form>, ApiError> {
    Ok(Json(state.repo.get(&id)?))
}

#[instrument(skip_all)]
async fn create_form(
    State(state): State<AppState>,
    payload: Result<Json<Form>, JsonRejection>,
) -> Result<(StatusCode, Json<Form>), ApiError> {
    let Json(form) = payload?;
    let created = state.repo.create(form)?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[instrument(skip(state, payload))]
async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Form>, JsonRejection>,
) -> Result<Json<Form>, ApiError> {
    let Json(form) = payload?;
    Ok(Json(state.repo.update(&id, form)?))
}

#[instrument(skip(state))]
async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Deleted>, ApiError> {
    state.repo.delete(&id)?;
    Ok(Json(Deleted {
        message: DELETED_MESSAGE,
    }))
}
