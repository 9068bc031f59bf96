//! HTTP handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::error::{ApiError, ApiResult};
use super::state::AppState;
use crate::auth::CurrentUser;
use crate::job::{Job, JobPayload};
use crate::user::{LoginRequest, RegisterRequest};

/// Body returned by both registration and login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct ListJobsQuery {
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub id: String,
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// POST /auth/register
#[instrument(skip(state, request), fields(email = %request.email))]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let user = state.users.register(request).await?;
    let token = state.auth.issue_token(&user.id, &user.email)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user_id: user.id,
            name: user.name,
            email: user.email,
            token,
        }),
    ))
}

/// POST /auth/login
#[instrument(skip(state, request), fields(email = %request.email))]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(ApiError::BadRequest(
            "Email and password are required".to_string(),
        ));
    }

    // One message for unknown email and wrong password alike
    let user = state
        .users
        .verify_credentials(&request.email, &request.password)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    let token = state.auth.issue_token(&user.id, &user.email)?;

    Ok(Json(AuthResponse {
        user_id: user.id,
        name: user.name,
        email: user.email,
        token,
    }))
}

/// GET /jobs
#[instrument(skip(state, user), fields(user_id = %user.id()))]
pub async fn list_jobs(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<ListJobsQuery>,
) -> ApiResult<Json<Vec<Job>>> {
    let jobs = state.jobs.list(user.id(), query.status.as_deref()).await?;
    Ok(Json(jobs))
}

/// POST /jobs
#[instrument(skip(state, user, payload), fields(user_id = %user.id()))]
pub async fn create_job(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<JobPayload>,
) -> ApiResult<(StatusCode, Json<Job>)> {
    let job = state.jobs.create(user.id(), payload).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /jobs/{id}
#[instrument(skip(state, user), fields(user_id = %user.id()))]
pub async fn get_job(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Job>> {
    let job = state.jobs.get(user.id(), &id).await?;
    Ok(Json(job))
}

/// PUT /jobs/{id}
#[instrument(skip(state, user, payload), fields(user_id = %user.id()))]
pub async fn update_job(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<JobPayload>,
) -> ApiResult<Json<Job>> {
    let job = state.jobs.update(user.id(), &id, payload).await?;
    Ok(Json(job))
}

/// DELETE /jobs/{id}
#[instrument(skip(state, user), fields(user_id = %user.id()))]
pub async fn delete_job(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let job = state.jobs.delete(user.id(), &id).await?;
    Ok(Json(DeleteResponse {
        message: "Job deleted".to_string(),
        id: job.id,
    }))
}
