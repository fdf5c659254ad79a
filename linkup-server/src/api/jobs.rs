//! Job listing endpoints

use std::sync::Arc;

use axum::{
    Json as JsonExtractor,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};

use linkup::models::{JobId, JobPatch, NewJob};
use linkup::storage::JobFilter;

use crate::{
    api::auth::Actor,
    api::dto::{
        ApiResponse, CreateJobRequest, JobDto, JobQueryParams, StatusResponse, UpdateJobRequest,
    },
    error::ServerResult,
    state::AppState,
};

/// List job listings, newest first
#[utoipa::path(
    get,
    path = "/api/jobs",
    tag = "jobs",
    params(JobQueryParams),
    responses(
        (status = 200, description = "Matching listings", body = ApiResponse<Vec<JobDto>>),
        (status = 400, description = "Unknown job type")
    )
)]
pub async fn list_jobs(
    State(state): State<Arc<AppState>>,
    Query(params): Query<JobQueryParams>,
) -> ServerResult<Json<ApiResponse<Vec<JobDto>>>> {
    let filter = JobFilter::try_from(params)?;
    let jobs = state.network.jobs().list(&filter).await?;
    Ok(Json(ApiResponse::list(
        jobs.into_iter().map(JobDto::from).collect(),
    )))
}

/// Publish a job listing
#[utoipa::path(
    post,
    path = "/api/jobs",
    tag = "jobs",
    request_body = CreateJobRequest,
    responses(
        (status = 201, description = "Job created", body = ApiResponse<JobDto>),
        (status = 400, description = "Job title and company are required"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_job(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    JsonExtractor(request): JsonExtractor<CreateJobRequest>,
) -> ServerResult<(StatusCode, Json<ApiResponse<JobDto>>)> {
    let new_job = NewJob::try_from(request)?;
    let job = state.network.jobs().create(actor.id(), new_job).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::data(job.into()))))
}

/// Get a job listing by ID
#[utoipa::path(
    get,
    path = "/api/jobs/{id}",
    tag = "jobs",
    params(("id" = String, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job found", body = ApiResponse<JobDto>),
        (status = 404, description = "Job not found")
    )
)]
pub async fn get_job(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ServerResult<Json<ApiResponse<JobDto>>> {
    let job = state.network.jobs().get(&JobId::from(id)).await?;
    Ok(Json(ApiResponse::data(job.into())))
}

/// Edit a listing; poster only
#[utoipa::path(
    put,
    path = "/api/jobs/{id}",
    tag = "jobs",
    params(("id" = String, Path, description = "Job ID")),
    request_body = UpdateJobRequest,
    responses(
        (status = 200, description = "Job updated", body = ApiResponse<JobDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the poster"),
        (status = 404, description = "Job not found")
    )
)]
pub async fn update_job(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<String>,
    JsonExtractor(request): JsonExtractor<UpdateJobRequest>,
) -> ServerResult<Json<ApiResponse<JobDto>>> {
    let patch = JobPatch::try_from(request)?;
    let job = state
        .network
        .jobs()
        .update(actor.id(), &JobId::from(id), patch)
        .await?;
    Ok(Json(ApiResponse::data(job.into())))
}

/// Remove a listing; poster only
#[utoipa::path(
    delete,
    path = "/api/jobs/{id}",
    tag = "jobs",
    params(("id" = String, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job deleted successfully", body = StatusResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the poster"),
        (status = 404, description = "Job not found")
    )
)]
pub async fn delete_job(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<String>,
) -> ServerResult<Json<StatusResponse>> {
    state
        .network
        .jobs()
        .delete(actor.id(), &JobId::from(id))
        .await?;
    Ok(Json(StatusResponse::ok("Job deleted successfully")))
}

/// Apply to a listing
#[utoipa::path(
    post,
    path = "/api/jobs/{id}/apply",
    tag = "jobs",
    params(("id" = String, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Application recorded", body = ApiResponse<JobDto>),
        (status = 400, description = "Already applied to this job"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Job not found")
    )
)]
pub async fn apply_to_job(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<String>,
) -> ServerResult<Json<ApiResponse<JobDto>>> {
    let job = state
        .network
        .engagement()
        .apply_to_job(&JobId::from(id), actor.id())
        .await?;
    Ok(Json(
        ApiResponse::data(job.into()).with_message("Application submitted successfully"),
    ))
}
