use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use super::domain::PackageDto;
use super::query::{PackageFilterParams, PackageQuery};
use super::service::{PackageRepository, PackageService};
use crate::error::ServiceError;

/// Router builder exposing `/v1/packages`.
pub fn package_router<R>(service: Arc<PackageService<R>>) -> Router
where
    R: PackageRepository + ?Sized + 'static,
{
    Router::new()
        .route(
            "/v1/packages",
            get(list_handler::<R>)
                .post(add_handler::<R>)
                .put(update_from_body_handler::<R>),
        )
        .route("/v1/packages/filtered", get(filtered_handler::<R>))
        .route(
            "/v1/packages/:package_id",
            get(get_handler::<R>)
                .put(update_handler::<R>)
                .delete(deactivate_handler::<R>),
        )
        .with_state(service)
}

fn respond(result: Result<PackageDto, ServiceError>, status: StatusCode) -> Response {
    match result {
        Ok(package) => (status, Json(package)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn add_handler<R>(
    State(service): State<Arc<PackageService<R>>>,
    Json(dto): Json<PackageDto>,
) -> Response
where
    R: PackageRepository + ?Sized + 'static,
{
    respond(service.add(dto).await, StatusCode::CREATED)
}

pub(crate) async fn get_handler<R>(
    State(service): State<Arc<PackageService<R>>>,
    Path(package_id): Path<Uuid>,
) -> Response
where
    R: PackageRepository + ?Sized + 'static,
{
    respond(service.get(package_id).await, StatusCode::OK)
}

pub(crate) async fn list_handler<R>(State(service): State<Arc<PackageService<R>>>) -> Response
where
    R: PackageRepository + ?Sized + 'static,
{
    match service.list().await {
        Ok(packages) => (StatusCode::OK, Json(packages)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn filtered_handler<R>(
    State(service): State<Arc<PackageService<R>>>,
    Query(params): Query<PackageFilterParams>,
) -> Response
where
    R: PackageRepository + ?Sized + 'static,
{
    let query = match PackageQuery::from_params(params) {
        Ok(query) => query,
        Err(err) => return ServiceError::from(err).into_response(),
    };

    match service.filtered(&query).await {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<PackageService<R>>>,
    Path(package_id): Path<Uuid>,
    Json(dto): Json<PackageDto>,
) -> Response
where
    R: PackageRepository + ?Sized + 'static,
{
    respond(service.update(package_id, dto).await, StatusCode::OK)
}

pub(crate) async fn update_from_body_handler<R>(
    State(service): State<Arc<PackageService<R>>>,
    Json(dto): Json<PackageDto>,
) -> Response
where
    R: PackageRepository + ?Sized + 'static,
{
    respond(service.update_from_body(dto).await, StatusCode::OK)
}

pub(crate) async fn deactivate_handler<R>(
    State(service): State<Arc<PackageService<R>>>,
    Path(package_id): Path<Uuid>,
) -> Response
where
    R: PackageRepository + ?Sized + 'static,
{
    respond(service.deactivate(package_id).await, StatusCode::OK)
}
