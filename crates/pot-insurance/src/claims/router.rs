use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use super::domain::{ClaimDto, ClaimEntity};
use super::service::ClaimService;
use crate::repository::Repository;

/// Router builder exposing `/v1/claims`.
pub fn claim_router<R>(service: Arc<ClaimService<R>>) -> Router
where
    R: Repository<ClaimEntity> + ?Sized + 'static,
{
    Router::new()
        .route("/v1/claims", get(list_handler::<R>).post(add_handler::<R>))
        .route(
            "/v1/claims/:claim_id",
            get(get_handler::<R>)
                .put(update_handler::<R>)
                .delete(deactivate_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn add_handler<R>(
    State(service): State<Arc<ClaimService<R>>>,
    Json(dto): Json<ClaimDto>,
) -> Response
where
    R: Repository<ClaimEntity> + ?Sized + 'static,
{
    match service.add(dto).await {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn get_handler<R>(
    State(service): State<Arc<ClaimService<R>>>,
    Path(claim_id): Path<Uuid>,
) -> Response
where
    R: Repository<ClaimEntity> + ?Sized + 'static,
{
    match service.get(claim_id).await {
        Ok(claim) => (StatusCode::OK, Json(claim)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn list_handler<R>(State(service): State<Arc<ClaimService<R>>>) -> Response
where
    R: Repository<ClaimEntity> + ?Sized + 'static,
{
    match service.list().await {
        Ok(claims) => (StatusCode::OK, Json(claims)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<ClaimService<R>>>,
    Path(claim_id): Path<Uuid>,
    Json(dto): Json<ClaimDto>,
) -> Response
where
    R: Repository<ClaimEntity> + ?Sized + 'static,
{
    match service.update(claim_id, dto).await {
        Ok(updated) => (StatusCode::OK, Json(updated)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn deactivate_handler<R>(
    State(service): State<Arc<ClaimService<R>>>,
    Path(claim_id): Path<Uuid>,
) -> Response
where
    R: Repository<ClaimEntity> + ?Sized + 'static,
{
    match service.deactivate(claim_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}
