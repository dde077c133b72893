use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use super::domain::{EmployeeDto, EmployeeEntity};
use super::service::EmployeeService;
use crate::repository::Repository;

/// Router builder exposing `/v1/employees`.
pub fn employee_router<R>(service: Arc<EmployeeService<R>>) -> Router
where
    R: Repository<EmployeeEntity> + ?Sized + 'static,
{
    Router::new()
        .route(
            "/v1/employees",
            get(list_handler::<R>).post(add_handler::<R>),
        )
        .route(
            "/v1/employees/:employee_id",
            get(get_handler::<R>)
                .put(update_handler::<R>)
                .delete(deactivate_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn add_handler<R>(
    State(service): State<Arc<EmployeeService<R>>>,
    Json(dto): Json<EmployeeDto>,
) -> Response
where
    R: Repository<EmployeeEntity> + ?Sized + 'static,
{
    match service.add(dto).await {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn get_handler<R>(
    State(service): State<Arc<EmployeeService<R>>>,
    Path(employee_id): Path<Uuid>,
) -> Response
where
    R: Repository<EmployeeEntity> + ?Sized + 'static,
{
    match service.get(employee_id).await {
        Ok(employee) => (StatusCode::OK, Json(employee)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn list_handler<R>(State(service): State<Arc<EmployeeService<R>>>) -> Response
where
    R: Repository<EmployeeEntity> + ?Sized + 'static,
{
    match service.list().await {
        Ok(employees) => (StatusCode::OK, Json(employees)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<EmployeeService<R>>>,
    Path(employee_id): Path<Uuid>,
    Json(dto): Json<EmployeeDto>,
) -> Response
where
    R: Repository<EmployeeEntity> + ?Sized + 'static,
{
    match service.update(employee_id, dto).await {
        Ok(updated) => (StatusCode::OK, Json(updated)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn deactivate_handler<R>(
    State(service): State<Arc<EmployeeService<R>>>,
    Path(employee_id): Path<Uuid>,
) -> Response
where
    R: Repository<EmployeeEntity> + ?Sized + 'static,
{
    match service.deactivate(employee_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}
