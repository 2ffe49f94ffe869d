use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use common::types::Page;
use service::employee::{Actor, Employee, EmployeeUpdate, NewEmployee};
use service::pagination::Pagination;

use crate::{auth::ServerState, errors::JsonApiError};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ListQuery {
    /// 1-based page, default 1
    pub page: Option<u32>,
    /// Page size 1..=100, default 20
    pub per_page: Option<u32>,
}

impl From<ListQuery> for Pagination {
    fn from(q: ListQuery) -> Self {
        let d = Pagination::default();
        Pagination { page: q.page.unwrap_or(d.page), per_page: q.per_page.unwrap_or(d.per_page) }
    }
}

#[utoipa::path(
    get, path = "/employees", tag = "employees",
    params(ListQuery),
    responses(
        (status = 200, description = "One page of employees ordered by name", body = crate::openapi::EmployeePageDoc),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Page<Employee>>, JsonApiError> {
    let page = state.employees.list(&actor, q.into()).await?;
    info!(count = page.items.len(), total = page.total, "list employees");
    Ok(Json(page))
}

#[utoipa::path(
    get, path = "/employees/{id}", tag = "employees",
    params(("id" = Uuid, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::EmployeeDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<Json<Employee>, JsonApiError> {
    Ok(Json(state.employees.get(&actor, id).await?))
}

#[utoipa::path(
    post, path = "/employees", tag = "employees",
    request_body = crate::openapi::NewEmployeeDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::EmployeeDoc),
        (status = 400, description = "Business Rule Violation"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    Json(input): Json<NewEmployee>,
) -> Result<(StatusCode, Json<Employee>), JsonApiError> {
    let created = state.employees.create(&actor, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/employees/{id}", tag = "employees",
    params(("id" = Uuid, Path, description = "Employee ID")),
    request_body = crate::openapi::EmployeeUpdateDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::EmployeeDoc),
        (status = 400, description = "Business Rule Violation"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(input): Json<EmployeeUpdate>,
) -> Result<Json<Employee>, JsonApiError> {
    Ok(Json(state.employees.update(&actor, id, input).await?))
}

#[utoipa::path(
    delete, path = "/employees/{id}", tag = "employees",
    params(("id" = Uuid, Path, description = "Employee ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Business Rule Violation"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, JsonApiError> {
    state.employees.delete(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
