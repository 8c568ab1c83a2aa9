use axum::{extract::{Path, State}, http::StatusCode, Json};
use service::customer::{Customer, CustomerRequest};
use tracing::info;

use crate::{errors::JsonApiError, metrics, routes::ServerState};

#[utoipa::path(
    get, path = "/api/v1/customers", tag = "customers",
    responses(
        (status = 200, description = "All customers", body = [crate::openapi::CustomerDoc]),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Customer>>, JsonApiError> {
    let res = state.customers.list().await;
    metrics::record("list", &res);
    let list = res?;
    info!(count = list.len(), "list customers");
    Ok(Json(list))
}

#[utoipa::path(
    post, path = "/api/v1/customers", tag = "customers",
    request_body = crate::openapi::CustomerRequestDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::CustomerDoc),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<CustomerRequest>,
) -> Result<(StatusCode, Json<Customer>), JsonApiError> {
    let res = state.customers.create(input).await;
    metrics::record("create", &res);
    Ok((StatusCode::CREATED, Json(res?)))
}

#[utoipa::path(
    put, path = "/api/v1/customers/{customerId}", tag = "customers",
    params(("customerId" = i32, Path, description = "Customer id")),
    request_body = crate::openapi::CustomerRequestDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::CustomerDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(customer_id): Path<i32>,
    Json(input): Json<CustomerRequest>,
) -> Result<Json<Customer>, JsonApiError> {
    let res = state.customers.update(customer_id, input).await;
    metrics::record("update", &res);
    Ok(Json(res?))
}

#[utoipa::path(
    delete, path = "/api/v1/customers/{customerId}", tag = "customers",
    params(("customerId" = i32, Path, description = "Customer id")),
    responses(
        (status = 204, description = "Deleted, or never existed"),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(customer_id): Path<i32>,
) -> Result<StatusCode, JsonApiError> {
    let res = state.customers.delete(customer_id).await;
    metrics::record("delete", &res);
    res?;
    Ok(StatusCode::NO_CONTENT)
}
