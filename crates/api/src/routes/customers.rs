//! Customer endpoints

use std::sync::Arc;
use std::time::Instant;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::Json;
use fieldlink_core::CustomerCreation;
use fieldlink_domain::NewCustomerRequest;
use serde::Deserialize;
use serde_json::Value;

use super::parse_body;
use crate::errors::ApiError;
use crate::utils::logging::log_request_outcome;
use crate::AppContext;

const ERROR_PATH: &str = "customers";

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// GET /sf/customers/search?q=
pub async fn search_customers(
    State(context): State<Arc<AppContext>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let started = Instant::now();
    let result = context.customers.search(&params.q).await;
    log_request_outcome("customers::search", started.elapsed(), result.is_ok());

    result.map(Json).map_err(|err| ApiError::from_domain(ERROR_PATH, err))
}

/// GET /sf/customers/{id}
pub async fn get_customer(
    State(context): State<Arc<AppContext>>,
    Path(customer_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let started = Instant::now();
    let result = context.customers.get(&customer_id).await;
    log_request_outcome("customers::get", started.elapsed(), result.is_ok());

    result.map(Json).map_err(|err| ApiError::from_domain(ERROR_PATH, err))
}

/// POST /sf/customers
pub async fn create_customer(
    State(context): State<Arc<AppContext>>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let request: NewCustomerRequest = parse_body(&body)?;

    let started = Instant::now();
    let result = context.customers.create(&request).await;
    let created = matches!(result, Ok(CustomerCreation::Created(_)));
    log_request_outcome("customers::create", started.elapsed(), created);

    match result {
        Ok(CustomerCreation::Created(customer)) => Ok(Json(customer)),
        Ok(CustomerCreation::MissingId { raw }) => Err(ApiError::CreateCustomerFailed { raw }),
        Err(err) => Err(ApiError::from_domain(ERROR_PATH, err)),
    }
}
