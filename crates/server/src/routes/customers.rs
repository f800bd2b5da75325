//! Customer REST handlers.
//!
//! Every handler delegates to [`CustomerService`](crate::service::CustomerService);
//! the only checks done here are the request-model limits below and the
//! path/body identifier agreement on `PUT`.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use customer_registry_core::{Customer, CustomerId};

use crate::{error::Result, service::ValidationError, state::AppState};

/// Query parameters for `GET /customers/search`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub search_term: Option<String>,
}

/// Maximum lengths accepted in request bodies, by wire field name.
const FIELD_LIMITS: &[(&str, usize)] = &[
    ("firstName", 50),
    ("lastName", 50),
    ("email", 100),
    ("phone", 20),
    ("street", 100),
    ("city", 50),
    ("state", 50),
    ("zipCode", 10),
    ("country", 50),
];

/// Request-model checks for bodies posted to the HTTP surface.
///
/// Applied on top of the service's own validation: field length limits and
/// the required city and state of the address.
fn check_request_model(customer: &Customer) -> std::result::Result<(), ValidationError> {
    let address = &customer.address;
    let values = [
        customer.first_name.as_str(),
        customer.last_name.as_str(),
        customer.email.as_str(),
        customer.phone.as_str(),
        address.street.as_str(),
        address.city.as_str(),
        address.state.as_str(),
        address.zip_code.as_str(),
        address.country.as_str(),
    ];

    for (&(field, max), value) in FIELD_LIMITS.iter().zip(values) {
        if value.chars().count() > max {
            return Err(ValidationError::TooLong { field, max });
        }
    }

    if address.city.trim().is_empty() {
        return Err(ValidationError::Required { field: "city" });
    }
    if address.state.trim().is_empty() {
        return Err(ValidationError::Required { field: "state" });
    }

    Ok(())
}

/// `GET /customers`
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Customer>>> {
    Ok(Json(state.customers().get_all_customers()?))
}

/// `GET /customers/{id}`
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<Customer>> {
    Ok(Json(state.customers().get_customer(CustomerId::new(id))?))
}

/// `GET /customers/by-city/{city}`
#[instrument(skip(state))]
pub async fn by_city(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Json<Vec<Customer>>> {
    Ok(Json(state.customers().get_customers_by_city(&city)?))
}

/// `GET /customers/search?searchTerm=...`
///
/// Unlike the service, a blank term is a client error here.
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Customer>>> {
    let term = query.search_term.unwrap_or_default();
    if term.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "searchTerm",
        }
        .into());
    }

    Ok(Json(state.customers().search_customers(&term)?))
}

/// `GET /customers/count`
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> Result<Json<usize>> {
    Ok(Json(state.customers().get_customer_count()?))
}

/// `POST /customers`
///
/// Responds `201 Created` with the stored record and its `Location`.
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Customer>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(customer) = payload?;
    check_request_model(&customer)?;

    let created = state.customers().create_customer_record(customer)?;
    let id = created.customer_id;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/customers/{id}"))],
        Json(created),
    ))
}

/// `PUT /customers/{id}`
///
/// Responds with the stored record after the update.
#[instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: std::result::Result<Json<Customer>, JsonRejection>,
) -> Result<Json<Customer>> {
    let Json(customer) = payload?;
    let id = CustomerId::new(id);
    if !id.is_positive() {
        return Err(ValidationError::NonPositiveId {
            field: "customerId",
        }
        .into());
    }

    check_request_model(&customer)?;

    if customer.customer_id != id {
        return Err(ValidationError::IdMismatch {
            path: id,
            body: customer.customer_id,
        }
        .into());
    }

    Ok(Json(state.customers().update_customer_record(customer)?))
}

/// `DELETE /customers/{id}`
#[instrument(skip(state))]
pub async fn destroy(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode> {
    state.customers().delete_customer(CustomerId::new(id))?;
    Ok(StatusCode::NO_CONTENT)
}
