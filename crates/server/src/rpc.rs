//! RPC-style service contract.
//!
//! One operation per [`CustomerService`] method, carried in a JSON envelope:
//!
//! ```text
//! -> {"operation": "getCustomer", "params": {"customerId": 1}}
//! <- {"result": {"customerId": 1, "firstName": "John", ...}}
//!
//! -> {"operation": "createCustomer", "params": {"customer": {"firstName": ""}}}
//! <- {"fault": {"kind": "validation", "message": "firstName is required"}}
//! ```
//!
//! Lookups of a missing customer are not faults here: `getCustomer` returns
//! `null` (for a non-positive identifier too), and
//! `updateCustomer`/`deleteCustomer` return `false`.

use serde::{Deserialize, Serialize};

use customer_registry_core::{Customer, CustomerId};

use crate::service::{CustomerService, ServiceError, ServiceResult};

/// An RPC call: operation name plus its parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "operation", content = "params", rename_all = "camelCase")]
pub enum RpcRequest {
    #[serde(rename_all = "camelCase")]
    GetCustomer { customer_id: CustomerId },
    GetAllCustomers,
    GetCustomersByCity { city: String },
    CreateCustomer { customer: Customer },
    UpdateCustomer { customer: Customer },
    #[serde(rename_all = "camelCase")]
    DeleteCustomer { customer_id: CustomerId },
    #[serde(rename_all = "camelCase")]
    SearchCustomers { search_term: String },
    GetCustomerCount,
}

impl RpcRequest {
    /// Operation name as it appears on the wire.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::GetCustomer { .. } => "getCustomer",
            Self::GetAllCustomers => "getAllCustomers",
            Self::GetCustomersByCity { .. } => "getCustomersByCity",
            Self::CreateCustomer { .. } => "createCustomer",
            Self::UpdateCustomer { .. } => "updateCustomer",
            Self::DeleteCustomer { .. } => "deleteCustomer",
            Self::SearchCustomers { .. } => "searchCustomers",
            Self::GetCustomerCount => "getCustomerCount",
        }
    }
}

/// Outcome of an RPC call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RpcResponse {
    Result(RpcValue),
    Fault(RpcFault),
}

/// Successful return value of an operation.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RpcValue {
    Customer(Option<Customer>),
    Customers(Vec<Customer>),
    CustomerId(CustomerId),
    Flag(bool),
    Count(usize),
}

/// A failed operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RpcFault {
    /// `validation`, `notFound`, or `internal`.
    pub kind: &'static str,
    pub message: String,
}

impl From<&ServiceError> for RpcFault {
    fn from(err: &ServiceError) -> Self {
        let message = match err {
            ServiceError::Validation(v) => v.to_string(),
            other => other.to_string(),
        };
        Self {
            kind: err.kind(),
            message,
        }
    }
}

/// Map "not found" onto the contract's in-band value for a missing record.
fn absent_as<T>(result: ServiceResult<T>, absent: T) -> ServiceResult<T> {
    match result {
        Err(ServiceError::NotFound(_)) => Ok(absent),
        other => other,
    }
}

/// Execute `request` against `service`.
#[must_use]
pub fn dispatch(service: &CustomerService, request: RpcRequest) -> RpcResponse {
    let operation = request.operation();

    let outcome = match request {
        RpcRequest::GetCustomer { customer_id } if !customer_id.is_positive() => {
            Ok(RpcValue::Customer(None))
        }
        RpcRequest::GetCustomer { customer_id } => absent_as(
            service.get_customer(customer_id).map(Some),
            None,
        )
        .map(RpcValue::Customer),
        RpcRequest::GetAllCustomers => service.get_all_customers().map(RpcValue::Customers),
        RpcRequest::GetCustomersByCity { city } => service
            .get_customers_by_city(&city)
            .map(RpcValue::Customers),
        RpcRequest::CreateCustomer { customer } => service
            .create_customer(customer)
            .map(RpcValue::CustomerId),
        RpcRequest::UpdateCustomer { customer } => {
            absent_as(service.update_customer(customer).map(|()| true), false)
                .map(RpcValue::Flag)
        }
        RpcRequest::DeleteCustomer { customer_id } => {
            absent_as(service.delete_customer(customer_id).map(|()| true), false)
                .map(RpcValue::Flag)
        }
        RpcRequest::SearchCustomers { search_term } => service
            .search_customers(&search_term)
            .map(RpcValue::Customers),
        RpcRequest::GetCustomerCount => service.get_customer_count().map(RpcValue::Count),
    };

    match outcome {
        Ok(value) => RpcResponse::Result(value),
        Err(err) => {
            tracing::warn!(operation, error = %err, "RPC operation failed");
            RpcResponse::Fault(RpcFault::from(&err))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use serde_json::{Value, json};

    use super::*;
    use crate::store::CustomerStore;

    fn service() -> CustomerService {
        CustomerService::new(Arc::new(CustomerStore::with_sample_data()))
    }

    fn call(service: &CustomerService, request: Value) -> Value {
        let request: RpcRequest = serde_json::from_value(request).unwrap();
        serde_json::to_value(dispatch(service, request)).unwrap()
    }

    #[test]
    fn test_request_envelope_parsing() {
        let request: RpcRequest =
            serde_json::from_value(json!({"operation": "getCustomerCount"})).unwrap();
        assert_eq!(request.operation(), "getCustomerCount");

        let request: RpcRequest = serde_json::from_value(
            json!({"operation": "searchCustomers", "params": {"searchTerm": "john"}}),
        )
        .unwrap();
        assert!(matches!(request, RpcRequest::SearchCustomers { ref search_term } if search_term == "john"));

        assert!(serde_json::from_value::<RpcRequest>(json!({"operation": "dropTable"})).is_err());
    }

    #[test]
    fn test_get_customer() {
        let service = service();
        let response = call(
            &service,
            json!({"operation": "getCustomer", "params": {"customerId": 1}}),
        );
        assert_eq!(response["result"]["firstName"], "John");
        assert_eq!(response["result"]["address"]["city"], "New York");

        let response = call(
            &service,
            json!({"operation": "getCustomer", "params": {"customerId": 404}}),
        );
        assert_eq!(response, json!({"result": null}));

        for id in [0, -3] {
            let response = call(
                &service,
                json!({"operation": "getCustomer", "params": {"customerId": id}}),
            );
            assert_eq!(response, json!({"result": null}));
        }

        // update and delete keep rejecting non-positive identifiers
        let response = call(
            &service,
            json!({"operation": "deleteCustomer", "params": {"customerId": 0}}),
        );
        assert_eq!(response["fault"]["kind"], "validation");
    }

    #[test]
    fn test_store_failure_is_internal_fault() {
        let store = Arc::new(CustomerStore::with_sample_data());
        store.poison();
        let service = CustomerService::new(store);

        let response = call(&service, json!({"operation": "getCustomerCount"}));
        assert_eq!(response["fault"]["kind"], "internal");
        assert!(
            response["fault"]["message"]
                .as_str()
                .unwrap()
                .starts_with("Error getting customer count")
        );
    }

    #[test]
    fn test_create_and_count() {
        let service = service();
        let response = call(
            &service,
            json!({
                "operation": "createCustomer",
                "params": {"customer": {
                    "firstName": "Test",
                    "lastName": "User",
                    "email": "test.user@email.com",
                    "isActive": true,
                    "address": {"city": "Test City", "state": "TC"}
                }}
            }),
        );
        assert_eq!(response, json!({"result": 6}));

        let response = call(&service, json!({"operation": "getCustomerCount"}));
        assert_eq!(response, json!({"result": 6}));
    }

    #[test]
    fn test_validation_fault() {
        let service = service();
        let response = call(
            &service,
            json!({
                "operation": "createCustomer",
                "params": {"customer": {"firstName": "", "lastName": "User", "email": "u@example.com"}}
            }),
        );
        assert_eq!(response["fault"]["kind"], "validation");
        assert_eq!(response["fault"]["message"], "firstName is required");

        let response = call(
            &service,
            json!({"operation": "getCustomersByCity", "params": {"city": ""}}),
        );
        assert_eq!(response["fault"]["kind"], "validation");
    }

    #[test]
    fn test_update_and_delete_report_flags() {
        let service = service();
        let response = call(
            &service,
            json!({
                "operation": "updateCustomer",
                "params": {"customer": {
                    "customerId": 99,
                    "firstName": "Nobody",
                    "lastName": "Here",
                    "email": "nobody@example.com"
                }}
            }),
        );
        assert_eq!(response, json!({"result": false}));

        let response = call(
            &service,
            json!({"operation": "deleteCustomer", "params": {"customerId": 2}}),
        );
        assert_eq!(response, json!({"result": true}));

        let response = call(
            &service,
            json!({"operation": "deleteCustomer", "params": {"customerId": 2}}),
        );
        assert_eq!(response, json!({"result": false}));
    }

    #[test]
    fn test_search_and_city() {
        let service = service();
        let response = call(
            &service,
            json!({"operation": "searchCustomers", "params": {"searchTerm": "   "}}),
        );
        assert_eq!(response, json!({"result": []}));

        let response = call(
            &service,
            json!({"operation": "getCustomersByCity", "params": {"city": "chicago"}}),
        );
        assert_eq!(response["result"][0]["lastName"], "Johnson");
    }
}
