//! Execute a single RPC envelope against the sample store.

use thiserror::Error;

use customer_registry_server::CustomerService;
use customer_registry_server::rpc::{self, RpcRequest};

/// Errors that can occur while running an RPC envelope.
#[derive(Debug, Error)]
pub enum RpcCommandError {
    /// The argument is not a valid RPC request.
    #[error("invalid RPC request: {0}")]
    InvalidRequest(#[source] serde_json::Error),

    /// The response could not be serialized.
    #[error("failed to serialize response: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Parse `request`, dispatch it, and log the JSON response.
///
/// # Errors
///
/// Returns `RpcCommandError` if `request` does not parse. Operation faults are
/// part of the logged response, not errors.
pub fn run(service: &CustomerService, request: &str) -> Result<(), RpcCommandError> {
    let request: RpcRequest =
        serde_json::from_str(request).map_err(RpcCommandError::InvalidRequest)?;

    tracing::debug!(operation = request.operation(), "Dispatching");
    let response = rpc::dispatch(service, request);

    let body = serde_json::to_string_pretty(&response).map_err(RpcCommandError::Serialize)?;
    tracing::info!("{body}");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use customer_registry_server::CustomerStore;

    use super::*;

    fn service() -> CustomerService {
        CustomerService::new(Arc::new(CustomerStore::with_sample_data()))
    }

    #[test]
    fn test_run_valid_request() {
        assert!(run(&service(), r#"{"operation": "getCustomerCount"}"#).is_ok());
    }

    #[test]
    fn test_run_rejects_unknown_operation() {
        let err = run(&service(), r#"{"operation": "truncate"}"#).unwrap_err();
        assert!(matches!(err, RpcCommandError::InvalidRequest(_)));
    }

    #[test]
    fn test_faults_are_not_errors() {
        let request = r#"{"operation": "getCustomersByCity", "params": {"city": ""}}"#;
        assert!(run(&service(), request).is_ok());
    }
}
