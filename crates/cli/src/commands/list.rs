//! List customers from the sample store.

use customer_registry_server::{CustomerService, ServiceError};

use super::log_customer;

/// List all customers, or those matching `city` or `search`.
///
/// # Errors
///
/// Returns a validation error for a blank city, or any service failure.
pub fn run(
    service: &CustomerService,
    city: Option<&str>,
    search: Option<&str>,
) -> Result<(), ServiceError> {
    let customers = match (city, search) {
        (Some(city), _) => service.get_customers_by_city(city)?,
        (None, Some(term)) => service.search_customers(term)?,
        (None, None) => service.get_all_customers()?,
    };

    tracing::info!("{} customer(s)", customers.len());
    for customer in &customers {
        log_customer(customer);
    }
    Ok(())
}
