//! Console demo of the customer service.
//!
//! # Usage
//!
//! ```bash
//! customer-cli demo
//! customer-cli demo --exercise
//! ```

use tracing::info;

use customer_registry_core::{Address, Customer, CustomerId};
use customer_registry_server::{CustomerService, ServiceError};

/// Operations offered by the service contract.
pub const OPERATIONS: &[&str] = &[
    "GetCustomer(customerId)",
    "GetAllCustomers()",
    "GetCustomersByCity(city)",
    "CreateCustomer(customer)",
    "UpdateCustomer(customer)",
    "DeleteCustomer(customerId)",
    "SearchCustomers(searchTerm)",
    "GetCustomerCount()",
];

/// How many customers the summary lists by name.
const PREVIEW_LEN: usize = 3;

/// Log how many customers are loaded and name the first few.
///
/// # Errors
///
/// Returns an error if the service fails.
pub fn show_sample_data(service: &CustomerService) -> Result<(), ServiceError> {
    let customers = service.get_all_customers()?;

    info!("Sample Data Loaded: {} customers", customers.len());
    info!("Sample customers include:");
    for customer in customers.iter().take(PREVIEW_LEN) {
        info!(
            "  - {} from {}",
            customer.full_name(),
            customer.address.location()
        );
    }

    if customers.len() > PREVIEW_LEN {
        info!(
            "  ... and {} more customers",
            customers.len() - PREVIEW_LEN
        );
    }

    Ok(())
}

/// Log the available operations.
pub fn show_operations() {
    info!("Available Operations:");
    for operation in OPERATIONS {
        info!("- {operation}");
    }
}

/// The customer the exercise creates.
fn test_customer() -> Customer {
    Customer {
        first_name: "Test".to_owned(),
        last_name: "User".to_owned(),
        email: "test.user@email.com".to_owned(),
        phone: "+1-555-TEST".to_owned(),
        is_active: true,
        address: Address {
            street: "123 Test St".to_owned(),
            city: "Test City".to_owned(),
            state: "TC".to_owned(),
            zip_code: "12345".to_owned(),
            country: "USA".to_owned(),
        },
        ..Customer::default()
    }
}

/// Run each read operation, create a customer, and log the results.
///
/// # Errors
///
/// Returns the first service error encountered.
pub fn exercise(service: &CustomerService) -> Result<(), ServiceError> {
    info!("Testing Service Operations:");

    info!("1. Customer Count: {}", service.get_customer_count()?);

    match service.get_customer(CustomerId::new(1)) {
        Ok(customer) => info!(
            "2. Customer ID 1: {} - {}",
            customer.full_name(),
            customer.email
        ),
        Err(ServiceError::NotFound(_)) => info!("2. Customer ID 1: not found"),
        Err(e) => return Err(e),
    }

    let in_new_york = service.get_customers_by_city("New York")?;
    info!("3. Customers in New York: {}", in_new_york.len());

    let matches = service.search_customers("John")?;
    info!(
        "4. Search results for 'John': {} customers found",
        matches.len()
    );

    let new_id = service.create_customer(test_customer())?;
    info!("5. Created new customer with ID: {new_id}");

    info!("6. Updated Customer Count: {}", service.get_customer_count()?);

    info!("All tests completed successfully!");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use customer_registry_server::CustomerStore;

    use super::*;

    #[test]
    fn test_exercise_creates_one_customer() {
        let service = CustomerService::new(Arc::new(CustomerStore::with_sample_data()));
        exercise(&service).unwrap();
        assert_eq!(service.get_customer_count().unwrap(), 6);
        assert_eq!(
            service.get_customer(CustomerId::new(6)).unwrap().full_name(),
            "Test User"
        );
    }

    #[test]
    fn test_show_sample_data_on_empty_store() {
        let service = CustomerService::new(Arc::new(CustomerStore::new()));
        assert!(show_sample_data(&service).is_ok());
    }

    #[test]
    fn test_every_operation_is_listed() {
        assert_eq!(OPERATIONS.len(), 8);
    }
}
