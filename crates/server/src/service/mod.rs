//! Customer service façade.
//!
//! [`CustomerService`] is the only entry point the HTTP routes, the RPC
//! endpoint, and the console demo use. It validates input before touching the
//! [`CustomerStore`] and maps store failures into [`ServiceError`].

pub mod error;

use std::sync::Arc;

use tracing::instrument;

use customer_registry_core::{Customer, CustomerId, Email};

use crate::store::{CustomerStore, StoreError};

pub use error::{ServiceError, ServiceResult, ValidationError};

/// Validating front for the customer store.
///
/// Cheap to clone; clones share the same store.
#[derive(Debug, Clone)]
pub struct CustomerService {
    store: Arc<CustomerStore>,
}

impl CustomerService {
    /// Create a service over `store`.
    #[must_use]
    pub const fn new(store: Arc<CustomerStore>) -> Self {
        Self { store }
    }

    /// Get a customer by identifier.
    ///
    /// # Errors
    ///
    /// - `ServiceError::Validation` if `id` is not positive
    /// - `ServiceError::NotFound` if no customer has `id`
    /// - `ServiceError::Internal` if the store fails
    #[instrument(skip(self))]
    pub fn get_customer(&self, id: CustomerId) -> ServiceResult<Customer> {
        require_positive_id(id)?;
        self.store
            .get(id)
            .map_err(internal("Error retrieving customer"))?
            .ok_or(ServiceError::NotFound(id))
    }

    /// All customers, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Internal` if the store fails.
    pub fn get_all_customers(&self) -> ServiceResult<Vec<Customer>> {
        self.store
            .list()
            .map_err(internal("Error retrieving customers"))
    }

    /// Customers living in `city` (case-insensitive).
    ///
    /// # Errors
    ///
    /// - `ServiceError::Validation` if `city` is blank
    /// - `ServiceError::Internal` if the store fails
    #[instrument(skip(self))]
    pub fn get_customers_by_city(&self, city: &str) -> ServiceResult<Vec<Customer>> {
        if city.trim().is_empty() {
            return Err(ValidationError::Required { field: "city" }.into());
        }

        self.store
            .list_by_city(city)
            .map_err(internal("Error retrieving customers by city"))
    }

    /// Validate and store a new customer, returning its assigned identifier.
    ///
    /// Any identifier or creation timestamp on `customer` is ignored.
    ///
    /// # Errors
    ///
    /// - `ServiceError::Validation` if a required field is missing or the
    ///   email is malformed
    /// - `ServiceError::Internal` if the store fails
    pub fn create_customer(&self, customer: Customer) -> ServiceResult<CustomerId> {
        self.create_customer_record(customer)
            .map(|created| created.customer_id)
    }

    /// Like [`create_customer`](Self::create_customer), but returns the
    /// record as stored, read under the same lock as the insert.
    ///
    /// # Errors
    ///
    /// Same as [`create_customer`](Self::create_customer).
    #[instrument(skip_all)]
    pub fn create_customer_record(&self, customer: Customer) -> ServiceResult<Customer> {
        validate_customer(&customer)?;

        let created = self
            .store
            .create(customer)
            .map_err(internal("Error creating customer"))?;

        tracing::info!(customer_id = %created.customer_id, "Customer created");
        Ok(created)
    }

    /// Validate and apply `customer` over the stored record with the same
    /// identifier.
    ///
    /// # Errors
    ///
    /// - `ServiceError::Validation` if the identifier is not positive, a
    ///   required field is missing, or the email is malformed
    /// - `ServiceError::NotFound` if no customer has that identifier
    /// - `ServiceError::Internal` if the store fails
    pub fn update_customer(&self, customer: Customer) -> ServiceResult<()> {
        self.update_customer_record(customer).map(|_| ())
    }

    /// Like [`update_customer`](Self::update_customer), but returns the
    /// record as stored after the update.
    ///
    /// # Errors
    ///
    /// Same as [`update_customer`](Self::update_customer).
    #[instrument(skip_all, fields(customer_id = %customer.customer_id))]
    pub fn update_customer_record(&self, customer: Customer) -> ServiceResult<Customer> {
        let id = customer.customer_id;
        require_positive_id(id)?;
        validate_customer(&customer)?;

        let updated = self
            .store
            .update(customer)
            .map_err(internal("Error updating customer"))?
            .ok_or(ServiceError::NotFound(id))?;

        tracing::info!("Customer updated");
        Ok(updated)
    }

    /// Remove the customer with `id`.
    ///
    /// # Errors
    ///
    /// - `ServiceError::Validation` if `id` is not positive
    /// - `ServiceError::NotFound` if no customer has `id`
    /// - `ServiceError::Internal` if the store fails
    #[instrument(skip(self))]
    pub fn delete_customer(&self, id: CustomerId) -> ServiceResult<()> {
        require_positive_id(id)?;

        let removed = self
            .store
            .delete(id)
            .map_err(internal("Error deleting customer"))?;

        if !removed {
            return Err(ServiceError::NotFound(id));
        }

        tracing::info!("Customer deleted");
        Ok(())
    }

    /// Customers whose name, email, city, or state contains `term`.
    ///
    /// A blank term yields no results rather than every customer.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Internal` if the store fails.
    pub fn search_customers(&self, term: &str) -> ServiceResult<Vec<Customer>> {
        self.store
            .search(term)
            .map_err(internal("Error searching customers"))
    }

    /// Number of stored customers.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Internal` if the store fails.
    pub fn get_customer_count(&self) -> ServiceResult<usize> {
        self.store
            .count()
            .map_err(internal("Error getting customer count"))
    }
}

/// Wrap a store failure, logging it with `context`.
fn internal(context: &'static str) -> impl FnOnce(StoreError) -> ServiceError {
    move |source| {
        tracing::error!(error = %source, "{context}");
        ServiceError::Internal { context, source }
    }
}

fn require_positive_id(id: CustomerId) -> Result<(), ValidationError> {
    if id.is_positive() {
        Ok(())
    } else {
        Err(ValidationError::NonPositiveId {
            field: "customerId",
        })
    }
}

fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required { field })
    } else {
        Ok(())
    }
}

/// Required-field and email checks shared by create and update.
fn validate_customer(customer: &Customer) -> Result<(), ValidationError> {
    require(&customer.first_name, "firstName")?;
    require(&customer.last_name, "lastName")?;
    require(&customer.email, "email")?;
    Email::parse(&customer.email)?;
    Ok(())
}
