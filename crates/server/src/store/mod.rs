//! In-memory customer record store.
//!
//! [`CustomerStore`] is the sole owner of the customer collection and the
//! identifier counter. Every operation takes the same mutex for its full
//! duration, reads included, so callers never need their own locking.
//!
//! Lookups are linear scans over insertion order.

mod seed;

use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use thiserror::Error;
use tracing::instrument;

use customer_registry_core::{Customer, CustomerId};

pub use seed::sample_customers;

/// Errors raised by the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A thread panicked while holding the store lock.
    #[error("customer store lock poisoned")]
    Poisoned,
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Thread-safe in-memory collection of customers.
#[derive(Debug)]
pub struct CustomerStore {
    inner: Mutex<StoreInner>,
}

#[derive(Debug)]
struct StoreInner {
    customers: Vec<Customer>,
    /// Next identifier to hand out. Only ever incremented.
    next_id: i32,
}

impl StoreInner {
    const fn allocate_id(&mut self) -> CustomerId {
        let id = CustomerId::new(self.next_id);
        self.next_id += 1;
        id
    }
}

impl Default for CustomerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomerStore {
    /// Create an empty store whose first assigned identifier is 1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                customers: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Create a store holding the five sample customers (identifiers 1-5).
    #[must_use]
    pub fn with_sample_data() -> Self {
        Self::seeded(sample_customers(Utc::now()))
    }

    /// Create a store pre-populated with `customers`.
    ///
    /// Identifiers are assigned from the counter in iteration order; the
    /// supplied creation timestamps are kept as-is.
    #[must_use]
    pub fn seeded(customers: impl IntoIterator<Item = Customer>) -> Self {
        let mut inner = StoreInner {
            customers: Vec::new(),
            next_id: 1,
        };

        for mut customer in customers {
            customer.customer_id = inner.allocate_id();
            inner.customers.push(customer);
        }

        Self {
            inner: Mutex::new(inner),
        }
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, StoreInner>> {
        self.inner.lock().map_err(|_| StoreError::Poisoned)
    }

    /// Get a customer by identifier.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Poisoned` if the lock is poisoned.
    pub fn get(&self, id: CustomerId) -> StoreResult<Option<Customer>> {
        let inner = self.lock()?;
        Ok(inner
            .customers
            .iter()
            .find(|c| c.customer_id == id)
            .cloned())
    }

    /// Snapshot of every customer, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Poisoned` if the lock is poisoned.
    pub fn list(&self) -> StoreResult<Vec<Customer>> {
        let inner = self.lock()?;
        Ok(inner.customers.clone())
    }

    /// Customers whose address city equals `city`, ignoring case.
    ///
    /// A blank `city` matches nothing.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Poisoned` if the lock is poisoned.
    pub fn list_by_city(&self, city: &str) -> StoreResult<Vec<Customer>> {
        if city.trim().is_empty() {
            return Ok(Vec::new());
        }

        let city = city.to_lowercase();
        let inner = self.lock()?;
        Ok(inner
            .customers
            .iter()
            .filter(|c| c.address.city.to_lowercase() == city)
            .cloned()
            .collect())
    }

    /// Customers whose first name, last name, email, city, or state contains
    /// `term`, ignoring case.
    ///
    /// A blank `term` matches nothing.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Poisoned` if the lock is poisoned.
    #[instrument(skip(self))]
    pub fn search(&self, term: &str) -> StoreResult<Vec<Customer>> {
        if term.trim().is_empty() {
            return Ok(Vec::new());
        }

        let term = term.to_lowercase();
        let inner = self.lock()?;
        Ok(inner
            .customers
            .iter()
            .filter(|c| matches_term(c, &term))
            .cloned()
            .collect())
    }

    /// Insert `customer`, assigning it a fresh identifier and the current time
    /// as its creation timestamp. Returns the record as stored.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Poisoned` if the lock is poisoned.
    pub fn create(&self, mut customer: Customer) -> StoreResult<Customer> {
        let mut inner = self.lock()?;
        customer.customer_id = inner.allocate_id();
        customer.date_created = Utc::now();
        inner.customers.push(customer.clone());
        Ok(customer)
    }

    /// Overwrite the mutable fields of the customer with `customer.customer_id`.
    ///
    /// Identifier and creation timestamp are never changed. Returns the record
    /// as stored, or `None` when no such customer exists; nothing is inserted
    /// in that case.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Poisoned` if the lock is poisoned.
    pub fn update(&self, customer: Customer) -> StoreResult<Option<Customer>> {
        let mut inner = self.lock()?;
        let Some(existing) = inner
            .customers
            .iter_mut()
            .find(|c| c.customer_id == customer.customer_id)
        else {
            return Ok(None);
        };

        existing.first_name = customer.first_name;
        existing.last_name = customer.last_name;
        existing.email = customer.email;
        existing.phone = customer.phone;
        existing.is_active = customer.is_active;
        existing.address = customer.address;
        Ok(Some(existing.clone()))
    }

    /// Remove the customer with `id`. Returns whether a record was removed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Poisoned` if the lock is poisoned.
    pub fn delete(&self, id: CustomerId) -> StoreResult<bool> {
        let mut inner = self.lock()?;
        let Some(index) = inner.customers.iter().position(|c| c.customer_id == id) else {
            return Ok(false);
        };
        inner.customers.remove(index);
        Ok(true)
    }

    /// Number of customers currently stored.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Poisoned` if the lock is poisoned.
    pub fn count(&self) -> StoreResult<usize> {
        Ok(self.lock()?.customers.len())
    }

    /// Poison the lock by panicking on another thread while holding it.
    #[cfg(test)]
    pub(crate) fn poison(&self) {
        std::thread::scope(|scope| {
            let _ = scope
                .spawn(|| {
                    let _guard = self.inner.lock();
                    panic!("panic while holding the customer store lock");
                })
                .join();
        });
    }
}

/// `term` must already be lowercase.
fn matches_term(customer: &Customer, term: &str) -> bool {
    [
        &customer.first_name,
        &customer.last_name,
        &customer.email,
        &customer.address.city,
        &customer.address.state,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(term))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use customer_registry_core::Address;

    fn new_customer(first: &str, last: &str, email: &str, city: &str) -> Customer {
        Customer {
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: email.to_string(),
            phone: "+1-555-TEST".to_string(),
            is_active: true,
            address: Address {
                street: "123 Test St".to_string(),
                city: city.to_string(),
                state: "TC".to_string(),
                zip_code: "12345".to_string(),
                country: "USA".to_string(),
            },
            ..Customer::default()
        }
    }

    fn test_user() -> Customer {
        new_customer("Test", "User", "test.user@email.com", "Test City")
    }

    #[test]
    fn test_empty_store_starts_at_one() {
        let store = CustomerStore::new();
        assert_eq!(store.count().unwrap(), 0);
        assert_eq!(store.create(test_user()).unwrap().customer_id, CustomerId::new(1));
    }

    #[test]
    fn test_sample_data_scenario() {
        let store = CustomerStore::with_sample_data();
        assert_eq!(store.count().unwrap(), 5);

        let id = store.create(test_user()).unwrap().customer_id;
        assert_eq!(id, CustomerId::new(6));
        assert_eq!(store.count().unwrap(), 6);

        assert!(store.delete(id).unwrap());
        assert_eq!(store.count().unwrap(), 5);

        // Deleted identifiers are never reused
        assert_eq!(store.create(test_user()).unwrap().customer_id, CustomerId::new(7));
    }

    #[test]
    fn test_identifiers_strictly_increase() {
        let store = CustomerStore::new();
        let mut last = CustomerId::default();
        for i in 0..10 {
            let id = store.create(test_user()).unwrap().customer_id;
            assert!(id > last);
            last = id;
            if i % 3 == 0 {
                store.delete(id).unwrap();
            }
        }
    }

    #[test]
    fn test_create_assigns_id_and_timestamp() {
        let store = CustomerStore::new();
        let mut input = test_user();
        input.customer_id = CustomerId::new(999);

        let before = Utc::now();
        let created = store.create(input.clone()).unwrap();
        let id = created.customer_id;
        let stored = store.get(id).unwrap().unwrap();

        assert_eq!(stored, created);
        assert_eq!(stored.customer_id, id);
        assert!(stored.date_created >= before);
        assert_eq!(stored.first_name, input.first_name);
        assert_eq!(stored.last_name, input.last_name);
        assert_eq!(stored.email, input.email);
        assert_eq!(stored.phone, input.phone);
        assert_eq!(stored.is_active, input.is_active);
        assert_eq!(stored.address, input.address);
    }

    #[test]
    fn test_get_missing() {
        let store = CustomerStore::with_sample_data();
        assert!(store.get(CustomerId::new(42)).unwrap().is_none());
    }

    #[test]
    fn test_list_is_a_snapshot() {
        let store = CustomerStore::with_sample_data();
        let mut snapshot = store.list().unwrap();
        snapshot.clear();
        assert_eq!(store.count().unwrap(), 5);

        let ids: Vec<i32> = store
            .list()
            .unwrap()
            .iter()
            .map(|c| c.customer_id.as_i32())
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_update_overwrites_mutable_fields_only() {
        let store = CustomerStore::with_sample_data();
        let original = store.get(CustomerId::new(2)).unwrap().unwrap();

        let mut changes = new_customer("Janet", "Smyth", "janet@example.com", "Boston");
        changes.customer_id = CustomerId::new(2);
        changes.date_created = Utc::now() + chrono::Duration::days(30);
        changes.is_active = false;
        changes.address.street = String::new();

        let returned = store.update(changes.clone()).unwrap().unwrap();

        let updated = store.get(CustomerId::new(2)).unwrap().unwrap();
        assert_eq!(returned, updated);
        assert_eq!(updated.customer_id, original.customer_id);
        assert_eq!(updated.date_created, original.date_created);
        assert_eq!(updated.first_name, "Janet");
        assert_eq!(updated.last_name, "Smyth");
        assert_eq!(updated.email, "janet@example.com");
        assert!(!updated.is_active);
        assert_eq!(updated.address, changes.address);
    }

    #[test]
    fn test_update_missing_does_not_insert() {
        let store = CustomerStore::with_sample_data();
        let mut ghost = test_user();
        ghost.customer_id = CustomerId::new(77);

        assert!(store.update(ghost).unwrap().is_none());
        assert_eq!(store.count().unwrap(), 5);
        assert!(store.get(CustomerId::new(77)).unwrap().is_none());
    }

    #[test]
    fn test_delete_then_get() {
        let store = CustomerStore::with_sample_data();
        assert!(store.delete(CustomerId::new(3)).unwrap());
        assert!(store.get(CustomerId::new(3)).unwrap().is_none());
        assert_eq!(store.count().unwrap(), 4);
        assert!(!store.delete(CustomerId::new(3)).unwrap());
        assert_eq!(store.count().unwrap(), 4);
    }

    #[test]
    fn test_list_by_city_ignores_case() {
        let store = CustomerStore::with_sample_data();

        let found = store.list_by_city("new york").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].full_name(), "John Doe");

        assert_eq!(store.list_by_city("NEW YORK").unwrap().len(), 1);
        assert!(store.list_by_city("New").unwrap().is_empty());
    }

    #[test]
    fn test_list_by_city_blank_matches_nothing() {
        let store = CustomerStore::with_sample_data();
        assert!(store.list_by_city("").unwrap().is_empty());
        assert!(store.list_by_city("  ").unwrap().is_empty());
    }

    #[test]
    fn test_search_blank_matches_nothing() {
        let store = CustomerStore::with_sample_data();
        assert!(store.search("").unwrap().is_empty());
        assert!(store.search("   ").unwrap().is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let store = CustomerStore::with_sample_data();

        // "John" (first name) and "Johnson" (last name) both match
        let names: Vec<String> = store
            .search("john")
            .unwrap()
            .iter()
            .map(Customer::full_name)
            .collect();
        assert_eq!(names, vec!["John Doe", "Robert Johnson"]);
    }

    #[test]
    fn test_search_covers_email_city_and_state() {
        let store = CustomerStore::with_sample_data();

        assert_eq!(store.search("JANE.SMITH@").unwrap().len(), 1);
        assert_eq!(store.search("phoenix").unwrap().len(), 1);
        assert_eq!(store.search("tx").unwrap().len(), 1);
        // Street, zip, and phone are not searched
        assert!(store.search("Main St").unwrap().is_empty());
        assert!(store.search("90210").unwrap().is_empty());
        assert!(store.search("zzz-no-match").unwrap().is_empty());
    }

    #[test]
    fn test_concurrent_creates_get_distinct_ids() {
        use std::collections::HashSet;
        use std::sync::Arc;

        let store = Arc::new(CustomerStore::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    (0..25)
                        .map(|_| store.create(test_user()).unwrap().customer_id)
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let ids: HashSet<CustomerId> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();

        assert_eq!(ids.len(), 200);
        assert_eq!(store.count().unwrap(), 200);
    }

    #[test]
    fn test_poisoned_lock_fails_every_operation() {
        let store = CustomerStore::with_sample_data();
        store.poison();

        let id = CustomerId::new(1);
        let mut existing = test_user();
        existing.customer_id = id;

        assert!(matches!(store.get(id), Err(StoreError::Poisoned)));
        assert!(matches!(store.list(), Err(StoreError::Poisoned)));
        assert!(matches!(store.list_by_city("New York"), Err(StoreError::Poisoned)));
        assert!(matches!(store.search("john"), Err(StoreError::Poisoned)));
        assert!(matches!(store.create(test_user()), Err(StoreError::Poisoned)));
        assert!(matches!(store.update(existing), Err(StoreError::Poisoned)));
        assert!(matches!(store.delete(id), Err(StoreError::Poisoned)));
        assert!(matches!(store.count(), Err(StoreError::Poisoned)));
    }
}
