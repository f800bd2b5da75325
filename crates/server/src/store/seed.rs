//! Sample customers loaded at startup.

use chrono::{DateTime, Duration, Months, Utc};

use customer_registry_core::{Address, Customer};

/// The five sample customers, with creation times relative to `now`.
///
/// Identifiers are left at their default; the store assigns 1-5 in order.
#[must_use]
pub fn sample_customers(now: DateTime<Utc>) -> Vec<Customer> {
    let months_ago = |months| now.checked_sub_months(Months::new(months)).unwrap_or(now);
    let days_ago = |days| now - Duration::days(days);

    vec![
        sample(
            ("John", "Doe", "+1-555-0123"),
            months_ago(6),
            true,
            ("123 Main St", "New York", "NY", "10001"),
        ),
        sample(
            ("Jane", "Smith", "+1-555-0456"),
            months_ago(3),
            true,
            ("456 Oak Ave", "Los Angeles", "CA", "90210"),
        ),
        sample(
            ("Robert", "Johnson", "+1-555-0789"),
            months_ago(1),
            true,
            ("789 Pine St", "Chicago", "IL", "60601"),
        ),
        sample(
            ("Emily", "Brown", "+1-555-0321"),
            days_ago(15),
            true,
            ("321 Elm St", "Houston", "TX", "77001"),
        ),
        sample(
            ("Michael", "Davis", "+1-555-0654"),
            days_ago(7),
            false,
            ("654 Cedar Ave", "Phoenix", "AZ", "85001"),
        ),
    ]
}

fn sample(
    (first, last, phone): (&str, &str, &str),
    date_created: DateTime<Utc>,
    is_active: bool,
    (street, city, state, zip_code): (&str, &str, &str, &str),
) -> Customer {
    Customer {
        first_name: first.to_owned(),
        last_name: last.to_owned(),
        email: format!("{}.{}@email.com", first.to_lowercase(), last.to_lowercase()),
        phone: phone.to_owned(),
        date_created,
        is_active,
        address: Address {
            street: street.to_owned(),
            city: city.to_owned(),
            state: state.to_owned(),
            zip_code: zip_code.to_owned(),
            country: "USA".to_owned(),
        },
        ..Customer::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_customers() {
        let now = Utc::now();
        let customers = sample_customers(now);

        assert_eq!(customers.len(), 5);
        let cities: Vec<&str> = customers.iter().map(|c| c.address.city.as_str()).collect();
        assert_eq!(
            cities,
            vec!["New York", "Los Angeles", "Chicago", "Houston", "Phoenix"]
        );
        assert!(customers.iter().all(|c| c.date_created < now));
        assert_eq!(customers.iter().filter(|c| !c.is_active).count(), 1);
    }

    #[test]
    fn test_sample_emails_are_valid() {
        for customer in sample_customers(Utc::now()) {
            assert!(customer_registry_core::Email::parse(&customer.email).is_ok());
        }
        assert_eq!(
            sample_customers(Utc::now())
                .first()
                .map(|c| c.email.as_str()),
            Some("john.doe@email.com")
        );
    }
}
