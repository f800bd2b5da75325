//! Customer record and its embedded address.
//!
//! The serialized field names and their order are the wire contract shared by
//! the HTTP and RPC front ends:
//!
//! ```text
//! customerId, firstName, lastName, email, phone, dateCreated, isActive,
//! address { street, city, state, zipCode, country }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::id::CustomerId;

/// A customer record.
///
/// `customer_id` and `date_created` are owned by the record store: callers may
/// send any value (or omit them) and the store assigns them on creation and
/// leaves them untouched on update.
///
/// Text fields and the address accept `null` as well as being omitted; both
/// read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Customer {
    pub customer_id: CustomerId,
    #[serde(deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    pub date_created: DateTime<Utc>,
    pub is_active: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub address: Address,
}

impl Customer {
    /// "First Last", as shown by the console demo and in log lines.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Postal address embedded in a [`Customer`].
///
/// Has no identity of its own; an update replaces it wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    #[serde(deserialize_with = "null_as_default")]
    pub street: String,
    #[serde(deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(deserialize_with = "null_as_default")]
    pub zip_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub country: String,
}

impl Address {
    /// "City, State".
    #[must_use]
    pub fn location(&self) -> String {
        format!("{}, {}", self.city, self.state)
    }
}

/// Serde helper that reads an explicit `null` as the field's default.
fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}
