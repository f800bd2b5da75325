//! CLI subcommands.

pub mod demo;
pub mod list;
pub mod rpc;

use customer_registry_core::Customer;

/// Log one customer as a single line.
pub(crate) fn log_customer(customer: &Customer) {
    tracing::info!(
        "  #{} {} <{}> - {} ({})",
        customer.customer_id,
        customer.full_name(),
        customer.email,
        customer.address.location(),
        if customer.is_active { "active" } else { "inactive" },
    );
}
