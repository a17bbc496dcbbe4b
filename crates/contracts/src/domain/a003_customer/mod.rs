pub mod aggregate;

pub use aggregate::{Customer, CustomerRef, CustomerSummary};
