pub mod aggregate;

pub use aggregate::{OnCall, OnCallChanges, ProductGroup, SpareLine};
