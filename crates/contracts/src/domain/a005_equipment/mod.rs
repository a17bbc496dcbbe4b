pub mod aggregate;

pub use aggregate::{Equipment, EquipmentRef};
