//! Customer, product and equipment lists, written once against
//! [`contracts::domain::common::MasterRecord`].

pub mod api;
pub mod list;
pub mod state;

pub use list::master_data_list;
