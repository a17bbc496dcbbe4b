pub mod a001_proposal;
pub mod a002_oncall;
pub mod a003_customer;
pub mod a004_product;
pub mod a005_equipment;
