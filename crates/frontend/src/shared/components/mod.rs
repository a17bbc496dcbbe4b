pub mod alert_dialog;
pub mod pagination_controls;
pub mod ui;
