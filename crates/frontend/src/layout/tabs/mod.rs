//! Tab management: `page` wraps a tab's content, `registry` maps a tab key
//! to its view and `tab_labels` holds the titles.

pub mod page;
pub mod registry;
pub mod tab_labels;

pub use page::TabPage;
pub use tab_labels::{tab_label_for_key, TAB_KEYS};
