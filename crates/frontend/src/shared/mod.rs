pub mod api_utils;
pub mod approval;
pub mod components;
pub mod date_utils;
pub mod export;
pub mod file_reader;
pub mod http;
pub mod icons;
pub mod master_data;
pub mod modal_frame;
pub mod modal_stack;
pub mod number_format;
pub mod page_frame;
pub mod page_standard;
