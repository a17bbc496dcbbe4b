pub mod api_error;
pub mod pagination;

pub use api_error::ApiError;
pub use pagination::{total_pages, PageRequest, Pagination, SearchResponse};
