//! Page categories for pages rendered inside a tab.
//!
//! Every tab page root carries `id="{entity}--{category}"` and
//! `data-page-category`, so the id copied from the DOM inspector leads
//! straight to `domain/{entity}/` or `usecases/{entity}/`.

/// Table with filters and pagination.
pub const PAGE_CAT_LIST: &str = "list";

/// Single record, in a tab or a modal.
pub const PAGE_CAT_DETAIL: &str = "detail";

/// Use-case wizard (bulk upload).
pub const PAGE_CAT_USECASE: &str = "usecase";

/// `{entity}--{category}`
pub fn page_id(entity: &str, category: &str) -> String {
    format!("{}--{}", entity, category)
}

/// Validate that a page id matches the `{entity}--{category}` format.
pub fn is_valid_page_id(id: &str) -> bool {
    matches!(id.split_once("--"), Some((entity, cat)) if !entity.is_empty() && !cat.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id() {
        let id = page_id("a001_proposal", PAGE_CAT_LIST);
        assert_eq!(id, "a001_proposal--list");
        assert!(is_valid_page_id(&id));
        assert!(!is_valid_page_id("a001_proposal"));
        assert!(!is_valid_page_id("--list"));
    }
}
