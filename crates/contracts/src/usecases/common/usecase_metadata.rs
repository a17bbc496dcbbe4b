/// Identity of a use case, used for tab keys and headings.
pub trait UseCaseMetadata {
    /// e.g. "u501"
    fn usecase_index() -> &'static str;

    /// e.g. "bulk_upload"
    fn usecase_name() -> &'static str;

    fn display_name() -> &'static str;

    fn description() -> &'static str {
        ""
    }

    /// "u501_bulk_upload"
    fn full_name() -> String {
        format!("{}_{}", Self::usecase_index(), Self::usecase_name())
    }
}
