//! Maps a tab key to its view. All tab keys are resolved here.

use crate::domain::a001_proposal::ui::list::ProposalList;
use crate::domain::a002_oncall::ui::list::OnCallList;
use crate::domain::a003_customer::ui::list::CustomerList;
use crate::domain::a004_product::ui::list::ProductList;
use crate::domain::a005_equipment::ui::list::EquipmentList;
use crate::usecases::u501_bulk_upload::BulkUploadPage;
use leptos::logging::log;
use leptos::prelude::*;

/// Content of the tab `key`, or a placeholder for unknown keys.
pub fn render_tab_content(key: &str) -> AnyView {
    match key {
        // Approvals
        "a001_proposal" => view! { <ProposalList /> }.into_any(),
        "a002_oncall" => view! { <OnCallList /> }.into_any(),

        // Master data
        "a003_customer" => view! { <CustomerList /> }.into_any(),
        "a004_product" => view! { <ProductList /> }.into_any(),
        "a005_equipment" => view! { <EquipmentList /> }.into_any(),

        // Use cases
        "u501_bulk_upload" => view! { <BulkUploadPage /> }.into_any(),

        _ => {
            log!("Unknown tab type: {}", key);
            view! { <div class="placeholder">"Not implemented yet"</div> }.into_any()
        }
    }
}
