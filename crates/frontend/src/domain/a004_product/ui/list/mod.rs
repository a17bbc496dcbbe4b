use contracts::domain::a004_product::Product;
use leptos::prelude::*;

use crate::shared::master_data::master_data_list;

#[component]
pub fn ProductList() -> impl IntoView {
    master_data_list::<Product>("a004_product")
}
