use contracts::domain::a003_customer::Customer;
use leptos::prelude::*;

use crate::shared::master_data::master_data_list;

#[component]
pub fn CustomerList() -> impl IntoView {
    master_data_list::<Customer>("a003_customer")
}
