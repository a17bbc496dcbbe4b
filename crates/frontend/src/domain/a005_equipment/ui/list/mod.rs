use contracts::domain::a005_equipment::Equipment;
use leptos::prelude::*;

use crate::shared::master_data::master_data_list;

#[component]
pub fn EquipmentList() -> impl IntoView {
    master_data_list::<Equipment>("a005_equipment")
}
