//! Sidebar with collapsible menu groups.

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_label_for_key;
use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    items: Vec<(&'static str, &'static str)>, // (tab key, icon)
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "approvals",
            label: "Approvals",
            items: vec![("a001_proposal", "proposals"), ("a002_oncall", "oncalls")],
        },
        MenuGroup {
            id: "master_data",
            label: "Master Data",
            items: vec![
                ("a003_customer", "customers"),
                ("a004_product", "products"),
                ("a005_equipment", "equipment"),
            ],
        },
        MenuGroup {
            id: "operations",
            label: "Operations",
            items: vec![("u501_bulk_upload", "upload")],
        },
    ]
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let expanded_groups = RwSignal::new(
        get_menu_groups()
            .iter()
            .map(|g| g.id.to_string())
            .collect::<Vec<_>>(),
    );

    view! {
        <div class="app-sidebar__content">
            {get_menu_groups()
                .into_iter()
                .map(|group| {
                    let group_id = group.id;
                    let is_expanded = move || expanded_groups.with(|g| g.iter().any(|x| x == group_id));
                    let toggle = move |_| {
                        expanded_groups.update(|items| {
                            if let Some(pos) = items.iter().position(|x| x == group_id) {
                                items.remove(pos);
                            } else {
                                items.push(group_id.to_string());
                            }
                        })
                    };

                    view! {
                        <div>
                            <div class="app-sidebar__item" style:padding-left="12px" on:click=toggle>
                                <div class="app-sidebar__item-content">
                                    {move || if is_expanded() { icon("folder-open") } else { icon("folder-closed") }}
                                    <span>{group.label}</span>
                                </div>
                                <div
                                    class="app-sidebar__chevron"
                                    class:app-sidebar__chevron--expanded=is_expanded
                                >
                                    {icon("chevron-right")}
                                </div>
                            </div>

                            <Show when=is_expanded>
                                <div class="app-sidebar__children">
                                    {group
                                        .items
                                        .iter()
                                        .map(|&(key, icon_name)| {
                                            let label = tab_label_for_key(key).unwrap_or(key);
                                            view! {
                                                <div
                                                    class="app-sidebar__item"
                                                    class:app-sidebar__item--active=move || {
                                                        ctx.active.get().as_deref() == Some(key)
                                                    }
                                                    style:padding-left="10px"
                                                    on:click=move |_| ctx.open_tab(key, label)
                                                >
                                                    <div class="app-sidebar__item-content">
                                                        {icon(icon_name)}
                                                        <span>{label}</span>
                                                    </div>
                                                </div>
                                            }
                                        })
                                        .collect_view()}
                                </div>
                            </Show>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::tabs::TAB_KEYS;

    #[test]
    fn test_menu_covers_every_tab() {
        let keys: Vec<&str> = get_menu_groups()
            .into_iter()
            .flat_map(|g| g.items.into_iter().map(|(k, _)| k))
            .collect();
        assert_eq!(keys, TAB_KEYS.to_vec());
    }
}
