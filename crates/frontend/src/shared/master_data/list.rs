use contracts::domain::common::MasterRecord;
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::api;
use super::state::{create_state, MasterExportQuery};
use crate::shared::components::alert_dialog::show_api_error;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::ui::UiBadge;
use crate::shared::date_utils::format_optional_date;
use crate::shared::icons::icon;
use crate::shared::modal_stack::ModalStackService;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::{page_id, PAGE_CAT_LIST};
use crate::usecases::u501_bulk_upload::view::open_bulk_upload_modal;

const STATUS_OPTIONS: [&str; 2] = ["Active", "Inactive"];

/// Searchable master data table with export and bulk upload. `entity` is
/// the tab key, e.g. `a004_product`.
pub fn master_data_list<R: MasterRecord>(entity: &'static str) -> impl IntoView {
    let modals =
        leptos::context::use_context::<ModalStackService>().expect("ModalStackService not found");
    let state = create_state::<R>();
    let (loading, set_loading) = signal(false);
    let (exporting, set_exporting) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    let load_items = move || {
        spawn_local(async move {
            set_loading.set(true);
            set_error.set(None);

            let query = state.with_untracked(|s| s.query());
            match api::fetch_page::<R>(&query).await {
                Ok(response) => {
                    log!("{}: {} records", R::TITLE, response.data.len());
                    state.update(|s| s.apply_response(response));
                }
                Err(e) => {
                    log::warn!("{} load failed: {}", R::TITLE, e);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| {
        if !state.with_untracked(|s| s.is_loaded) {
            load_items();
        }
    });

    let search_query = RwSignal::new(String::new());
    let status = RwSignal::new(String::new());

    let apply_filters = move || {
        state.update(|s| {
            s.search_query = search_query.get_untracked();
            s.status = status.get_untracked();
            s.page = 0;
        });
        load_items();
    };

    let go_to_page = move |new_page: usize| {
        state.update(|s| s.page = new_page);
        load_items();
    };

    let change_page_size = move |new_size: usize| {
        state.update(|s| {
            s.page_size = new_size;
            s.page = 0;
        });
        load_items();
    };

    let run_export = move || {
        if exporting.get_untracked() {
            return;
        }
        set_exporting.set(true);
        let query = MasterExportQuery::from(state.with_untracked(|s| s.query()));
        spawn_local(async move {
            if let Err(e) = api::export::<R>(&query).await {
                show_api_error(modals, &e);
            }
            set_exporting.set(false);
        });
    };

    let open_upload = move || {
        open_bulk_upload_modal(modals, R::BULK_ENTITY, Callback::new(move |_: ()| load_items()));
    };

    let headers = R::headers();

    view! {
        <PageFrame page_id=page_id(entity, PAGE_CAT_LIST) category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{R::TITLE}</h1>
                    <UiBadge variant="primary".to_string()>
                        {move || state.get().total_count.to_string()}
                    </UiBadge>
                </div>
                <div class="page__header-right">
                    <Flex gap=FlexGap::Small>
                        <Button appearance=ButtonAppearance::Primary on_click=move |_| open_upload()>
                            {icon("upload")}
                            " Bulk upload"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| run_export()
                            disabled=Signal::derive(move || exporting.get())
                        >
                            {icon("download")}
                            {move || if exporting.get() { " Exporting..." } else { " Export" }}
                        </Button>
                    </Flex>
                </div>
            </div>

            <div class="page__content">
                <div class="filter-panel">
                    <div class="filter-panel-header">
                        <div class="filter-panel-header__left">
                            <Flex gap=FlexGap::Small align=FlexAlign::End>
                                <div style="width: 280px;">
                                    <Input value=search_query placeholder="Search..." />
                                </div>
                                <select
                                    class="form__select"
                                    prop:value=move || status.get()
                                    on:change=move |ev| {
                                        status.set(event_target_value(&ev));
                                        apply_filters();
                                    }
                                >
                                    <option value="">"All statuses"</option>
                                    {STATUS_OPTIONS
                                        .iter()
                                        .map(|s| view! { <option value=*s>{*s}</option> })
                                        .collect_view()}
                                </select>
                                <Button
                                    appearance=ButtonAppearance::Secondary
                                    on_click=move |_| apply_filters()
                                    disabled=Signal::derive(move || loading.get())
                                >
                                    "Find"
                                </Button>
                            </Flex>
                        </div>

                        <div class="filter-panel-header__center">
                            <PaginationControls
                                current_page=Signal::derive(move || state.get().page)
                                total_pages=Signal::derive(move || state.get().total_pages)
                                total_count=Signal::derive(move || state.get().total_count)
                                page_size=Signal::derive(move || state.get().page_size)
                                on_page_change=Callback::new(go_to_page)
                                on_page_size_change=Callback::new(change_page_size)
                            />
                        </div>

                        <div class="filter-panel-header__right">
                            <Button
                                appearance=ButtonAppearance::Primary
                                on_click=move |_| load_items()
                                disabled=Signal::derive(move || loading.get())
                            >
                                {move || if loading.get() { "Loading..." } else { "Refresh" }}
                            </Button>
                        </div>
                    </div>
                </div>

                {move || {
                    error.get().map(|err| view! {
                        <div class="alert alert--error">{err}</div>
                    })
                }}

                <div class="table-wrapper">
                    <Table attr:style="width: 100%; min-width: 800px;">
                        <TableHeader>
                            <TableRow>
                                {headers
                                    .into_iter()
                                    .map(|h| view! { <TableHeaderCell min_width=120.0>{h}</TableHeaderCell> })
                                    .collect_view()}
                                <TableHeaderCell min_width=90.0>"Status"</TableHeaderCell>
                                <TableHeaderCell min_width=110.0>"Updated"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>

                        <TableBody>
                            <For
                                each=move || state.get().items
                                key=|item: &R| item.id().to_string()
                                children=move |item: R| {
                                    let status = item.status().clone();
                                    let updated = item
                                        .audit()
                                        .updated_at
                                        .clone()
                                        .or_else(|| item.audit().created_at.clone());
                                    view! {
                                        <TableRow>
                                            {item
                                                .cells()
                                                .into_iter()
                                                .map(|cell| view! {
                                                    <TableCell>
                                                        <TableCellLayout truncate=true>{cell}</TableCellLayout>
                                                    </TableCell>
                                                })
                                                .collect_view()}
                                            <TableCell>
                                                <UiBadge variant=if status.is_active() { "success" } else { "neutral" }.to_string()>
                                                    {status.label().to_string()}
                                                </UiBadge>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {format_optional_date(updated.as_deref())}
                                                </TableCellLayout>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>

                    <Show when=move || state.with(|s| s.is_loaded && s.items.is_empty())>
                        <div class="table__empty">"No records found"</div>
                    </Show>
                </div>
            </div>
        </PageFrame>
    }
}
