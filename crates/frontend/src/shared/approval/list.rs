use contracts::domain::common::{ApprovalDocument, RevisionStatus};
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::details::{approval_details, DetailsExtra};
use super::state::{create_state, ExportQuery};
use super::api;
use crate::shared::components::alert_dialog::show_api_error;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::ui::UiBadge;
use crate::shared::date_utils::format_optional_date;
use crate::shared::icons::icon;
use crate::shared::modal_stack::ModalStackService;
use crate::shared::number_format::format_inr;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::{page_id, PAGE_CAT_LIST};

/// Paginated, filterable list of proposals or on-calls. Clicking a number
/// opens the approval panel in a modal; mutations there re-fetch this list.
pub fn approval_list<D: ApprovalDocument>(
    title: &'static str,
    extra: Option<DetailsExtra<D>>,
) -> impl IntoView {
    let modals =
        leptos::context::use_context::<ModalStackService>().expect("ModalStackService not found");
    let state = create_state::<D>();
    let (loading, set_loading) = signal(false);
    let (exporting, set_exporting) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let (is_filter_expanded, set_is_filter_expanded) = signal(false);

    let load_items = move || {
        spawn_local(async move {
            set_loading.set(true);
            set_error.set(None);

            let query = state.with_untracked(|s| s.query());
            match api::search::<D>(&query).await {
                Ok(response) => {
                    log!("{}: {} records", D::KIND_LABEL, response.data.len());
                    state.update(|s| s.apply_response(response));
                }
                Err(e) => {
                    log::warn!("{} search failed: {}", D::KIND_LABEL, e);
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

    let reload = Callback::new(move |_: ()| load_items());

    let open_detail = move |id: String| {
        let record = Signal::derive(move || state.with(|s| s.find(&id)));
        modals.push_with_class("modal--wide", move |handle| {
            let on_close = Callback::new(move |_: ()| handle.close());
            approval_details::<D>(record, reload, on_close, extra).into_any()
        });
    };

    let search_query = RwSignal::new(String::new());
    let status = RwSignal::new(String::new());
    let from_date = RwSignal::new(String::new());
    let to_date = RwSignal::new(String::new());

    let apply_filters = move || {
        state.update(|s| {
            s.search_query = search_query.get_untracked();
            s.status = status.get_untracked();
            s.from_date = from_date.get_untracked();
            s.to_date = to_date.get_untracked();
            s.page = 0;
        });
        load_items();
    };

    let reset_filters = move || {
        search_query.set(String::new());
        status.set(String::new());
        from_date.set(String::new());
        to_date.set(String::new());
        apply_filters();
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
        let query = ExportQuery::from(state.with_untracked(|s| s.query()));
        spawn_local(async move {
            if let Err(e) = api::export::<D>(&query).await {
                show_api_error(modals, &e);
            }
            set_exporting.set(false);
        });
    };

    let active_filters_count = Signal::derive(move || state.with(|s| s.active_filters_count()));

    view! {
        <PageFrame page_id=page_id(D::TAB_KEY, PAGE_CAT_LIST) category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{title}</h1>
                    <UiBadge variant="primary".to_string()>
                        {move || state.get().total_count.to_string()}
                    </UiBadge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| run_export()
                        disabled=Signal::derive(move || exporting.get())
                    >
                        {icon("download")}
                        {move || if exporting.get() { " Exporting..." } else { " Export" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <div class="filter-panel">
                    <div class="filter-panel-header">
                        <div
                            class="filter-panel-header__left"
                            on:click=move |_| set_is_filter_expanded.update(|e| *e = !*e)
                        >
                            <span class=move || {
                                if is_filter_expanded.get() {
                                    "filter-panel__chevron filter-panel__chevron--expanded"
                                } else {
                                    "filter-panel__chevron"
                                }
                            }>{icon("chevron-down")}</span>
                            <span class="filter-panel__title">"Filters"</span>
                            {move || {
                                let count = active_filters_count.get();
                                (count > 0)
                                    .then(|| view! { <span class="filter-panel__badge">{count}</span> })
                            }}
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

                    <Show when=move || is_filter_expanded.get()>
                        <div class="filter-panel-content">
                            <Flex gap=FlexGap::Small align=FlexAlign::End>
                                <div style="flex: 1; max-width: 320px;">
                                    <Flex vertical=true gap=FlexGap::Small>
                                        <Label>"Search:"</Label>
                                        <Input value=search_query placeholder="Number, customer..." />
                                    </Flex>
                                </div>
                                <Flex vertical=true gap=FlexGap::Small>
                                    <Label>"Status:"</Label>
                                    <select
                                        class="form__select"
                                        prop:value=move || status.get()
                                        on:change=move |ev| status.set(event_target_value(&ev))
                                    >
                                        <option value="">"All"</option>
                                        {RevisionStatus::filter_options()
                                            .into_iter()
                                            .map(|s| {
                                                view! { <option value=s.as_str().to_string()>{s.label().to_string()}</option> }
                                            })
                                            .collect_view()}
                                    </select>
                                </Flex>
                                <Flex vertical=true gap=FlexGap::Small>
                                    <Label>"From:"</Label>
                                    <input
                                        type="date"
                                        class="form__input"
                                        prop:value=move || from_date.get()
                                        on:change=move |ev| from_date.set(event_target_value(&ev))
                                    />
                                </Flex>
                                <Flex vertical=true gap=FlexGap::Small>
                                    <Label>"To:"</Label>
                                    <input
                                        type="date"
                                        class="form__input"
                                        prop:value=move || to_date.get()
                                        on:change=move |ev| to_date.set(event_target_value(&ev))
                                    />
                                </Flex>
                                <Button
                                    appearance=ButtonAppearance::Secondary
                                    on_click=move |_| apply_filters()
                                    disabled=Signal::derive(move || loading.get())
                                >
                                    "Find"
                                </Button>
                                <Button
                                    appearance=ButtonAppearance::Subtle
                                    on_click=move |_| reset_filters()
                                    disabled=Signal::derive(move || loading.get())
                                >
                                    "Reset"
                                </Button>
                            </Flex>
                        </div>
                    </Show>
                </div>

                {move || {
                    error.get().map(|err| view! {
                        <div class="alert alert--error">{err}</div>
                    })
                }}

                <div class="table-wrapper">
                    <Table attr:style="width: 100%; min-width: 900px;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell min_width=140.0>"Number"</TableHeaderCell>
                                <TableHeaderCell min_width=240.0>"Customer"</TableHeaderCell>
                                <TableHeaderCell min_width=60.0>"Rev."</TableHeaderCell>
                                <TableHeaderCell min_width=110.0>"Status"</TableHeaderCell>
                                <TableHeaderCell min_width=140.0>"Final Amount"</TableHeaderCell>
                                <TableHeaderCell min_width=120.0>"CO Number"</TableHeaderCell>
                                <TableHeaderCell min_width=120.0>"Created"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>

                        <TableBody>
                            <For
                                each=move || state.get().items
                                key=|item: &D| item.id().to_string()
                                children=move |item: D| {
                                    let item_id = item.id().to_string();
                                    let status = item.status().clone();
                                    let number = item.number().to_string();
                                    let customer_name = item.customer_name();
                                    let revision_number = item.current_revision_number().to_string();
                                    let final_amount = format_inr(item.financials().final_amount);
                                    let co_number = item.co_number().unwrap_or("—").to_string();
                                    let created_at = format_optional_date(item.created_at());

                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <a
                                                        href="#"
                                                        class="table__link"
                                                        on:click=move |e| {
                                                            e.prevent_default();
                                                            open_detail(item_id.clone());
                                                        }
                                                    >
                                                        {number}
                                                    </a>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {customer_name}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {revision_number}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <UiBadge variant=status.badge_variant().to_string()>
                                                        {status.label().to_string()}
                                                    </UiBadge>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <span class="table__number">
                                                        {final_amount}
                                                    </span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {co_number}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {created_at}
                                                </TableCellLayout>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>

                    <Show when=move || state.with(|s| s.is_loaded && s.items.is_empty())>
                        <div class="table__empty">
                            {format!("No {} records match the filters", D::KIND_LABEL.to_lowercase())}
                        </div>
                    </Show>
                </div>
            </div>
        </PageFrame>
    }
}
