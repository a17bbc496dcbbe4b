use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u501_bulk_upload::{
    validate_file, BulkEntity, BulkUpload, BulkUploadPhase, BulkUploadProgress, FileFormat,
    HeaderVerdict,
};
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::api;
use crate::shared::file_reader::{read_file_bytes, take_selected_file};
use crate::shared::icons::icon;
use crate::shared::modal_stack::ModalStackService;
use crate::shared::number_format::format_percent;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::{page_id, PAGE_CAT_USECASE};

fn format_size(bytes: f64) -> String {
    if bytes >= 1024.0 * 1024.0 {
        format!("{:.2} MB", bytes / (1024.0 * 1024.0))
    } else {
        format!("{:.2} KB", bytes / 1024.0)
    }
}

fn verdict_view(verdict: HeaderVerdict) -> AnyView {
    if let Some(err) = verdict.error.clone() {
        return view! {
            <div class="warning-box warning-box--error">
                <span class="warning-box__icon">"⚠"</span>
                <span class="warning-box__text">{err}</span>
            </div>
        }
        .into_any();
    }

    let summary = if verdict.is_valid {
        format!(
            "Headers OK: {} of {} columns recognised",
            verdict.found_count(),
            verdict.mapped_columns.len()
        )
    } else {
        format!("Missing required columns: {}", verdict.missing_fields.join(", "))
    };
    let summary_class = if verdict.is_valid {
        "warning-box warning-box--success"
    } else {
        "warning-box warning-box--error"
    };

    view! {
        <div class=summary_class>
            <span class="warning-box__text">{summary}</span>
        </div>
        <Table attr:style="width: 100%;">
            <TableHeader>
                <TableRow>
                    <TableHeaderCell min_width=160.0>"Field"</TableHeaderCell>
                    <TableHeaderCell min_width=200.0>"Column in file"</TableHeaderCell>
                    <TableHeaderCell min_width=80.0>"Position"</TableHeaderCell>
                </TableRow>
            </TableHeader>
            <TableBody>
                {verdict
                    .mapped_columns
                    .into_iter()
                    .map(|m| {
                        let found = m.found.is_some();
                        view! {
                            <TableRow class:table__row--missing=!found>
                                <TableCell>
                                    <TableCellLayout>{m.expected}</TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout truncate=true>
                                        {m.found.unwrap_or_else(|| "not found".to_string())}
                                    </TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>
                                        {m.file_index.map(|i| (i + 1).to_string()).unwrap_or_default()}
                                    </TableCellLayout>
                                </TableCell>
                            </TableRow>
                        }
                    })
                    .collect_view()}
            </TableBody>
        </Table>
    }
    .into_any()
}

fn progress_view(p: BulkUploadProgress) -> AnyView {
    if p.phase == BulkUploadPhase::Idle {
        return ().into_any();
    }

    let percent = p.percent();
    let bar_class = match p.phase {
        BulkUploadPhase::Failed => "progress-bar__fill progress-bar__fill--error",
        BulkUploadPhase::Completed => "progress-bar__fill progress-bar__fill--success",
        _ => "progress-bar__fill",
    };
    let failures: Vec<_> = p.failures().cloned().collect();

    view! {
        <div class="bulk-upload__progress">
            <div class="progress-bar">
                <div class=bar_class style=format!("width: {}%;", percent)></div>
            </div>
            <div class="bulk-upload__counters">
                <span>{format!("{} / {} rows", p.processed, p.total)}</span>
                <span>{format_percent(percent as f64)}</span>
                <span class="text--success">{format!("Created: {}", p.created)}</span>
                <span class="text--primary">{format!("Updated: {}", p.updated)}</span>
                <span class="text--error">{format!("Failed: {}", p.failed)}</span>
            </div>
            {p.message.map(|m| view! { <div class="bulk-upload__message">{m}</div> })}
            {p.error.map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}
            {(!failures.is_empty()).then(|| view! {
                <h4 class="bulk-upload__subtitle">"Failed rows"</h4>
                <div class="table-wrapper bulk-upload__failures">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell min_width=60.0>"Row"</TableHeaderCell>
                                <TableHeaderCell min_width=140.0>"Key"</TableHeaderCell>
                                <TableHeaderCell min_width=260.0>"Error"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {failures
                                .into_iter()
                                .map(|r| view! {
                                    <TableRow>
                                        <TableCell>
                                            <TableCellLayout>
                                                {r.row.map(|n| n.to_string()).unwrap_or_default()}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>
                                                {r.key.unwrap_or_default()}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                {r.message.unwrap_or_else(|| r.status.label().to_string())}
                                            </TableCellLayout>
                                        </TableCell>
                                    </TableRow>
                                })
                                .collect_view()}
                        </TableBody>
                    </Table>
                </div>
            })}
        </div>
    }
    .into_any()
}

/// Numbers file picks so a slow read can tell it was superseded.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct PickCounter {
    latest: u64,
}

impl PickCounter {
    fn next(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    fn is_latest(&self, pick: u64) -> bool {
        pick == self.latest
    }
}

/// File picker, header check and streamed upload for one master data
/// collection.
///
/// Upload is enabled only for a file whose headers passed validation and
/// while no upload is running. Changing `entity` re-validates the picked
/// file against the new alias table.
#[component]
pub fn BulkUploadWidget(
    #[prop(into)] entity: Signal<BulkEntity>,
    progress: RwSignal<BulkUploadProgress>,
    #[prop(optional)] on_finished: Option<Callback<()>>,
) -> impl IntoView {
    let (file_name, set_file_name) = signal::<Option<String>>(None);
    let (file_size, set_file_size) = signal(0f64);
    let (reading, set_reading) = signal(false);
    let verdict = RwSignal::new(None::<HeaderVerdict>);

    let file = StoredValue::new_local(None::<web_sys::File>);
    let bytes = StoredValue::new(None::<Vec<u8>>);
    let picks = StoredValue::new(PickCounter::default());

    let revalidate = move || {
        let name = file_name.get_untracked();
        let table = entity.get_untracked().alias_table();
        let result = bytes.with_value(|b| {
            b.as_deref()
                .zip(name.as_deref())
                .map(|(data, name)| validate_file(name, data, table))
        });
        verdict.set(result);
    };

    Effect::new(move |_| {
        entity.track();
        revalidate();
    });

    let on_file_change = move |ev: leptos::ev::Event| {
        if progress.with_untracked(BulkUploadProgress::is_uploading) {
            return;
        }
        let Some(selected) = take_selected_file(&ev) else {
            return;
        };
        let this_pick = picks.try_update_value(PickCounter::next).unwrap_or_default();
        let name = selected.name();
        set_file_name.set(Some(name.clone()));
        set_file_size.set(selected.size());
        file.set_value(Some(selected.clone()));
        bytes.set_value(None);
        verdict.set(None);
        progress.set(BulkUploadProgress::default());

        set_reading.set(true);
        spawn_local(async move {
            let read = read_file_bytes(&selected).await;
            // a newer pick replaced this one while reading
            if !picks.with_value(|p| p.is_latest(this_pick)) {
                return;
            }
            match read {
                Ok(data) => {
                    log!("Read {} ({} bytes)", name, data.len());
                    bytes.set_value(Some(data));
                    revalidate();
                }
                Err(e) => verdict.set(Some(HeaderVerdict::failed(e))),
            }
            set_reading.set(false);
        });
    };

    let can_upload = Signal::derive(move || {
        !reading.get()
            && !progress.with(BulkUploadProgress::is_uploading)
            && verdict.with(|v| v.as_ref().is_some_and(|v| v.is_valid))
    });

    let start_upload = move || {
        if !can_upload.get_untracked() {
            return;
        }
        let Some(selected) = file.get_value() else {
            return;
        };
        let target = entity.get_untracked();
        progress.set(BulkUploadProgress::started());

        spawn_local(async move {
            let result =
                api::upload(target, &selected, |event| progress.update(|p| p.apply(event))).await;
            progress.update(|p| match result {
                Ok(()) => p.end_of_stream(),
                Err(e) => {
                    log::error!("Bulk upload of {} failed: {}", target.as_str(), e);
                    p.fail(e.to_string());
                }
            });
            progress.with_untracked(|p| {
                log!(
                    "Bulk upload {}: {:?}, {} created, {} updated, {} failed",
                    target.as_str(),
                    p.phase,
                    p.created,
                    p.updated,
                    p.failed
                )
            });
            if let Some(cb) = on_finished {
                cb.run(());
            }
        });
    };

    let input_id = move || format!("bulk-upload-file-{}", entity.get().as_str());

    view! {
        <div class="bulk-upload">
            <div class="bulk-upload__filebar">
                <label class="button button--secondary" for=input_id>
                    {icon("folder-open")}
                    " Choose file"
                </label>
                <input
                    id=input_id
                    type="file"
                    accept=FileFormat::ACCEPT
                    class="hidden"
                    on:change=on_file_change
                    prop:disabled=move || progress.with(BulkUploadProgress::is_uploading)
                />
                {move || match file_name.get() {
                    Some(name) => view! {
                        <span class="bulk-upload__fileinfo">
                            <strong>{name}</strong>
                            {format!(" ({})", format_size(file_size.get()))}
                        </span>
                    }
                    .into_any(),
                    None => view! {
                        <span class="bulk-upload__filehint">"CSV, TSV, Excel or JSON"</span>
                    }
                    .into_any(),
                }}
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| start_upload()
                    disabled=Signal::derive(move || !can_upload.get())
                >
                    {icon("upload")}
                    {move || {
                        if progress.with(BulkUploadProgress::is_uploading) {
                            " Uploading..."
                        } else {
                            " Upload"
                        }
                    }}
                </Button>
            </div>

            <Show when=move || reading.get()>
                <Flex gap=FlexGap::Small align=FlexAlign::Center>
                    <Spinner />
                    <span>"Reading file..."</span>
                </Flex>
            </Show>

            {move || verdict.get().map(verdict_view)}
            {move || progress_view(progress.get())}
        </div>
    }
}

/// Upload dialog opened from a master data list. Overlay click and Escape
/// are ignored while the upload runs.
pub fn open_bulk_upload_modal(
    modals: ModalStackService,
    entity: BulkEntity,
    on_finished: Callback<()>,
) {
    let progress = RwSignal::new(BulkUploadProgress::default());
    modals.push_guarded(
        "modal--wide",
        move || !progress.with_untracked(BulkUploadProgress::is_uploading),
        move |handle| {
            let close = move |_| {
                if !progress.with_untracked(BulkUploadProgress::is_uploading) {
                    handle.close();
                }
            };
            view! {
                <div class="modal-header">
                    <h3 class="modal-title">{format!("Bulk upload: {}", entity.label())}</h3>
                    <div class="modal-header-actions">
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=close
                            disabled=Signal::derive(move || progress.with(BulkUploadProgress::is_uploading))
                        >
                            {icon("x")}
                            " Close"
                        </Button>
                    </div>
                </div>
                <div class="modal-body">
                    <BulkUploadWidget entity=entity progress=progress on_finished=on_finished />
                </div>
            }
            .into_any()
        },
    );
}

/// Bulk upload tab with a target selector.
#[component]
pub fn BulkUploadPage() -> impl IntoView {
    let entity = RwSignal::new(BulkEntity::Product);
    let progress = RwSignal::new(BulkUploadProgress::default());

    view! {
        <PageFrame page_id=page_id(&BulkUpload::full_name(), PAGE_CAT_USECASE) category=PAGE_CAT_USECASE>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{BulkUpload::display_name()}</h1>
                </div>
            </div>
            <div class="page__content">
                <p class="page__description">{BulkUpload::description()}</p>
                <Flex gap=FlexGap::Small align=FlexAlign::Center>
                    <Label>"Load into:"</Label>
                    <select
                        class="form__select"
                        prop:disabled=move || progress.with(BulkUploadProgress::is_uploading)
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            if let Some(selected) = BulkEntity::ALL
                                .into_iter()
                                .find(|e| e.as_str() == value)
                            {
                                entity.set(selected);
                                progress.set(BulkUploadProgress::default());
                            }
                        }
                    >
                        {BulkEntity::ALL
                            .into_iter()
                            .map(|e| {
                                view! {
                                    <option value=e.as_str() selected=move || entity.get() == e>
                                        {e.label()}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </Flex>
                <BulkUploadWidget entity=entity progress=progress />
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512.0), "0.50 KB");
        assert_eq!(format_size(2048.0), "2.00 KB");
        assert_eq!(format_size(3.0 * 1024.0 * 1024.0), "3.00 MB");
    }

    #[test]
    fn test_pick_counter() {
        let mut picks = PickCounter::default();
        let first = picks.next();
        assert!(picks.is_latest(first));

        // same file picked again while the first read is still running
        let second = picks.next();
        assert_ne!(first, second);
        assert!(!picks.is_latest(first));
        assert!(picks.is_latest(second));
    }
}
