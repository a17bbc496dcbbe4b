use contracts::domain::common::revision::ordered;
use contracts::domain::common::{
    approval::can_submit_reason,
    ApprovalDocument, ApprovalHistoryEntry, ApprovalRecord, ApprovalRole, ApprovalState,
    FinancialSummary, LineItemView, RevisionStatus,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::api;
use super::mutation::{self, Decision, Outcome};
use crate::shared::components::alert_dialog::show_api_error;
use crate::shared::components::ui::UiBadge;
use crate::shared::date_utils::{format_datetime, format_optional_date};
use crate::shared::icons::icon;
use crate::shared::modal_stack::ModalStackService;
use crate::shared::number_format::{format_inr, format_percent};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::{page_id, PAGE_CAT_DETAIL};
use crate::system::auth::context::use_auth;

/// Record-specific section rendered under the line items.
pub type DetailsExtra<D> = fn(&D) -> AnyView;

/// What a pending rejection targets: one line item or the whole revision.
#[derive(Clone, Debug, PartialEq)]
enum RejectTarget {
    Revision,
    Item { id: String, title: String },
}

impl RejectTarget {
    fn item_id(&self) -> Option<&str> {
        match self {
            Self::Revision => None,
            Self::Item { id, .. } => Some(id),
        }
    }

    fn heading(&self, revision: u32) -> String {
        match self {
            Self::Revision => format!("Reject revision {}", revision),
            Self::Item { title, .. } => format!("Reject {}", title),
        }
    }
}

/// "by N. Rao · 01 May 2024, 10:00" under an approval badge.
fn approval_meta(state: &ApprovalState) -> Option<String> {
    let (by, at, note) = match state {
        ApprovalState::Pending => return None,
        ApprovalState::Approved { by, at, remark } => (by, at, remark),
        ApprovalState::Rejected { by, at, reason } => (by, at, reason),
    };
    let mut parts = Vec::new();
    if let Some(by) = by.as_deref().filter(|s| !s.is_empty()) {
        parts.push(format!("by {}", by));
    }
    if let Some(at) = at.as_deref().filter(|s| !s.is_empty()) {
        parts.push(format_datetime(at));
    }
    if let Some(note) = note.as_deref().filter(|s| !s.trim().is_empty()) {
        parts.push(format!("\"{}\"", note.trim()));
    }
    (!parts.is_empty()).then(|| parts.join(" · "))
}

fn history_line(entry: &ApprovalHistoryEntry) -> String {
    let mut line = entry.action.clone();
    if let Some(role) = entry.role.as_deref().filter(|s| !s.is_empty()) {
        line = format!("{} ({})", line, role);
    }
    if let Some(user) = &entry.user {
        line = format!("{} by {}", line, user.display());
    }
    if let Some(remark) = entry.remark.as_deref().filter(|s| !s.trim().is_empty()) {
        line = format!("{}: {}", line, remark.trim());
    }
    line
}

/// One entry of the revision selector, detached from the record.
#[derive(Clone, Debug, PartialEq)]
struct RevisionTab {
    number: u32,
    label: String,
    status: RevisionStatus,
}

fn revision_tabs<D: ApprovalDocument>(doc: &D) -> Vec<RevisionTab> {
    let current = doc.current_revision_number();
    ordered(doc.revisions())
        .into_iter()
        .map(|rev| RevisionTab {
            number: rev.revision_number,
            label: if rev.revision_number == current {
                format!("Rev {} (current)", rev.revision_number)
            } else {
                format!("Rev {}", rev.revision_number)
            },
            status: rev.status.clone(),
        })
        .collect()
}

fn approval_cell(record: &ApprovalRecord) -> impl IntoView {
    let state = record.state();
    let meta = approval_meta(&state);
    view! {
        <div class="approval-cell">
            <UiBadge variant=state.badge_variant().to_string()>{state.label()}</UiBadge>
            {meta.map(|m| view! { <div class="approval-cell__meta">{m}</div> })}
        </div>
    }
}

fn financials_table(f: &FinancialSummary) -> impl IntoView {
    let rows = vec![
        ("Sub total".to_string(), format_inr(f.grand_sub_total)),
        (
            format!("Discount ({})", format_percent(f.discount_percentage)),
            format_inr(f.discount_amount),
        ),
        ("After discount".to_string(), format_inr(f.after_discount)),
        (
            format!("TDS ({})", format_percent(f.tds_percentage)),
            format_inr(f.tds_amount),
        ),
        ("After TDS".to_string(), format_inr(f.after_tds)),
        (
            format!("GST ({})", format_percent(f.gst_percentage)),
            format_inr(f.gst_amount),
        ),
    ];
    view! {
        <table class="summary-table">
            <tbody>
                {rows
                    .into_iter()
                    .map(|(label, value)| {
                        view! {
                            <tr>
                                <td class="summary-table__label">{label}</td>
                                <td class="summary-table__value">{value}</td>
                            </tr>
                        }
                    })
                    .collect_view()}
                <tr class="summary-table__total">
                    <td class="summary-table__label">"Final amount"</td>
                    <td class="summary-table__value">{format_inr(f.final_amount)}</td>
                </tr>
            </tbody>
        </table>
    }
}

/// Approval panel for one record: revisions, financials, RSH/NSH decisions
/// per line item, revision-level approve/reject and closing with CO/CNote.
///
/// `record` follows the list state, so after `on_changed` re-fetches the
/// list the panel shows the server's new version.
pub fn approval_details<D: ApprovalDocument>(
    record: Signal<Option<D>>,
    on_changed: Callback<()>,
    on_close: Callback<()>,
    extra: Option<DetailsExtra<D>>,
) -> impl IntoView {
    let modals =
        leptos::context::use_context::<ModalStackService>().expect("ModalStackService not found");
    let (auth_state, _) = use_auth();

    // None = current revision
    let selected_revision = RwSignal::new(Option::<u32>::None);
    let approval_loading = RwSignal::new(false);
    let remark = RwSignal::new(String::new());
    let reject_target = RwSignal::new(Option::<RejectTarget>::None);
    let reason = RwSignal::new(String::new());
    let co_number = RwSignal::new(String::new());
    let cnote_number = RwSignal::new(String::new());

    let displayed = Signal::derive(move || {
        let doc = record.get()?;
        Some(match selected_revision.get() {
            Some(n) if n != doc.current_revision_number() => doc.with_revision(n),
            _ => doc,
        })
    });

    let is_current_view = Signal::derive(move || {
        let current = record.with(|r| r.as_ref().map(|d| d.current_revision_number()));
        match (selected_revision.get(), current) {
            (None, _) => true,
            (Some(n), Some(c)) => n == c,
            _ => false,
        }
    });

    // Decisions are only offered on the current revision while it awaits one.
    let can_decide = Signal::derive(move || {
        is_current_view.get()
            && record.with(|r| {
                r.as_ref().is_some_and(|d| {
                    !d.is_closed()
                        && d.current_revision()
                            .map(|rev| rev.status.awaits_decision())
                            .unwrap_or_else(|| d.status().awaits_decision())
                })
            })
    });

    let roles = Signal::derive(move || auth_state.get().approval_roles());

    let dispatch = move |decision: Decision| {
        let user_id = auth_state.with_untracked(|a| a.user_id());
        let planned = record.with_untracked(|doc| {
            mutation::plan(
                approval_loading.get_untracked(),
                doc.as_ref(),
                user_id.as_deref(),
                &decision,
            )
        });
        let request = match planned {
            Ok(Some(m)) => m,
            Ok(None) => return,
            Err(e) => {
                show_api_error(modals, &e);
                return;
            }
        };

        approval_loading.set(true);
        let what = decision.label();
        spawn_local(async move {
            let result = api::send(&request).await;
            approval_loading.set(false);
            match mutation::outcome(result) {
                Outcome::Refetch => {
                    log::info!("{} {}: done", D::KIND_LABEL, what);
                    remark.set(String::new());
                    reason.set(String::new());
                    reject_target.set(None);
                    if matches!(decision, Decision::Close { .. }) {
                        co_number.set(String::new());
                        cnote_number.set(String::new());
                    }
                    on_changed.run(());
                }
                Outcome::ShowError(e) => {
                    log::warn!("{} {} failed: {}", D::KIND_LABEL, what, e);
                    show_api_error(modals, &e);
                }
            }
        });
    };

    let approve = move |role: ApprovalRole, item_id: Option<String>| {
        dispatch(Decision::Approve {
            role,
            item_id,
            remark: remark.get_untracked(),
        });
    };

    let submit_rejection = move || {
        let Some(target) = reject_target.get_untracked() else {
            return;
        };
        dispatch(Decision::Reject {
            item_id: target.item_id().map(str::to_string),
            reason: reason.get_untracked(),
        });
    };

    let submit_close = move || {
        dispatch(Decision::Close {
            co_number: co_number.get_untracked(),
            cnote_number: cnote_number.get_untracked(),
        });
    };

    let busy = Signal::derive(move || approval_loading.get());

    let item_actions = move |item: &LineItemView| {
        if !can_decide.get() {
            return None;
        }
        let buttons = roles
            .get()
            .into_iter()
            .filter(|role| !item.approval(*role).is_decided())
            .map(|role| {
                let approve_id = item.id.clone();
                view! {
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Primary
                        disabled=busy
                        on_click=move |_| approve(role, Some(approve_id.clone()))
                    >
                        {format!("Approve {}", role.label())}
                    </Button>
                }
            })
            .collect_view();
        let target = RejectTarget::Item {
            id: item.id.clone(),
            title: item.title.clone(),
        };
        let can_reject = !roles.get().is_empty() && !(item.rsh.rejected || item.nsh.rejected);
        Some(view! {
            <Flex gap=FlexGap::Small>
                {buttons}
                {can_reject.then(|| view! {
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Secondary
                        disabled=busy
                        on_click=move |_| {
                            reason.set(String::new());
                            reject_target.set(Some(target.clone()));
                        }
                    >
                        "Reject"
                    </Button>
                })}
            </Flex>
        })
    };

    let header = move || {
        displayed.get().map(|doc| {
            let status = doc.status().clone();
            view! {
                <div class="page__header">
                    <div class="page__header-left">
                        <h2 class="page__title">
                            {format!("{} {}", D::KIND_LABEL, doc.number())}
                        </h2>
                        <UiBadge variant=status.badge_variant().to_string()>
                            {status.label().to_string()}
                        </UiBadge>
                    </div>
                    <div class="page__header-right">
                        <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close.run(())>
                            {icon("x")}
                        </Button>
                    </div>
                </div>
            }
        })
    };

    let revision_selector = move || {
        record.get().map(|doc| {
            let current = doc.current_revision_number();
            revision_tabs(&doc)
                .into_iter()
                .map(|tab| {
                    let n = tab.number;
                    let is_selected =
                        move || selected_revision.get().unwrap_or(current) == n;
                    view! {
                        <button
                            class=move || {
                                if is_selected() { "revision-tab revision-tab--active" } else { "revision-tab" }
                            }
                            on:click=move |_| {
                                selected_revision.set((n != current).then_some(n));
                            }
                        >
                            {tab.label}
                            " "
                            <UiBadge variant=tab.status.badge_variant().to_string()>
                                {tab.status.label().to_string()}
                            </UiBadge>
                        </button>
                    }
                })
                .collect_view()
        })
    };

    let summary = move || {
        displayed.get().map(|doc| {
            view! {
                <div class="details-grid">
                    <div class="details-grid__item">
                        <span class="details-grid__label">"Customer"</span>
                        <span>{doc.customer_name()}</span>
                    </div>
                    <div class="details-grid__item">
                        <span class="details-grid__label">"Created"</span>
                        <span>{format_optional_date(doc.created_at())}</span>
                    </div>
                    <div class="details-grid__item">
                        <span class="details-grid__label">"CO Number"</span>
                        <span>{doc.co_number().unwrap_or("—").to_string()}</span>
                    </div>
                    <div class="details-grid__item">
                        <span class="details-grid__label">"CNote Number"</span>
                        <span>{doc.cnote_number().unwrap_or("—").to_string()}</span>
                    </div>
                    <div class="details-grid__item details-grid__item--wide">
                        <span class="details-grid__label">"Remark"</span>
                        <span>{doc.remark().unwrap_or("—").to_string()}</span>
                    </div>
                </div>
                {financials_table(doc.financials())}
            }
        })
    };

    let line_items = move || {
        displayed.get().map(|doc| {
            let items = doc.line_items();
            view! {
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"Item"</TableHeaderCell>
                            <TableHeaderCell>"Sub total"</TableHeaderCell>
                            <TableHeaderCell>"RSH"</TableHeaderCell>
                            <TableHeaderCell>"NSH"</TableHeaderCell>
                            <TableHeaderCell>"Actions"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {items
                            .into_iter()
                            .map(|item| {
                                let actions = item_actions(&item);
                                view! {
                                    <TableRow>
                                        <TableCell>
                                            <div class="line-item">
                                                <div class="line-item__title">{item.title.clone()}</div>
                                                <div class="line-item__subtitle">{item.subtitle.clone()}</div>
                                            </div>
                                        </TableCell>
                                        <TableCell>
                                            <span class="table__number">{format_inr(item.subtotal)}</span>
                                        </TableCell>
                                        <TableCell>{approval_cell(&item.rsh)}</TableCell>
                                        <TableCell>{approval_cell(&item.nsh)}</TableCell>
                                        <TableCell>{actions}</TableCell>
                                    </TableRow>
                                }
                            })
                            .collect_view()}
                    </TableBody>
                </Table>
                {extra.map(|render| render(&doc))}
            }
        })
    };

    let history = move || {
        let doc = record.get()?;
        let n = selected_revision
            .get()
            .unwrap_or_else(|| doc.current_revision_number());
        let rev = doc.revisions().iter().find(|r| r.revision_number == n)?.clone();
        let no_actions = rev.approval_history.is_empty();
        Some(view! {
            <div class="revision-history">
                <h3 class="section-title">{format!("Revision {} history", n)}</h3>
                {rev.revision_date.as_deref().map(|d| view! {
                    <div class="revision-history__date">{format!("Revised {}", format_datetime(d))}</div>
                })}
                {rev.rejection_reason.clone().filter(|r| !r.trim().is_empty()).map(|r| view! {
                    <div class="alert alert--error">{format!("Rejected: {}", r)}</div>
                })}
                <ul class="revision-history__list">
                    {rev.approval_history
                        .iter()
                        .map(|entry| {
                            let date = entry.date.as_deref().map(format_datetime).unwrap_or_default();
                            view! {
                                <li>
                                    <span class="revision-history__when">{date}</span>
                                    " "
                                    <span>{history_line(entry)}</span>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
                {no_actions.then(|| view! { <div class="muted">"No approval actions yet"</div> })}
            </div>
        })
    };

    let revision_actions = move || {
        if !can_decide.get() || roles.get().is_empty() {
            return None;
        }
        let approve_buttons = roles
            .get()
            .into_iter()
            .map(|role| {
                view! {
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=busy
                        on_click=move |_| approve(role, None)
                    >
                        {format!("Approve revision as {}", role.label())}
                    </Button>
                }
            })
            .collect_view();
        Some(view! {
            <div class="approval-actions">
                <Flex vertical=true gap=FlexGap::Small>
                    <Label>"Remark (optional):"</Label>
                    <Input value=remark placeholder="Remark for the approval" />
                </Flex>
                <Flex gap=FlexGap::Small>
                    {approve_buttons}
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=busy
                        on_click=move |_| {
                            reason.set(String::new());
                            reject_target.set(Some(RejectTarget::Revision));
                        }
                    >
                        "Reject revision"
                    </Button>
                </Flex>
            </div>
        })
    };

    let reject_form = move || {
        let target = reject_target.get()?;
        let revision = record.with(|r| r.as_ref().map(|d| d.current_revision_number()))?;
        Some(view! {
            <div class="reject-form">
                <h3 class="section-title">{target.heading(revision)}</h3>
                <Textarea value=reason placeholder="Reason for rejection (required)" />
                <Flex gap=FlexGap::Small>
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=Signal::derive(move || {
                            approval_loading.get() || !can_submit_reason(&reason.get())
                        })
                        on_click=move |_| submit_rejection()
                    >
                        "Reject"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        disabled=busy
                        on_click=move |_| reject_target.set(None)
                    >
                        "Cancel"
                    </Button>
                </Flex>
            </div>
        })
    };

    let close_form = move || {
        let closable = is_current_view.get()
            && record.with(|r| {
                r.as_ref()
                    .is_some_and(|d| !d.is_closed() && *d.status() == RevisionStatus::Approved)
            });
        closable.then(|| view! {
            <div class="close-form">
                <h3 class="section-title">"Close with CO / CNote number"</h3>
                <Flex gap=FlexGap::Small align=FlexAlign::End>
                    <Flex vertical=true gap=FlexGap::Small>
                        <Label>"CO Number:"</Label>
                        <Input value=co_number />
                    </Flex>
                    <Flex vertical=true gap=FlexGap::Small>
                        <Label>"CNote Number:"</Label>
                        <Input value=cnote_number />
                    </Flex>
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=busy
                        on_click=move |_| submit_close()
                    >
                        "Close"
                    </Button>
                </Flex>
            </div>
        })
    };

    let entity = D::TAB_KEY;

    view! {
        <PageFrame page_id=page_id(entity, PAGE_CAT_DETAIL) category=PAGE_CAT_DETAIL>
            <Show
                when=move || record.with(Option::is_some)
                fallback=move || view! {
                    <div class="page__content">
                        <div class="alert alert--warning">
                            "This record is no longer in the current list. Close and search again."
                        </div>
                        <Button on_click=move |_| on_close.run(())>"Close"</Button>
                    </div>
                }
            >
                {header}
                <div class="page__content">
                    <div class="revision-tabs">{revision_selector}</div>
                    <Show when=move || !is_current_view.get()>
                        <div class="alert alert--info">
                            "Viewing an earlier revision. Decisions apply to the current one."
                        </div>
                    </Show>
                    <Show when=move || approval_loading.get()>
                        <Spinner />
                    </Show>
                    {summary}
                    {line_items}
                    {revision_actions}
                    {reject_form}
                    {close_form}
                    {history}
                </div>
            </Show>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::UserRef;

    #[test]
    fn test_approval_meta() {
        assert_eq!(approval_meta(&ApprovalState::Pending), None);

        let state = ApprovalState::Rejected {
            by: Some("N. Rao".to_string()),
            at: None,
            reason: Some(" price too high ".to_string()),
        };
        assert_eq!(
            approval_meta(&state).as_deref(),
            Some("by N. Rao · \"price too high\"")
        );

        let state = ApprovalState::Approved {
            by: None,
            at: None,
            remark: None,
        };
        assert_eq!(approval_meta(&state), None);
    }

    #[test]
    fn test_history_line() {
        let entry = ApprovalHistoryEntry {
            action: "approved".to_string(),
            role: Some("RSH".to_string()),
            user: Some(UserRef::Id("u-7".to_string())),
            remark: Some("ok".to_string()),
            date: None,
        };
        assert_eq!(history_line(&entry), "approved (RSH) by u-7: ok");
    }

    #[test]
    fn test_reject_target() {
        assert_eq!(RejectTarget::Revision.item_id(), None);
        assert_eq!(RejectTarget::Revision.heading(2), "Reject revision 2");
        let target = RejectTarget::Item {
            id: "i1".to_string(),
            title: "MRI Scanner (SN-1)".to_string(),
        };
        assert_eq!(target.item_id(), Some("i1"));
        assert_eq!(target.heading(2), "Reject MRI Scanner (SN-1)");
    }

    #[test]
    fn test_revision_tabs() {
        use contracts::domain::a001_proposal::Proposal;

        let doc: Proposal = serde_json::from_str(
            r#"{
                "_id": "p1",
                "currentRevision": 2,
                "revisions": [
                    {"revisionNumber": 2, "status": "Pending"},
                    {"revisionNumber": 1, "status": "Rejected"}
                ]
            }"#,
        )
        .unwrap();

        let tabs = revision_tabs(&doc);
        drop(doc);

        assert_eq!(
            tabs,
            vec![
                RevisionTab {
                    number: 1,
                    label: "Rev 1".to_string(),
                    status: RevisionStatus::Rejected,
                },
                RevisionTab {
                    number: 2,
                    label: "Rev 2 (current)".to_string(),
                    status: RevisionStatus::Pending,
                },
            ]
        );
    }
}
