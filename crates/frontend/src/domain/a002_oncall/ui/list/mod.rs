use contracts::domain::a002_oncall::{OnCall, ProductGroup};
use leptos::prelude::*;
use thaw::*;

use crate::shared::approval::approval_list;
use crate::shared::number_format::{format_amount, format_inr};

/// One spare line, formatted and detached from its on-call.
#[derive(Debug, Clone, PartialEq)]
struct SpareRow {
    part_no: String,
    description: String,
    quantity: String,
    rate: String,
    amount: String,
}

fn spare_rows(group: &ProductGroup) -> Vec<SpareRow> {
    group
        .spares
        .iter()
        .map(|spare| SpareRow {
            part_no: spare.part_number.clone(),
            description: spare.description.clone(),
            quantity: format_amount(spare.quantity),
            rate: format_inr(spare.rate),
            amount: format_inr(spare.amount),
        })
        .collect()
}

fn group_view(group: &ProductGroup) -> AnyView {
    let title = group.product_group.clone();
    let subtotal = format_inr(group.subtotal);
    let spares = spare_rows(group)
        .into_iter()
        .map(|row| {
            view! {
                <TableRow>
                    <TableCell><TableCellLayout>{row.part_no}</TableCellLayout></TableCell>
                    <TableCell>
                        <TableCellLayout truncate=true>{row.description}</TableCellLayout>
                    </TableCell>
                    <TableCell><span class="table__number">{row.quantity}</span></TableCell>
                    <TableCell><span class="table__number">{row.rate}</span></TableCell>
                    <TableCell><span class="table__number">{row.amount}</span></TableCell>
                </TableRow>
            }
        })
        .collect_view();

    view! {
        <div class="spares-group">
            <div class="spares-group__header">
                <span class="spares-group__title">{title}</span>
                <span class="table__number">{subtotal}</span>
            </div>
            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell min_width=120.0>"Part No."</TableHeaderCell>
                        <TableHeaderCell min_width=220.0>"Description"</TableHeaderCell>
                        <TableHeaderCell min_width=70.0>"Qty"</TableHeaderCell>
                        <TableHeaderCell min_width=110.0>"Rate"</TableHeaderCell>
                        <TableHeaderCell min_width=120.0>"Amount"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>{spares}</TableBody>
            </Table>
        </div>
    }
    .into_any()
}

/// Complaint reference and spares per product group.
fn spares_section(oncall: &OnCall) -> AnyView {
    let complaint = oncall
        .complaint_id
        .clone()
        .filter(|c| !c.trim().is_empty());
    let has_groups = !oncall.product_groups.is_empty();
    let groups = oncall.product_groups.iter().map(group_view).collect_view();

    view! {
        {complaint.map(|c| view! {
            <div class="details__meta">
                <span class="details__meta-label">"Complaint:"</span>
                <span>{c}</span>
            </div>
        })}
        <h4 class="details__section-title">"Spares"</h4>
        {if !has_groups {
            view! { <div class="details__empty">"No spares on this on-call"</div> }.into_any()
        } else {
            groups.into_any()
        }}
    }
    .into_any()
}

#[component]
pub fn OnCallList() -> impl IntoView {
    approval_list::<OnCall>("On-Calls", Some(spares_section))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spare_rows() {
        let group: ProductGroup = serde_json::from_str(
            r#"{
                "productGroup": "Compressors",
                "spares": [
                    {"partNumber": "SP-9", "description": "Valve", "qty": 2, "rate": 1500, "amount": 3000}
                ]
            }"#,
        )
        .unwrap();

        let rows = spare_rows(&group);
        drop(group);

        assert_eq!(
            rows,
            vec![SpareRow {
                part_no: "SP-9".to_string(),
                description: "Valve".to_string(),
                quantity: "2.00".to_string(),
                rate: "₹1,500.00".to_string(),
                amount: "₹3,000.00".to_string(),
            }]
        );
    }
}
