use contracts::domain::a001_proposal::Proposal;
use leptos::prelude::*;
use thaw::*;

use crate::shared::approval::approval_list;
use crate::shared::number_format::format_inr;

/// One equipment line, detached from the proposal it came from.
#[derive(Debug, Clone, PartialEq)]
struct EquipmentRow {
    serial: String,
    part_no: String,
    description: String,
    warranty: String,
    years: String,
    subtotal: String,
}

fn equipment_rows(proposal: &Proposal) -> Vec<EquipmentRow> {
    proposal
        .items
        .iter()
        .map(|item| EquipmentRow {
            serial: item.equipment.serialnumber.clone(),
            part_no: item.equipment.materialcode.clone(),
            description: item.equipment.materialdescription.clone(),
            warranty: item.warranty_type.clone(),
            years: if item.years == 0 {
                "—".to_string()
            } else {
                item.years.to_string()
            },
            subtotal: format_inr(item.subtotal),
        })
        .collect()
}

/// Covered equipment with warranty terms, below the approval table.
fn equipment_section(proposal: &Proposal) -> AnyView {
    let rows = equipment_rows(proposal);
    if rows.is_empty() {
        return view! { <div class="details__empty">"No equipment on this proposal"</div> }.into_any();
    }

    let rows = rows
        .into_iter()
        .map(|row| {
            view! {
                <TableRow>
                    <TableCell><TableCellLayout>{row.serial}</TableCellLayout></TableCell>
                    <TableCell><TableCellLayout>{row.part_no}</TableCellLayout></TableCell>
                    <TableCell>
                        <TableCellLayout truncate=true>{row.description}</TableCellLayout>
                    </TableCell>
                    <TableCell><TableCellLayout>{row.warranty}</TableCellLayout></TableCell>
                    <TableCell><TableCellLayout>{row.years}</TableCellLayout></TableCell>
                    <TableCell>
                        <span class="table__number">{row.subtotal}</span>
                    </TableCell>
                </TableRow>
            }
        })
        .collect_view();

    view! {
        <h4 class="details__section-title">"Equipment"</h4>
        <Table attr:style="width: 100%;">
            <TableHeader>
                <TableRow>
                    <TableHeaderCell min_width=120.0>"Serial No."</TableHeaderCell>
                    <TableHeaderCell min_width=120.0>"Part No."</TableHeaderCell>
                    <TableHeaderCell min_width=200.0>"Description"</TableHeaderCell>
                    <TableHeaderCell min_width=90.0>"Warranty"</TableHeaderCell>
                    <TableHeaderCell min_width=60.0>"Years"</TableHeaderCell>
                    <TableHeaderCell min_width=120.0>"Subtotal"</TableHeaderCell>
                </TableRow>
            </TableHeader>
            <TableBody>{rows}</TableBody>
        </Table>
    }
    .into_any()
}

#[component]
pub fn ProposalList() -> impl IntoView {
    approval_list::<Proposal>("Proposals", Some(equipment_section))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equipment_rows() {
        let proposal: Proposal = serde_json::from_str(
            r#"{
                "_id": "p1",
                "items": [
                    {"_id": "i1", "equipment": {"serialnumber": "SN-1", "materialcode": "M-1"},
                     "warrantyType": "CMC", "years": 2, "subtotal": 112100},
                    {"_id": "i2", "warrantyType": "NCMC"}
                ]
            }"#,
        )
        .unwrap();

        let rows = equipment_rows(&proposal);
        drop(proposal);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].serial, "SN-1");
        assert_eq!(rows[0].part_no, "M-1");
        assert_eq!(rows[0].years, "2");
        assert_eq!(rows[0].subtotal, "₹1,12,100.00");
        assert_eq!(rows[1].warranty, "NCMC");
        assert_eq!(rows[1].years, "—");
    }
}
