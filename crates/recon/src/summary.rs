use std::collections::BTreeMap;

use crate::matcher::PinPartition;
use crate::model::{ReconSummary, ReconcileTag, SettlementTable, StatementTable};

/// Compute summary statistics over the annotated tables.
pub fn compute_summary(
    stmt: &StatementTable,
    sett: &SettlementTable,
    part: &PinPartition,
    variances: &BTreeMap<String, f64>,
) -> ReconSummary {
    ReconSummary {
        statement_rows: stmt.rows.len(),
        settlement_rows: sett.rows.len(),
        matched_pins: part.both.len(),
        statement_only_pins: part.only_statement.len(),
        settlement_only_pins: part.only_settlement.len(),
        excluded_statement_rows: stmt
            .rows
            .iter()
            .filter(|r| r.tag == ReconcileTag::ShouldNotReconcile)
            .count(),
        unclassified_statement_rows: stmt
            .rows
            .iter()
            .filter(|r| r.classification.is_none())
            .count(),
        unclassified_settlement_rows: sett
            .rows
            .iter()
            .filter(|r| r.classification.is_none())
            .count(),
        net_variance: variances.values().sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SettlementRow, StatementRow};

    #[test]
    fn summary_counts() {
        let stmt = StatementTable {
            headers: Vec::new(),
            rows: vec![
                StatementRow {
                    cells: Vec::new(),
                    partner_pin: Some("111111111".into()),
                    txn_type: String::new(),
                    amount: Some(10.0),
                    tag: ReconcileTag::ShouldReconcile,
                    classification: Some(crate::model::Classification::PresentInBoth),
                    match_status: Some("Present in Both"),
                    variance: Some(2.0),
                },
                StatementRow {
                    cells: Vec::new(),
                    partner_pin: None,
                    txn_type: String::new(),
                    amount: None,
                    tag: ReconcileTag::ShouldNotReconcile,
                    classification: None,
                    match_status: None,
                    variance: None,
                },
            ],
        };
        let sett = SettlementTable { headers: Vec::new(), rows: Vec::new() };

        let mut part = PinPartition::default();
        part.both.insert("111111111".into());
        let mut variances = BTreeMap::new();
        variances.insert("111111111".to_string(), 2.0);
        variances.insert("222222222".to_string(), -0.5);

        let summary = compute_summary(&stmt, &sett, &part, &variances);
        assert_eq!(summary.statement_rows, 2);
        assert_eq!(summary.settlement_rows, 0);
        assert_eq!(summary.matched_pins, 1);
        assert_eq!(summary.excluded_statement_rows, 1);
        assert_eq!(summary.unclassified_statement_rows, 1);
        assert!((summary.net_variance - 1.5).abs() < 1e-12);
    }
}
