//! Full-table classification and per-pin variance broadcast.

use std::collections::{BTreeMap, BTreeSet};

use crate::matcher::PinPartition;
use crate::model::{Classification, SettlementTable, StatementTable};

/// Classify every row of both tables by set membership of its identifier.
///
/// The partition was built from eligible rows only, but classification covers
/// the full tables: an excluded row sharing a matched pin still inherits
/// classification 5 through the other rows carrying that pin. Rows whose
/// identifier is in neither set (including every pin-less row) stay
/// unclassified.
pub fn classify(
    mut stmt: StatementTable,
    mut sett: SettlementTable,
    part: &PinPartition,
) -> (StatementTable, SettlementTable) {
    for row in &mut stmt.rows {
        row.classification = row.partner_pin.as_deref().map(str::trim).and_then(|pin| {
            if part.both.contains(pin) {
                Some(Classification::PresentInBoth)
            } else if part.only_statement.contains(pin) {
                Some(Classification::StatementOnly)
            } else {
                None
            }
        });
        row.match_status = row.classification.map(Classification::label);
    }

    for row in &mut sett.rows {
        row.classification = row.match_pin.as_deref().map(str::trim).and_then(|pin| {
            if part.both.contains(pin) {
                Some(Classification::PresentInBoth)
            } else if part.only_settlement.contains(pin) {
                Some(Classification::SettlementOnly)
            } else {
                None
            }
        });
        row.match_status = row.classification.map(Classification::label);
    }

    (stmt, sett)
}

/// Compute the per-pin variance for every matched identifier and broadcast it
/// onto each contributing row on both sides.
///
/// Sums run over rows carrying the pin with classification 5; a pin duplicated
/// across rows contributes one summand per row. Missing amounts are skipped.
/// Returns the per-pin variances for summary aggregation.
pub fn apply_variance(
    stmt: &mut StatementTable,
    sett: &mut SettlementTable,
    both: &BTreeSet<String>,
) -> BTreeMap<String, f64> {
    let mut variances = BTreeMap::new();

    for pin in both {
        let stmt_sum: f64 = stmt
            .rows
            .iter()
            .filter(|r| contributes(r.partner_pin.as_deref(), r.classification, pin))
            .filter_map(|r| r.amount)
            .sum();
        let sett_sum: f64 = sett
            .rows
            .iter()
            .filter(|r| contributes(r.match_pin.as_deref(), r.classification, pin))
            .filter_map(|r| r.amount_usd)
            .sum();

        let variance = sett_sum - stmt_sum;
        variances.insert(pin.clone(), variance);

        for row in stmt
            .rows
            .iter_mut()
            .filter(|r| contributes(r.partner_pin.as_deref(), r.classification, pin))
        {
            row.variance = Some(variance);
        }
        for row in sett
            .rows
            .iter_mut()
            .filter(|r| contributes(r.match_pin.as_deref(), r.classification, pin))
        {
            row.variance = Some(variance);
        }
    }

    variances
}

fn contributes(pin: Option<&str>, classification: Option<Classification>, target: &str) -> bool {
    classification == Some(Classification::PresentInBoth)
        && pin.map(str::trim) == Some(target)
}
