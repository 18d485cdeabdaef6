//! Filtered views over classified tables.

use crate::model::{Classification, SettlementTable, StatementTable};

/// Return the rows of both tables whose classification is in `classes`,
/// preserving original row order. Unclassified rows never appear in any view;
/// an empty result is not an error.
pub fn get_classified(
    stmt: &StatementTable,
    sett: &SettlementTable,
    classes: &[Classification],
) -> (StatementTable, SettlementTable) {
    let statement = StatementTable {
        headers: stmt.headers.clone(),
        rows: stmt
            .rows
            .iter()
            .filter(|r| r.classification.is_some_and(|c| classes.contains(&c)))
            .cloned()
            .collect(),
    };
    let settlement = SettlementTable {
        headers: sett.headers.clone(),
        rows: sett
            .rows
            .iter()
            .filter(|r| r.classification.is_some_and(|c| classes.contains(&c)))
            .cloned()
            .collect(),
    };
    (statement, settlement)
}
