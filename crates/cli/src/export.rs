//! Annotated CSV export.
//!
//! Output keeps the source's own header row and appends the derived columns
//! under their legacy names, so downstream spreadsheets keep working.

use std::path::Path;

use pinmatch_recon::model::{SettlementTable, StatementTable};

const STATEMENT_APPENDED: [&str; 7] = [
    "PartnerPin",
    "Type",
    "Settle_Amt",
    "ReconcileTag",
    "Classification",
    "MatchStatus",
    "Variance",
];

const SETTLEMENT_APPENDED: [&str; 8] = [
    "Amount_USD",
    "PartnerPin",
    "MatchPin",
    "Type",
    "ReconcileTag",
    "Classification",
    "MatchStatus",
    "Variance",
];

pub fn write_statement_csv(table: &StatementTable, path: &Path) -> Result<(), String> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| e.to_string())?;

    let mut header = table.headers.clone();
    header.extend(STATEMENT_APPENDED.iter().map(|s| s.to_string()));
    writer.write_record(&header).map_err(|e| e.to_string())?;

    for row in &table.rows {
        let mut record = original_cells(&row.cells, table.headers.len());
        record.push(row.partner_pin.clone().unwrap_or_default());
        record.push(row.txn_type.clone());
        record.push(fmt_opt(row.amount));
        record.push(row.tag.to_string());
        record.push(fmt_class(row.classification));
        record.push(row.match_status.unwrap_or("").to_string());
        record.push(fmt_opt(row.variance));
        writer.write_record(&record).map_err(|e| e.to_string())?;
    }

    writer.flush().map_err(|e| e.to_string())
}

pub fn write_settlement_csv(table: &SettlementTable, path: &Path) -> Result<(), String> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| e.to_string())?;

    let mut header = table.headers.clone();
    header.extend(SETTLEMENT_APPENDED.iter().map(|s| s.to_string()));
    writer.write_record(&header).map_err(|e| e.to_string())?;

    for row in &table.rows {
        let mut record = original_cells(&row.cells, table.headers.len());
        record.push(fmt_opt(row.amount_usd));
        record.push(row.partner_pin.clone().unwrap_or_default());
        record.push(row.match_pin.clone().unwrap_or_default());
        record.push(row.txn_type.clone());
        record.push(row.tag.to_string());
        record.push(fmt_class(row.classification));
        record.push(row.match_status.unwrap_or("").to_string());
        record.push(fmt_opt(row.variance));
        writer.write_record(&record).map_err(|e| e.to_string())?;
    }

    writer.flush().map_err(|e| e.to_string())
}

fn original_cells(cells: &[pinmatch_recon::Cell], width: usize) -> Vec<String> {
    (0..width)
        .map(|col| cells.get(col).map(|c| c.display()).unwrap_or_default())
        .collect()
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map(|n| format!("{n}")).unwrap_or_default()
}

fn fmt_class(classification: Option<pinmatch_recon::Classification>) -> String {
    classification
        .map(|c| c.code().to_string())
        .unwrap_or_default()
}
