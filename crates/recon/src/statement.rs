//! Statement loader/tagger.
//!
//! The export carries boilerplate at fixed positions: rows 0-8 and row 10 are
//! banner/filler, row 9 is the column header, data starts at row 11. Column
//! positions are constants of the format, not configuration.

use std::collections::HashMap;

use crate::error::ReconError;
use crate::model::{Cell, StatementRow, StatementTable, Table, TxnKind};
use crate::pin::{cell_to_f64, extract_partner_pin};
use crate::tag::statement_tag;

const SOURCE: &str = "statement";

pub const HEADER_ROW: usize = 9;
pub const SKIP_ROW: usize = 10;
pub const DATA_START: usize = 11;

pub const COL_TYPE: usize = 1;
pub const COL_DESCRIPTION: usize = 3;
pub const COL_SETTLE_AMT: usize = 11;

const MIN_ROWS: usize = DATA_START;
const MIN_WIDTH: usize = COL_SETTLE_AMT + 1;

/// Load and tag a raw Statement table. Fails fast on a source too small for
/// the fixed layout; per-cell parse failures stay row-local.
pub fn load(table: &Table) -> Result<StatementTable, ReconError> {
    if table.row_count() < MIN_ROWS {
        return Err(ReconError::TooFewRows {
            source: SOURCE,
            rows: table.row_count(),
            need: MIN_ROWS,
        });
    }
    if table.width() < MIN_WIDTH {
        return Err(ReconError::TooFewColumns {
            source: SOURCE,
            width: table.width(),
            need: MIN_WIDTH,
        });
    }

    let width = table.width();
    let headers: Vec<String> = (0..width)
        .map(|col| table.cell(HEADER_ROW, col).display())
        .collect();

    // First pass: derive per-row fields.
    struct Partial {
        cells: Vec<Cell>,
        partner_pin: Option<String>,
        txn_type: String,
        amount: Option<f64>,
    }

    let mut partials = Vec::new();
    for (idx, cells) in table.rows.iter().enumerate().skip(DATA_START) {
        partials.push(Partial {
            cells: cells.clone(),
            partner_pin: extract_partner_pin(table.cell(idx, COL_DESCRIPTION)),
            txn_type: table.cell(idx, COL_TYPE).display().trim().to_string(),
            amount: cell_to_f64(table.cell(idx, COL_SETTLE_AMT)),
        });
    }

    // Duplicate grouping by partner pin, pin-less rows ignored.
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for p in &partials {
        if let Some(pin) = &p.partner_pin {
            *counts.entry(pin).or_insert(0) += 1;
        }
    }

    let rows = partials
        .iter()
        .map(|p| {
            let duplicated = p
                .partner_pin
                .as_deref()
                .is_some_and(|pin| counts.get(pin).copied().unwrap_or(0) > 1);
            let kind = TxnKind::classify(&p.txn_type);
            StatementRow {
                cells: p.cells.clone(),
                partner_pin: p.partner_pin.clone(),
                txn_type: p.txn_type.clone(),
                amount: p.amount,
                tag: statement_tag(duplicated, kind),
                classification: None,
                match_status: None,
                variance: None,
            }
        })
        .collect();

    Ok(StatementTable { headers, rows })
}
