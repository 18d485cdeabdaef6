//! Settlement loader/tagger.
//!
//! Two banner rows, header at row 2, data from row 3. The file carries two
//! identifier columns: the 9-digit pin at column 1 joins against the
//! Statement side, the longer partner pin at column 3 only groups duplicates
//! within this file.

use std::collections::HashMap;

use crate::error::ReconError;
use crate::model::{Cell, SettlementRow, SettlementTable, Table, TxnKind};
use crate::pin::{cell_to_f64, cell_to_f64_grouped, normalize_pin};
use crate::tag::settlement_tag;

const SOURCE: &str = "settlement";

pub const HEADER_ROW: usize = 2;
pub const DATA_START: usize = 3;

pub const COL_MATCH_PIN: usize = 1;
pub const COL_PARTNER_PIN: usize = 3;
pub const COL_TYPE: usize = 5;
pub const COL_PAYOUT_ROUND_AMT: usize = 10;
pub const COL_API_RATE: usize = 12;

const MIN_ROWS: usize = DATA_START;
const MIN_WIDTH: usize = COL_API_RATE + 1;

/// Load and tag a raw Settlement table. The USD amount is derived here; a
/// zero or unparseable rate leaves it missing without failing the run.
pub fn load(table: &Table) -> Result<SettlementTable, ReconError> {
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

    struct Partial {
        cells: Vec<Cell>,
        partner_pin: Option<String>,
        match_pin: Option<String>,
        txn_type: String,
        amount_usd: Option<f64>,
    }

    let mut partials = Vec::new();
    for (idx, cells) in table.rows.iter().enumerate().skip(DATA_START) {
        partials.push(Partial {
            cells: cells.clone(),
            partner_pin: normalize_pin(table.cell(idx, COL_PARTNER_PIN)),
            match_pin: normalize_pin(table.cell(idx, COL_MATCH_PIN)),
            txn_type: table.cell(idx, COL_TYPE).display().trim().to_string(),
            amount_usd: derive_amount_usd(
                table.cell(idx, COL_PAYOUT_ROUND_AMT),
                table.cell(idx, COL_API_RATE),
            ),
        });
    }

    // Duplicate grouping uses this file's own partner pin, not the join key.
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
            SettlementRow {
                cells: p.cells.clone(),
                partner_pin: p.partner_pin.clone(),
                match_pin: p.match_pin.clone(),
                txn_type: p.txn_type.clone(),
                amount_usd: p.amount_usd,
                tag: settlement_tag(duplicated, kind),
                classification: None,
                match_status: None,
                variance: None,
            }
        })
        .collect();

    Ok(SettlementTable { headers, rows })
}

/// PayoutRoundAmt / APIRate, with `,` grouping stripped from the payout.
/// Missing when either operand fails to parse or the rate is zero.
fn derive_amount_usd(payout: &Cell, rate: &Cell) -> Option<f64> {
    let payout = cell_to_f64_grouped(payout)?;
    let rate = cell_to_f64(rate)?;
    if rate == 0.0 {
        return None;
    }
    Some(payout / rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ReconcileTag;

    fn raw_row(
        match_pin: Cell,
        partner_pin: Cell,
        txn_type: &str,
        payout: Cell,
        rate: Cell,
    ) -> Vec<Cell> {
        let mut cells = vec![Cell::Empty; MIN_WIDTH];
        cells[COL_MATCH_PIN] = match_pin;
        cells[COL_PARTNER_PIN] = partner_pin;
        cells[COL_TYPE] = Cell::text(txn_type);
        cells[COL_PAYOUT_ROUND_AMT] = payout;
        cells[COL_API_RATE] = rate;
        cells
    }

    fn raw_table(data: Vec<Vec<Cell>>) -> Table {
        let mut rows = vec![
            vec![Cell::text("Settlement Export")],
            vec![Cell::text("Generated by settlement system")],
        ];
        let mut header = vec![Cell::Empty; MIN_WIDTH];
        header[COL_MATCH_PIN] = Cell::text("Pin Number");
        header[COL_PARTNER_PIN] = Cell::text("PartnerPin");
        header[COL_TYPE] = Cell::text("Type");
        header[COL_PAYOUT_ROUND_AMT] = Cell::text("PayoutRoundAmt");
        header[COL_API_RATE] = Cell::text("APIRate");
        rows.push(header);
        rows.extend(data);
        Table::new(rows)
    }

    #[test]
    fn loads_both_pin_namespaces() {
        let table = raw_table(vec![raw_row(
            Cell::text("123456789.0"),
            Cell::Number(12345678901.0),
            "Payout",
            Cell::text("27,239.00"),
            Cell::Number(83.5),
        )]);
        let sett = load(&table).unwrap();
        assert_eq!(sett.headers[COL_MATCH_PIN], "Pin Number");
        assert_eq!(sett.rows[0].match_pin.as_deref(), Some("123456789"));
        assert_eq!(sett.rows[0].partner_pin.as_deref(), Some("12345678901"));
        let usd = sett.rows[0].amount_usd.unwrap();
        assert!((usd - 27239.0 / 83.5).abs() < 1e-9);
    }

    #[test]
    fn zero_rate_yields_missing_amount() {
        let table = raw_table(vec![raw_row(
            Cell::text("123456789"),
            Cell::text("12345678901"),
            "Payout",
            Cell::Number(500.0),
            Cell::Number(0.0),
        )]);
        let sett = load(&table).unwrap();
        assert_eq!(sett.rows[0].amount_usd, None);
    }

    #[test]
    fn unparseable_operands_yield_missing_amount() {
        let table = raw_table(vec![
            raw_row(
                Cell::text("111111111"),
                Cell::text("1"),
                "Payout",
                Cell::text("pending"),
                Cell::Number(83.5),
            ),
            raw_row(
                Cell::text("222222222"),
                Cell::text("2"),
                "Payout",
                Cell::Number(100.0),
                Cell::Empty,
            ),
        ]);
        let sett = load(&table).unwrap();
        assert_eq!(sett.rows[0].amount_usd, None);
        assert_eq!(sett.rows[1].amount_usd, None);
    }

    #[test]
    fn duplicated_rows_all_reconcile() {
        // Same partner pin three times, one of them Dollar Received: unlike
        // the statement side, nothing is excluded here.
        let data = ["Order Cancel", "Dollar Received", "Payout"]
            .iter()
            .map(|t| {
                raw_row(
                    Cell::text("123456789"),
                    Cell::text("12345678901"),
                    t,
                    Cell::Number(10.0),
                    Cell::Number(1.0),
                )
            })
            .collect();
        let sett = load(&raw_table(data)).unwrap();
        assert_eq!(sett.rows.len(), 3);
        assert!(sett
            .rows
            .iter()
            .all(|r| r.tag == ReconcileTag::ShouldReconcile));
    }

    #[test]
    fn malformed_sources_fail_fast() {
        let short = Table::new(vec![vec![Cell::text("x"); MIN_WIDTH]; 2]);
        assert!(matches!(load(&short), Err(ReconError::TooFewRows { .. })));

        let narrow = Table::new(vec![vec![Cell::text("x"); 6]; 10]);
        assert!(matches!(
            load(&narrow),
            Err(ReconError::TooFewColumns { .. })
        ));
    }
}
