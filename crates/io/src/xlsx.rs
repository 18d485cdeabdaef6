// Excel import (xlsx, xlsm, xls, xlsb, ods)

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader, Sheets};

use pinmatch_recon::{Cell, Table};

/// Import the first worksheet of an Excel file as an untyped table.
///
/// The range-start offset is honored: data not anchored at A1 lands at its
/// absolute row/column position, padded with empty cells.
pub fn import(path: &Path) -> Result<Table, String> {
    let mut workbook: Sheets<_> =
        open_workbook_auto(path).map_err(|e| format!("failed to open Excel file: {e}"))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let first = sheet_names
        .first()
        .ok_or_else(|| "Excel file contains no sheets".to_string())?;

    let range = workbook
        .worksheet_range(first)
        .map_err(|e| format!("failed to read sheet '{first}': {e}"))?;

    let (start_row, start_col) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));

    let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); start_row];
    for row in range.rows() {
        let mut cells = vec![Cell::Empty; start_col];
        cells.extend(row.iter().map(map_cell));
        rows.push(cells);
    }

    Ok(Table::new(rows))
}

fn map_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(n) => Cell::Number(*n),
        Data::Int(n) => Cell::Number(*n as f64),
        Data::Bool(b) => Cell::Bool(*b),
        // Store error as its text representation
        Data::Error(e) => Cell::Text(format!("#{e:?}")),
        // Serial number; the engine's numeric coercion handles it like any float
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) => Cell::Text(s.clone()),
        Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;
    use tempfile::tempdir;

    #[test]
    fn test_xlsx_import_basic() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("basic.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Header").unwrap();
        sheet.write_string(1, 0, "Wire to 123456789").unwrap();
        sheet.write_number(1, 1, 27239.0).unwrap();
        sheet.write_boolean(2, 1, true).unwrap();
        workbook.save(&path).unwrap();

        let table = import(&path).unwrap();
        assert_eq!(table.cell(0, 0), &Cell::text("Header"));
        assert_eq!(table.cell(1, 0), &Cell::text("Wire to 123456789"));
        assert_eq!(table.cell(1, 1), &Cell::Number(27239.0));
        assert_eq!(table.cell(2, 1), &Cell::Bool(true));
    }

    #[test]
    fn test_xlsx_offset_data_lands_at_absolute_position() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("offset.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        // First write lands at C3 — the table must still address it as (2, 2).
        sheet.write_string(2, 2, "anchored").unwrap();
        workbook.save(&path).unwrap();

        let table = import(&path).unwrap();
        assert_eq!(table.cell(2, 2), &Cell::text("anchored"));
        assert_eq!(table.cell(0, 0), &Cell::Empty);
    }

    #[test]
    fn test_xlsx_gaps_are_empty_cells() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gaps.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "a").unwrap();
        sheet.write_string(0, 3, "d").unwrap();
        workbook.save(&path).unwrap();

        let table = import(&path).unwrap();
        assert_eq!(table.cell(0, 0), &Cell::text("a"));
        assert_eq!(table.cell(0, 1), &Cell::Empty);
        assert_eq!(table.cell(0, 3), &Cell::text("d"));
    }
}
