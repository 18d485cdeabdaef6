// File I/O — CSV, TSV and Excel import into untyped tables

pub mod csv;
pub mod xlsx;

use std::path::Path;

use pinmatch_recon::Table;

/// Import a tabular file, dispatching on its extension.
pub fn import_table(path: &Path) -> Result<Table, String> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => xlsx::import(path),
        "csv" => csv::import(path),
        "tsv" => csv::import_tsv(path),
        other => Err(format!(
            "unsupported file extension '{other}' (expected xlsx, xlsm, xls, xlsb, ods, csv, or tsv)"
        )),
    }
}
