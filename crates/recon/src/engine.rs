//! Pipeline orchestration: load → partition → classify → variance → summary.

use crate::classify::{apply_variance, classify};
use crate::error::ReconError;
use crate::matcher::partition;
use crate::model::{ReconMeta, ReconResult, Table};
use crate::summary::compute_summary;
use crate::{settlement, statement};

/// Run the full reconciliation over two raw tables.
///
/// Fails fast when either source is too small for its fixed layout; numeric
/// coercion failures stay row-local and never abort the run. Each invocation
/// is independent — no state is shared across runs.
pub fn run(statement_src: &Table, settlement_src: &Table) -> Result<ReconResult, ReconError> {
    let stmt = statement::load(statement_src)?;
    let sett = settlement::load(settlement_src)?;

    let part = partition(&stmt, &sett);
    let (mut stmt, mut sett) = classify(stmt, sett, &part);
    let variances = apply_variance(&mut stmt, &mut sett, &part.both);
    let summary = compute_summary(&stmt, &sett, &part, &variances);

    Ok(ReconResult {
        meta: ReconMeta {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        statement: stmt,
        settlement: sett,
    })
}
