//! Per-source eligibility decision tables.
//!
//! Both tables are total over (duplicated, kind). The settlement table never
//! opts a row out; its arms are kept explicit because the statement side
//! diverges on the duplicated + Dollar Received combination and the asymmetry
//! is intentional source behavior.

use crate::model::{ReconcileTag, TxnKind};

/// Statement side: only a duplicated Dollar Received row is excluded.
pub fn statement_tag(duplicated: bool, kind: TxnKind) -> ReconcileTag {
    match (duplicated, kind) {
        (true, TxnKind::Cancel) => ReconcileTag::ShouldReconcile,
        (true, TxnKind::DollarReceived) => ReconcileTag::ShouldNotReconcile,
        (true, TxnKind::Other) => ReconcileTag::ShouldReconcile,
        (false, _) => ReconcileTag::ShouldReconcile,
    }
}

/// Settlement side: every combination reconciles.
pub fn settlement_tag(duplicated: bool, kind: TxnKind) -> ReconcileTag {
    match (duplicated, kind) {
        (true, TxnKind::Cancel) => ReconcileTag::ShouldReconcile,
        (true, _) => ReconcileTag::ShouldReconcile,
        (false, _) => ReconcileTag::ShouldReconcile,
    }
}
