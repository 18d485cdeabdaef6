//! Identifier set matching across the two eligible subsets.

use std::collections::BTreeSet;

use crate::model::{ReconcileTag, SettlementTable, StatementTable};

/// Three-way split of the eligible identifier space. `BTreeSet` keeps
/// iteration deterministic across runs.
#[derive(Debug, Clone, Default)]
pub struct PinPartition {
    pub both: BTreeSet<String>,
    pub only_statement: BTreeSet<String>,
    pub only_settlement: BTreeSet<String>,
}

/// Build the pin sets from eligible rows only and partition them.
///
/// Statement contributes `partner_pin`; Settlement contributes `match_pin`,
/// its column whose format aligns with the statement pin.
pub fn partition(stmt: &StatementTable, sett: &SettlementTable) -> PinPartition {
    let stmt_pins: BTreeSet<String> = stmt
        .rows
        .iter()
        .filter(|r| r.tag == ReconcileTag::ShouldReconcile)
        .filter_map(|r| r.partner_pin.as_deref())
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect();

    let sett_pins: BTreeSet<String> = sett
        .rows
        .iter()
        .filter(|r| r.tag == ReconcileTag::ShouldReconcile)
        .filter_map(|r| r.match_pin.as_deref())
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect();

    PinPartition {
        both: stmt_pins.intersection(&sett_pins).cloned().collect(),
        only_statement: stmt_pins.difference(&sett_pins).cloned().collect(),
        only_settlement: sett_pins.difference(&stmt_pins).cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ReconcileTag, SettlementRow, StatementRow};

    fn stmt_row(pin: Option<&str>, tag: ReconcileTag) -> StatementRow {
        StatementRow {
            cells: Vec::new(),
            partner_pin: pin.map(String::from),
            txn_type: String::new(),
            amount: None,
            tag,
            classification: None,
            match_status: None,
            variance: None,
        }
    }

    fn sett_row(match_pin: Option<&str>, tag: ReconcileTag) -> SettlementRow {
        SettlementRow {
            cells: Vec::new(),
            partner_pin: Some("internal".into()),
            match_pin: match_pin.map(String::from),
            txn_type: String::new(),
            amount_usd: None,
            tag,
            classification: None,
            match_status: None,
            variance: None,
        }
    }

    fn tables(
        stmt: Vec<StatementRow>,
        sett: Vec<SettlementRow>,
    ) -> (StatementTable, SettlementTable) {
        (
            StatementTable { headers: Vec::new(), rows: stmt },
            SettlementTable { headers: Vec::new(), rows: sett },
        )
    }

    #[test]
    fn partitions_are_disjoint_and_cover() {
        use ReconcileTag::ShouldReconcile as Yes;
        let (stmt, sett) = tables(
            vec![
                stmt_row(Some("111111111"), Yes),
                stmt_row(Some("222222222"), Yes),
            ],
            vec![
                sett_row(Some("111111111"), Yes),
                sett_row(Some("333333333"), Yes),
            ],
        );
        let part = partition(&stmt, &sett);
        assert!(part.both.contains("111111111"));
        assert!(part.only_statement.contains("222222222"));
        assert!(part.only_settlement.contains("333333333"));

        assert!(part.both.is_disjoint(&part.only_statement));
        assert!(part.both.is_disjoint(&part.only_settlement));
        assert!(part.only_statement.is_disjoint(&part.only_settlement));

        // both ∪ only_statement reproduces the eligible statement pins, and
        // both ∪ only_settlement the eligible settlement pins.
        let stmt_pins: BTreeSet<String> = part.both.union(&part.only_statement).cloned().collect();
        let sett_pins: BTreeSet<String> = part.both.union(&part.only_settlement).cloned().collect();
        assert_eq!(
            stmt_pins,
            ["111111111", "222222222"].iter().map(|s| s.to_string()).collect()
        );
        assert_eq!(
            sett_pins,
            ["111111111", "333333333"].iter().map(|s| s.to_string()).collect()
        );
    }

    #[test]
    fn ineligible_rows_contribute_no_pins() {
        let (stmt, sett) = tables(
            vec![stmt_row(
                Some("111111111"),
                ReconcileTag::ShouldNotReconcile,
            )],
            vec![sett_row(Some("111111111"), ReconcileTag::ShouldReconcile)],
        );
        let part = partition(&stmt, &sett);
        assert!(part.both.is_empty());
        assert!(part.only_settlement.contains("111111111"));
    }

    #[test]
    fn pinless_rows_are_ignored() {
        let (stmt, sett) = tables(
            vec![stmt_row(None, ReconcileTag::ShouldReconcile)],
            vec![sett_row(None, ReconcileTag::ShouldReconcile)],
        );
        let part = partition(&stmt, &sett);
        assert!(part.both.is_empty());
        assert!(part.only_statement.is_empty());
        assert!(part.only_settlement.is_empty());
    }
}
