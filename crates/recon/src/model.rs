use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A single untyped cell as read from a spreadsheet export.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Cell {
    pub fn text(s: impl Into<String>) -> Self {
        Cell::Text(s.into())
    }

    /// Display text for export. Integer-valued floats render without decimals.
    pub fn display(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            Cell::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
        }
    }
}

/// A row-major table of untyped cells, addressable by 0-based row and column.
/// Rows may be ragged; cells past a row's end read as [`Cell::Empty`].
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub rows: Vec<Vec<Cell>>,
}

const EMPTY_CELL: Cell = Cell::Empty;

impl Table {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Table { rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Table width = widest row. Individual rows may be narrower.
    pub fn width(&self) -> usize {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0)
    }

    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }
}

// ---------------------------------------------------------------------------
// Tagging
// ---------------------------------------------------------------------------

/// Per-row eligibility flag controlling participation in cross-file matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReconcileTag {
    #[serde(rename = "Should Reconcile")]
    ShouldReconcile,
    #[serde(rename = "Should Not Reconcile")]
    ShouldNotReconcile,
}

impl std::fmt::Display for ReconcileTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ShouldReconcile => write!(f, "Should Reconcile"),
            Self::ShouldNotReconcile => write!(f, "Should Not Reconcile"),
        }
    }
}

/// Transaction kind derived once from the free-text type column.
/// Cancel takes precedence when both substrings appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnKind {
    Cancel,
    DollarReceived,
    Other,
}

impl TxnKind {
    /// Case-sensitive substring classification of a trimmed type string.
    pub fn classify(txn_type: &str) -> Self {
        if txn_type.contains("Cancel") {
            TxnKind::Cancel
        } else if txn_type.contains("Dollar Received") {
            TxnKind::DollarReceived
        } else {
            TxnKind::Other
        }
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Three-way matching outcome. Codes are part of the host contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Classification {
    PresentInBoth,
    SettlementOnly,
    StatementOnly,
}

impl Classification {
    pub fn code(self) -> u8 {
        match self {
            Self::PresentInBoth => 5,
            Self::SettlementOnly => 6,
            Self::StatementOnly => 7,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            5 => Some(Self::PresentInBoth),
            6 => Some(Self::SettlementOnly),
            7 => Some(Self::StatementOnly),
            _ => None,
        }
    }

    /// Human-readable match status, 1:1 with the classification code.
    pub fn label(self) -> &'static str {
        match self {
            Self::PresentInBoth => "Present in Both",
            Self::StatementOnly => {
                "Not Present in the Settlement File but Present in the Partner Statement File"
            }
            Self::SettlementOnly => {
                "Present in the Settlement File but not in the Partner Statement File"
            }
        }
    }
}

// Serialized as its numeric code — hosts consume 5/6/7, not variant names.
impl Serialize for Classification {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

// ---------------------------------------------------------------------------
// Annotated rows and tables
// ---------------------------------------------------------------------------

/// A Statement data row with its derived and assigned fields.
#[derive(Debug, Clone, Serialize)]
pub struct StatementRow {
    pub cells: Vec<Cell>,
    pub partner_pin: Option<String>,
    pub txn_type: String,
    /// Settle.Amt — unparseable cells are carried as missing.
    pub amount: Option<f64>,
    pub tag: ReconcileTag,
    pub classification: Option<Classification>,
    pub match_status: Option<&'static str>,
    pub variance: Option<f64>,
}

/// A Settlement data row. Carries two identifier namespaces: `partner_pin`
/// (the long internal identifier, used for duplicate grouping only) and
/// `match_pin` (the 9-digit join key against the Statement side).
#[derive(Debug, Clone, Serialize)]
pub struct SettlementRow {
    pub cells: Vec<Cell>,
    pub partner_pin: Option<String>,
    pub match_pin: Option<String>,
    pub txn_type: String,
    /// PayoutRoundAmt / APIRate. Missing when either operand is unparseable
    /// or the rate is zero.
    pub amount_usd: Option<f64>,
    pub tag: ReconcileTag,
    pub classification: Option<Classification>,
    pub match_status: Option<&'static str>,
    pub variance: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatementTable {
    pub headers: Vec<String>,
    pub rows: Vec<StatementRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SettlementTable {
    pub headers: Vec<String>,
    pub rows: Vec<SettlementRow>,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ReconSummary {
    pub statement_rows: usize,
    pub settlement_rows: usize,
    pub matched_pins: usize,
    pub statement_only_pins: usize,
    pub settlement_only_pins: usize,
    pub excluded_statement_rows: usize,
    pub unclassified_statement_rows: usize,
    pub unclassified_settlement_rows: usize,
    /// Sum of per-pin variances, one summand per matched pin.
    pub net_variance: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconResult {
    pub meta: ReconMeta,
    pub summary: ReconSummary,
    pub statement: StatementTable,
    pub settlement: SettlementTable,
}
