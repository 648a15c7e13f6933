use std::fmt;

/// A single spreadsheet cell as read from an uploaded file.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Empty,
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
}

impl Scalar {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Type a raw text field the way a spreadsheet reader would. Digit strings
    /// with a leading zero stay text so account numbers keep their padding.
    pub fn infer(raw: &str) -> Self {
        let s = raw.trim();
        if s.is_empty() {
            return Self::Empty;
        }
        let digits = s.strip_prefix('-').unwrap_or(s);
        let zero_padded = digits.len() > 1
            && digits.starts_with('0')
            && digits.as_bytes()[1].is_ascii_digit();
        if !zero_padded {
            if let Ok(i) = s.parse::<i64>() {
                return Self::Int(i);
            }
            if let Ok(f) = s.parse::<f64>() {
                if f.is_finite() {
                    return Self::Float(f);
                }
            }
        }
        Self::Text(raw.to_string())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// First worksheet of an uploaded file: header row plus data rows.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Scalar>>,
}

static EMPTY: Scalar = Scalar::Empty;

impl RawTable {
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == header)
    }

    /// Cell lookup that treats short rows as blank-padded.
    pub fn cell(&self, row: usize, col: usize) -> &Scalar {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }
}

// ---------------------------------------------------------------------------
// Fixed column projection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    AccountId,
    Product,
    Name,
    Rating,
    CreditLimit,
    Outstanding,
    Officer,
}

impl Column {
    /// Projection order, which is also the export column order.
    pub const ALL: [Column; 7] = [
        Column::AccountId,
        Column::Product,
        Column::Name,
        Column::Rating,
        Column::CreditLimit,
        Column::Outstanding,
        Column::Officer,
    ];

    pub const REQUIRED: [Column; 2] = [Column::AccountId, Column::Rating];

    pub fn header(&self) -> &'static str {
        match self {
            Self::AccountId => "NOREKENING",
            Self::Product => "_PRODUK",
            Self::Name => "NAMA",
            Self::Rating => "_KOLEK",
            Self::CreditLimit => "PLAFOND",
            Self::Outstanding => "BAKIDEBET",
            Self::Officer => "PETUGAS",
        }
    }

    pub fn from_header(header: &str) -> Option<Column> {
        let header = header.trim();
        Self::ALL.iter().find(|c| c.header() == header).copied()
    }

    pub fn is_monetary(&self) -> bool {
        matches!(self, Self::CreditLimit | Self::Outstanding)
    }
}

pub const RATING_CURRENT_HEADER: &str = "_KOLEK_SAAT_INI";
pub const RATING_PREVIOUS_HEADER: &str = "_KOLEK_BULAN_LALU";
pub const STATUS_HEADER: &str = "Status";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Previous,
    Current,
}

impl Period {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Previous => "Bulan Lalu",
            Self::Current => "Data Saat Ini",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One projected row. Optional fields are `None` when the source table has
/// no such column and `Some(Scalar::Empty)` when the cell is blank.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountRecord {
    pub account_id: String,
    pub product: Option<Scalar>,
    pub name: Option<Scalar>,
    pub rating: u32,
    pub credit_limit: Option<Scalar>,
    pub outstanding: Option<Scalar>,
    pub officer: Option<Scalar>,
}

impl AccountRecord {
    pub fn new(account_id: impl Into<String>, rating: u32) -> Self {
        Self {
            account_id: account_id.into(),
            product: None,
            name: None,
            rating,
            credit_limit: None,
            outstanding: None,
            officer: None,
        }
    }

    /// Value of an optional column; `None` for the key and rating columns.
    pub fn optional_field(&self, column: Column) -> Option<&Scalar> {
        match column {
            Column::AccountId | Column::Rating => None,
            Column::Product => self.product.as_ref(),
            Column::Name => self.name.as_ref(),
            Column::CreditLimit => self.credit_limit.as_ref(),
            Column::Outstanding => self.outstanding.as_ref(),
            Column::Officer => self.officer.as_ref(),
        }
    }

    pub(crate) fn optional_field_mut(&mut self, column: Column) -> Option<&mut Option<Scalar>> {
        match column {
            Column::AccountId | Column::Rating => None,
            Column::Product => Some(&mut self.product),
            Column::Name => Some(&mut self.name),
            Column::CreditLimit => Some(&mut self.credit_limit),
            Column::Outstanding => Some(&mut self.outstanding),
            Column::Officer => Some(&mut self.officer),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Rating rose to a worse bucket.
    Upgraded,
    /// Rating fell to a better bucket.
    Downgraded,
    New,
    Unchanged,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Upgraded,
        Status::Downgraded,
        Status::New,
        Status::Unchanged,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Upgraded => "Naik",
            Self::Downgraded => "Turun",
            Self::New => "Baru",
            Self::Unchanged => "Tidak Berubah",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Derive the transition label from the previous and current ratings.
/// Higher ratings are worse, and 0 means unrated.
pub fn classify(prev: u32, curr: u32) -> Status {
    if curr > prev {
        Status::Upgraded
    } else if curr < prev {
        Status::Downgraded
    } else if prev == 0 {
        Status::New
    } else {
        Status::Unchanged
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergedRecord {
    pub current: AccountRecord,
    pub rating_previous: u32,
    pub rating_current: u32,
    pub status: Status,
    /// Whether the account appeared in the previous period at all.
    pub matched: bool,
}
