// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// The content of one cell of the input table.
///
/// Readers (spreadsheets, delimited files) convert their own cell types into
/// this representation before handing the table over to the scorer.
#[derive(PartialEq, Debug, Clone)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Empty,
}

impl CellValue {
    /// The numeric interpretation of the cell, if any.
    ///
    /// Text is trimmed and parsed as a float. Non-finite values are treated
    /// as missing.
    pub fn as_number(&self) -> Option<f64> {
        let x = match self {
            CellValue::Number(x) => Some(*x),
            CellValue::Text(s) => s.trim().parse::<f64>().ok(),
            CellValue::Empty => None,
        };
        x.filter(|v| v.is_finite())
    }
}

/// A table with a single header row.
#[derive(PartialEq, Debug, Clone)]
pub struct DataTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl DataTable {
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// The cells of one column, in row order. Short rows yield `Empty`.
    pub fn column(&self, col: usize) -> Vec<CellValue> {
        self.rows
            .iter()
            .map(|row| row.get(col).cloned().unwrap_or(CellValue::Empty))
            .collect()
    }
}

/// A trait to rank the treatments by, as configured by the user.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TraitSpec {
    pub name: String,
    pub value_column: String,
    pub weight_column: Option<String>,
    pub direction_column: Option<String>,
}

impl TraitSpec {
    /// A trait whose value column carries the name of the trait, and whose weight and direction
    /// columns follow the `<name>-wgt` and `<name>-drc` convention.
    pub fn with_conventional_columns(name: &str) -> TraitSpec {
        let name = name.trim();
        TraitSpec {
            name: name.to_string(),
            value_column: name.to_string(),
            weight_column: Some(format!("{}-wgt", name)),
            direction_column: Some(format!("{}-drc", name)),
        }
    }
}

/// Whether higher or lower raw values are preferred for a trait.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Direction {
    Maximize,
    Minimize,
}

impl Direction {
    pub fn from_symbol(c: char) -> Option<Direction> {
        match c {
            '+' => Some(Direction::Maximize),
            '-' => Some(Direction::Minimize),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Direction::Maximize => '+',
            Direction::Minimize => '-',
        }
    }
}

impl Default for Direction {
    fn default() -> Self {
        Direction::Maximize
    }
}

// ******** Output data structures *********

/// A trait whose value column was found in the table, with its derived weight and direction.
#[derive(PartialEq, Debug, Clone)]
pub struct TraitSummary {
    pub name: String,
    pub value_column: usize,
    pub weight: f64,
    pub direction: Direction,
    /// Number of cells that could not be read as numbers and were scored as 0.
    pub coerced_cells: usize,
}

/// The outcome of a TOPSIS run. All the per-column vectors follow the order of `traits`.
#[derive(PartialEq, Debug, Clone)]
pub struct TopsisResult {
    pub traits: Vec<TraitSummary>,
    /// Vector-normalized values, one row per treatment.
    pub normalized: Vec<Vec<f64>>,
    /// Normalized values multiplied by the trait weights.
    pub weighted: Vec<Vec<f64>>,
    pub positive_ideal: Vec<f64>,
    pub negative_ideal: Vec<f64>,
    pub distance_positive: Vec<f64>,
    pub distance_negative: Vec<f64>,
    /// Relative closeness to the positive ideal, in [0, 1].
    pub scores: Vec<f64>,
    /// 1 is the best. Equal scores share the lowest rank.
    pub ranks: Vec<u32>,
    pub warnings: Vec<ScoringWarning>,
}

impl TopsisResult {
    /// Row indexes sorted by descending score. Equal scores keep the input order.
    pub fn order_by_score(&self) -> Vec<usize> {
        let mut idxs: Vec<usize> = (0..self.scores.len()).collect();
        idxs.sort_by(|a, b| self.scores[*b].total_cmp(&self.scores[*a]));
        idxs
    }
}

/// Conditions that do not stop the scoring but that the user should know about.
#[derive(PartialEq, Debug, Clone)]
pub enum ScoringWarning {
    /// The value column of a trait is not in the table. The trait is ignored.
    MissingValueColumn { name: String, column: String },
    /// The direction column holds several symbols. Maximize is used.
    MixedDirections { name: String, symbols: Vec<char> },
    /// The direction column holds a single symbol that is neither '+' nor '-'. Maximize is used.
    UnknownDirection { name: String, symbol: char },
    /// The mean of the weight column is negative. The weight is considered unspecified.
    NegativeWeight { name: String, weight: f64 },
}

impl Display for ScoringWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoringWarning::MissingValueColumn { name, column } => write!(
                f,
                "Value column for trait '{}' (searching for '{}') not found; this trait will be ignored",
                name, column
            ),
            ScoringWarning::MixedDirections { name, symbols } => write!(
                f,
                "Mixed directions for '{}' ({:?}), defaulting to '+'",
                name, symbols
            ),
            ScoringWarning::UnknownDirection { name, symbol } => write!(
                f,
                "Unknown direction {:?} for '{}', defaulting to '+'",
                symbol, name
            ),
            ScoringWarning::NegativeWeight { name, weight } => write!(
                f,
                "Negative weight {} for '{}', the weight is ignored",
                weight, name
            ),
        }
    }
}

/// Errors that prevent the scoring from completing.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ScoringErrors {
    /// None of the configured traits has a value column in the table. Holds the
    /// value column names that were searched for.
    NoValidTraits { searched: Vec<String> },
    /// The table has no treatment rows.
    EmptyTable,
    /// A row of the decision matrix does not have one value per trait.
    RaggedTable { row: usize, expected: usize, found: usize },
    /// The number of traits does not match the number of columns of the decision matrix.
    MismatchedTraits { traits: usize, columns: usize },
}

impl Error for ScoringErrors {}

impl Display for ScoringErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoringErrors::NoValidTraits { searched } => write!(
                f,
                "No valid traits found (searched for the columns {:?}): check that the trait column names in the table match the configured traits",
                searched
            ),
            ScoringErrors::EmptyTable => write!(f, "The table contains no treatment rows"),
            ScoringErrors::RaggedTable {
                row,
                expected,
                found,
            } => write!(
                f,
                "Row {} has {} values, expected {}",
                row, found, expected
            ),
            ScoringErrors::MismatchedTraits { traits, columns } => write!(
                f,
                "{} traits were given for a decision matrix with {} columns",
                traits, columns
            ),
        }
    }
}
