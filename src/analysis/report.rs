// The tables shared by the text, Excel and console outputs.

use crate::analysis::*;

#[derive(PartialEq, Debug, Clone)]
pub enum ReportCell {
    Text(String),
    Number(f64),
    Rank(u32),
    Missing,
}

impl ReportCell {
    /// Numbers are written with 6 decimals, missing values as `NA`.
    pub fn render(&self) -> String {
        match self {
            ReportCell::Text(s) => s.clone(),
            ReportCell::Number(x) if x.is_finite() => format!("{:.6}", x),
            ReportCell::Number(_) => "NA".to_string(),
            ReportCell::Rank(r) => r.to_string(),
            ReportCell::Missing => "NA".to_string(),
        }
    }
}

#[derive(PartialEq, Debug, Clone)]
pub struct ResultsTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<ReportCell>>,
}

/// The treatment label of a row. Whole numbers are labels like "4", not "4.000000".
pub fn label_cell(cell: &CellValue) -> ReportCell {
    match cell {
        CellValue::Text(s) => ReportCell::Text(s.clone()),
        CellValue::Number(x) if x.fract() == 0.0 && x.abs() < 1e15 => {
            ReportCell::Text(format!("{}", *x as i64))
        }
        CellValue::Number(x) => ReportCell::Number(*x),
        CellValue::Empty => ReportCell::Missing,
    }
}

/// The label as shown on the chart and the console.
pub fn label_text(cell: &CellValue) -> String {
    label_cell(cell).render()
}

/// Treatment, composite_score, rank, then the normalized and the weighted value of each trait.
/// Rows follow the input order.
pub fn results_table(
    treatment_column: &str,
    labels: &[CellValue],
    result: &TopsisResult,
) -> ResultsTable {
    let mut header: Vec<String> = vec![
        treatment_column.to_string(),
        "composite_score".to_string(),
        "rank".to_string(),
    ];
    header.extend(result.traits.iter().map(|t| format!("{}_norm", t.name)));
    header.extend(result.traits.iter().map(|t| format!("{}_weighted", t.name)));

    let rows: Vec<Vec<ReportCell>> = (0..result.scores.len())
        .map(|i| {
            let mut row: Vec<ReportCell> = vec![
                labels.get(i).map(label_cell).unwrap_or(ReportCell::Missing),
                ReportCell::Number(result.scores[i]),
                ReportCell::Rank(result.ranks[i]),
            ];
            row.extend(result.normalized[i].iter().map(|x| ReportCell::Number(*x)));
            row.extend(result.weighted[i].iter().map(|x| ReportCell::Number(*x)));
            row
        })
        .collect();
    ResultsTable { header, rows }
}

/// One entry per valid trait: name, final weight, direction symbol.
pub fn weights_table(result: &TopsisResult) -> Vec<(String, f64, char)> {
    result
        .traits
        .iter()
        .map(|t| (t.name.clone(), t.weight, t.direction.symbol()))
        .collect()
}

/// The bars of the chart, best score first.
pub fn chart_bars(labels: &[CellValue], result: &TopsisResult) -> Vec<(String, f64)> {
    result
        .order_by_score()
        .into_iter()
        .map(|i| {
            let label = labels.get(i).map(label_text).unwrap_or_else(|| "NA".to_string());
            (label, result.scores[i])
        })
        .collect()
}
