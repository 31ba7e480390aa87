// Console summary of the best treatments.

use crate::analysis::{report::*, *};

/// The `top` best rows, as a right-aligned table with the treatment, the score,
/// the rank and the normalized value of each trait.
pub fn format_summary(
    treatment_column: &str,
    labels: &[CellValue],
    result: &TopsisResult,
    top: usize,
) -> String {
    let mut header: Vec<String> = vec![
        treatment_column.to_string(),
        "composite_score".to_string(),
        "rank".to_string(),
    ];
    header.extend(result.traits.iter().map(|t| format!("{}_norm", t.name)));

    let rows: Vec<Vec<String>> = result
        .order_by_score()
        .into_iter()
        .take(top)
        .map(|i| {
            let mut row: Vec<String> = vec![
                labels.get(i).map(label_text).unwrap_or_else(|| "NA".to_string()),
                ReportCell::Number(result.scores[i]).render(),
                result.ranks[i].to_string(),
            ];
            row.extend(
                result.normalized[i]
                    .iter()
                    .map(|x| ReportCell::Number(*x).render()),
            );
            row
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|c| {
            rows.iter()
                .map(|r| r[c].chars().count())
                .chain(std::iter::once(header[c].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let fmt_line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(widths.iter())
            .map(|(s, w)| format!("{:>width$}", s, width = w))
            .collect::<Vec<String>>()
            .join("  ")
    };
    let mut lines: Vec<String> = vec![fmt_line(&header)];
    lines.extend(rows.iter().map(|r| fmt_line(r)));
    lines.join("\n")
}
