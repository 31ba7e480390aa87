use log::debug;

use crate::config::*;

/// The raw weight of a trait: the mean of the numeric cells of its weight column.
///
/// Returns None when no cell is numeric.
pub fn raw_weight(cells: &[CellValue]) -> Option<f64> {
    let values: Vec<f64> = cells.iter().filter_map(|c| c.as_number()).collect();
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

// The first non-whitespace character of a cell. Blank cells read as '+'.
fn direction_symbol(cell: &CellValue) -> char {
    let s = match cell {
        CellValue::Number(x) => x.to_string(),
        CellValue::Text(s) => s.clone(),
        CellValue::Empty => String::new(),
    };
    s.trim().chars().next().unwrap_or('+')
}

/// The direction of a trait, read from the symbols of its direction column.
///
/// All the rows must agree on the symbol, otherwise the trait is maximized and
/// a warning is returned.
pub fn direction(name: &str, cells: &[CellValue]) -> (Direction, Option<ScoringWarning>) {
    let mut symbols: Vec<char> = Vec::new();
    for c in cells {
        let sym = direction_symbol(c);
        if !symbols.contains(&sym) {
            symbols.push(sym);
        }
    }
    debug!("direction: {}: symbols {:?}", name, symbols);
    match symbols.as_slice() {
        [] => (Direction::Maximize, None),
        [sym] => match Direction::from_symbol(*sym) {
            Some(d) => (d, None),
            None => (
                Direction::Maximize,
                Some(ScoringWarning::UnknownDirection {
                    name: name.to_string(),
                    symbol: *sym,
                }),
            ),
        },
        _ => (
            Direction::Maximize,
            Some(ScoringWarning::MixedDirections {
                name: name.to_string(),
                symbols,
            }),
        ),
    }
}

/// Turns the raw weights into final weights that sum to 1.
///
/// - no weight specified at all: every trait gets 1/m
/// - otherwise the unspecified weights count as 0 and the specified ones are
///   divided by their sum. Unweighted traits get no influence, they do not share
///   the remainder.
/// - a sum that is not positive falls back to 1/m for every trait
pub fn finalize_weights(raw: &[Option<f64>]) -> Vec<f64> {
    let m = raw.len();
    if m == 0 {
        return vec![];
    }
    let equal = 1.0 / m as f64;
    if raw.iter().all(|w| w.is_none()) {
        return vec![equal; m];
    }
    let total: f64 = raw.iter().flatten().sum();
    if total > 0.0 {
        raw.iter().map(|w| w.unwrap_or(0.0) / total).collect()
    } else {
        vec![equal; m]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn sum(xs: &[f64]) -> f64 {
        xs.iter().sum()
    }

    #[test]
    fn raw_weight_is_mean_of_numeric_cells() {
        let cells = vec![
            CellValue::Number(0.2),
            text("n/a"),
            CellValue::Empty,
            text(" 0.4 "),
        ];
        let w = raw_weight(&cells).unwrap();
        assert!((w - 0.3).abs() < 1e-12);
    }

    #[test]
    fn raw_weight_without_numbers_is_unspecified() {
        assert_eq!(raw_weight(&[text("high"), CellValue::Empty]), None);
        assert_eq!(raw_weight(&[]), None);
    }

    #[test]
    fn uniform_direction() {
        let cells = vec![text("-"), text(" - "), text("-ve")];
        assert_eq!(direction("Gall", &cells), (Direction::Minimize, None));
        let cells = vec![text("+"), CellValue::Empty];
        assert_eq!(direction("SL", &cells), (Direction::Maximize, None));
        let cells = vec![CellValue::Number(-1.0), text("-")];
        assert_eq!(direction("RF", &cells), (Direction::Minimize, None));
    }

    #[test]
    fn mixed_directions_default_to_maximize() {
        let cells = vec![text("+"), text("-"), text("+")];
        let (d, w) = direction("Eggs", &cells);
        assert_eq!(d, Direction::Maximize);
        assert_eq!(
            w,
            Some(ScoringWarning::MixedDirections {
                name: "Eggs".to_string(),
                symbols: vec!['+', '-'],
            })
        );
    }

    #[test]
    fn unknown_direction_defaults_to_maximize() {
        let (d, w) = direction("SDW", &[text("max"), text("max")]);
        assert_eq!(d, Direction::Maximize);
        assert_eq!(
            w,
            Some(ScoringWarning::UnknownDirection {
                name: "SDW".to_string(),
                symbol: 'm',
            })
        );
    }

    #[test]
    fn equal_weights_when_none_given() {
        let w = finalize_weights(&[None, None, None, None]);
        assert_eq!(w, vec![0.25; 4]);
        assert!((sum(&w) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn unweighted_traits_get_no_share() {
        let w = finalize_weights(&[Some(0.7), None]);
        assert_eq!(w, vec![1.0, 0.0]);

        let w = finalize_weights(&[Some(2.0), None, Some(6.0)]);
        assert!((w[0] - 0.25).abs() < 1e-12);
        assert_eq!(w[1], 0.0);
        assert!((w[2] - 0.75).abs() < 1e-12);
        assert!((sum(&w) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_total_falls_back_to_equal_weights() {
        let w = finalize_weights(&[Some(0.0), None]);
        assert_eq!(w, vec![0.5, 0.5]);
    }
}
