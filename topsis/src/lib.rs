mod config;
pub mod columns;
pub mod manual;
pub mod matrix;
pub mod weights;

use log::{debug, info, warn};

pub use crate::columns::{resolve_traits, ColumnIndex, ResolvedTrait};
pub use crate::config::*;
pub use crate::matrix::DecisionMatrix;

/// Scores the treatments of a table along the given traits.
///
/// The traits whose value column cannot be found are dropped. Their weight and
/// direction columns are not looked at.
///
/// Arguments:
/// * `table` the input table, one row per treatment
/// * `traits` the traits, in the order in which they should be reported
pub fn score_table(table: &DataTable, traits: &[TraitSpec]) -> Result<TopsisResult, ScoringErrors> {
    let index = ColumnIndex::new(&table.header);
    let (resolved, mut warnings) = resolve_traits(&index, traits);
    // Reported before any check, so that a failed run still names the missing columns.
    for w in warnings.iter() {
        warn!("{}", w);
    }
    if resolved.is_empty() {
        return Err(ScoringErrors::NoValidTraits {
            searched: traits.iter().map(|t| t.value_column.clone()).collect(),
        });
    }
    let num_reported = warnings.len();
    if table.num_rows() == 0 {
        return Err(ScoringErrors::EmptyTable);
    }

    let mut raw_weights: Vec<Option<f64>> = Vec::new();
    let mut directions: Vec<Direction> = Vec::new();
    for rt in resolved.iter() {
        let raw = match rt.weight_column.map(|c| weights::raw_weight(&table.column(c))) {
            Some(Some(w)) if w < 0.0 => {
                warnings.push(ScoringWarning::NegativeWeight {
                    name: rt.name.clone(),
                    weight: w,
                });
                None
            }
            Some(w) => w,
            None => None,
        };
        raw_weights.push(raw);

        let direction = match rt.direction_column {
            Some(c) => {
                let (d, w) = weights::direction(&rt.name, &table.column(c));
                warnings.extend(w);
                d
            }
            None => Direction::default(),
        };
        directions.push(direction);
    }
    debug!("score_table: raw weights: {:?}", raw_weights);
    let final_weights = weights::finalize_weights(&raw_weights);

    let value_columns: Vec<usize> = resolved.iter().map(|rt| rt.value_column).collect();
    let matrix = DecisionMatrix::from_columns(table, &value_columns);

    let summaries: Vec<TraitSummary> = resolved
        .iter()
        .enumerate()
        .map(|(j, rt)| TraitSummary {
            name: rt.name.clone(),
            value_column: rt.value_column,
            weight: final_weights[j],
            direction: directions[j],
            coerced_cells: matrix.coerced_cells(j),
        })
        .collect();

    for w in warnings[num_reported..].iter() {
        warn!("{}", w);
    }
    let mut res = run_topsis(&matrix, summaries)?;
    res.warnings = warnings;
    Ok(res)
}

/// Runs TOPSIS on a decision matrix.
///
/// Each trait carries its final weight and direction, in the order of the
/// columns of the matrix. Warnings are left empty.
pub fn run_topsis(
    matrix: &DecisionMatrix,
    traits: Vec<TraitSummary>,
) -> Result<TopsisResult, ScoringErrors> {
    let n = matrix.num_rows();
    let m = matrix.num_cols();
    if traits.len() != m {
        return Err(ScoringErrors::MismatchedTraits {
            traits: traits.len(),
            columns: m,
        });
    }
    if m == 0 {
        return Err(ScoringErrors::NoValidTraits { searched: vec![] });
    }
    if n == 0 {
        return Err(ScoringErrors::EmptyTable);
    }
    info!("run_topsis: Processing {:?} treatments, {:?} traits", n, m);
    for t in traits.iter() {
        info!(
            "Trait: {}: weight {:.6} direction {} ({} cells read as 0)",
            t.name,
            t.weight,
            t.direction.symbol(),
            t.coerced_cells
        );
    }

    // Vector normalization. An all-zero column stays all-zero.
    let norms: Vec<f64> = (0..m)
        .map(|j| {
            let norm = matrix.column(j).map(|x| x * x).sum::<f64>().sqrt();
            if norm == 0.0 {
                1.0
            } else {
                norm
            }
        })
        .collect();
    debug!("run_topsis: column norms: {:?}", norms);

    let normalized: Vec<Vec<f64>> = (0..n)
        .map(|i| (0..m).map(|j| matrix.get(i, j) / norms[j]).collect())
        .collect();
    let weighted: Vec<Vec<f64>> = normalized
        .iter()
        .map(|row| {
            row.iter()
                .zip(traits.iter())
                .map(|(x, t)| x * t.weight)
                .collect()
        })
        .collect();

    let mut positive_ideal: Vec<f64> = Vec::with_capacity(m);
    let mut negative_ideal: Vec<f64> = Vec::with_capacity(m);
    for (j, t) in traits.iter().enumerate() {
        let col_max = weighted.iter().map(|r| r[j]).fold(f64::NEG_INFINITY, f64::max);
        let col_min = weighted.iter().map(|r| r[j]).fold(f64::INFINITY, f64::min);
        let (best, worst) = match t.direction {
            Direction::Maximize => (col_max, col_min),
            Direction::Minimize => (col_min, col_max),
        };
        positive_ideal.push(best);
        negative_ideal.push(worst);
    }
    debug!(
        "run_topsis: positive ideal: {:?} negative ideal: {:?}",
        positive_ideal, negative_ideal
    );

    let distance_positive: Vec<f64> = weighted
        .iter()
        .map(|r| euclidean_distance(r, &positive_ideal))
        .collect();
    let distance_negative: Vec<f64> = weighted
        .iter()
        .map(|r| euclidean_distance(r, &negative_ideal))
        .collect();

    let scores: Vec<f64> = distance_positive
        .iter()
        .zip(distance_negative.iter())
        .map(|(dp, dn)| {
            let total = dp + dn;
            // Degenerate row: as close to both ideals, scored 0.
            let total = if total == 0.0 { 1.0 } else { total };
            dn / total
        })
        .collect();
    let ranks = rank_descending(&scores);

    Ok(TopsisResult {
        traits,
        normalized,
        weighted,
        positive_ideal,
        negative_ideal,
        distance_positive,
        distance_negative,
        scores,
        ranks,
        warnings: Vec::new(),
    })
}

fn euclidean_distance(xs: &[f64], ys: &[f64]) -> f64 {
    xs.iter()
        .zip(ys.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Ranks values from the highest (rank 1) to the lowest.
///
/// Equal values get the same rank, which is the lowest rank of the group. The
/// next rank skips accordingly: [0.9, 0.5, 0.9, 0.1] gets [1, 3, 1, 4].
pub fn rank_descending(values: &[f64]) -> Vec<u32> {
    values
        .iter()
        .map(|v| 1 + values.iter().filter(|other| *other > v).count() as u32)
        .collect()
}
