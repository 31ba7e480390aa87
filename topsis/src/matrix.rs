use crate::config::*;

/// The n x m grid of trait values: one row per treatment, one column per valid trait.
#[derive(PartialEq, Debug, Clone)]
pub struct DecisionMatrix {
    num_rows: usize,
    num_cols: usize,
    // Row-major
    values: Vec<f64>,
    coerced: Vec<usize>,
}

impl DecisionMatrix {
    /// Builds the matrix from the value columns of the table.
    ///
    /// Cells that are not numbers are scored as 0. The number of such cells is
    /// kept for each column.
    pub fn from_columns(table: &DataTable, columns: &[usize]) -> DecisionMatrix {
        let num_rows = table.num_rows();
        let num_cols = columns.len();
        let mut values = vec![0.0; num_rows * num_cols];
        let mut coerced = vec![0; num_cols];
        for (j, col) in columns.iter().enumerate() {
            for (i, cell) in table.column(*col).iter().enumerate() {
                match cell.as_number() {
                    Some(x) => values[i * num_cols + j] = x,
                    None => coerced[j] += 1,
                }
            }
        }
        DecisionMatrix {
            num_rows,
            num_cols,
            values,
            coerced,
        }
    }

    /// Builds the matrix from rows of values.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<DecisionMatrix, ScoringErrors> {
        let num_cols = rows.first().map(|r| r.len()).unwrap_or(0);
        let mut values: Vec<f64> = Vec::with_capacity(rows.len() * num_cols);
        for (idx, r) in rows.iter().enumerate() {
            if r.len() != num_cols {
                return Err(ScoringErrors::RaggedTable {
                    row: idx,
                    expected: num_cols,
                    found: r.len(),
                });
            }
            values.extend(r.iter().cloned());
        }
        Ok(DecisionMatrix {
            num_rows: rows.len(),
            num_cols,
            values,
            coerced: vec![0; num_cols],
        })
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.num_cols + col]
    }

    pub fn column(&self, col: usize) -> impl Iterator<Item = f64> + '_ {
        (0..self.num_rows).map(move |row| self.get(row, col))
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.values[row * self.num_cols..(row + 1) * self.num_cols]
    }

    pub fn coerced_cells(&self, col: usize) -> usize {
        self.coerced[col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_numeric_cells_become_zero() {
        let table = DataTable {
            header: vec!["Treatment".to_string(), "RF".to_string(), "SL".to_string()],
            rows: vec![
                vec![
                    CellValue::Text("T1".to_string()),
                    CellValue::Number(1.5),
                    CellValue::Text(" 3 ".to_string()),
                ],
                vec![
                    CellValue::Text("T2".to_string()),
                    CellValue::Text("dead".to_string()),
                    CellValue::Empty,
                ],
                // Short row
                vec![CellValue::Text("T3".to_string()), CellValue::Number(2.0)],
            ],
        };
        let m = DecisionMatrix::from_columns(&table, &[1, 2]);
        assert_eq!(m.num_rows(), 3);
        assert_eq!(m.num_cols(), 2);
        assert_eq!(m.row(0), &[1.5, 3.0]);
        assert_eq!(m.row(1), &[0.0, 0.0]);
        assert_eq!(m.row(2), &[2.0, 0.0]);
        assert_eq!(m.coerced_cells(0), 1);
        assert_eq!(m.coerced_cells(1), 2);
        assert_eq!(m.column(0).collect::<Vec<f64>>(), vec![1.5, 0.0, 2.0]);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let res = DecisionMatrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]);
        assert_eq!(
            res,
            Err(ScoringErrors::RaggedTable {
                row: 1,
                expected: 2,
                found: 1
            })
        );
    }
}
