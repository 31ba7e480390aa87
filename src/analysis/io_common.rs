use crate::analysis::{config_reader::InputType, io_csv, io_excel, *};

/// Reads the input table with the reader that matches its type.
pub fn read_table(
    path: &Path,
    input_type: InputType,
    worksheet: Option<&str>,
) -> AnalysisResult<DataTable> {
    info!("Attempting to read input file {:?} as {:?}", path, input_type);
    let table = match input_type {
        InputType::Excel => io_excel::read_excel_table(path, worksheet)?,
        InputType::Csv => io_csv::read_delimited_table(path, b',')?,
        InputType::Tsv => io_csv::read_delimited_table(path, b'\t')?,
    };
    Ok(drop_blank_rows(table))
}

/// Rows where every cell is empty are formatting leftovers, not treatments.
pub fn drop_blank_rows(table: DataTable) -> DataTable {
    let num_rows = table.num_rows();
    let rows: Vec<Vec<CellValue>> = table
        .rows
        .into_iter()
        .filter(|r| r.iter().any(|c| *c != CellValue::Empty))
        .collect();
    if rows.len() < num_rows {
        debug!("drop_blank_rows: dropped {} rows", num_rows - rows.len());
    }
    DataTable {
        header: table.header,
        rows,
    }
}

/// A cell read from a text source.
pub fn text_cell(s: &str) -> CellValue {
    if s.trim().is_empty() {
        CellValue::Empty
    } else {
        CellValue::Text(s.to_string())
    }
}
