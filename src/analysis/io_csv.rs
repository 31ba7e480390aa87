// Primitives for reading CSV and TSV files.

use crate::analysis::{io_common::text_cell, *};

pub fn read_delimited_table(path: &Path, delimiter: u8) -> AnalysisResult<DataTable> {
    let p = path.display().to_string();
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_path(path)
        .context(OpeningCsvSnafu { path: p.clone() })?;
    let mut records = rdr.into_records();

    let header: Vec<String> = match records.next() {
        Some(line_r) => line_r
            .context(OpeningCsvSnafu { path: p.clone() })?
            .iter()
            .map(|s| s.to_string())
            .collect(),
        None => return MissingHeaderSnafu { path: p }.fail(),
    };
    debug!("read_delimited_table: header: {:?}", header);

    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    for (idx, line_r) in records.enumerate() {
        let line = line_r.context(OpeningCsvSnafu { path: p.clone() })?;
        debug!("read_delimited_table: lineno: {:?} row: {:?}", idx + 2, line);
        rows.push(line.iter().map(text_cell).collect());
    }
    Ok(DataTable { header, rows })
}
