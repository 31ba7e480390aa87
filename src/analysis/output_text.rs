// The tab-separated results file.

use crate::analysis::{report::ResultsTable, *};

pub fn write_results_text(path: &Path, table: &ResultsTable) -> AnalysisResult<()> {
    let p = path.display().to_string();
    debug!("write_results_text: path: {:?}", p);
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(path)
        .context(WritingTextSnafu { path: p.clone() })?;
    wtr.write_record(&table.header)
        .context(WritingTextSnafu { path: p.clone() })?;
    for row in table.rows.iter() {
        let fields: Vec<String> = row.iter().map(|c| c.render()).collect();
        wtr.write_record(&fields)
            .context(WritingTextSnafu { path: p.clone() })?;
    }
    wtr.flush()
        .map_err(csv::Error::from)
        .context(WritingTextSnafu { path: p })?;
    Ok(())
}
