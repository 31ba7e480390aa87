// The Excel workbook: a Results sheet and a Weights sheet.

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::analysis::{
    report::{ReportCell, ResultsTable},
    *,
};

pub fn write_results_excel(
    path: &Path,
    table: &ResultsTable,
    weights: &[(String, f64, char)],
) -> AnalysisResult<()> {
    let p = path.display().to_string();
    debug!("write_results_excel: path: {:?}", p);
    build_workbook(path, table, weights).context(WritingExcelSnafu { path: p })
}

fn build_workbook(
    path: &Path,
    table: &ResultsTable,
    weights: &[(String, f64, char)],
) -> Result<(), XlsxError> {
    let bold = Format::new().set_bold();
    let mut workbook = Workbook::new();

    let results = workbook.add_worksheet();
    results.set_name("Results")?;
    write_header(results, &table.header, &bold)?;
    for (r, row) in table.rows.iter().enumerate() {
        let r = (r + 1) as u32;
        for (c, cell) in row.iter().enumerate() {
            let c = c as u16;
            match cell {
                ReportCell::Text(s) => {
                    results.write_string(r, c, s)?;
                }
                ReportCell::Number(x) if x.is_finite() => {
                    results.write_number(r, c, *x)?;
                }
                ReportCell::Rank(k) => {
                    results.write_number(r, c, *k as f64)?;
                }
                ReportCell::Number(_) | ReportCell::Missing => {
                    results.write_string(r, c, "NA")?;
                }
            }
        }
    }

    let sheet = workbook.add_worksheet();
    sheet.set_name("Weights")?;
    let weights_header: Vec<String> = vec![
        "Trait".to_string(),
        "Weight".to_string(),
        "Direction".to_string(),
    ];
    write_header(sheet, &weights_header, &bold)?;
    for (r, (name, weight, symbol)) in weights.iter().enumerate() {
        let r = (r + 1) as u32;
        sheet.write_string(r, 0, name)?;
        sheet.write_number(r, 1, *weight)?;
        sheet.write_string(r, 2, symbol.to_string())?;
    }

    workbook.save(path)?;
    Ok(())
}

fn write_header(sheet: &mut Worksheet, header: &[String], bold: &Format) -> Result<(), XlsxError> {
    for (c, name) in header.iter().enumerate() {
        sheet.write_string_with_format(0, c as u16, name, bold)?;
    }
    Ok(())
}
