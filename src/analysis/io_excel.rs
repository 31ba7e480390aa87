use calamine::{open_workbook_auto, DataType, Reader};

use crate::analysis::*;

/// Reads one worksheet of a workbook. The first row is the header.
///
/// When no worksheet name is given, the workbook is expected to have a single
/// worksheet. If it has more, the first one is used.
pub fn read_excel_table(path: &Path, worksheet: Option<&str>) -> AnalysisResult<DataTable> {
    let p = path.display().to_string();
    debug!("read_excel_table: path: {:?} worksheet: {:?}", &p, &worksheet);
    let mut workbook = open_workbook_auto(path).context(OpeningExcelSnafu { path: p.clone() })?;

    let sheet_name: String = match worksheet {
        Some(name) => name.to_string(),
        None => {
            let all_names = workbook.sheet_names().to_vec();
            match all_names.as_slice() {
                [] => return EmptyExcelSnafu { path: p }.fail(),
                [name] => name.clone(),
                [name, ..] => {
                    warn!(
                        "The workbook {} has {} worksheets and none was selected, using {:?}",
                        p,
                        all_names.len(),
                        name
                    );
                    name.clone()
                }
            }
        }
    };

    let wrange = workbook
        .worksheet_range(&sheet_name)
        .context(MissingWorksheetSnafu {
            name: sheet_name.clone(),
            path: p.clone(),
        })?
        .context(OpeningExcelSnafu { path: p.clone() })?;

    let mut iter = wrange.rows();
    let header: Vec<String> = iter
        .next()
        .context(MissingHeaderSnafu { path: p.clone() })?
        .iter()
        .map(|c| c.to_string())
        .collect();
    debug!("read_excel_table: header: {:?}", header);

    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    for (idx, row) in iter.enumerate() {
        debug!("read_excel_table: idx: {:?} row: {:?}", idx, row);
        rows.push(row.iter().map(read_cell).collect());
    }
    Ok(DataTable { header, rows })
}

fn read_cell(cell: &DataType) -> CellValue {
    match cell {
        DataType::Int(i) => CellValue::Number(*i as f64),
        DataType::Float(f) => CellValue::Number(*f),
        // Dates are kept as their serial number.
        DataType::DateTime(f) => CellValue::Number(*f),
        DataType::String(s) if s.trim().is_empty() => CellValue::Empty,
        DataType::String(s) => CellValue::Text(s.clone()),
        DataType::Bool(b) => CellValue::Text(b.to_string()),
        DataType::Empty => CellValue::Empty,
        DataType::Error(e) => {
            debug!("read_cell: error cell {:?} read as empty", e);
            CellValue::Empty
        }
        #[allow(unreachable_patterns)]
        _ => CellValue::Text(cell.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;
    use tempfile::TempDir;

    #[test]
    fn reads_named_worksheet() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Input.xlsx");
        let mut workbook = Workbook::new();
        workbook.add_worksheet().set_name("Sheet1").unwrap();
        let sheet = workbook.add_worksheet();
        sheet.set_name("Sheet3").unwrap();
        sheet.write_string(0, 0, "Treatment").unwrap();
        sheet.write_string(0, 1, "Gall").unwrap();
        sheet.write_string(1, 0, "Neem").unwrap();
        sheet.write_number(1, 1, 12.5).unwrap();
        sheet.write_string(2, 0, "Control").unwrap();
        sheet.write_string(2, 1, " ").unwrap();
        workbook.save(&path).unwrap();

        let table = read_excel_table(&path, Some("Sheet3")).unwrap();
        assert_eq!(table.header, vec!["Treatment", "Gall"]);
        assert_eq!(
            table.rows,
            vec![
                vec![CellValue::Text("Neem".to_string()), CellValue::Number(12.5)],
                vec![CellValue::Text("Control".to_string()), CellValue::Empty],
            ]
        );

        assert!(matches!(
            read_excel_table(&path, Some("Sheet2")),
            Err(AnalysisError::MissingWorksheet { .. })
        ));
    }

    #[test]
    fn cells() {
        assert_eq!(read_cell(&DataType::Int(3)), CellValue::Number(3.0));
        assert_eq!(read_cell(&DataType::String("+".to_string())), CellValue::Text("+".to_string()));
        assert_eq!(read_cell(&DataType::Bool(true)), CellValue::Text("true".to_string()));
        assert_eq!(read_cell(&DataType::Empty), CellValue::Empty);
    }
}
