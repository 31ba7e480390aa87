use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use topsis::*;

use std::fs;
use std::path::{Path, PathBuf};

use text_diff::print_diff;

use crate::args::Args;

pub mod config_reader;
pub mod io_common;
pub mod io_csv;
pub mod io_excel;
pub mod output_chart;
pub mod output_excel;
pub mod output_text;
pub mod report;
pub mod summary;

use crate::analysis::config_reader::*;
use crate::analysis::report::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum AnalysisError {
    #[snafu(display("Error opening workbook {path}: {source}"))]
    OpeningExcel {
        source: calamine::Error,
        path: String,
    },
    #[snafu(display("The workbook {path} does not contain any worksheet"))]
    EmptyExcel { path: String },
    #[snafu(display("Worksheet {name:?} not found in {path}"))]
    MissingWorksheet { name: String, path: String },
    #[snafu(display("Missing header row in {path}"))]
    MissingHeader { path: String },
    #[snafu(display("Error reading delimited file {path}: {source}"))]
    OpeningCsv { source: csv::Error, path: String },
    #[snafu(display("Error reading configuration {path}: {source}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing configuration {path}: {source}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display(
        "Column '{column}' not found. Please ensure the input has a '{column}' column."
    ))]
    MissingTreatmentColumn { column: String },
    #[snafu(display("{source}"))]
    Scoring { source: ScoringErrors },
    #[snafu(display("Error creating output directory {path}: {source}"))]
    CreatingOutputDir {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing text output {path}: {source}"))]
    WritingText { source: csv::Error, path: String },
    #[snafu(display("Error writing Excel output {path}: {source}"))]
    WritingExcel {
        source: rust_xlsxwriter::XlsxError,
        path: String,
    },
    #[snafu(display("Error drawing chart {path}: {message}"))]
    RenderingChart { message: String, path: String },
    #[snafu(display("Error reading reference {path}: {source}"))]
    ReadingReference {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Difference detected between the output and the reference {path}"))]
    ReferenceMismatch { path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
pub type BAnalysisResult<T> = Result<T, Box<AnalysisError>>;

/// Everything a run produced.
#[derive(PartialEq, Debug, Clone)]
pub struct AnalysisOutcome {
    pub treatment_column: String,
    pub labels: Vec<CellValue>,
    pub result: TopsisResult,
    pub text_path: PathBuf,
    pub excel_path: PathBuf,
    pub chart_path: Option<PathBuf>,
}

fn display_path(p: &Path) -> String {
    p.display().to_string()
}

/// Reads the input, scores the treatments and writes all the outputs.
///
/// Nothing is written when the input cannot be read, when the treatment column is
/// missing or when no trait can be scored.
pub fn run_analysis(settings: &AnalysisSettings) -> BAnalysisResult<AnalysisOutcome> {
    info!("run_analysis: settings: {:?}", settings);
    let table = io_common::read_table(
        &settings.input_path,
        settings.input_type,
        settings.worksheet.as_deref(),
    )?;
    info!(
        "run_analysis: read {} rows and {} columns from {:?}",
        table.num_rows(),
        table.header.len(),
        settings.input_path
    );

    let index = ColumnIndex::new(&table.header);
    let treatment_idx = index
        .lookup(&settings.treatment_column)
        .context(MissingTreatmentColumnSnafu {
            column: settings.treatment_column.clone(),
        })?;
    let treatment_column = table.header[treatment_idx].clone();
    debug!(
        "run_analysis: treatment column: {:?} at {}",
        treatment_column, treatment_idx
    );

    let result = score_table(&table, &settings.traits).context(ScoringSnafu {})?;
    let labels = table.column(treatment_idx);

    // All the checks on the input are done, the outputs can be written.
    fs::create_dir_all(&settings.output_dir).context(CreatingOutputDirSnafu {
        path: display_path(&settings.output_dir),
    })?;

    let results = results_table(&treatment_column, &labels, &result);

    let text_path = settings.output_dir.join(&settings.text_file_name);
    output_text::write_results_text(&text_path, &results)?;
    println!("Output text file saved: {}", text_path.display());

    let excel_path = settings.output_dir.join(&settings.excel_file_name);
    output_excel::write_results_excel(&excel_path, &results, &weights_table(&result))?;
    println!("Output Excel file saved: {}", excel_path.display());

    let chart_path = if settings.generate_chart {
        let chart_path = settings.output_dir.join(&settings.chart_file_name);
        let bars = chart_bars(&labels, &result);
        output_chart::render_chart(&chart_path, &bars, settings.chart_size).map_err(|e| {
            AnalysisError::RenderingChart {
                message: e.to_string(),
                path: display_path(&chart_path),
            }
        })?;
        println!("Plot saved: {}", chart_path.display());
        Some(chart_path)
    } else {
        None
    };

    println!(
        "\n--- Top {} (by composite_score) ---",
        settings.summary_rows
    );
    println!(
        "{}",
        summary::format_summary(&treatment_column, &labels, &result, settings.summary_rows)
    );

    Ok(AnalysisOutcome {
        treatment_column,
        labels,
        result,
        text_path,
        excel_path,
        chart_path,
    })
}

/// Compares the text output with a reference file. The differences are printed.
pub fn check_reference(output_path: &Path, reference_path: &str) -> AnalysisResult<()> {
    let produced = fs::read_to_string(output_path).context(ReadingReferenceSnafu {
        path: display_path(output_path),
    })?;
    let reference = fs::read_to_string(reference_path).context(ReadingReferenceSnafu {
        path: reference_path.to_string(),
    })?;
    // Line endings may differ depending on where the reference was produced.
    let reference = reference.replace("\r\n", "\n");
    if reference != produced {
        warn!("Found differences with the reference {}", reference_path);
        print_diff(reference.as_str(), produced.as_str(), "\n");
        return ReferenceMismatchSnafu {
            path: reference_path.to_string(),
        }
        .fail();
    }
    info!("check_reference: output matches {}", reference_path);
    Ok(())
}

pub fn run_from_args(args: &Args) -> BAnalysisResult<()> {
    let settings = build_settings(args)?;
    let outcome = run_analysis(&settings)?;
    if let Some(reference) = &args.reference {
        check_reference(&outcome.text_path, reference)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use calamine::{open_workbook, DataType, Reader, Xlsx};
    use rust_xlsxwriter::Workbook;
    use std::path::Path;
    use tempfile::TempDir;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    enum Fixture<'a> {
        S(&'a str),
        N(f64),
        E,
    }
    use Fixture::*;

    fn write_input(path: &Path, sheet_name: &str, rows: &[Vec<Fixture>]) {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(sheet_name).unwrap();
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                match cell {
                    S(s) => {
                        sheet.write_string(r as u32, c as u16, *s).unwrap();
                    }
                    N(x) => {
                        sheet.write_number(r as u32, c as u16, *x).unwrap();
                    }
                    E => {}
                }
            }
        }
        workbook.save(path).unwrap();
    }

    fn nematode_rows() -> Vec<Vec<Fixture<'static>>> {
        vec![
            vec![
                S("Treatment"),
                S("Gall"),
                S("gall-WGT"),
                S("Gall-drc"),
                S(" SL "),
                S("SL-wgt"),
                S("SL-drc"),
                S("Eggs"),
                S("Eggs-drc"),
            ],
            vec![S("Control"), N(40.0), N(0.6), S("-"), N(3.0), N(0.4), S("+"), N(900.0), S("+")],
            vec![S("Neem"), N(10.0), N(0.6), S("-"), N(5.0), N(0.4), S("+"), N(200.0), S("-")],
            vec![S("Garlic"), N(20.0), N(0.6), S("-"), N(4.0), N(0.4), S("+"), S("lost"), S("+")],
            vec![N(4.0), N(25.0), E, S("-"), N(4.5), N(0.4), S("+"), N(300.0), S("+")],
        ]
    }

    fn settings_for(dir: &TempDir, input: PathBuf, traits: Vec<TraitSpec>) -> AnalysisSettings {
        AnalysisSettings {
            input_path: input,
            input_type: InputType::Excel,
            worksheet: Some("Sheet3".to_string()),
            treatment_column: "Treatment".to_string(),
            traits,
            output_dir: dir.path().join("v1"),
            text_file_name: "scored_results.txt".to_string(),
            excel_file_name: "scored_results.xlsx".to_string(),
            chart_file_name: "composite_scores.png".to_string(),
            generate_chart: false,
            chart_size: (800, 600),
            summary_rows: 10,
        }
    }

    fn read_tsv(path: &Path) -> Vec<Vec<String>> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .from_path(path)
            .unwrap();
        rdr.records()
            .map(|r| r.unwrap().iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn end_to_end_excel() {
        init();
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("Input.xlsx");
        write_input(&input, "Sheet3", &nematode_rows());
        let traits = vec![
            TraitSpec::with_conventional_columns("Gall"),
            TraitSpec::with_conventional_columns("SL"),
            TraitSpec::with_conventional_columns("Eggs"),
            TraitSpec::with_conventional_columns("RFW"),
        ];
        let settings = settings_for(&dir, input, traits);
        let outcome = run_analysis(&settings).unwrap();
        let res = &outcome.result;

        // RFW is not in the input, Eggs has mixed directions.
        let names: Vec<&str> = res.traits.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Gall", "SL", "Eggs"]);
        assert_eq!(res.warnings.len(), 2);
        assert_eq!(res.traits[0].direction, Direction::Minimize);
        assert_eq!(res.traits[2].direction, Direction::Maximize);
        assert_eq!(res.traits[1].coerced_cells, 0);
        assert_eq!(res.traits[2].coerced_cells, 1);
        // Eggs has no weight column: no influence.
        assert!((res.traits[0].weight - 0.6).abs() < 1e-9);
        assert!((res.traits[1].weight - 0.4).abs() < 1e-9);
        assert_eq!(res.traits[2].weight, 0.0);
        // Neem has the fewest galls and the longest shoots.
        assert_eq!(res.ranks[1], 1);
        assert_eq!(outcome.treatment_column, "Treatment");

        // The text output can be read back.
        let rows = read_tsv(&outcome.text_path);
        assert_eq!(
            rows[0],
            vec![
                "Treatment",
                "composite_score",
                "rank",
                "Gall_norm",
                "SL_norm",
                "Eggs_norm",
                "Gall_weighted",
                "SL_weighted",
                "Eggs_weighted"
            ]
        );
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[1][0], "Control");
        assert_eq!(rows[4][0], "4");
        for (i, row) in rows.iter().skip(1).enumerate() {
            assert_eq!(row[1], format!("{:.6}", res.scores[i]));
            assert_eq!(row[2], res.ranks[i].to_string());
            let score: f64 = row[1].parse().unwrap();
            assert!((score - res.scores[i]).abs() < 1e-6);
        }
        assert_eq!(rows[3][5], "0.000000");

        // The workbook has both sheets.
        let mut workbook: Xlsx<_> = open_workbook(&outcome.excel_path).unwrap();
        let results = workbook.worksheet_range("Results").unwrap().unwrap();
        assert_eq!(results.get_size(), (5, 9));
        assert_eq!(
            results.get_value((0, 1)),
            Some(&DataType::String("composite_score".to_string()))
        );
        let weights = workbook.worksheet_range("Weights").unwrap().unwrap();
        assert_eq!(weights.get_size(), (4, 3));
        assert_eq!(
            weights.get_value((1, 0)),
            Some(&DataType::String("Gall".to_string()))
        );
        assert_eq!(
            weights.get_value((1, 2)),
            Some(&DataType::String("-".to_string()))
        );
        assert_eq!(outcome.chart_path, None);
    }

    #[test]
    #[ignore = "needs fontconfig and a sans-serif font on the host"]
    fn end_to_end_chart() {
        init();
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("Input.xlsx");
        write_input(&input, "Sheet3", &nematode_rows());
        let mut settings =
            settings_for(&dir, input, vec![TraitSpec::with_conventional_columns("Gall")]);
        settings.generate_chart = true;
        let outcome = run_analysis(&settings).unwrap();
        let chart_path = outcome.chart_path.unwrap();
        let bytes = fs::read(&chart_path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }

    #[test]
    fn missing_treatment_column_writes_nothing() {
        init();
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("Input.xlsx");
        write_input(
            &input,
            "Sheet3",
            &[vec![S("Name"), S("Gall")], vec![S("Control"), N(3.0)]],
        );
        let settings = settings_for(&dir, input, vec![TraitSpec::with_conventional_columns("Gall")]);
        let err = run_analysis(&settings).unwrap_err();
        assert!(matches!(
            *err,
            AnalysisError::MissingTreatmentColumn { .. }
        ));
        assert!(!settings.output_dir.exists());
    }

    #[test]
    fn no_rows_is_fatal() {
        init();
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("Input.xlsx");
        write_input(&input, "Sheet3", &[vec![S("Treatment"), S("Gall")]]);
        let settings = settings_for(&dir, input, vec![TraitSpec::with_conventional_columns("Gall")]);
        let err = run_analysis(&settings).unwrap_err();
        assert!(matches!(
            *err,
            AnalysisError::Scoring {
                source: ScoringErrors::EmptyTable
            }
        ));
        assert!(!settings.output_dir.exists());
    }

    #[test]
    fn no_valid_trait_is_fatal() {
        init();
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("Input.xlsx");
        write_input(
            &input,
            "Sheet3",
            &[vec![S("Treatment"), S("Gall")], vec![S("Control"), N(3.0)]],
        );
        let settings = settings_for(&dir, input, vec![TraitSpec::with_conventional_columns("SL")]);
        let err = run_analysis(&settings).unwrap_err();
        assert!(matches!(
            *err,
            AnalysisError::Scoring {
                source: ScoringErrors::NoValidTraits { .. }
            }
        ));
        assert!(!settings.output_dir.exists());
    }

    #[test]
    fn unreadable_input_is_fatal() {
        init();
        let dir = TempDir::new().unwrap();
        let settings = settings_for(
            &dir,
            dir.path().join("missing.xlsx"),
            vec![TraitSpec::with_conventional_columns("Gall")],
        );
        let err = run_analysis(&settings).unwrap_err();
        assert!(matches!(*err, AnalysisError::OpeningExcel { .. }));
        assert!(!settings.output_dir.exists());
    }

    #[test]
    fn reference_check() {
        init();
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("Input.xlsx");
        write_input(&input, "Sheet3", &nematode_rows());
        let settings = settings_for(&dir, input, vec![TraitSpec::with_conventional_columns("Gall")]);
        let outcome = run_analysis(&settings).unwrap();

        let same = dir.path().join("same.txt");
        fs::copy(&outcome.text_path, &same).unwrap();
        assert!(check_reference(&outcome.text_path, same.to_str().unwrap()).is_ok());

        let other = dir.path().join("other.txt");
        fs::write(&other, "Treatment\tcomposite_score\trank\n").unwrap();
        assert!(matches!(
            check_reference(&outcome.text_path, other.to_str().unwrap()),
            Err(AnalysisError::ReferenceMismatch { .. })
        ));
    }
}
