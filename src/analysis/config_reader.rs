use crate::analysis::*;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The traits looked for when neither a configuration nor `--traits` is given.
pub const DEFAULT_TRAITS: [&str; 8] = ["RF", "Eggs", "Egg Masses", "Gall", "SDW", "SFW", "RFW", "SL"];

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputSettings {
    #[serde(rename = "filePath")]
    pub file_path: Option<String>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
    #[serde(rename = "inputType")]
    pub input_type: Option<String>,
    #[serde(rename = "treatmentColumn")]
    pub treatment_column: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
    #[serde(rename = "textFileName")]
    pub text_file_name: Option<String>,
    #[serde(rename = "excelFileName")]
    pub excel_file_name: Option<String>,
    #[serde(rename = "chartFileName")]
    pub chart_file_name: Option<String>,
    #[serde(rename = "generateChart")]
    pub generate_chart: Option<bool>,
    #[serde(rename = "chartWidth")]
    pub chart_width: Option<u32>,
    #[serde(rename = "chartHeight")]
    pub chart_height: Option<u32>,
    #[serde(rename = "summaryRows")]
    pub summary_rows: Option<usize>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct TraitSource {
    pub name: String,
    #[serde(rename = "valueColumn")]
    pub value_column: Option<String>,
    #[serde(rename = "weightColumn")]
    pub weight_column: Option<String>,
    #[serde(rename = "directionColumn")]
    pub direction_column: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopsisConfig {
    #[serde(rename = "inputSettings", default)]
    pub input_settings: InputSettings,
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
    #[serde(default)]
    pub traits: Vec<TraitSource>,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum InputType {
    Excel,
    Csv,
    Tsv,
}

impl InputType {
    pub fn from_name(name: &str) -> AnalysisResult<InputType> {
        match name.trim().to_lowercase().as_str() {
            "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" | "excel" => Ok(InputType::Excel),
            "csv" => Ok(InputType::Csv),
            "tsv" | "txt" => Ok(InputType::Tsv),
            x => whatever!("Unknown input type {:?}: expected xlsx, csv or tsv", x),
        }
    }

    pub fn from_path(path: &Path) -> AnalysisResult<InputType> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => InputType::from_name(ext),
            None => whatever!(
                "Cannot guess the type of {}, use --input-type",
                path.display()
            ),
        }
    }
}

/// The validated options of a run. Built once, read-only afterwards.
#[derive(PartialEq, Debug, Clone)]
pub struct AnalysisSettings {
    pub input_path: PathBuf,
    pub input_type: InputType,
    pub worksheet: Option<String>,
    pub treatment_column: String,
    pub traits: Vec<TraitSpec>,
    pub output_dir: PathBuf,
    pub text_file_name: String,
    pub excel_file_name: String,
    pub chart_file_name: String,
    pub generate_chart: bool,
    pub chart_size: (u32, u32),
    pub summary_rows: usize,
}

pub fn read_config(path: &str) -> AnalysisResult<TopsisConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: TopsisConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    debug!("read_config: {:?}", config);
    Ok(config)
}

// Empty names are the same as no name at all.
fn clean_name(name: &Option<String>) -> Option<String> {
    name.as_ref()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn trait_spec(source: &TraitSource) -> TraitSpec {
    let name = source.name.trim().to_string();
    TraitSpec {
        value_column: clean_name(&source.value_column).unwrap_or_else(|| name.clone()),
        weight_column: clean_name(&source.weight_column),
        direction_column: clean_name(&source.direction_column),
        name,
    }
}

/// Checks that the traits have distinct, non-empty names.
pub fn validate_traits(traits: &[TraitSpec]) -> AnalysisResult<()> {
    if traits.is_empty() {
        whatever!("No trait to rank the treatments by");
    }
    let mut seen: HashSet<&str> = HashSet::new();
    for t in traits {
        if t.name.is_empty() {
            whatever!("A trait has an empty name");
        }
        if !seen.insert(t.name.as_str()) {
            whatever!("The trait {:?} is defined more than once", t.name);
        }
    }
    Ok(())
}

/// Merges the configuration file (if any) with the command line options.
/// The command line takes precedence.
pub fn build_settings(args: &Args) -> AnalysisResult<AnalysisSettings> {
    let (config, root) = match &args.config {
        Some(p) => {
            let config = read_config(p)?;
            let root = Path::new(p)
                .parent()
                .map(|d| d.to_path_buf())
                .unwrap_or_default();
            (config, root)
        }
        None => (TopsisConfig::default(), PathBuf::new()),
    };
    info!("build_settings: config: {:?}", config);
    settings_from_config(&config, &root, args)
}

pub fn settings_from_config(
    config: &TopsisConfig,
    root: &Path,
    args: &Args,
) -> AnalysisResult<AnalysisSettings> {
    let input_path: PathBuf = match (&args.input, &config.input_settings.file_path) {
        (Some(p), _) => PathBuf::from(p),
        (None, Some(p)) => root.join(p),
        (None, None) => whatever!("No input file given: use --input or the inputSettings.filePath option"),
    };

    let input_type = match args
        .input_type
        .as_ref()
        .or(config.input_settings.input_type.as_ref())
    {
        Some(name) => InputType::from_name(name)?,
        None => InputType::from_path(&input_path)?,
    };

    let worksheet = clean_name(&args.excel_worksheet_name)
        .or_else(|| clean_name(&config.input_settings.excel_worksheet_name));

    let treatment_column = clean_name(&config.input_settings.treatment_column)
        .unwrap_or_else(|| "Treatment".to_string());

    let traits: Vec<TraitSpec> = match &args.traits {
        Some(names) => names
            .iter()
            .map(|n| TraitSpec::with_conventional_columns(n))
            .collect(),
        None if !config.traits.is_empty() => config.traits.iter().map(trait_spec).collect(),
        None => DEFAULT_TRAITS
            .iter()
            .map(|n| TraitSpec::with_conventional_columns(n))
            .collect(),
    };
    validate_traits(&traits)?;

    let os = &config.output_settings;
    let output_dir: PathBuf = match (&args.out, &os.output_directory) {
        (Some(p), _) => PathBuf::from(p),
        (None, Some(p)) => root.join(p),
        (None, None) => root.to_path_buf(),
    };
    let summary_rows = os.summary_rows.unwrap_or(10);
    let chart_size = (os.chart_width.unwrap_or(2000), os.chart_height.unwrap_or(1600));
    if chart_size.0 == 0 || chart_size.1 == 0 {
        whatever!("The chart size must not be empty: {:?}", chart_size);
    }

    Ok(AnalysisSettings {
        input_path,
        input_type,
        worksheet,
        treatment_column,
        traits,
        output_dir,
        text_file_name: clean_name(&os.text_file_name)
            .unwrap_or_else(|| "scored_results.txt".to_string()),
        excel_file_name: clean_name(&os.excel_file_name)
            .unwrap_or_else(|| "scored_results.xlsx".to_string()),
        chart_file_name: clean_name(&os.chart_file_name)
            .unwrap_or_else(|| "composite_scores.png".to_string()),
        generate_chart: os.generate_chart.unwrap_or(true),
        chart_size,
        summary_rows,
    })
}
