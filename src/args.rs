use clap::Parser;

/// This is a program to rank experimental treatments by TOPSIS composite score.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file describing the input, the traits and the outputs.
    /// For more information about the file format, read the documentation of the `topsis` crate.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) The spreadsheet or delimited file containing one row per treatment.
    /// Setting this option overrides the path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (xlsx, csv or tsv) The type of the input. By default, it is guessed from the extension of the file.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// When using an Excel file, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (directory) Where the text, Excel and chart outputs are written. Setting this option overrides
    /// what may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (list of comma-separated names) If specified, the traits to rank the treatments by. The weight
    /// and direction of each trait are read from the columns `<name>-wgt` and `<name>-drc`.
    #[clap(long, value_parser, value_delimiter = ',')]
    pub traits: Option<Vec<String>>,

    /// (file path) A reference file containing a previous text output. If provided, topsisrank will
    /// check that the new output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
