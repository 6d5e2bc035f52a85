use clap::Parser;

/// Command-line arguments. Options left unset fall back to the config file,
/// then to built-in defaults.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "cinema-export")]
#[command(about = "Convert exported movie history JSON into a catalog-importable CSV")]
pub struct CliConfig {
    /// JSON files produced by the data export or the collection script
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<String>,

    /// Optional TOML settings file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    /// Directory receiving cinema_export.csv
    #[arg(long)]
    pub output_path: Option<String>,

    /// API key for the AI extraction fallback
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long)]
    pub ai_endpoint: Option<String>,

    #[arg(long)]
    pub ai_model: Option<String>,

    /// Timeout for each extraction-service request, in seconds
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Never call the extraction service
    #[arg(long)]
    pub no_ai: bool,

    /// Row positions (from --review) to leave out of the export
    #[arg(long = "drop", value_delimiter = ',', value_name = "ROW")]
    pub dropped_rows: Vec<usize>,

    /// Print the extracted records before exporting
    #[arg(long)]
    pub review: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}
