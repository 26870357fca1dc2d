//! Run configuration and its command-line surface.

use crate::pages::PageKind;
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_DATA_PATH: &str = "df_turismo_all.csv";
pub const FORECAST_MAX_YEAR: i32 = 2030;

#[derive(Debug, Clone)]
pub struct Config {
    /// CSV with the monthly tourism records
    pub data_path: PathBuf,
    /// Rows kept by the top-N rankings
    pub top_n: usize,
    /// Latest year the forecast may target
    pub forecast_max_year: i32,
    /// Rows shown per table on the console
    pub preview_rows: usize,
    /// When set, every rendered view is also written here as CSV
    pub export_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            top_n: 10,
            forecast_max_year: FORECAST_MAX_YEAR,
            preview_rows: 12,
            export_dir: None,
        }
    }
}

/// Brazilian inbound tourism reports, 2014 to 2024.
#[derive(Parser, Debug)]
#[command(name = "turismo_report", version, about)]
pub struct Cli {
    /// Path to the tourism CSV
    #[arg(short, long, default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Render a single page and exit instead of opening the menu
    #[arg(short, long, value_enum)]
    pub page: Option<PageKind>,

    /// State for the state page (defaults to the first state in the data)
    #[arg(long)]
    pub state: Option<String>,

    /// Target year for the forecast page
    #[arg(long)]
    pub target_year: Option<i32>,

    /// Number of rows in top-N rankings
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Upper bound for the forecast target year
    #[arg(long, default_value_t = FORECAST_MAX_YEAR)]
    pub max_year: i32,

    /// Rows shown per table
    #[arg(long, default_value_t = 12)]
    pub rows: usize,

    /// Directory to export each rendered view as CSV
    #[arg(long)]
    pub export_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl From<&Cli> for Config {
    fn from(cli: &Cli) -> Self {
        Self {
            data_path: cli.data.clone(),
            top_n: cli.top,
            forecast_max_year: cli.max_year,
            preview_rows: cli.rows,
            export_dir: cli.export_dir.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults_match_config_defaults() {
        let cli = Cli::parse_from(["turismo_report"]);
        let from_cli = Config::from(&cli);
        let default = Config::default();
        assert_eq!(from_cli.data_path, default.data_path);
        assert_eq!(from_cli.top_n, default.top_n);
        assert_eq!(from_cli.forecast_max_year, default.forecast_max_year);
        assert_eq!(from_cli.preview_rows, default.preview_rows);
        assert!(cli.page.is_none());
    }

    #[test]
    fn cli_one_shot_forecast() {
        let cli = Cli::parse_from([
            "turismo_report",
            "--data",
            "other.csv",
            "--page",
            "forecast",
            "--target-year",
            "2027",
            "--export-dir",
            "out",
        ]);
        assert_eq!(cli.page, Some(PageKind::Forecast));
        assert_eq!(cli.target_year, Some(2027));
        let config = Config::from(&cli);
        assert_eq!(config.data_path, PathBuf::from("other.csv"));
        assert_eq!(config.export_dir, Some(PathBuf::from("out")));
    }
}
