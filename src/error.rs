//! Error taxonomy for loading, modelling and user input.

/// Failures while reading and normalizing the dataset. Always fatal for the load.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("unparsable temporal field on line {line}: {value:?}")]
    UnparsableTemporal { line: usize, value: String },

    #[error("invalid year on line {line}: {value:?}")]
    InvalidYear { line: usize, value: String },

    #[error("unknown month label on line {line}: {value:?}")]
    UnknownMonth { line: usize, value: String },
}

/// Failures of the trend projector.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("insufficient data points: need at least 2 distinct years, got {found}")]
    InsufficientData { found: usize },
}

/// Caller-supplied parameters that cannot be honoured.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("target year {year} outside allowed range {min}..={max}")]
    TargetYearOutOfRange { year: i32, min: i32, max: i32 },

    #[error("no forecast year can follow last observed year {last_year}")]
    NoForecastYears { last_year: i32 },

    #[error("selection cancelled")]
    Cancelled,

    #[error("unknown state: {0:?}")]
    UnknownState(String),

    #[error("unknown page choice: {0:?}")]
    UnknownPage(String),

    #[error("not a number: {0:?}")]
    NotANumber(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),
}

/// Failures while exporting views to disk.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
