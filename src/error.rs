use thiserror::Error;

#[derive(Error, Debug)]
pub enum CartirError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "xlsx")]
    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Error loading JSON: {0}")]
    Load(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Filter(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, CartirError>;
