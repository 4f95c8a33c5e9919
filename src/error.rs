use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExportError>;

/// Failures while writing an exported workbook to disk.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A spreadsheet needs at least one sheet.
    #[error("workbook {0} has no sheets")]
    EmptyWorkbook(String),
}
