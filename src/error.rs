use thiserror::Error;

pub type XlResult<T> = Result<T, XlError>;

#[derive(Error, Debug)]
pub enum XlError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Invalid column reference '{0}'")]
    Column(String),

    #[error("Validation error: {0}")]
    Validation(String),
}
