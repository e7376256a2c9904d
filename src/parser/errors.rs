use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Parse error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Csv(#[from] csv::Error)
}
