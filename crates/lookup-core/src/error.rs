use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("No data found for {0}")]
    NoData(String),
}

pub type LookupResult<T> = Result<T, LookupError>;
