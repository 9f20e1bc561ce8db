use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LensError {
    #[error("Result {index} does not exist (log has {count} results)")]
    ResultOutOfRange { index: usize, count: usize },
}

pub type Result<T> = std::result::Result<T, LensError>;
