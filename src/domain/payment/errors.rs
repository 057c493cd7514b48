//! Payment Context - Errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("number parameter is required")]
    Missing,

    #[error("number must be a valid numeric amount")]
    NotANumber,

    #[error("amount must be between 0 and 100 billion")]
    OutOfRange,
}
