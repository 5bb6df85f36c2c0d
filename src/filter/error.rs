use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    #[error("Invalid select: {0}")]
    InvalidSelect(String),
}
