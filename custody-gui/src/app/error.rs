use crate::store::model::AmountError;

use super::backend::BackendError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Backend(#[from] BackendError),
    #[error("{0}")]
    Amount(#[from] AmountError),
    #[error("Amount exceeds the withdrawable balance of {0}")]
    InsufficientFunds(String),
    #[error("No {0} selected for this withdrawal")]
    Missing(&'static str),
    #[error("Unknown bank account {0}")]
    UnknownBeneficiary(String),
}
