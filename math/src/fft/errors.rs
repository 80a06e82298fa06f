use thiserror::Error;

use crate::field::errors::FieldError;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum FftError {
    #[error("NTT input length {0} is not a power of two")]
    InvalidDomainSize(usize),
    #[error("requested NTT domain exceeds the field's two-adicity")]
    OrderTooLarge,
    #[error(transparent)]
    FieldError(#[from] FieldError),
}
