use thiserror::Error;

use crate::field::errors::FieldError;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum PolynomialError {
    #[error("interpolation points must be distinct, but x[{0}] repeats an earlier point")]
    DuplicateInterpolationPoint(usize),
    #[error(transparent)]
    FieldError(#[from] FieldError),
}
