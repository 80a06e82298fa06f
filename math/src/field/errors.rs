use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum FieldError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("requested root of unity order {0} exceeds the field's two-adicity")]
    RootOfUnityOrderTooLarge(u64),
}
