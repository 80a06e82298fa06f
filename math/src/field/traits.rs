use std::fmt::Debug;

use super::errors::FieldError;

/// Trait to add field behaviour to a struct.
///
/// `BaseType` is the raw representation an implementor chooses for its elements (a native
/// integer, a `BigUint`, an array of limbs, ...). Everything above this trait — `FieldElement`,
/// `Polynomial`, FFTs — only ever goes through these methods, never the raw type directly.
pub trait IsField: Debug + Clone {
    type BaseType: Clone + Debug + PartialEq + Eq;

    fn add(a: &Self::BaseType, b: &Self::BaseType) -> Self::BaseType;
    fn sub(a: &Self::BaseType, b: &Self::BaseType) -> Self::BaseType {
        Self::add(a, &Self::neg(b))
    }
    fn neg(a: &Self::BaseType) -> Self::BaseType;
    fn mul(a: &Self::BaseType, b: &Self::BaseType) -> Self::BaseType;

    /// Returns the multiplicative inverse of `a`.
    ///
    /// # Errors
    /// Returns `FieldError::DivisionByZero` if `a` is the additive identity.
    fn inv(a: &Self::BaseType) -> Result<Self::BaseType, FieldError>;

    fn div(a: &Self::BaseType, b: &Self::BaseType) -> Result<Self::BaseType, FieldError> {
        Ok(Self::mul(a, &Self::inv(b)?))
    }

    fn eq(a: &Self::BaseType, b: &Self::BaseType) -> bool;

    fn zero() -> Self::BaseType;
    fn one() -> Self::BaseType;

    fn from_u64(x: u64) -> Self::BaseType;
    fn from_base_type(x: Self::BaseType) -> Self::BaseType;

    /// `a` raised to `exponent`, by repeated squaring.
    fn pow(a: &Self::BaseType, mut exponent: u64) -> Self::BaseType {
        let mut result = Self::one();
        let mut base = a.clone();

        while exponent > 0 {
            if exponent & 1 == 1 {
                result = Self::mul(&result, &base);
            }
            exponent >>= 1;
            if exponent > 0 {
                base = Self::mul(&base, &base);
            }
        }
        result
    }

    /// Big-endian byte serialization of an element, used by the Merkle leaves and the
    /// Fiat-Shamir transcript. Implementors fix their own element width.
    fn to_bytes_be(a: &Self::BaseType) -> Vec<u8>;

    /// Reduces an arbitrary big-endian byte string modulo `p`, used to turn transcript hash
    /// output into a field element.
    fn from_bytes_be(bytes: &[u8]) -> Self::BaseType;
}

/// Fields with a multiplicative subgroup of order `2^TWO_ADICITY`, usable as an NTT domain.
pub trait IsFFTField: IsField {
    /// Largest `k` such that `2^k` divides `p - 1`.
    const TWO_ADICITY: u64;

    /// A primitive `2^TWO_ADICITY`-th root of unity.
    fn two_adic_primitive_root_of_unity() -> Self::BaseType;

    /// A primitive `n`-th root of unity, for `n = 2^order`, `order <= TWO_ADICITY`.
    fn primitive_root_of_unity(order: u64) -> Result<Self::BaseType, FieldError> {
        if order > Self::TWO_ADICITY {
            return Err(FieldError::RootOfUnityOrderTooLarge(order));
        }
        let power = 1u64 << (Self::TWO_ADICITY - order);
        Ok(Self::pow(&Self::two_adic_primitive_root_of_unity(), power))
    }
}
