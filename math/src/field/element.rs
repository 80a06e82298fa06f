use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use super::errors::FieldError;
use super::traits::IsField;

/// An element of the field `F`, wrapping `F`'s chosen raw representation.
#[derive(Clone)]
pub struct FieldElement<F: IsField> {
    value: F::BaseType,
}

impl<F: IsField> FieldElement<F> {
    pub fn new(value: F::BaseType) -> Self {
        Self {
            value: F::from_base_type(value),
        }
    }

    pub fn value(&self) -> &F::BaseType {
        &self.value
    }

    pub fn zero() -> Self {
        Self { value: F::zero() }
    }

    pub fn one() -> Self {
        Self { value: F::one() }
    }

    pub fn is_zero(&self) -> bool {
        F::eq(&self.value, &F::zero())
    }

    pub fn pow(&self, exponent: u64) -> Self {
        Self {
            value: F::pow(&self.value, exponent),
        }
    }

    pub fn inv(&self) -> Result<Self, FieldError> {
        Ok(Self {
            value: F::inv(&self.value)?,
        })
    }

    pub fn square(&self) -> Self {
        self * self
    }

    pub fn to_bytes_be(&self) -> Vec<u8> {
        F::to_bytes_be(&self.value)
    }
}

impl<F: IsField> From<u64> for FieldElement<F> {
    fn from(x: u64) -> Self {
        Self {
            value: F::from_u64(x),
        }
    }
}

impl<F: IsField> PartialEq for FieldElement<F> {
    fn eq(&self, other: &Self) -> bool {
        F::eq(&self.value, &other.value)
    }
}
impl<F: IsField> Eq for FieldElement<F> {}

impl<F: IsField> fmt::Debug for FieldElement<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({:?})", self.value)
    }
}

macro_rules! impl_binop_variants {
    ($trait:ident, $method:ident, $op:tt) => {
        impl<F: IsField> $trait for FieldElement<F> {
            type Output = FieldElement<F>;
            fn $method(self, rhs: Self) -> Self::Output {
                &self $op &rhs
            }
        }
        impl<F: IsField> $trait<&FieldElement<F>> for FieldElement<F> {
            type Output = FieldElement<F>;
            fn $method(self, rhs: &FieldElement<F>) -> Self::Output {
                &self $op rhs
            }
        }
        impl<F: IsField> $trait<FieldElement<F>> for &FieldElement<F> {
            type Output = FieldElement<F>;
            fn $method(self, rhs: FieldElement<F>) -> Self::Output {
                self $op &rhs
            }
        }
    };
}

impl<F: IsField> Add<&FieldElement<F>> for &FieldElement<F> {
    type Output = FieldElement<F>;
    fn add(self, rhs: &FieldElement<F>) -> FieldElement<F> {
        FieldElement {
            value: F::add(&self.value, &rhs.value),
        }
    }
}
impl_binop_variants!(Add, add, +);

impl<F: IsField> Sub<&FieldElement<F>> for &FieldElement<F> {
    type Output = FieldElement<F>;
    fn sub(self, rhs: &FieldElement<F>) -> FieldElement<F> {
        FieldElement {
            value: F::sub(&self.value, &rhs.value),
        }
    }
}
impl_binop_variants!(Sub, sub, -);

impl<F: IsField> Mul<&FieldElement<F>> for &FieldElement<F> {
    type Output = FieldElement<F>;
    fn mul(self, rhs: &FieldElement<F>) -> FieldElement<F> {
        FieldElement {
            value: F::mul(&self.value, &rhs.value),
        }
    }
}
impl_binop_variants!(Mul, mul, *);

impl<F: IsField> Div<&FieldElement<F>> for &FieldElement<F> {
    type Output = FieldElement<F>;
    fn div(self, rhs: &FieldElement<F>) -> FieldElement<F> {
        FieldElement {
            value: F::div(&self.value, &rhs.value).expect("division by zero"),
        }
    }
}
impl_binop_variants!(Div, div, /);

impl<F: IsField> Neg for &FieldElement<F> {
    type Output = FieldElement<F>;
    fn neg(self) -> FieldElement<F> {
        FieldElement {
            value: F::neg(&self.value),
        }
    }
}
impl<F: IsField> Neg for FieldElement<F> {
    type Output = FieldElement<F>;
    fn neg(self) -> FieldElement<F> {
        -&self
    }
}

#[cfg(feature = "serde")]
impl<F: IsField> serde::Serialize for FieldElement<F> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.to_bytes_be())
    }
}

#[cfg(feature = "serde")]
impl<'de, F: IsField> serde::Deserialize<'de> for FieldElement<F> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes: Vec<u8> = serde::Deserialize::deserialize(deserializer)?;
        Ok(FieldElement::new(F::from_bytes_be(&bytes)))
    }
}

/// Inverts every element of `values` using a single field inversion (the Montgomery trick).
///
/// Returns `FieldError::DivisionByZero` if any element is zero, matching the behaviour of
/// inverting elements one at a time.
pub fn batch_inverse<F: IsField>(
    values: &[FieldElement<F>],
) -> Result<Vec<FieldElement<F>>, FieldError> {
    if values.is_empty() {
        return Ok(Vec::new());
    }
    if values.iter().any(|v| v.is_zero()) {
        return Err(FieldError::DivisionByZero);
    }

    let mut prefix = Vec::with_capacity(values.len());
    let mut acc = FieldElement::<F>::one();
    for v in values {
        prefix.push(acc.clone());
        acc = &acc * v;
    }

    let mut acc_inv = acc.inv()?;
    let mut result = vec![FieldElement::<F>::zero(); values.len()];
    for i in (0..values.len()).rev() {
        result[i] = &prefix[i] * &acc_inv;
        acc_inv = &acc_inv * &values[i];
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::fields::u64_prime_field::U64PrimeField;
    use proptest::prelude::*;

    type F17 = U64PrimeField<17>;
    type FE = FieldElement<F17>;

    #[test]
    fn batch_inverse_matches_individual_inverses() {
        let values: Vec<FE> = (1u64..17).map(FE::from).collect();
        let inverted = batch_inverse(&values).unwrap();
        for (v, inv) in values.iter().zip(inverted.iter()) {
            assert_eq!(v * inv, FE::one());
        }
    }

    #[test]
    fn batch_inverse_rejects_zero() {
        let values = vec![FE::from(1), FE::from(0), FE::from(3)];
        assert_eq!(batch_inverse(&values), Err(FieldError::DivisionByZero));
    }

    proptest! {
        #[test]
        fn batch_inverse_of_nonzero_residues_multiplies_back_to_one(residues in prop::collection::vec(1u64..17, 1..17)) {
            let values: Vec<FE> = residues.into_iter().map(FE::from).collect();
            let inverted = batch_inverse(&values).unwrap();
            for (v, inv) in values.iter().zip(inverted.iter()) {
                prop_assert_eq!(v * inv, FE::one());
            }
        }

        #[test]
        fn addition_then_subtraction_is_the_identity(a in 0u64..17, b in 0u64..17) {
            let (a, b) = (FE::from(a), FE::from(b));
            prop_assert_eq!(&(&a + &b) - &b, a);
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_and_deserializes_through_json() {
        let value = FE::from(12345);
        let encoded = serde_json::to_vec(&value).unwrap();
        let decoded: FE = serde_json::from_slice(&encoded).unwrap();
        assert_eq!(value, decoded);
    }
}
