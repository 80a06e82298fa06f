use crate::field::errors::FieldError;
use crate::field::traits::{IsFFTField, IsField};

/// A prime field `Z/PZ` backed by a native `u64`. `P` must fit in 63 bits so that
/// `a * b` never overflows a `u128` during reduction.
#[derive(Debug, Clone)]
pub struct U64PrimeField<const P: u64>;

pub type F17 = U64PrimeField<17>;

const fn trailing_zeros(mut x: u64) -> u64 {
    if x == 0 {
        return 0;
    }
    let mut count = 0;
    while x & 1 == 0 {
        x >>= 1;
        count += 1;
    }
    count
}

fn mod_pow(mut base: u64, mut exponent: u64, modulus: u64) -> u64 {
    let mut result = 1u128;
    base %= modulus;
    let modulus = modulus as u128;
    let mut base = base as u128;
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = (result * base) % modulus;
        }
        exponent >>= 1;
        if exponent > 0 {
            base = (base * base) % modulus;
        }
    }
    result as u64
}

impl<const P: u64> U64PrimeField<P> {
    const TWO_ADIC_ORDER: u64 = trailing_zeros(P - 1);

    /// Smallest multiplicative generator of `(Z/PZ)*`, found by trial. Only ever called for
    /// the small primes this field family is used with.
    fn generator() -> u64 {
        let odd_part = (P - 1) >> Self::TWO_ADIC_ORDER;
        for candidate in 2..P {
            let is_generator = (0..Self::TWO_ADIC_ORDER)
                .all(|k| mod_pow(candidate, odd_part << k, P) != 1)
                && mod_pow(candidate, P - 1, P) == 1;
            if is_generator {
                return candidate;
            }
        }
        unreachable!("a prime field always has a generator")
    }
}

impl<const P: u64> IsField for U64PrimeField<P> {
    type BaseType = u64;

    fn add(a: &u64, b: &u64) -> u64 {
        ((*a as u128 + *b as u128) % P as u128) as u64
    }

    fn sub(a: &u64, b: &u64) -> u64 {
        Self::add(a, &Self::neg(b))
    }

    fn neg(a: &u64) -> u64 {
        if *a == 0 {
            0
        } else {
            P - (*a % P)
        }
    }

    fn mul(a: &u64, b: &u64) -> u64 {
        ((*a as u128 * *b as u128) % P as u128) as u64
    }

    fn inv(a: &u64) -> Result<u64, FieldError> {
        if *a % P == 0 {
            return Err(FieldError::DivisionByZero);
        }
        Ok(mod_pow(*a, P - 2, P))
    }

    fn eq(a: &u64, b: &u64) -> bool {
        a % P == b % P
    }

    fn zero() -> u64 {
        0
    }

    fn one() -> u64 {
        1 % P
    }

    fn from_u64(x: u64) -> u64 {
        x % P
    }

    fn from_base_type(x: u64) -> u64 {
        x % P
    }

    fn to_bytes_be(a: &u64) -> Vec<u8> {
        let mut bytes = vec![0u8; 24];
        bytes[16..24].copy_from_slice(&a.to_be_bytes());
        bytes
    }

    fn from_bytes_be(bytes: &[u8]) -> u64 {
        let mut acc: u128 = 0;
        for &b in bytes {
            acc = (acc * 256 + b as u128) % P as u128;
        }
        acc as u64
    }
}

impl<const P: u64> IsFFTField for U64PrimeField<P> {
    const TWO_ADICITY: u64 = Self::TWO_ADIC_ORDER;

    fn two_adic_primitive_root_of_unity() -> u64 {
        let odd_part = (P - 1) >> Self::TWO_ADIC_ORDER;
        mod_pow(Self::generator(), odd_part, P)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::element::FieldElement;

    type FE = FieldElement<F17>;

    #[test]
    fn two_plus_one_is_three() {
        assert_eq!(FE::from(2) + FE::from(1), FE::from(3));
    }

    #[test]
    fn neg_three_plus_four_is_one() {
        assert_eq!(-FE::from(3) + FE::from(4), FE::from(1));
    }

    #[test]
    fn mul_five_six_is_nine_mod_17() {
        assert_eq!(FE::from(5) * FE::from(6), FE::from(30 % 17));
    }

    #[test]
    fn inv_of_zero_is_division_by_zero() {
        assert_eq!(FE::from(0).inv(), Err(FieldError::DivisionByZero));
    }

    #[test]
    fn pow_p_minus_1_is_one_for_any_nonzero_element() {
        for x in 1u64..17 {
            assert_eq!(FE::from(x).pow(16), FE::one());
        }
    }

    #[test]
    fn two_adic_root_has_the_right_order() {
        let root = FE::new(F17::two_adic_primitive_root_of_unity());
        let order = 1u64 << F17::TWO_ADICITY;
        assert_eq!(root.pow(order), FE::one());
        assert_ne!(root.pow(order / 2), FE::one());
    }
}
