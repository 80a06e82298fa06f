use std::sync::OnceLock;

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::field::errors::FieldError;
use crate::field::traits::{IsFFTField, IsField};

/// The default 256-bit prime field, `p = 2^256 - 351 * 2^32 + 1`.
///
/// `p - 1` is divisible by `2^32`, so this field admits NTT domains of size up to `2^32`.
#[derive(Debug, Clone)]
pub struct StarkPrimeField;

fn modulus() -> &'static BigUint {
    static MODULUS: OnceLock<BigUint> = OnceLock::new();
    MODULUS.get_or_init(|| {
        let one = BigUint::one();
        let two_256 = &one << 256u32;
        let two_32 = &one << 32u32;
        two_256 - BigUint::from(351u32) * two_32 + &one
    })
}

fn reduce(x: &BigUint) -> BigUint {
    x % modulus()
}

impl IsField for StarkPrimeField {
    type BaseType = BigUint;

    fn add(a: &BigUint, b: &BigUint) -> BigUint {
        (a + b) % modulus()
    }

    fn neg(a: &BigUint) -> BigUint {
        if a.is_zero() {
            BigUint::zero()
        } else {
            modulus() - (a % modulus())
        }
    }

    fn mul(a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % modulus()
    }

    fn inv(a: &BigUint) -> Result<BigUint, FieldError> {
        if (a % modulus()).is_zero() {
            return Err(FieldError::DivisionByZero);
        }
        let exponent = modulus() - BigUint::from(2u32);
        Ok(a.modpow(&exponent, modulus()))
    }

    fn eq(a: &BigUint, b: &BigUint) -> bool {
        reduce(a) == reduce(b)
    }

    fn zero() -> BigUint {
        BigUint::zero()
    }

    fn one() -> BigUint {
        BigUint::one() % modulus()
    }

    fn from_u64(x: u64) -> BigUint {
        BigUint::from(x) % modulus()
    }

    fn from_base_type(x: BigUint) -> BigUint {
        reduce(&x)
    }

    fn pow(a: &BigUint, exponent: u64) -> BigUint {
        a.modpow(&BigUint::from(exponent), modulus())
    }

    fn to_bytes_be(a: &BigUint) -> Vec<u8> {
        let mut bytes = vec![0u8; 32];
        let raw = a.to_bytes_be();
        bytes[32 - raw.len()..].copy_from_slice(&raw);
        bytes
    }

    fn from_bytes_be(bytes: &[u8]) -> BigUint {
        BigUint::from_bytes_be(bytes) % modulus()
    }
}

impl IsFFTField for StarkPrimeField {
    const TWO_ADICITY: u64 = 32;

    fn two_adic_primitive_root_of_unity() -> BigUint {
        static ROOT: OnceLock<BigUint> = OnceLock::new();
        ROOT.get_or_init(|| {
            let odd_part = (modulus() - BigUint::one()) >> 32u32;
            let half_order = BigUint::one() << 31u32;
            let mut candidate = BigUint::from(2u32);
            loop {
                let root = candidate.modpow(&odd_part, modulus());
                if root.modpow(&half_order, modulus()) != BigUint::one() {
                    return root;
                }
                candidate += 1u32;
            }
        })
        .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::element::FieldElement;

    type FE = FieldElement<StarkPrimeField>;

    #[test]
    fn addition_wraps_around_modulus() {
        let p_minus_one = FE::new(modulus() - BigUint::one());
        assert_eq!(p_minus_one + FE::one(), FE::zero());
    }

    #[test]
    fn inverse_of_two_times_two_is_one() {
        let two = FE::from(2);
        assert_eq!(&two * two.inv().unwrap(), FE::one());
    }

    #[test]
    fn two_adic_root_has_order_two_pow_32() {
        let root = FE::new(StarkPrimeField::two_adic_primitive_root_of_unity());
        assert_eq!(root.pow(1u64 << 32), FE::one());
        assert_ne!(root.pow(1u64 << 31), FE::one());
    }
}
