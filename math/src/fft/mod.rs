pub mod errors;

use crate::field::element::FieldElement;
use crate::field::traits::{IsFFTField, IsField};

use self::errors::FftError;

fn log2_exact(n: usize) -> Result<u32, FftError> {
    if n == 0 || !n.is_power_of_two() {
        return Err(FftError::InvalidDomainSize(n));
    }
    Ok(n.trailing_zeros())
}

fn bit_reverse_permute<T>(a: &mut [T]) {
    let n = a.len();
    let bits = n.trailing_zeros();
    for i in 0..n {
        let j = (i as u32).reverse_bits() >> (u32::BITS - bits);
        let j = j as usize;
        if i < j {
            a.swap(i, j);
        }
    }
}

/// In-place radix-2 decimation-in-time NTT. `root` must be a primitive `a.len()`-th root of
/// unity; `a.len()` must be a power of two.
fn ntt_in_place<F: IsField>(a: &mut [FieldElement<F>], root: &FieldElement<F>) {
    bit_reverse_permute(a);
    let n = a.len();
    let mut len = 2;
    while len <= n {
        let step = len / 2;
        let angle = root.pow((n / len) as u64);
        for start in (0..n).step_by(len) {
            let mut w = FieldElement::one();
            for i in 0..step {
                let u = a[start + i].clone();
                let v = &a[start + i + step] * &w;
                a[start + i] = &u + &v;
                a[start + i + step] = &u - &v;
                w = &w * &angle;
            }
        }
        len <<= 1;
    }
}

/// Evaluates the polynomial given by `coefficients` (ascending degree) on the full
/// `domain_size`-th roots of unity. `coefficients` is zero-padded up to `domain_size`, which
/// must be a power of two not exceeding the field's two-adicity.
pub fn evaluate_fft<F: IsFFTField>(
    coefficients: &[FieldElement<F>],
    domain_size: usize,
) -> Result<Vec<FieldElement<F>>, FftError> {
    let order = log2_exact(domain_size)?;
    if order as u64 > F::TWO_ADICITY {
        return Err(FftError::OrderTooLarge);
    }
    let root = FieldElement::new(F::primitive_root_of_unity(order as u64)?);

    let mut a = coefficients.to_vec();
    a.resize(domain_size, FieldElement::zero());
    ntt_in_place(&mut a, &root);
    Ok(a)
}

/// Recovers the coefficients (ascending degree) of the unique polynomial of degree
/// `< evaluations.len()` whose evaluations on the `evaluations.len()`-th roots of unity are
/// `evaluations`. `evaluations.len()` must be a power of two.
pub fn interpolate_fft<F: IsFFTField>(
    evaluations: &[FieldElement<F>],
) -> Result<Vec<FieldElement<F>>, FftError> {
    let n = evaluations.len();
    let order = log2_exact(n)?;
    if order as u64 > F::TWO_ADICITY {
        return Err(FftError::OrderTooLarge);
    }
    let root = FieldElement::new(F::primitive_root_of_unity(order as u64)?);
    let root_inv = root.inv().map_err(FftError::FieldError)?;

    let mut a = evaluations.to_vec();
    ntt_in_place(&mut a, &root_inv);

    let n_inv = FieldElement::<F>::from(n as u64)
        .inv()
        .map_err(FftError::FieldError)?;
    for x in a.iter_mut() {
        *x = &*x * &n_inv;
    }
    Ok(a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::fields::u64_prime_field::U64PrimeField;

    // 2^16 + 1, a two-adic prime friendly to small power-of-two NTTs.
    type FTiny = U64PrimeField<65537>;
    type FE = FieldElement<FTiny>;

    #[test]
    fn fft_then_ifft_round_trips() {
        let coeffs: Vec<FE> = (0u64..8).map(FE::from).collect();
        let evals = evaluate_fft(&coeffs, 8).unwrap();
        let recovered = interpolate_fft(&evals).unwrap();
        assert_eq!(recovered, coeffs);
    }

    #[test]
    fn fft_evaluates_consistently_with_horner() {
        use crate::polynomial::Polynomial;

        let coeffs: Vec<FE> = vec![FE::from(1), FE::from(2), FE::from(3), FE::from(4)];
        let poly = Polynomial::new(&coeffs);
        let evals = evaluate_fft(&coeffs, 4).unwrap();

        let root = FE::new(FTiny::primitive_root_of_unity(2).unwrap());
        for (i, eval) in evals.iter().enumerate() {
            assert_eq!(eval, &poly.evaluate(&root.pow(i as u64)));
        }
    }

    #[test]
    fn rejects_non_power_of_two_domain() {
        let coeffs: Vec<FE> = vec![FE::from(1), FE::from(2), FE::from(3)];
        assert_eq!(evaluate_fft(&coeffs, 6), Err(FftError::InvalidDomainSize(6)));
    }
}
