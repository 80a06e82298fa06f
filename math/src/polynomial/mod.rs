pub mod errors;
pub mod multivariate;

use std::ops::{Add, Div, Mul, Neg, Sub};

#[cfg(feature = "parallel")]
use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};

use crate::field::element::{batch_inverse, FieldElement};
use crate::field::errors::FieldError;
use crate::field::traits::IsField;
use crate::polynomial::errors::PolynomialError;

/// A univariate polynomial represented by its coefficients in ascending degree order.
/// Trailing zero coefficients are always trimmed away, so the zero polynomial is `coefficients
/// == []` and `degree() == 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polynomial<FE> {
    coefficients: Vec<FE>,
}

impl<F: IsField> Polynomial<FieldElement<F>> {
    pub fn new(coefficients: &[FieldElement<F>]) -> Self {
        let mut coefficients = coefficients.to_vec();
        while coefficients.last().is_some_and(|c| c.is_zero()) {
            coefficients.pop();
        }
        Self { coefficients }
    }

    pub fn new_monomial(coefficient: FieldElement<F>, degree: usize) -> Self {
        if coefficient.is_zero() {
            return Self::zero();
        }
        let mut coefficients = vec![FieldElement::zero(); degree + 1];
        coefficients[degree] = coefficient;
        Self { coefficients }
    }

    pub fn zero() -> Self {
        Self {
            coefficients: Vec::new(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.coefficients.is_empty()
    }

    pub fn coefficients(&self) -> &[FieldElement<F>] {
        &self.coefficients
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    pub fn leading_coefficient(&self) -> FieldElement<F> {
        self.coefficients
            .last()
            .cloned()
            .unwrap_or_else(FieldElement::zero)
    }

    pub fn evaluate(&self, x: &FieldElement<F>) -> FieldElement<F> {
        self.coefficients
            .iter()
            .rev()
            .fold(FieldElement::zero(), |acc, coeff| &acc * x + coeff)
    }

    #[cfg(not(feature = "parallel"))]
    pub fn evaluate_slice(&self, xs: &[FieldElement<F>]) -> Vec<FieldElement<F>> {
        xs.iter().map(|x| self.evaluate(x)).collect()
    }

    #[cfg(feature = "parallel")]
    pub fn evaluate_slice(&self, xs: &[FieldElement<F>]) -> Vec<FieldElement<F>>
    where
        FieldElement<F>: Send + Sync,
    {
        xs.par_iter().map(|x| self.evaluate(x)).collect()
    }

    pub fn pad_with_zero_coefficients(&mut self, target_len: usize) {
        while self.coefficients.len() < target_len {
            self.coefficients.push(FieldElement::zero());
        }
    }

    pub fn mul_with_ref(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        let mut result = vec![FieldElement::zero(); self.coefficients.len() + other.coefficients.len() - 1];
        for (i, a) in self.coefficients.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, b) in other.coefficients.iter().enumerate() {
                result[i + j] = &result[i + j] + &(a * b);
            }
        }
        Self::new(&result)
    }

    /// Divides `self` by `divisor`, returning `(quotient, remainder)`.
    ///
    /// # Errors
    /// Returns `FieldError::DivisionByZero` if `divisor` is the zero polynomial.
    pub fn long_division_with_remainder(&self, divisor: &Self) -> Result<(Self, Self), FieldError> {
        if divisor.is_zero() {
            return Err(FieldError::DivisionByZero);
        }
        let mut remainder = self.coefficients.clone();
        let divisor_degree = divisor.degree();
        let divisor_lead_inv = divisor.leading_coefficient().inv()?;

        if remainder.len() < divisor.coefficients.len() {
            return Ok((Self::zero(), self.clone()));
        }

        let mut quotient = vec![FieldElement::zero(); remainder.len() - divisor.coefficients.len() + 1];
        for i in (0..quotient.len()).rev() {
            let lead = remainder
                .get(i + divisor_degree)
                .cloned()
                .unwrap_or_else(FieldElement::zero);
            if lead.is_zero() {
                continue;
            }
            let factor = &lead * &divisor_lead_inv;
            quotient[i] = factor.clone();
            for (j, d) in divisor.coefficients.iter().enumerate() {
                remainder[i + j] = &remainder[i + j] - &(&factor * d);
            }
        }
        Ok((Self::new(&quotient), Self::new(&remainder)))
    }

    pub fn div_with_ref(&self, divisor: &Self) -> Result<Self, FieldError> {
        Ok(self.long_division_with_remainder(divisor)?.0)
    }

    /// `zpoly([r0, r1, ..]) = (x - r0)(x - r1)...`, the vanishing polynomial of `roots`.
    pub fn zpoly(roots: &[FieldElement<F>]) -> Self {
        roots.iter().fold(Self::new_monomial(FieldElement::one(), 0), |acc, r| {
            acc.mul_with_ref(&Self::new(&[-r, FieldElement::one()]))
        })
    }

    /// Interpolates the unique polynomial of degree `< xs.len()` through `(xs[i], ys[i])`.
    ///
    /// # Errors
    /// Returns `PolynomialError::DuplicateInterpolationPoint` if `xs` contains a repeated value.
    pub fn interpolate(xs: &[FieldElement<F>], ys: &[FieldElement<F>]) -> Result<Self, PolynomialError> {
        assert_eq!(xs.len(), ys.len(), "interpolate: xs and ys must have equal length");
        for i in 1..xs.len() {
            if xs[..i].contains(&xs[i]) {
                return Err(PolynomialError::DuplicateInterpolationPoint(i));
            }
        }

        let denominators: Vec<FieldElement<F>> = (0..xs.len())
            .map(|i| {
                (0..xs.len())
                    .filter(|&j| j != i)
                    .fold(FieldElement::one(), |acc, j| &acc * &(&xs[i] - &xs[j]))
            })
            .collect();
        let denominator_invs = batch_inverse(&denominators)?;

        let mut result = Self::zero();
        for i in 0..xs.len() {
            if ys[i].is_zero() {
                continue;
            }
            let numerator = (0..xs.len())
                .filter(|&j| j != i)
                .fold(Self::new_monomial(FieldElement::one(), 0), |acc, j| {
                    acc.mul_with_ref(&Self::new(&[-&xs[j], FieldElement::one()]))
                });
            let coeff = &ys[i] * &denominator_invs[i];
            let scaled = Self::new(&numerator.coefficients.iter().map(|c| c * &coeff).collect::<Vec<_>>());
            result = &result + &scaled;
        }
        Ok(result)
    }

    /// Specialised two-point interpolation: the line through `(x0, y0)` and `(x1, y1)`.
    pub fn lagrange_interp_2(
        xs: &[FieldElement<F>; 2],
        ys: &[FieldElement<F>; 2],
    ) -> Result<Self, PolynomialError> {
        if xs[0] == xs[1] {
            return Err(PolynomialError::DuplicateInterpolationPoint(1));
        }
        let slope = (&ys[1] - &ys[0]) * (&xs[1] - &xs[0]).inv()?;
        let intercept = &ys[0] - &(&slope * &xs[0]);
        Ok(Self::new(&[intercept, slope]))
    }

    /// Specialised four-point interpolation, delegating to the general routine: with only four
    /// points the asymptotic saving of a dedicated formula is not worth a second code path to
    /// keep in sync.
    pub fn lagrange_interp_4(
        xs: &[FieldElement<F>; 4],
        ys: &[FieldElement<F>; 4],
    ) -> Result<Self, PolynomialError> {
        Self::interpolate(xs, ys)
    }
}

impl<F: IsField> Add<&Polynomial<FieldElement<F>>> for &Polynomial<FieldElement<F>> {
    type Output = Polynomial<FieldElement<F>>;
    fn add(self, rhs: &Polynomial<FieldElement<F>>) -> Polynomial<FieldElement<F>> {
        let len = self.coefficients.len().max(rhs.coefficients.len());
        let mut result = Vec::with_capacity(len);
        for i in 0..len {
            let a = self.coefficients.get(i).cloned().unwrap_or_else(FieldElement::zero);
            let b = rhs.coefficients.get(i).cloned().unwrap_or_else(FieldElement::zero);
            result.push(&a + &b);
        }
        Polynomial::new(&result)
    }
}

impl<F: IsField> Sub<&Polynomial<FieldElement<F>>> for &Polynomial<FieldElement<F>> {
    type Output = Polynomial<FieldElement<F>>;
    fn sub(self, rhs: &Polynomial<FieldElement<F>>) -> Polynomial<FieldElement<F>> {
        self + &(-rhs)
    }
}

impl<F: IsField> Neg for &Polynomial<FieldElement<F>> {
    type Output = Polynomial<FieldElement<F>>;
    fn neg(self) -> Polynomial<FieldElement<F>> {
        Polynomial::new(&self.coefficients.iter().map(|c| -c).collect::<Vec<_>>())
    }
}

impl<F: IsField> Mul<&Polynomial<FieldElement<F>>> for &Polynomial<FieldElement<F>> {
    type Output = Polynomial<FieldElement<F>>;
    fn mul(self, rhs: &Polynomial<FieldElement<F>>) -> Polynomial<FieldElement<F>> {
        self.mul_with_ref(rhs)
    }
}

impl<F: IsField> Div<&Polynomial<FieldElement<F>>> for &Polynomial<FieldElement<F>> {
    type Output = Polynomial<FieldElement<F>>;
    fn div(self, rhs: &Polynomial<FieldElement<F>>) -> Polynomial<FieldElement<F>> {
        self.div_with_ref(rhs).expect("division by the zero polynomial")
    }
}

macro_rules! impl_owned_binop {
    ($trait:ident, $method:ident) => {
        impl<F: IsField> $trait for Polynomial<FieldElement<F>> {
            type Output = Polynomial<FieldElement<F>>;
            fn $method(self, rhs: Self) -> Self::Output {
                (&self).$method(&rhs)
            }
        }
    };
}
impl_owned_binop!(Add, add);
impl_owned_binop!(Sub, sub);
impl_owned_binop!(Mul, mul);
impl_owned_binop!(Div, div);
