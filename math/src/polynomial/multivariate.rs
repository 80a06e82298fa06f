use std::collections::BTreeMap;

use crate::field::element::FieldElement;
use crate::field::traits::IsField;

/// A monomial's exponent tuple, one entry per variable, e.g. `[2, 0, 1]` means `X0^2 * X2`.
pub type Monomial = Vec<u32>;

/// A sparse multivariate polynomial: a map from monomial to nonzero coefficient.
///
/// This is only used to carry transition constraints (`p_j(X1..Xw, Y1..Yw) = Yj - step_j(X)`),
/// so the implementation favours clarity over performance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultivariatePolynomial<F: IsField> {
    num_variables: usize,
    terms: BTreeMap<Monomial, FieldElement<F>>,
}

impl<F: IsField> MultivariatePolynomial<F> {
    pub fn zero(num_variables: usize) -> Self {
        Self {
            num_variables,
            terms: BTreeMap::new(),
        }
    }

    pub fn new(num_variables: usize, terms: Vec<(Monomial, FieldElement<F>)>) -> Self {
        let mut poly = Self::zero(num_variables);
        for (monomial, coeff) in terms {
            poly.add_term(monomial, coeff);
        }
        poly
    }

    /// A single variable `X_index`, i.e. the monomial with exponent 1 at `index`.
    pub fn variable(num_variables: usize, index: usize) -> Self {
        let mut monomial = vec![0u32; num_variables];
        monomial[index] = 1;
        Self::new(num_variables, vec![(monomial, FieldElement::one())])
    }

    pub fn constant(num_variables: usize, value: FieldElement<F>) -> Self {
        Self::new(num_variables, vec![(vec![0u32; num_variables], value)])
    }

    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    pub fn terms(&self) -> impl Iterator<Item = (&Monomial, &FieldElement<F>)> {
        self.terms.iter()
    }

    pub fn degree(&self) -> u32 {
        self.terms
            .keys()
            .map(|m| m.iter().sum())
            .max()
            .unwrap_or(0)
    }

    fn add_term(&mut self, monomial: Monomial, coeff: FieldElement<F>) {
        assert_eq!(monomial.len(), self.num_variables);
        if coeff.is_zero() {
            return;
        }
        match self.terms.get_mut(&monomial) {
            Some(existing) => {
                let sum = &*existing + &coeff;
                if sum.is_zero() {
                    self.terms.remove(&monomial);
                } else {
                    *existing = sum;
                }
            }
            None => {
                self.terms.insert(monomial, coeff);
            }
        }
    }

    pub fn add(&self, other: &Self) -> Self {
        let mut result = self.clone();
        for (m, c) in other.terms.iter() {
            result.add_term(m.clone(), c.clone());
        }
        result
    }

    pub fn sub(&self, other: &Self) -> Self {
        let mut result = self.clone();
        for (m, c) in other.terms.iter() {
            result.add_term(m.clone(), -c);
        }
        result
    }

    pub fn scale(&self, factor: &FieldElement<F>) -> Self {
        Self {
            num_variables: self.num_variables,
            terms: self
                .terms
                .iter()
                .filter(|(_, c)| !(*c * factor).is_zero())
                .map(|(m, c)| (m.clone(), c * factor))
                .collect(),
        }
    }

    pub fn mul(&self, other: &Self) -> Self {
        let mut result = Self::zero(self.num_variables);
        for (m1, c1) in self.terms.iter() {
            for (m2, c2) in other.terms.iter() {
                let monomial: Monomial = m1.iter().zip(m2.iter()).map(|(a, b)| a + b).collect();
                result.add_term(monomial, c1 * c2);
            }
        }
        result
    }

    /// Evaluates the polynomial at `point`, a value for each of `num_variables` variables.
    pub fn evaluate(&self, point: &[FieldElement<F>]) -> FieldElement<F> {
        assert_eq!(point.len(), self.num_variables);
        self.terms
            .iter()
            .fold(FieldElement::zero(), |acc, (monomial, coeff)| {
                let term = monomial
                    .iter()
                    .zip(point.iter())
                    .fold(coeff.clone(), |acc, (&exp, x)| &acc * &x.pow(exp as u64));
                &acc + &term
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::fields::u64_prime_field::U64PrimeField;

    type F23 = U64PrimeField<23>;
    type FE = FieldElement<F23>;

    #[test]
    fn evaluates_a_transition_style_constraint() {
        // p(X1, X2, Y1, Y2) = Y1 - X2
        let vars = 4;
        let y1 = MultivariatePolynomial::<F23>::variable(vars, 2);
        let x2 = MultivariatePolynomial::<F23>::variable(vars, 1);
        let p = y1.sub(&x2);

        let point = vec![FE::from(3), FE::from(5), FE::from(5), FE::from(9)];
        assert!(p.evaluate(&point).is_zero());
    }

    #[test]
    fn multiplies_monomials() {
        let vars = 2;
        let x0 = MultivariatePolynomial::<F23>::variable(vars, 0);
        let x1 = MultivariatePolynomial::<F23>::variable(vars, 1);
        let product = x0.mul(&x1);
        let point = vec![FE::from(3), FE::from(4)];
        assert_eq!(product.evaluate(&point), FE::from(12));
    }
}
