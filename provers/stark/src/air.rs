use lambda_stark_math::fft::interpolate_fft;
use lambda_stark_math::field::element::FieldElement;
use lambda_stark_math::field::traits::IsFFTField;
use lambda_stark_math::polynomial::multivariate::MultivariatePolynomial;
use lambda_stark_math::polynomial::Polynomial;

use crate::trace::TraceTable;

/// A boundary constraint: at trace `row`, dimension `column` must equal `value`.
pub type BoundaryConstraint<F> = (usize, usize, FieldElement<F>);

/// The algebraic intermediate representation of a computation: a trace width, a trace length,
/// and `width` step functions describing how row `i + 1` follows from row `i`.
pub trait Air: Sized {
    type Field: IsFFTField;
    type PublicInputs: Clone;

    fn new(public_inputs: Self::PublicInputs, trace_length: usize) -> Self;

    fn width(&self) -> usize;
    fn trace_length(&self) -> usize;
    fn public_inputs(&self) -> &Self::PublicInputs;

    /// The degree, in the trace variables, of the step polynomials. Bounds the degree of the
    /// transition-constraint quotient and therefore the blowup the LDE domain needs.
    fn constraint_degree(&self) -> usize;

    /// Computes dimension `dimension`'s value at the next row, given the current row's state and
    /// that row's round constant (zero when the AIR declares no periodic constants for this
    /// dimension).
    fn step(
        &self,
        dimension: usize,
        state: &[FieldElement<Self::Field>],
        round_constant: &FieldElement<Self::Field>,
    ) -> FieldElement<Self::Field>;

    /// One periodic sequence of round constants per dimension; an empty sequence means "always
    /// zero". Each nonempty sequence's length must divide `trace_length`.
    fn round_constants(&self) -> Vec<Vec<FieldElement<Self::Field>>> {
        vec![Vec::new(); self.width()]
    }

    /// Boundary constraints for a trace with the given declared `input` and `output`. The
    /// default asserts the full input vector at row 0 and the full output vector at the last
    /// row; AIRs with partial boundary conditions override this.
    fn boundary_constraints(
        &self,
        input: &[FieldElement<Self::Field>],
        output: &[FieldElement<Self::Field>],
    ) -> Vec<BoundaryConstraint<Self::Field>> {
        let last_row = self.trace_length() - 1;
        (0..self.width())
            .map(|j| (0usize, j, input[j].clone()))
            .chain((0..self.width()).map(|j| (last_row, j, output[j].clone())))
            .collect()
    }

    /// Unrolls the step functions into a full trace starting from `input`.
    fn build_trace(&self, input: &[FieldElement<Self::Field>]) -> TraceTable<Self::Field> {
        let steps = self.trace_length();
        let width = self.width();
        let constants = self.round_constants();
        let mut rows = Vec::with_capacity(steps);
        rows.push(input.to_vec());
        for row in 0..steps - 1 {
            let current = rows[row].clone();
            let next: Vec<_> = (0..width)
                .map(|dimension| {
                    let rc = round_constant_at(&constants[dimension], row);
                    let value = self.step(dimension, &current, &rc);
                    debug_assert!(
                        transition_constraint_holds(width, &current, &value, &value),
                        "transition constraint p_{dimension}(X, Y) did not hold at row {row}"
                    );
                    value
                })
                .collect();
            rows.push(next);
        }
        debug_assert_eq!(rows.len(), steps);
        TraceTable::from_rows(rows)
    }
}

/// Checks `p(X, Y) = Y − step_j(X) = 0` at `(current, claimed_next)`, via the sparse multivariate
/// representation transition constraints are built from: `Y` is the variable at index `width`,
/// `step_value` (`step_j` evaluated at `current`) is folded in as a constant since `current` is
/// already bound to field elements rather than left symbolic.
fn transition_constraint_holds<F: IsFFTField>(
    width: usize,
    current: &[FieldElement<F>],
    claimed_next: &FieldElement<F>,
    step_value: &FieldElement<F>,
) -> bool {
    let num_variables = width + 1;
    let y = MultivariatePolynomial::<F>::variable(num_variables, width);
    let step_as_constant = MultivariatePolynomial::constant(num_variables, step_value.clone());
    let constraint = y.sub(&step_as_constant);

    let mut point = current.to_vec();
    point.push(claimed_next.clone());
    constraint.evaluate(&point).is_zero()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_stark_math::field::fields::u64_prime_field::U64PrimeField;

    type F23 = U64PrimeField<23>;
    type FE = FieldElement<F23>;

    #[test]
    fn transition_constraint_holds_for_the_claimed_step_value() {
        let current = vec![FE::from(3), FE::from(5)];
        let step_value = &current[0] + &current[1];
        assert!(transition_constraint_holds(2, &current, &step_value, &step_value));
    }

    #[test]
    fn transition_constraint_fails_for_a_mismatched_claim() {
        let current = vec![FE::from(3), FE::from(5)];
        let step_value = &current[0] + &current[1];
        let wrong_claim = FE::from(1);
        assert!(!transition_constraint_holds(2, &current, &wrong_claim, &step_value));
    }
}

/// Looks up the round constant for `row` in a periodic sequence, treating an empty sequence as
/// "always zero".
pub fn round_constant_at<F: IsFFTField>(values: &[FieldElement<F>], row: usize) -> FieldElement<F> {
    if values.is_empty() {
        FieldElement::zero()
    } else {
        values[row % values.len()].clone()
    }
}

/// Interpolates a periodic round-constant sequence, repeated to `trace_length`, into the
/// polynomial of degree `< trace_length` that agrees with it on the trace subgroup. Evaluating
/// this polynomial off the trace subgroup is how the prover and verifier extend round constants
/// onto the low-degree-extension domain.
pub fn periodic_column_polynomial<F: IsFFTField>(
    values: &[FieldElement<F>],
    trace_length: usize,
) -> Polynomial<FieldElement<F>> {
    if values.is_empty() {
        return Polynomial::zero();
    }
    let repeated: Vec<_> = values.iter().cycle().take(trace_length).cloned().collect();
    let coeffs = interpolate_fft(&repeated).expect("trace_length is a validated power of two");
    Polynomial::new(&coeffs)
}
