use lambda_stark_math::field::element::FieldElement;
use lambda_stark_math::field::traits::IsFFTField;

use crate::air::Air;

/// The two-term Fibonacci recurrence: row `i+1` is `(b_i, a_i + b_i)` given row `i = (a_i, b_i)`.
/// Dimension 0 tracks `a`, dimension 1 tracks `b`.
#[derive(Debug, Clone)]
pub struct FibonacciAir<F: IsFFTField> {
    trace_length: usize,
    public_inputs: (),
    _field: std::marker::PhantomData<F>,
}

impl<F: IsFFTField> Air for FibonacciAir<F> {
    type Field = F;
    type PublicInputs = ();

    fn new(public_inputs: (), trace_length: usize) -> Self {
        Self {
            trace_length,
            public_inputs,
            _field: std::marker::PhantomData,
        }
    }

    fn width(&self) -> usize {
        2
    }

    fn trace_length(&self) -> usize {
        self.trace_length
    }

    fn public_inputs(&self) -> &() {
        &self.public_inputs
    }

    fn constraint_degree(&self) -> usize {
        1
    }

    fn step(
        &self,
        dimension: usize,
        state: &[FieldElement<F>],
        _round_constant: &FieldElement<F>,
    ) -> FieldElement<F> {
        match dimension {
            0 => state[1].clone(),
            1 => &state[0] + &state[1],
            _ => unreachable!("FibonacciAir has width 2"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_stark_math::field::fields::u64_prime_field::U64PrimeField;

    type FTiny = U64PrimeField<65537>;
    type FE = FieldElement<FTiny>;

    #[test]
    fn builds_the_expected_fibonacci_trace() {
        let air = FibonacciAir::<FTiny>::new((), 8);
        let input = vec![FE::from(1), FE::from(1)];
        let trace = air.build_trace(&input);
        assert_eq!(trace.n_rows(), 8);
        assert_eq!(trace.row(0), vec![FE::from(1), FE::from(1)]);
        assert_eq!(trace.row(1), vec![FE::from(1), FE::from(2)]);
        assert_eq!(trace.row(2), vec![FE::from(2), FE::from(3)]);
        assert_eq!(trace.last_row(), vec![FE::from(21), FE::from(34)]);
    }
}
