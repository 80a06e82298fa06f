use lambda_stark_math::field::element::FieldElement;
use lambda_stark_math::field::traits::IsFFTField;

use crate::air::Air;

/// The MiMC permutation: row `i+1` is `row_i^3 + k_i`, where `k_i` is a periodic round constant.
/// Width 1; the round-constant sequence's length must divide the trace length.
#[derive(Debug, Clone)]
pub struct MiMCAir<F: IsFFTField> {
    trace_length: usize,
    round_constants: Vec<FieldElement<F>>,
}

impl<F: IsFFTField> Air for MiMCAir<F> {
    type Field = F;
    type PublicInputs = Vec<FieldElement<F>>;

    fn new(public_inputs: Vec<FieldElement<F>>, trace_length: usize) -> Self {
        assert!(
            trace_length % public_inputs.len() == 0,
            "MiMC round-constant count must divide the trace length"
        );
        Self {
            trace_length,
            round_constants: public_inputs,
        }
    }

    fn width(&self) -> usize {
        1
    }

    fn trace_length(&self) -> usize {
        self.trace_length
    }

    fn public_inputs(&self) -> &Vec<FieldElement<F>> {
        &self.round_constants
    }

    fn constraint_degree(&self) -> usize {
        3
    }

    fn step(
        &self,
        _dimension: usize,
        state: &[FieldElement<F>],
        round_constant: &FieldElement<F>,
    ) -> FieldElement<F> {
        &state[0].pow(3) + round_constant
    }

    fn round_constants(&self) -> Vec<Vec<FieldElement<F>>> {
        vec![self.round_constants.clone()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_stark_math::field::fields::u64_prime_field::U64PrimeField;

    type FTiny = U64PrimeField<65537>;
    type FE = FieldElement<FTiny>;

    #[test]
    fn builds_the_expected_mimc_trace() {
        let constants = vec![FE::from(3), FE::from(7)];
        let air = MiMCAir::<FTiny>::new(constants.clone(), 8);
        let input = vec![FE::from(5)];
        let trace = air.build_trace(&input);

        let mut expected = vec![FE::from(5)];
        for row in 0..7 {
            let k = &constants[row % constants.len()];
            let next = &expected[row].pow(3) + k;
            expected.push(next);
        }
        assert_eq!(trace.n_rows(), 8);
        for row in 0..8 {
            assert_eq!(trace.row(row), vec![expected[row].clone()]);
        }
    }

    #[test]
    #[should_panic(expected = "must divide the trace length")]
    fn rejects_a_round_constant_count_that_does_not_divide_the_trace_length() {
        MiMCAir::<FTiny>::new(vec![FE::from(1), FE::from(2), FE::from(3)], 8);
    }
}
