use lambda_stark_math::fft::errors::FftError;
use lambda_stark_math::field::element::FieldElement;
use lambda_stark_math::field::traits::IsFFTField;
use lambda_stark_math::polynomial::Polynomial;

/// A two-dimensional execution trace: `n_rows` steps of `n_cols` field elements each, stored
/// column-major since the prover's next operation on it is always a per-column interpolation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceTable<F: IsFFTField> {
    columns: Vec<Vec<FieldElement<F>>>,
}

impl<F: IsFFTField> TraceTable<F> {
    pub fn from_columns(columns: Vec<Vec<FieldElement<F>>>) -> Self {
        Self { columns }
    }

    pub fn from_rows(rows: Vec<Vec<FieldElement<F>>>) -> Self {
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        let mut columns = vec![Vec::with_capacity(rows.len()); width];
        for row in &rows {
            for (j, value) in row.iter().enumerate() {
                columns[j].push(value.clone());
            }
        }
        Self { columns }
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map(|c| c.len()).unwrap_or(0)
    }

    pub fn columns(&self) -> &[Vec<FieldElement<F>>] {
        &self.columns
    }

    pub fn get(&self, row: usize, col: usize) -> &FieldElement<F> {
        &self.columns[col][row]
    }

    pub fn row(&self, row: usize) -> Vec<FieldElement<F>> {
        self.columns.iter().map(|c| c[row].clone()).collect()
    }

    pub fn last_row(&self) -> Vec<FieldElement<F>> {
        self.row(self.n_rows() - 1)
    }

    /// Interpolates each column on the `n_rows`-th roots of unity, yielding one polynomial per
    /// trace dimension.
    pub fn compute_trace_polys(&self) -> Result<Vec<Polynomial<FieldElement<F>>>, FftError> {
        self.columns
            .iter()
            .map(|col| {
                lambda_stark_math::fft::interpolate_fft(col).map(|coeffs| Polynomial::new(&coeffs))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_stark_math::field::fields::u64_prime_field::U64PrimeField;

    type F17 = U64PrimeField<17>;
    type FE = FieldElement<F17>;

    #[test]
    fn from_rows_transposes_into_columns() {
        let rows = vec![
            vec![FE::from(1), FE::from(2)],
            vec![FE::from(3), FE::from(4)],
        ];
        let trace = TraceTable::from_rows(rows);
        assert_eq!(trace.columns()[0], vec![FE::from(1), FE::from(3)]);
        assert_eq!(trace.columns()[1], vec![FE::from(2), FE::from(4)]);
    }

    #[test]
    fn trace_polys_interpolate_the_columns() {
        let rows: Vec<Vec<FE>> = (0u64..4).map(|i| vec![FE::from(i)]).collect();
        let trace = TraceTable::from_rows(rows);
        let polys = trace.compute_trace_polys().unwrap();
        let root = FE::new(F17::two_adic_primitive_root_of_unity()).pow(1u64 << (F17::TWO_ADICITY - 2));
        for i in 0..4u64 {
            assert_eq!(polys[0].evaluate(&root.pow(i)), FE::from(i));
        }
    }
}
