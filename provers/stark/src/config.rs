/// Public, explicit configuration threaded through `prove`/`verify`; there is no global or
/// per-process state anywhere in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProofOptions {
    /// Ratio of the low-degree-extension domain size to the trace length. Also the gap,
    /// measured in domain points, between the two main-tree openings at each sampled position.
    pub extension_factor: usize,
    /// Number of FRI spot-check queries.
    pub spot_check_security_factor: usize,
    /// Once a FRI layer's coefficient count drops to this value or below, its coefficients are
    /// revealed in the clear instead of folded again.
    pub fri_final_degree_threshold: usize,
}

impl Default for ProofOptions {
    fn default() -> Self {
        Self {
            extension_factor: 8,
            spot_check_security_factor: 80,
            fri_final_degree_threshold: 1,
        }
    }
}

impl ProofOptions {
    pub fn new(
        extension_factor: usize,
        spot_check_security_factor: usize,
        fri_final_degree_threshold: usize,
    ) -> Self {
        Self {
            extension_factor,
            spot_check_security_factor,
            fri_final_degree_threshold,
        }
    }
}
