pub struct MseLoss;

impl MseLoss {
    /// Summed squared error `sum((predicted - expected)^2)` for one example.
    pub fn squared_error(predicted: &[f32], expected: &[f32]) -> f32 {
        predicted.iter().zip(expected.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f32>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squared_error_sums_over_outputs() {
        assert_eq!(MseLoss::squared_error(&[0.5], &[1.0]), 0.25);
        assert_eq!(MseLoss::squared_error(&[1.0, 0.0], &[0.0, 2.0]), 5.0);
    }

    #[test]
    fn squared_error_is_zero_on_exact_match() {
        assert_eq!(MseLoss::squared_error(&[0.3, 0.7], &[0.3, 0.7]), 0.0);
    }
}
