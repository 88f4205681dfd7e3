//! Statistical helper functions for the Poseidon record selector.

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Sample variance with N-1 denominator (matching R's `var()`).
/// Returns 0.0 if fewer than 2 elements.
pub fn variance(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return 0.0;
    }
    let nf = n as f64;
    let mean = data.iter().sum::<f64>() / nf;
    data.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / (nf - 1.0)
}

/// Sample standard deviation with N-1 denominator (matching R's `sd()`).
/// Returns 0.0 if fewer than 2 elements.
pub fn sd(data: &[f64]) -> f64 {
    variance(data).sqrt()
}

/// Biased sample skewness `g1 = m3 / m2^(3/2)` (matching MATLAB's
/// `skewness(x)` default).
///
/// Returns 0.0 if fewer than 2 elements or if the data has zero spread.
pub fn skewness(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return 0.0;
    }
    let nf = n as f64;
    let mean = data.iter().sum::<f64>() / nf;
    let m2 = data.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / nf;
    if m2 <= 0.0 {
        return 0.0;
    }
    let m3 = data
        .iter()
        .map(|&x| {
            let d = x - mean;
            d * d * d
        })
        .sum::<f64>()
        / nf;
    m3 / m2.powf(1.5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&data), 5.0);
    }

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_mean_single() {
        assert_relative_eq!(mean(&[3.5]), 3.5);
    }

    #[test]
    fn test_variance_matches_r() {
        // R: var(c(2, 4, 4, 4, 5, 5, 7, 9)) = 4.571429
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(variance(&data), 4.571429, epsilon = 1e-6);
    }

    #[test]
    fn test_variance_short_input() {
        assert_eq!(variance(&[]), 0.0);
        assert_eq!(variance(&[1.0]), 0.0);
    }

    #[test]
    fn test_sd_matches_r() {
        // R: sd(c(2, 4, 4, 4, 5, 5, 7, 9)) = 2.13809
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(sd(&data), 2.13809, epsilon = 1e-5);
    }

    #[test]
    fn test_skewness_symmetric() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(skewness(&data), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_skewness_right_tail() {
        // MATLAB: skewness([1 1 1 1 10]) = 1.5
        let data = [1.0, 1.0, 1.0, 1.0, 10.0];
        assert_relative_eq!(skewness(&data), 1.5, epsilon = 1e-6);
    }

    #[test]
    fn test_skewness_left_tail_negative() {
        let data = [-10.0, 1.0, 1.0, 1.0, 1.0];
        assert!(skewness(&data) < 0.0);
    }

    #[test]
    fn test_skewness_degenerate() {
        assert_eq!(skewness(&[]), 0.0);
        assert_eq!(skewness(&[5.0]), 0.0);
        assert_eq!(skewness(&[2.0, 2.0, 2.0]), 0.0);
    }
}
