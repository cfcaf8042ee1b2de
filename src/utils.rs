/// Cosine similarity of two equal-length vectors. Zero when either vector has
/// no magnitude.
pub fn compute_cosine_similarity(vec1: &[f64], vec2: &[f64]) -> f64 {
    let dot: f64 = vec1.iter().zip(vec2).map(|(a, b)| a * b).sum();
    let norm1: f64 = vec1.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm2: f64 = vec2.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm1 == 0.0 || norm2 == 0.0 {
        return 0.0;
    }
    dot / (norm1 * norm2)
}

/// Clamps a raw cosine into the [0, 1] similarity range.
pub fn unit_similarity(cosine: f64) -> f64 {
    if cosine.is_nan() {
        0.0
    } else {
        cosine.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_vectors() {
        let v = [0.3, 0.1, 0.9];
        assert!((compute_cosine_similarity(&v, &v) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_orthogonal_vectors() {
        assert_eq!(compute_cosine_similarity(&[1.0, 0.0], &[0.0, 2.0]), 0.0);
    }

    #[test]
    fn test_zero_vector_is_zero() {
        assert_eq!(compute_cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        assert_eq!(compute_cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn test_unit_similarity_clamps() {
        assert_eq!(unit_similarity(1.0000000002), 1.0);
        assert_eq!(unit_similarity(-0.4), 0.0);
        assert_eq!(unit_similarity(f64::NAN), 0.0);
        assert_eq!(unit_similarity(0.25), 0.25);
    }
}
