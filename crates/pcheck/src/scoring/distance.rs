use super::error::ScoringError;

/// Cosine similarity of two equal-length, non-zero vectors, clamped to `[-1, 1]`.
///
/// Accumulates in `f64`; 1536-dimension sums lose noticeable precision in `f32`.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64, ScoringError> {
    if a.len() != b.len() {
        return Err(ScoringError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    if a.is_empty() {
        return Err(ScoringError::EmptyVector);
    }

    let (dot, norm_a, norm_b) =
        a.iter()
            .zip(b.iter())
            .fold((0.0f64, 0.0f64, 0.0f64), |(dot, na, nb), (&x, &y)| {
                let (x, y) = (x as f64, y as f64);
                (dot + x * y, na + x * x, nb + y * y)
            });

    if !dot.is_finite() || !norm_a.is_finite() || !norm_b.is_finite() {
        return Err(ScoringError::NonFiniteValue);
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return Err(ScoringError::ZeroMagnitude);
    }

    Ok((dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0))
}

/// `1 - cosine_similarity(a, b)`, in `[0, 2]`.
pub fn cosine_distance(a: &[f32], b: &[f32]) -> Result<f32, ScoringError> {
    Ok((1.0 - cosine_similarity(a, b)?) as f32)
}
