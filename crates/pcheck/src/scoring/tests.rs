use super::*;
use crate::policy::Policy;

const EPS: f32 = 1e-3;

fn reference_policy() -> Policy {
    Policy::new("Auth_KnowHow_01", vec![1.0, 0.0, 0.0], 0.20, 0.60).expect("valid policy")
}

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < EPS,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_cosine_distance_identical_vectors_is_zero() {
    let a = [0.3, -1.2, 4.5, 0.0, 2.2];
    assert!(cosine_distance(&a, &a).unwrap().abs() < 1e-6);
}

#[test]
fn test_cosine_distance_orthogonal_and_opposite() {
    assert_close(cosine_distance(&[1.0, 0.0], &[0.0, 1.0]).unwrap(), 1.0);
    assert_close(cosine_distance(&[1.0, 0.0], &[-1.0, 0.0]).unwrap(), 2.0);
}

#[test]
fn test_cosine_distance_ignores_magnitude() {
    let d = cosine_distance(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
    assert!(d.abs() < 1e-6);
}

#[test]
fn test_cosine_distance_stays_in_range() {
    let vectors: Vec<Vec<f32>> = (0..20u32)
        .map(|seed| {
            (0..16u32)
                .map(|i| ((seed * 31 + i * 17) % 23) as f32 - 11.0)
                .map(|v| if v == 0.0 { 0.5 } else { v })
                .collect()
        })
        .collect();

    for a in &vectors {
        for b in &vectors {
            let d = cosine_distance(a, b).unwrap();
            assert!((0.0..=2.0).contains(&d), "distance {d} out of range");
        }
    }
}

#[test]
fn test_cosine_distance_rejects_length_mismatch() {
    assert_eq!(
        cosine_distance(&[1.0, 0.0], &[1.0, 0.0, 0.0]),
        Err(ScoringError::LengthMismatch { left: 2, right: 3 })
    );
}

#[test]
fn test_cosine_distance_rejects_zero_vector() {
    assert_eq!(
        cosine_distance(&[0.0, 0.0], &[1.0, 0.0]),
        Err(ScoringError::ZeroMagnitude)
    );
    assert_eq!(
        cosine_distance(&[1.0, 0.0], &[0.0, 0.0]),
        Err(ScoringError::ZeroMagnitude)
    );
}

#[test]
fn test_cosine_distance_rejects_empty_and_non_finite() {
    assert_eq!(cosine_distance(&[], &[]), Err(ScoringError::EmptyVector));
    assert_eq!(
        cosine_distance(&[f32::NAN, 1.0], &[1.0, 1.0]),
        Err(ScoringError::NonFiniteValue)
    );
}

#[test]
fn test_score_distance_at_optimal_reference() {
    let result = score_distance(0.20, &reference_policy()).unwrap();

    assert_eq!(result.calculated_distance, 0.20);
    assert_eq!(result.avg_optimal_distance, 0.20);
    assert_eq!(result.avg_off_topic_distance, 0.60);
    assert_close(result.deviation_optimal_distance, 0.0);
    assert_close(result.deviation_off_topic_distance, 200.0);
    assert!(result.within_optimal());
    assert!(!result.beyond_off_topic());
}

#[test]
fn test_score_distance_between_references() {
    let result = score_distance(0.50, &reference_policy()).unwrap();

    assert_close(result.deviation_optimal_distance, -150.0);
    assert_close(result.deviation_off_topic_distance, 50.0);
    assert!(!result.within_optimal());
}

#[test]
fn test_score_distance_beyond_off_topic_flips_both_signs() {
    let result = score_distance(0.80, &reference_policy()).unwrap();

    assert_close(result.deviation_optimal_distance, -300.0);
    assert_close(result.deviation_off_topic_distance, -100.0);
    assert!(result.beyond_off_topic());
}

#[test]
fn test_score_distance_closer_than_optimal_is_positive() {
    let result = score_distance(0.10, &reference_policy()).unwrap();

    assert_close(result.deviation_optimal_distance, 50.0);
    assert_close(result.deviation_off_topic_distance, 250.0);
}

#[test]
fn test_off_topic_deviation_uses_optimal_denominator() {
    let policy = Policy::new("p", vec![1.0, 0.0], 0.50, 1.00).unwrap();

    let result = score_distance(0.75, &policy).unwrap();

    // |0.75 - 1.00| / 0.50, not / 1.00
    assert_close(result.deviation_off_topic_distance, 50.0);
}

#[test]
fn test_score_computes_distance_from_vectors() {
    let policy = reference_policy();

    let result = score(&[1.0, 0.0, 0.0], &policy).unwrap();
    assert!(result.calculated_distance.abs() < 1e-6);
    assert_close(result.deviation_optimal_distance, 100.0);

    let result = score(&[0.0, 1.0, 0.0], &policy).unwrap();
    assert_close(result.calculated_distance, 1.0);
    assert_close(result.deviation_optimal_distance, -400.0);
    assert_close(result.deviation_off_topic_distance, -200.0);
}

#[test]
fn test_score_rejects_mismatched_dimension() {
    let err = score(&[1.0, 0.0], &reference_policy()).unwrap_err();
    assert!(matches!(err, ScoringError::LengthMismatch { .. }));
}

#[test]
fn test_check_result_serializes_with_pascal_case_fields() {
    let result = score_distance(0.50, &reference_policy()).unwrap();
    let json = serde_json::to_value(result).unwrap();

    for field in [
        "CalculatedDistance",
        "AvgOptimalDistance",
        "AvgOffTopicDistance",
        "DeviationOptimalDistance",
        "DeviationOffTopicDistance",
    ] {
        assert!(json.get(field).is_some(), "missing {field}");
    }
}

#[test]
fn test_check_result_display() {
    let result = score_distance(0.50, &reference_policy()).unwrap();
    let text = result.to_string();
    assert!(text.contains("0.5000"));
    assert!(text.contains("-150.0%"));
}
