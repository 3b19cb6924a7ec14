use super::*;
use crate::embedding::{EmbeddingError, MockEmbedder};
use crate::service::ErrorKind;

const DIM: usize = 3;

fn options() -> RegistrationOptions {
    RegistrationOptions::default().with_embedding_dim(DIM)
}

fn scripted_embedder() -> MockEmbedder {
    MockEmbedder::new(DIM)
        .with_vector("violence", vec![1.0, 0.0, 0.0])
        .with_vector("fight", vec![0.0, 1.0, 0.0])
        .with_vector("punch", vec![1.0, 0.0, 0.0])
        .with_vector("gardening", vec![-1.0, 0.0, 0.0])
}

fn request() -> RegistrationRequest {
    RegistrationRequest::new("no-violence", "violence")
        .with_potential_phrases(["fight", "punch"])
        .with_off_topic_phrases(["gardening"])
}

#[tokio::test]
async fn test_derive_policy_averages_phrase_distances() {
    let embedder = scripted_embedder();

    let policy = derive_policy(&embedder, &request(), &options())
        .await
        .unwrap();

    assert_eq!(policy.policy_id(), "no-violence");
    assert_eq!(policy.content_vector(), &[1.0, 0.0, 0.0]);
    assert!((policy.avg_optimal_distance() - 0.5).abs() < 1e-6);
    assert!((policy.avg_off_topic_distance() - 2.0).abs() < 1e-6);
    // Centroid plus three phrases.
    assert_eq!(embedder.call_count(), 4);
}

#[tokio::test]
async fn test_derive_policy_is_deterministic_across_concurrency() {
    let embedder = MockEmbedder::new(16);
    let request = RegistrationRequest::new("p", "content to look for")
        .with_potential_phrases((0..20).map(|i| format!("on topic {i}")))
        .with_off_topic_phrases((0..20).map(|i| format!("off topic {i}")));
    let base = RegistrationOptions::default().with_embedding_dim(16);

    let serial = derive_policy(&embedder, &request, &base.with_concurrency(1))
        .await
        .unwrap();
    let parallel = derive_policy(&embedder, &request, &base.with_concurrency(8))
        .await
        .unwrap();

    assert_eq!(serial.content_vector(), parallel.content_vector());
    assert_eq!(
        serial.avg_optimal_distance(),
        parallel.avg_optimal_distance()
    );
    assert_eq!(
        serial.avg_off_topic_distance(),
        parallel.avg_off_topic_distance()
    );
}

#[tokio::test]
async fn test_derive_policy_rejects_empty_phrase_sets_without_embedding() {
    let embedder = scripted_embedder();

    let no_potential = RegistrationRequest::new("p", "violence").with_off_topic_phrases(["x"]);
    let err = derive_policy(&embedder, &no_potential, &options())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.policy_id(), Some("p"));

    let no_off_topic = RegistrationRequest::new("p", "violence").with_potential_phrases(["x"]);
    let err = derive_policy(&embedder, &no_off_topic, &options())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    assert_eq!(embedder.call_count(), 0);
}

#[tokio::test]
async fn test_derive_policy_rejects_blank_id_and_content() {
    let embedder = scripted_embedder();

    let mut blank_id = request();
    blank_id.policy_id = "  ".to_string();
    let err = derive_policy(&embedder, &blank_id, &options())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let mut blank_content = request();
    blank_content.content_to_look_for = String::new();
    let err = derive_policy(&embedder, &blank_content, &options())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn test_derive_policy_zero_optimal_distance_is_invalid() {
    let embedder = scripted_embedder();
    let request = RegistrationRequest::new("p", "violence")
        .with_potential_phrases(["punch"])
        .with_off_topic_phrases(["gardening"]);

    let err = derive_policy(&embedder, &request, &options())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("avg optimal distance"));
}

#[tokio::test]
async fn test_derive_policy_phrase_failure_is_embedding_failure() {
    let embedder = scripted_embedder().with_failure(
        "fight",
        EmbeddingError::HttpStatus {
            status: 503,
            body: "busy".to_string(),
        },
    );

    let err = derive_policy(&embedder, &request(), &options())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::EmbeddingFailure);
    match err {
        ComplianceError::EmbeddingFailure {
            policy_id, excerpt, ..
        } => {
            assert_eq!(policy_id, "no-violence");
            assert_eq!(excerpt, "fight");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_derive_policy_dimension_mismatch_is_embedding_failure() {
    let embedder = scripted_embedder().with_vector("fight", vec![0.0, 1.0]);

    let err = derive_policy(&embedder, &request(), &options())
        .await
        .unwrap_err();

    match err {
        ComplianceError::EmbeddingFailure { source, .. } => {
            assert_eq!(
                source,
                EmbeddingError::DimensionMismatch {
                    expected: 3,
                    actual: 2
                }
            );
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_derive_policy_zero_phrase_vector_is_validation() {
    let embedder = scripted_embedder().with_vector("fight", vec![0.0, 0.0, 0.0]);

    let err = derive_policy(&embedder, &request(), &options())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("fight"));
}

#[test]
fn test_request_deserializes_pascal_case() {
    let json = r#"{
        "PolicyId": "no-violence",
        "ContentToLookFor": "violence",
        "PotentialPhrases": ["fight"],
        "OffTopicPhrases": ["gardening", "cooking"]
    }"#;

    let request: RegistrationRequest = serde_json::from_str(json).unwrap();

    assert_eq!(request.policy_id, "no-violence");
    assert_eq!(request.content_to_look_for, "violence");
    assert_eq!(request.potential_phrases, vec!["fight"]);
    assert_eq!(request.off_topic_phrases.len(), 2);
}

#[test]
fn test_request_missing_phrase_sets_fail_validation() {
    let json = r#"{"PolicyId": "p", "ContentToLookFor": "c"}"#;

    let request: RegistrationRequest = serde_json::from_str(json).unwrap();

    assert!(request.potential_phrases.is_empty());
    assert!(request.validate().is_err());
}

#[test]
fn test_options_from_config() {
    let config = crate::config::Config {
        embedding_dim: 8,
        embed_concurrency: 2,
        ..Default::default()
    };

    let options = RegistrationOptions::from_config(&config);

    assert_eq!(options.embedding_dim, 8);
    assert_eq!(options.embed_concurrency, 2);
}
