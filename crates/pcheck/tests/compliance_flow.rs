//! End-to-end tests for register, check, delete and preload.

mod common;

use common::fixtures::{
    CENTROID_TEXT, POLICY_ID, scripted_embedder, service, service_from_dir, violence_request,
};
use pcheck::policy::write_policy_file;
use pcheck::{ErrorKind, PolicyRecord};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[tokio::test]
async fn test_register_check_delete_flow() {
    let service = service(scripted_embedder());

    let results = service
        .register_policies(&[violence_request(POLICY_ID)])
        .await;
    let reference = results[0].as_ref().expect("registration should succeed");
    assert_eq!(reference.policy_uri, format!("/policycheck/{}/", POLICY_ID));

    let on_topic = service
        .check_content(POLICY_ID, CENTROID_TEXT)
        .await
        .unwrap();
    assert!(approx(on_topic.calculated_distance, 0.0));
    assert!(on_topic.within_optimal());
    assert!(!on_topic.beyond_off_topic());

    // 1 - 1/sqrt(2) from the centroid: inside the optimal band (0.5).
    let near = service
        .check_content(POLICY_ID, "close call")
        .await
        .unwrap();
    assert!(approx(near.calculated_distance, 0.292_893));
    assert!(near.deviation_optimal_distance > 0.0);

    // Orthogonal: distance 1.0, past optimal but short of off-topic (2.0).
    let unrelated = service.check_content(POLICY_ID, "unrelated").await.unwrap();
    assert!(approx(unrelated.calculated_distance, 1.0));
    assert!(approx(unrelated.deviation_optimal_distance, -100.0));
    assert!(approx(unrelated.deviation_off_topic_distance, 200.0));

    assert!(service.delete_policy(POLICY_ID));
    let err = service
        .check_content(POLICY_ID, CENTROID_TEXT)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_mixed_batch_keeps_successful_entries() {
    let service = service(scripted_embedder());
    let mut invalid = violence_request("empty-phrases");
    invalid.potential_phrases.clear();

    let results = service
        .register_policies(&[violence_request("a"), invalid, violence_request("b")])
        .await;

    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert_eq!(
        results[1].as_ref().unwrap_err().kind(),
        ErrorKind::Validation
    );
    assert!(results[2].is_ok());
    assert_eq!(service.policy_ids(), vec!["a", "b"]);
}

#[tokio::test]
async fn test_exported_policies_preload_identically() {
    let dir = tempfile::tempdir().unwrap();
    let original = service(scripted_embedder());
    original
        .register_policy(&violence_request(POLICY_ID))
        .await
        .unwrap();
    let stored = original.get_policy(POLICY_ID).unwrap();
    let path = write_policy_file(dir.path(), &stored).unwrap();

    let raw: serde_json::Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert!(raw.get("vectorContentToLookFor").is_some());
    assert!(raw.get("avgOptimalDistance").is_some());
    assert!(raw.get("avgOffTopicDistance").is_some());

    let reloaded = service_from_dir(scripted_embedder(), dir.path());
    let restored = reloaded.get_policy(POLICY_ID).unwrap();
    assert_eq!(
        PolicyRecord::from(restored.as_ref()),
        PolicyRecord::from(stored.as_ref())
    );

    let before = original
        .check_content(POLICY_ID, "unrelated")
        .await
        .unwrap();
    let after = reloaded
        .check_content(POLICY_ID, "unrelated")
        .await
        .unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_concurrent_checks_and_reregistration() {
    let service = service(scripted_embedder());
    service
        .register_policy(&violence_request(POLICY_ID))
        .await
        .unwrap();

    let mut handles = Vec::new();
    for i in 0..16 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            if i % 4 == 0 {
                service
                    .register_policy(&violence_request(POLICY_ID))
                    .await
                    .map(|_| ())
            } else {
                service
                    .check_content(POLICY_ID, "unrelated")
                    .await
                    .map(|result| assert!(approx(result.calculated_distance, 1.0)))
            }
        }));
    }

    for handle in handles {
        handle.await.unwrap().unwrap();
    }
    assert_eq!(service.policy_count(), 1);
}
