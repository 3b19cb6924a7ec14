//! Test fixtures for integration tests.

use std::path::Path;
use std::sync::Arc;

use pcheck::{
    ComplianceService, MockEmbedder, PolicyStore, RegistrationOptions, RegistrationRequest,
};

pub const DIM: usize = 4;

pub const POLICY_ID: &str = "no-violence";

pub const CENTROID_TEXT: &str = "violent content";

/// Mock embedder with a small scripted vocabulary around [`CENTROID_TEXT`].
///
/// On-topic phrases sit at distances 0.0 and 1.0 from the centroid (avg 0.5); the
/// off-topic phrase is opposite (avg 2.0).
pub fn scripted_embedder() -> MockEmbedder {
    MockEmbedder::new(DIM)
        .with_vector(CENTROID_TEXT, vec![1.0, 0.0, 0.0, 0.0])
        .with_vector("punching someone", vec![2.0, 0.0, 0.0, 0.0])
        .with_vector("a heated argument", vec![0.0, 1.0, 0.0, 0.0])
        .with_vector("baking bread", vec![-1.0, 0.0, 0.0, 0.0])
        .with_vector("close call", vec![1.0, 1.0, 0.0, 0.0])
        .with_vector("unrelated", vec![0.0, 0.0, 1.0, 0.0])
}

pub fn violence_request(policy_id: &str) -> RegistrationRequest {
    RegistrationRequest::new(policy_id, CENTROID_TEXT)
        .with_potential_phrases(["punching someone", "a heated argument"])
        .with_off_topic_phrases(["baking bread"])
}

pub fn options() -> RegistrationOptions {
    RegistrationOptions::default().with_embedding_dim(DIM)
}

pub fn service(embedder: MockEmbedder) -> ComplianceService {
    ComplianceService::new(Arc::new(embedder), Arc::new(PolicyStore::new()), options())
}

pub fn service_from_dir(embedder: MockEmbedder, dir: &Path) -> ComplianceService {
    let store = PolicyStore::preload(dir, DIM).expect("preload should succeed");
    ComplianceService::new(Arc::new(embedder), Arc::new(store), options())
}
