use serde::{Deserialize, Serialize};

use pcheck::{ComplianceError, PolicyRef, RegistrationRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseStatus {
    Success,
    Failure,
}

/// Response envelope shared by every `/policycheck` route.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PCheckResponse<T> {
    pub status: ResponseStatus,
    #[serde(default)]
    pub error: Vec<String>,
    pub result: Option<T>,
}

impl<T> PCheckResponse<T> {
    pub fn success(result: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            error: Vec::new(),
            result: Some(result),
        }
    }

    pub fn failure(errors: Vec<String>) -> Self {
        Self {
            status: ResponseStatus::Failure,
            error: errors,
            result: None,
        }
    }
}

/// Body of `PUT /policycheck`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequestBody {
    #[serde(rename = "Request")]
    pub requests: Vec<RegistrationRequest>,
}

/// Per-request outcome of a registration batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegistrationEntry {
    pub policy_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RegistrationEntry {
    pub fn from_outcome(
        request: &RegistrationRequest,
        outcome: &Result<PolicyRef, ComplianceError>,
    ) -> Self {
        match outcome {
            Ok(reference) => Self {
                policy_id: reference.policy_id.clone(),
                policy_uri: Some(reference.policy_uri.clone()),
                error: None,
            },
            Err(err) => Self {
                policy_id: request.policy_id.clone(),
                policy_uri: None,
                error: Some(err.to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteResult {
    pub deleted: bool,
}
