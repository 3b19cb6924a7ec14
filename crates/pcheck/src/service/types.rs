use serde::{Deserialize, Serialize};

use crate::constants::POLICY_CHECK_ROUTE;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
/// Reference to a registered policy.
pub struct PolicyRef {
    pub policy_id: String,
    /// Route prefix for checking content against this policy.
    pub policy_uri: String,
}

impl PolicyRef {
    pub fn new(policy_id: impl Into<String>) -> Self {
        let policy_id = policy_id.into();
        let policy_uri = format!("{}/{}/", POLICY_CHECK_ROUTE, policy_id);
        Self {
            policy_id,
            policy_uri,
        }
    }
}
