use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::stats::StatsExport;

/// Request payload for POST /api/validate-key
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateKeyRequest {
    pub api_key: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValidateKeyResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Response for GET /api/stats: the structured snapshot, its text rendering,
/// and any endpoints that failed while gathering it
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub stats: StatsExport,
    pub text: String,
    pub errors: BTreeMap<String, String>,
}
