use serde::{Deserialize, Serialize};

/// Request payload for storing the upstream credential.
/// An empty key clears the stored settings.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    pub api_key: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Settings as exposed to the client; the credential itself is never echoed back
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    pub has_api_key: bool,
    pub user_id: Option<String>,
}
