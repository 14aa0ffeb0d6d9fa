use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Query string of the live-data endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountQueryDto {
    #[serde(default, alias = "accountID")]
    pub account_id: Option<String>,
}

/// Body of `POST /api/upstream/command/{id}`.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommandDto {
    #[serde(default, alias = "accountID")]
    pub account_id: Option<String>,
    pub command: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct CommandResultDto {
    /// Upstream response body, `null` when the upstream returned no content.
    #[schema(value_type = Object)]
    pub result: serde_json::Value,
}

/// Body of `POST /api/upstream/test-connection`.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestConnectionDto {
    #[serde(default, alias = "accountID")]
    pub account_id: Option<String>,
    pub api_key: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestConnectionResultDto {
    #[schema(value_type = Object)]
    pub server_info: serde_json::Value,
}

/// Live data relayed from the upstream service, under a key named after the read
/// (`players`, `logs`, `serverInfo`, ...).
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct LiveDataDto {
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub payload: serde_json::Map<String, serde_json::Value>,
}

impl LiveDataDto {
    pub fn new(key: &str, data: serde_json::Value) -> Self {
        let mut payload = serde_json::Map::new();
        payload.insert(key.to_string(), data);

        Self { payload }
    }
}
