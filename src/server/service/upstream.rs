//! Client for the upstream ER:LC game-server API.
//!
//! Every call is authenticated with the server's decrypted key in the `Server-Key`
//! header and bounded by the configured timeout. Responses are relayed as raw JSON;
//! there are no retries and nothing is cached.

use std::time::Duration;

use serde_json::{json, Value};

use crate::server::{
    error::{upstream::UpstreamError, AppError},
    model::{access::UpstreamCredentials, upstream::UpstreamOperation},
    util::validate::validate_command,
};

const SERVER_KEY_HEADER: &str = "Server-Key";

#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl UpstreamClient {
    /// Creates a new UpstreamClient.
    ///
    /// # Arguments
    /// - `http` - Shared HTTP client
    /// - `base_url` - Upstream API base URL without trailing slash
    /// - `timeout` - Upper bound for each call, including reading the body
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            timeout,
        }
    }

    /// Performs one upstream call.
    ///
    /// # Arguments
    /// - `api_key` - Decrypted upstream key of the server
    /// - `operation` - Operation determining method and path
    /// - `payload` - Optional JSON body
    ///
    /// # Returns
    /// - `Ok(Value)` - Response body, `Value::Null` if the upstream sent none
    /// - `Err(UpstreamError::Status)` - Non-success status, with the upstream message
    /// - `Err(UpstreamError::Timeout)` - No complete answer within the timeout
    /// - `Err(UpstreamError::Transport)` - Upstream unreachable
    /// - `Err(UpstreamError::Decode)` - Success body is not JSON
    pub async fn call(
        &self,
        api_key: &str,
        operation: UpstreamOperation,
        payload: Option<&Value>,
    ) -> Result<Value, UpstreamError> {
        let url = format!("{}{}", self.base_url, operation.path());

        let mut request = self
            .http
            .request(operation.method(), url)
            .header(SERVER_KEY_HEADER, api_key)
            .timeout(self.timeout);
        if let Some(payload) = payload {
            request = request.json(payload);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<Value>(&body)
                .ok()
                .and_then(|value| {
                    value
                        .get("message")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                })
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown status")
                        .to_string()
                });

            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message,
            });
        }

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&body).map_err(|e| UpstreamError::Decode(e.to_string()))
    }

    /// Relays a live read for an authorized server.
    pub async fn live_read(
        &self,
        credentials: &UpstreamCredentials,
        operation: UpstreamOperation,
    ) -> Result<Value, AppError> {
        Ok(self.call(&credentials.api_key, operation, None).await?)
    }

    /// Forwards an in-game command to the upstream server.
    ///
    /// The command text is sent verbatim. Each command is audit-logged with the
    /// issuing account and server.
    ///
    /// # Arguments
    /// - `credentials` - Credentials returned by the access gate
    /// - `account_id` - Account issuing the command
    /// - `command` - Command text, e.g. `:h Hello`
    ///
    /// # Returns
    /// - `Ok(Value)` - Upstream response
    /// - `Err(AppError::BadRequest)` - Empty or overlong command
    /// - `Err(AppError::UpstreamErr)` - Upstream call failed
    pub async fn execute_command(
        &self,
        credentials: &UpstreamCredentials,
        account_id: &str,
        command: &str,
    ) -> Result<Value, AppError> {
        validate_command(command)?;

        tracing::info!(
            account_id = %account_id,
            server_id = %credentials.server_id,
            command = %command,
            "Executing in-game command"
        );

        let payload = json!({ "command": command });
        Ok(self
            .call(
                &credentials.api_key,
                UpstreamOperation::ExecuteCommand,
                Some(&payload),
            )
            .await?)
    }

    /// Checks a candidate key by fetching the server info with it.
    ///
    /// # Returns
    /// - `Ok(Value)` - Server info returned for the key
    /// - `Err(AppError::BadRequest)` - Blank key
    /// - `Err(AppError::UpstreamErr)` - Key rejected or upstream unavailable
    pub async fn test_connection(&self, api_key: &str) -> Result<Value, AppError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(AppError::BadRequest("API key must not be empty.".to_string()));
        }

        Ok(self
            .call(api_key, UpstreamOperation::TestConnection, None)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use wiremock::{
        matchers::{body_json, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;

    fn client_for(server: &MockServer) -> UpstreamClient {
        UpstreamClient::new(reqwest::Client::new(), server.uri(), Duration::from_secs(2))
    }

    fn credentials() -> UpstreamCredentials {
        UpstreamCredentials {
            server_id: "SRV-1".to_string(),
            external_server_id: None,
            api_key: "key-123".to_string(),
        }
    }

    /// Tests a successful read.
    ///
    /// Expected: Ok with the upstream JSON, key sent in `Server-Key`
    #[tokio::test]
    async fn relays_success_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/server/players"))
            .and(header("Server-Key", "key-123"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{ "Player": "alice:1", "Permission": "Normal" }])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server)
            .call("key-123", UpstreamOperation::ListPlayers, None)
            .await
            .unwrap();

        assert_eq!(result[0]["Player"], "alice:1");
    }

    /// Tests a non-success upstream status.
    ///
    /// Expected: Err(Status) preserving the status and upstream message
    #[tokio::test]
    async fn preserves_error_status_and_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/server"))
            .respond_with(
                ResponseTemplate::new(403).set_body_json(json!({ "message": "Invalid server key" })),
            )
            .mount(&server)
            .await;

        let result = client_for(&server)
            .call("bad", UpstreamOperation::GetServerInfo, None)
            .await;

        match result {
            Err(UpstreamError::Status { status, message }) => {
                assert_eq!(status, 403);
                assert_eq!(message, "Invalid server key");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    /// Tests a non-success status without a JSON body.
    ///
    /// Expected: canonical reason used as message
    #[tokio::test]
    async fn falls_back_to_canonical_reason() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .call("key", UpstreamOperation::ListBans, None)
            .await;

        assert!(matches!(
            result,
            Err(UpstreamError::Status { status: 500, ref message }) if message == "Internal Server Error"
        ));
    }

    /// Tests an upstream slower than the timeout.
    ///
    /// Expected: Err(Timeout)
    #[tokio::test]
    async fn maps_slow_upstream_to_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let client =
            UpstreamClient::new(reqwest::Client::new(), server.uri(), Duration::from_millis(100));
        let result = client
            .call("key", UpstreamOperation::GetServerInfo, None)
            .await;

        assert!(matches!(result, Err(UpstreamError::Timeout)));
    }

    /// Tests an empty success body.
    ///
    /// Expected: Ok(Value::Null)
    #[tokio::test]
    async fn empty_body_is_null() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/server/command"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .call(
                "key",
                UpstreamOperation::ExecuteCommand,
                Some(&json!({ "command": ":h hi" })),
            )
            .await
            .unwrap();

        assert_eq!(result, Value::Null);
    }

    /// Tests a success body that is not JSON.
    ///
    /// Expected: Err(Decode)
    #[tokio::test]
    async fn invalid_json_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .call("key", UpstreamOperation::ListStaff, None)
            .await;

        assert!(matches!(result, Err(UpstreamError::Decode(_))));
    }

    /// Tests an unreachable upstream.
    ///
    /// Expected: Err(Transport)
    #[tokio::test]
    async fn unreachable_upstream_is_transport_error() {
        let client = UpstreamClient::new(
            reqwest::Client::new(),
            "http://127.0.0.1:1",
            Duration::from_secs(2),
        );
        let result = client.call("key", UpstreamOperation::ListQueue, None).await;

        assert!(matches!(result, Err(UpstreamError::Transport(_))));
    }

    /// Tests command forwarding.
    ///
    /// Expected: command sent verbatim as `{"command": ...}`
    #[tokio::test]
    async fn forwards_command_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/server/command"))
            .and(header("Server-Key", "key-123"))
            .and(body_json(json!({ "command": ":m Server restart in 5 minutes" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Success" })))
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server)
            .execute_command(&credentials(), "ACC-alice", ":m Server restart in 5 minutes")
            .await
            .unwrap();

        assert_eq!(result["message"], "Success");
    }

    /// Tests rejection of empty and overlong commands.
    ///
    /// Expected: Err(BadRequest) and no upstream request
    #[tokio::test]
    async fn rejects_invalid_commands_locally() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        let client = client_for(&server);

        let empty = client.execute_command(&credentials(), "ACC-alice", "   ").await;
        let long = client
            .execute_command(&credentials(), "ACC-alice", &"a".repeat(1001))
            .await;

        assert!(matches!(empty, Err(AppError::BadRequest(_))));
        assert!(matches!(long, Err(AppError::BadRequest(_))));
    }

    /// Tests checking a key against the server info endpoint.
    ///
    /// Expected: Ok with server info for a valid key, Err(BadRequest) for a blank key
    #[tokio::test]
    async fn tests_connection_with_candidate_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/server"))
            .and(header("Server-Key", "candidate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Name": "Liberty County" })))
            .mount(&server)
            .await;
        let client = client_for(&server);

        let info = client.test_connection(" candidate ").await.unwrap();
        let blank = client.test_connection("").await;

        assert_eq!(info["Name"], "Liberty County");
        assert!(matches!(blank, Err(AppError::BadRequest(_))));
    }
}
