//! HTTP client for the Aruba Cloud WsEndUser API.
//!
//! Every action is a `POST` of a JSON object to `{base_url}/{Action}`. The
//! body carries the account credentials next to the action's own fields, and
//! every answer is wrapped in a `Success`/`ResultCode`/`ResultMessage`/`Value`
//! envelope.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::metrics::{Metrics, Timer};
use crate::sdk::transport::Transport;
use crate::sdk::types::Envelope;
use crate::VERSION;

/// Path of the JSON endpoint below the API host.
pub const API_BASE_PATH: &str = "/WsEndUser/v2.9/WsEndUser.svc/json";

const MEDIA_TYPE: &str = "application/json";

/// User agent string for API requests.
fn user_agent() -> String {
    format!("arubacloud-rs/{}", VERSION)
}

/// Details handed to the request completion callback.
#[derive(Debug, Clone)]
pub struct RequestInfo {
    pub action: String,
    pub status: u16,
    pub elapsed: Duration,
}

/// Callback invoked after every request that produced an HTTP response.
pub type RequestCallback = Arc<dyn Fn(&RequestInfo) + Send + Sync>;

/// API client for the Aruba Cloud control plane.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    username: String,
    password: String,
    metrics: Arc<Metrics>,
    on_request_completed: Option<RequestCallback>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl ApiClient {
    /// Create a new API client for `api_host` (scheme and host, no path).
    pub fn new(api_host: &str, username: String, password: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent())
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = format!("{}{}", api_host.trim_end_matches('/'), API_BASE_PATH);
        debug!(%base_url, "Configured API client");

        Ok(Self {
            client,
            base_url,
            username,
            password,
            metrics: Metrics::new(),
            on_request_completed: None,
        })
    }

    /// Set the request completion callback.
    pub fn on_request_completed(mut self, callback: RequestCallback) -> Self {
        self.on_request_completed = Some(callback);
        self
    }

    /// Get the base URL actions are posted to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the request metrics.
    pub fn metrics(&self) -> Arc<Metrics> {
        self.metrics.clone()
    }

    /// Build the request body: credentials first, action fields on top.
    fn build_body(&self, action: &str, payload: Option<Value>) -> Result<Map<String, Value>> {
        let mut body = Map::new();
        body.insert("ApplicationId".to_string(), Value::from(action));
        body.insert("RequestId".to_string(), Value::from(action));
        body.insert("SessionId".to_string(), Value::from(action));
        body.insert("Username".to_string(), Value::from(self.username.as_str()));
        body.insert("Password".to_string(), Value::from(self.password.as_str()));

        match payload {
            None | Some(Value::Null) => {}
            Some(Value::Object(fields)) => body.extend(fields),
            Some(other) => {
                return Err(Error::argument(
                    "payload",
                    format!("must be a JSON object, got {}", other),
                ))
            }
        }

        Ok(body)
    }

    /// Make an authenticated API request.
    async fn request(&self, action: &str, payload: Option<Value>) -> Result<Value> {
        let url = format!("{}/{}", self.base_url, action);
        let body = self.build_body(action, payload)?;
        let request_id = Uuid::new_v4();

        debug!(%request_id, action, body = %redacted(&body), "Request");

        let timer = Timer::start();
        self.metrics.inc_requests();

        let response = match self
            .client
            .post(&url)
            .header(CONTENT_TYPE, MEDIA_TYPE)
            .header(ACCEPT, MEDIA_TYPE)
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                self.metrics.inc_failed();
                return Err(e.into());
            }
        };

        let status = response.status();
        let elapsed_ms = timer.elapsed_ms();
        self.metrics.observe_latency(elapsed_ms);

        if let Some(callback) = &self.on_request_completed {
            callback(&RequestInfo {
                action: action.to_string(),
                status: status.as_u16(),
                elapsed: Duration::from_millis(elapsed_ms),
            });
        }

        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                self.metrics.inc_failed();
                return Err(e.into());
            }
        };

        debug!(%request_id, action, status = status.as_u16(), body = %text, "Response");

        if !status.is_success() {
            if let Some(err) = envelope_failure(&text) {
                self.metrics.inc_remote_errors();
                return Err(err);
            }
            self.metrics.inc_failed();
            let status_text = status.canonical_reason().unwrap_or("Unknown");
            return Err(Error::api(status.as_u16(), status_text, text));
        }

        match check_response(&text) {
            Ok(value) => {
                self.metrics.inc_success();
                Ok(value)
            }
            Err(e) => {
                if matches!(e, Error::Remote { .. }) {
                    self.metrics.inc_remote_errors();
                } else {
                    self.metrics.inc_failed();
                }
                Err(e)
            }
        }
    }
}

#[async_trait]
impl Transport for ApiClient {
    async fn call(&self, action: &str, payload: Option<Value>) -> Result<Value> {
        self.request(action, payload).await
    }
}

/// Unwrap the response envelope, turning `Success: false` into an error.
///
/// The API appends a stack trace after a `\r` to some messages; only the
/// part before it is kept.
pub fn check_response(body: &str) -> Result<Value> {
    if body.trim().is_empty() {
        return Err(Error::remote(0, "empty response"));
    }

    let envelope: Envelope = serde_json::from_str(body)?;
    if !envelope.success {
        let message = envelope.result_message.unwrap_or_default();
        let message = match message.find('\r') {
            Some(end) => message[..end].to_string(),
            None => message,
        };
        return Err(Error::remote(envelope.result_code, message));
    }

    Ok(envelope.value)
}

/// Remote error carried by a non-2xx body that is a `Success: false` envelope.
fn envelope_failure(body: &str) -> Option<Error> {
    let value: Value = serde_json::from_str(body).ok()?;
    if value.get("Success") != Some(&Value::Bool(false)) {
        return None;
    }
    check_response(body).err()
}

/// Render a request body for logging without the password.
fn redacted(body: &Map<String, Value>) -> Value {
    let mut copy = body.clone();
    if copy.contains_key("Password") {
        copy.insert("Password".to_string(), Value::from("***"));
    }
    if let Some(Value::Object(server)) = copy.get_mut("Server") {
        if server.contains_key("AdministratorPassword") {
            server.insert("AdministratorPassword".to_string(), Value::from("***"));
        }
    }
    if copy.contains_key("AdministratorPassword") {
        copy.insert("AdministratorPassword".to_string(), Value::from("***"));
    }
    Value::Object(copy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(
            &server.uri(),
            "ARU-1234".to_string(),
            "hunter2".to_string(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn action_path(action: &str) -> String {
        format!("{}/{}", API_BASE_PATH, action)
    }

    #[test]
    fn test_check_response_success() {
        let value = check_response(r#"{"Success":true,"ResultCode":0,"Value":[1,2]}"#).unwrap();
        assert_eq!(value, json!([1, 2]));
    }

    #[test]
    fn test_check_response_trims_message_at_carriage_return() {
        let err = check_response(
            r#"{"Success":false,"ResultCode":17,"ResultMessage":"Server not found\r\n   at Stack.Trace()"}"#,
        )
        .unwrap_err();

        match err {
            Error::Remote { code, message } => {
                assert_eq!(code, 17);
                assert_eq!(message, "Server not found");
            }
            other => panic!("Expected Remote error, got {:?}", other),
        }
    }

    #[test]
    fn test_check_response_keeps_message_without_carriage_return() {
        let err = check_response(r#"{"Success":false,"ResultCode":3,"ResultMessage":"Busy"}"#)
            .unwrap_err();
        assert_eq!(err.to_string(), "Busy. Result code: 3");
    }

    #[test]
    fn test_check_response_empty_body() {
        assert!(matches!(check_response("  "), Err(Error::Remote { code: 0, .. })));
    }

    #[test]
    fn test_build_body_merges_payload_over_credentials() {
        let client = ApiClient::new("https://api.example.com", "u".into(), "p".into(), Duration::from_secs(1))
            .unwrap();
        let body = client
            .build_body("GetServerDetails", Some(json!({"ServerId": 9, "SessionId": "custom"})))
            .unwrap();

        assert_eq!(body["ApplicationId"], json!("GetServerDetails"));
        assert_eq!(body["RequestId"], json!("GetServerDetails"));
        assert_eq!(body["SessionId"], json!("custom"));
        assert_eq!(body["Username"], json!("u"));
        assert_eq!(body["Password"], json!("p"));
        assert_eq!(body["ServerId"], json!(9));
    }

    #[test]
    fn test_build_body_rejects_non_object_payload() {
        let client = ApiClient::new("https://api.example.com", "u".into(), "p".into(), Duration::from_secs(1))
            .unwrap();
        let err = client.build_body("GetServers", Some(json!([1]))).unwrap_err();
        assert!(matches!(err, Error::Argument { .. }));
    }

    #[test]
    fn test_base_url() {
        let client = ApiClient::new("https://api.dc2.computing.cloud.it/", "u".into(), "p".into(), Duration::from_secs(1))
            .unwrap();
        assert_eq!(
            client.base_url(),
            "https://api.dc2.computing.cloud.it/WsEndUser/v2.9/WsEndUser.svc/json"
        );
    }

    #[test]
    fn test_redacted_hides_passwords() {
        let mut body = Map::new();
        body.insert("Password".to_string(), json!("hunter2"));
        body.insert("Server".to_string(), json!({"AdministratorPassword": "root!", "Name": "x"}));

        let rendered = redacted(&body).to_string();
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("root!"));
        assert!(rendered.contains("\"Name\":\"x\""));
    }

    #[tokio::test]
    async fn test_call_posts_credentials_and_returns_value() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(action_path("GetServers")))
            .and(header("content-type", MEDIA_TYPE))
            .and(body_partial_json(json!({
                "ApplicationId": "GetServers",
                "Username": "ARU-1234",
                "Password": "hunter2"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Success": true,
                "ResultCode": 0,
                "Value": [{"ServerId": 1, "Name": "web", "ServerStatus": 3}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let value = client.call("GetServers", None).await.unwrap();

        assert_eq!(value[0]["Name"], json!("web"));
        assert_eq!(client.metrics().snapshot().requests_success, 1);
    }

    #[tokio::test]
    async fn test_call_surfaces_remote_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(action_path("SetEnqueueServerStart")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Success": false,
                "ResultCode": 52,
                "ResultMessage": "Operation not allowed\r\nDetails"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .call("SetEnqueueServerStart", Some(json!({"ServerId": 4})))
            .await
            .unwrap_err();

        assert!(!err.is_transient());
        assert_eq!(err.to_string(), "Operation not allowed. Result code: 52");
        assert_eq!(client.metrics().snapshot().remote_errors, 1);
    }

    #[tokio::test]
    async fn test_call_classifies_http_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.call("GetServers", None).await.unwrap_err();

        match &err {
            Error::Api { status, message, .. } => {
                assert_eq!(*status, 503);
                assert_eq!(message, "maintenance");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
        assert!(err.is_transient());
        assert_eq!(client.metrics().snapshot().requests_failed, 1);
    }

    #[tokio::test]
    async fn test_failure_envelope_on_server_error_is_remote() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(action_path("GetServerDetails")))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "Success": false,
                "ResultCode": 17,
                "ResultMessage": "Server not found\r\n   at Stack.Trace()"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .call("GetServerDetails", Some(json!({"ServerId": 8})))
            .await
            .unwrap_err();

        assert!(matches!(&err, Error::Remote { code: 17, message } if message == "Server not found"));
        assert!(!err.is_transient());
        assert_eq!(client.metrics().snapshot().remote_errors, 1);
        assert_eq!(client.metrics().snapshot().requests_failed, 0);
    }

    #[test]
    fn test_envelope_failure_ignores_plain_bodies() {
        assert!(envelope_failure("maintenance").is_none());
        assert!(envelope_failure(r#"{"Message":"boom"}"#).is_none());
        assert!(envelope_failure(r#"{"Success":true}"#).is_none());
        assert!(matches!(
            envelope_failure(r#"{"Success":false,"ResultCode":3,"ResultMessage":"Busy"}"#),
            Some(Error::Remote { code: 3, .. })
        ));
    }

    #[tokio::test]
    async fn test_request_completion_callback() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Success": true})))
            .mount(&server)
            .await;

        let seen = Arc::new(AtomicUsize::new(0));
        let counter = seen.clone();
        let client = client_for(&server).on_request_completed(Arc::new(move |info: &RequestInfo| {
            assert_eq!(info.action, "GetJobs");
            assert_eq!(info.status, 200);
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        let value = client.call("GetJobs", None).await.unwrap();
        assert!(value.is_null());
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }
}
