//! Blocking HTTP client for the agent-run endpoint.

use crate::config::ApiConfig;
use crate::error::{DispatchError, Result};
use crate::types::{AgentRequest, AgentRunResult};
use reqwest::blocking::Client;

/// Longest error body echoed back in a [`DispatchError::Status`].
const MAX_ERROR_BODY: usize = 512;

pub struct AgentClient {
    http: Client,
    url: String,
    api_key: String,
}

impl AgentClient {
    /// Validate `config` and build a client. Fails without touching the
    /// network when no API key is configured.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let api_key = config.api_key().ok_or(DispatchError::MissingApiKey)?;

        let url = config.run_url();
        reqwest::Url::parse(&url)
            .map_err(|_| DispatchError::InvalidBaseUrl(config.base_url.clone()))?;

        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("agent-dispatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(DispatchError::Transport)?;

        Ok(Self {
            http,
            url,
            api_key: api_key.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Submit one agent run. No retries: any failure is returned as-is.
    pub fn spawn(&self, request: &AgentRequest) -> Result<AgentRunResult> {
        tracing::debug!(url = %self.url, repo_id = request.repo_id, "posting agent run");

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .map_err(DispatchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            tracing::warn!(%status, "agent API rejected run");
            return Err(DispatchError::Status {
                status,
                body: truncate(body.trim(), MAX_ERROR_BODY),
            });
        }

        let bytes = response.bytes().map_err(DispatchError::Transport)?;
        let result: AgentRunResult = serde_json::from_slice(&bytes)?;
        tracing::info!(id = %result.id, status = %result.status, "agent run accepted");
        Ok(result)
    }
}

fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}…", &s[..idx]),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Metadata;
    use mockito::Matcher;
    use std::net::TcpListener;
    use std::time::Duration;

    fn config(base_url: &str) -> ApiConfig {
        ApiConfig {
            base_url: base_url.to_string(),
            org_id: "4969".into(),
            api_key: Some("test-token".into()),
            ..Default::default()
        }
    }

    fn request() -> AgentRequest {
        let mut metadata = Metadata::new();
        metadata.insert("issue_type".into(), "lint".into());
        AgentRequest {
            prompt: "Fix linting errors".into(),
            repo_id: 140699,
            metadata,
        }
    }

    #[test]
    fn missing_key_is_configuration_error() {
        let err = AgentClient::new(&ApiConfig::default()).err().unwrap();
        assert!(matches!(err, DispatchError::MissingApiKey));
        assert!(err.is_configuration());
    }

    #[test]
    fn invalid_base_url_is_configuration_error() {
        let err = AgentClient::new(&config("not a url")).err().unwrap();
        assert!(matches!(err, DispatchError::InvalidBaseUrl(_)));
        assert!(err.is_configuration());
    }

    #[test]
    fn posts_request_with_bearer_token() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/v1/organizations/4969/agent/run")
            .match_header("authorization", "Bearer test-token")
            .match_header("content-type", "application/json")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "prompt": "Fix linting errors",
                "repo_id": 140699,
                "metadata": { "issue_type": "lint" }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":"a1","status":"running","web_url":"https://x/a1"}"#)
            .create();

        let client = AgentClient::new(&config(&format!("{}/v1", server.url()))).unwrap();
        let result = client.spawn(&request()).unwrap();

        mock.assert();
        assert_eq!(result.id, "a1");
        assert_eq!(result.status, "running");
        assert_eq!(result.web_url, "https://x/a1");
    }

    #[test]
    fn non_success_status_is_error() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/v1/organizations/4969/agent/run")
            .with_status(401)
            .with_body("invalid token")
            .create();

        let client = AgentClient::new(&config(&format!("{}/v1", server.url()))).unwrap();
        let err = client.spawn(&request()).unwrap_err();
        match err {
            DispatchError::Status { status, body } => {
                assert_eq!(status.as_u16(), 401);
                assert_eq!(body, "invalid token");
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[test]
    fn malformed_body_is_decode_error() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/v1/organizations/4969/agent/run")
            .with_status(200)
            .with_body("<html>gateway</html>")
            .create();

        let client = AgentClient::new(&config(&format!("{}/v1", server.url()))).unwrap();
        let err = client.spawn(&request()).unwrap_err();
        assert!(matches!(err, DispatchError::Decode(_)));
        assert!(!err.is_configuration());
    }

    #[test]
    fn array_body_is_decode_error() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/v1/organizations/4969/agent/run")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create();

        let client = AgentClient::new(&config(&format!("{}/v1", server.url()))).unwrap();
        let err = client.spawn(&request()).unwrap_err();
        assert!(matches!(err, DispatchError::Decode(_)), "{err:?}");
    }

    #[test]
    fn stalled_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            let _held: Vec<_> = listener.incoming().take(1).collect();
            std::thread::sleep(Duration::from_secs(5));
        });

        let mut cfg = config(&format!("http://{addr}/v1"));
        cfg.timeout = Duration::from_millis(300);
        let client = AgentClient::new(&cfg).unwrap();
        let err = client.spawn(&request()).unwrap_err();
        assert!(matches!(err, DispatchError::Transport(_)), "{err:?}");
        assert!(!err.is_configuration());
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "hé…");
        assert_eq!(truncate("ok", 10), "ok");
    }
}
