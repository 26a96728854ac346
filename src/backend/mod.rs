//! HTTP client for the GitHub-automation backend.
//!
//! Every call spawns one task on the tokio runtime and reports its outcome
//! to the UI thread as an [`AppEvent`]. There are no retries, no client-side
//! timeout, and no cancellation: once a request is issued it runs to
//! completion and completions may arrive in any order.

use crate::event::AppEvent;
use crate::intent;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::mpsc;
use thiserror::Error;
use tokio::runtime::Handle;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned {0}")]
    Status(reqwest::StatusCode),

    #[error("{0}")]
    Api(String),
}

impl BackendError {
    /// The backend-provided error text, when the response body carried one.
    pub fn api_message(&self) -> Option<String> {
        match self {
            Self::Api(message) => Some(message.clone()),
            Self::Transport(_) | Self::Status(_) => None,
        }
    }
}

/// Body of a `POST /github-action` request. The optional fields are only
/// present when the prompt matched the guided create-PR phrasing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionRequest {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl ActionRequest {
    pub fn from_prompt(prompt: String) -> Self {
        match intent::parse_create_pr(&prompt) {
            Some(args) => Self {
                prompt,
                branch_name: Some(args.branch_name),
                title: Some(args.title),
                body: Some(args.body),
            },
            None => Self {
                prompt,
                branch_name: None,
                title: None,
                body: None,
            },
        }
    }
}

#[derive(Serialize)]
struct CredentialsBody<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct TokenBody {
    token: String,
}

#[derive(Deserialize)]
struct ResultBody {
    #[serde(default)]
    result: Value,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Clone)]
pub struct BackendClient {
    base_url: String,
    http: reqwest::Client,
    runtime: Handle,
    tx: mpsc::Sender<AppEvent>,
}

impl BackendClient {
    pub fn new(base_url: String, runtime: Handle, tx: mpsc::Sender<AppEvent>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            runtime,
            tx,
        }
    }

    pub fn login(&self, username: String, password: String) {
        let client = self.clone();
        self.runtime.spawn(async move {
            let event = match client.post_login(&username, &password).await {
                Ok(token) => AppEvent::LoginSucceeded { token },
                Err(err) => {
                    tracing::warn!("login request failed: {err}");
                    AppEvent::LoginFailed {
                        error: err.api_message(),
                    }
                }
            };
            let _ = client.tx.send(event);
        });
    }

    pub fn signup(&self, username: String, password: String) {
        let client = self.clone();
        self.runtime.spawn(async move {
            let event = match client.post_signup(&username, &password).await {
                Ok(()) => AppEvent::SignupSucceeded,
                Err(err) => {
                    tracing::warn!("signup request failed: {err}");
                    AppEvent::SignupFailed {
                        error: err.api_message(),
                    }
                }
            };
            let _ = client.tx.send(event);
        });
    }

    pub fn github_action(&self, token: String, request: ActionRequest) {
        let client = self.clone();
        self.runtime.spawn(async move {
            let prompt = request.prompt.clone();
            let event = match client.post_action(&token, &request).await {
                Ok(result) => AppEvent::ActionCompleted { prompt, result },
                Err(err) => {
                    tracing::warn!("github-action request failed: {err}");
                    AppEvent::ActionFailed {
                        error: err.api_message(),
                    }
                }
            };
            let _ = client.tx.send(event);
        });
    }

    async fn post_login(&self, username: &str, password: &str) -> Result<String, BackendError> {
        let response = self
            .http
            .post(format!("{}/login", self.base_url))
            .json(&CredentialsBody { username, password })
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.json::<TokenBody>().await?.token)
    }

    async fn post_signup(&self, username: &str, password: &str) -> Result<(), BackendError> {
        let response = self
            .http
            .post(format!("{}/signup", self.base_url))
            .json(&CredentialsBody { username, password })
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    async fn post_action(
        &self,
        token: &str,
        request: &ActionRequest,
    ) -> Result<Value, BackendError> {
        let response = self
            .http
            .post(format!("{}/github-action", self.base_url))
            .bearer_auth(token)
            .json(request)
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.json::<ResultBody>().await?.result)
    }
}

// Non-success responses usually carry `{"error": "..."}`; anything else
// degrades to a bare status error so the views can show their fallback text.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    match response.json::<ErrorBody>().await {
        Ok(ErrorBody {
            error: Some(message),
        }) => Err(BackendError::Api(message)),
        _ => Err(BackendError::Status(status)),
    }
}
