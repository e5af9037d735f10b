/*! Chat completion client

Blocking client for OpenAI-compatible `/chat/completions` endpoints.
Each call sends the system prompt and the line as the user message, without streaming.
Calls are never retried.
!*/
use log::{debug, warn};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use super::Annotate;
use crate::error::Error;
use crate::record::{Completion, Outcome, Usage};

pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com";
pub const DEFAULT_MODEL: &str = "deepseek-chat";

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [Message<'a>; 2],
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

impl From<ChatResponse> for Outcome {
    fn from(resp: ChatResponse) -> Outcome {
        let ChatResponse {
            model,
            choices,
            usage,
        } = resp;

        match choices.into_iter().next() {
            Some(choice) => Outcome::Success(Completion {
                model_response: choice.message.content.unwrap_or_default(),
                finish_reason: choice.finish_reason,
                model,
                usage,
            }),
            None => Outcome::failure("response contains no choices"),
        }
    }
}

/// Build a failure description from an error status and its body,
/// using the service's error message when there is one.
fn status_error(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiError>(body) {
        Ok(e) => format!("HTTP {}: {}", status, e.error.message),
        Err(_) if body.trim().is_empty() => format!("HTTP {}", status),
        Err(_) => format!("HTTP {}: {}", status, body.trim()),
    }
}

pub struct ChatClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: Option<f32>,
}

impl ChatClient {
    /// Get a reference to the client's endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Get a reference to the client's model.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn send(&self, prompt: &str, text: &str) -> Result<Outcome, Error> {
        let body = ChatRequest {
            model: &self.model,
            messages: [
                Message {
                    role: "system",
                    content: prompt,
                },
                Message {
                    role: "user",
                    content: text,
                },
            ],
            stream: false,
            temperature: self.temperature,
        };

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Ok(Outcome::failure(status_error(status, &body)));
        }

        let resp: ChatResponse = resp.json()?;
        Ok(resp.into())
    }
}

impl Annotate for ChatClient {
    fn annotate(&self, prompt: &str, text: &str) -> Outcome {
        let outcome = self
            .send(prompt, text)
            .unwrap_or_else(|e| Outcome::failure(e.to_string()));

        match &outcome {
            Outcome::Failure { error } => warn!("annotation failed: {}", error),
            Outcome::Success(c) => debug!("finish reason: {:?}", c.finish_reason),
        }
        outcome
    }
}

pub struct ChatClientBuilder<'a> {
    base_url: Option<&'a str>,
    api_key: Option<&'a str>,
    model: Option<&'a str>,
    temperature: Option<f32>,
}

impl<'a> ChatClientBuilder<'a> {
    /// attempt to build, resort to the following defaults if not set:
    /// - base_url: [DEFAULT_BASE_URL]
    /// - model: [DEFAULT_MODEL]
    /// - temperature: service default
    ///
    /// Fails if no API key has been set.
    pub fn build(&self) -> Result<ChatClient, Error> {
        let api_key = self
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| Error::Custom("No API key provided.".to_string()))?;

        let base_url = self.base_url.unwrap_or(DEFAULT_BASE_URL);
        let endpoint = format!("{}/chat/completions", base_url.trim_end_matches('/'));

        Ok(ChatClient {
            client: Client::builder().build()?,
            endpoint,
            api_key: api_key.to_string(),
            model: self.model.unwrap_or(DEFAULT_MODEL).to_string(),
            temperature: self.temperature,
        })
    }

    pub fn base_url<'b>(&'b mut self, base_url: &'a str) -> &'b mut ChatClientBuilder<'a> {
        self.base_url = Some(base_url);
        self
    }

    pub fn api_key<'b>(&'b mut self, api_key: &'a str) -> &'b mut ChatClientBuilder<'a> {
        self.api_key = Some(api_key);
        self
    }

    pub fn model<'b>(&'b mut self, model: &'a str) -> &'b mut ChatClientBuilder<'a> {
        self.model = Some(model);
        self
    }

    pub fn temperature<'b>(&'b mut self, temperature: Option<f32>) -> &'b mut ChatClientBuilder<'a> {
        self.temperature = temperature;
        self
    }
}

impl<'a> Default for ChatClientBuilder<'a> {
    fn default() -> Self {
        Self {
            base_url: Some(DEFAULT_BASE_URL),
            api_key: None,
            model: Some(DEFAULT_MODEL),
            temperature: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn request_body() {
        let body = ChatRequest {
            model: "deepseek-chat",
            messages: [
                Message {
                    role: "system",
                    content: "sys",
                },
                Message {
                    role: "user",
                    content: "semma",
                },
            ],
            stream: false,
            temperature: None,
        };
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(
            v,
            json!({
                "model": "deepseek-chat",
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": "semma"}
                ],
                "stream": false
            })
        );
    }

    #[test]
    fn response_with_usage() {
        let resp: ChatResponse = serde_json::from_value(json!({
            "id": "abc",
            "object": "chat.completion",
            "model": "deepseek-chat",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Positive"},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 20, "completion_tokens": 1, "total_tokens": 21}
        }))
        .unwrap();

        match Outcome::from(resp) {
            Outcome::Success(c) => {
                assert_eq!(c.model_response, "Positive");
                assert_eq!(c.finish_reason.as_deref(), Some("stop"));
                assert_eq!(c.model.as_deref(), Some("deepseek-chat"));
                assert_eq!(c.usage.unwrap().total_tokens, 21);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn response_without_usage() {
        let resp: ChatResponse = serde_json::from_value(json!({
            "choices": [{"message": {"content": "Negative"}, "finish_reason": "length"}]
        }))
        .unwrap();

        match Outcome::from(resp) {
            Outcome::Success(c) => {
                assert_eq!(c.model_response, "Negative");
                assert!(c.usage.is_none());
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn response_without_choices() {
        let resp: ChatResponse = serde_json::from_value(json!({"choices": []})).unwrap();
        assert!(Outcome::from(resp).is_failure());
    }

    #[test]
    fn error_bodies() {
        let body = r#"{"error": {"message": "Authentication Fails", "type": "authentication_error"}}"#;
        assert_eq!(
            status_error(StatusCode::UNAUTHORIZED, body),
            "HTTP 401 Unauthorized: Authentication Fails"
        );
        assert_eq!(
            status_error(StatusCode::TOO_MANY_REQUESTS, ""),
            "HTTP 429 Too Many Requests"
        );
        assert_eq!(
            status_error(StatusCode::BAD_GATEWAY, "upstream down\n"),
            "HTTP 502 Bad Gateway: upstream down"
        );
    }

    #[test]
    fn builder_needs_key() {
        assert!(ChatClientBuilder::default().build().is_err());
        assert!(ChatClientBuilder::default().api_key("  ").build().is_err());
    }

    #[test]
    fn builder_endpoint() {
        let client = ChatClientBuilder::default()
            .api_key("sk-test")
            .base_url("http://localhost:8080/v1/")
            .build()
            .unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8080/v1/chat/completions");
        assert_eq!(client.model(), DEFAULT_MODEL);
    }

    #[test]
    fn unreachable_service() {
        // nothing listens on port 1
        let client = ChatClientBuilder::default()
            .api_key("sk-test")
            .base_url("http://127.0.0.1:1")
            .build()
            .unwrap();

        assert!(client.annotate("prompt", "x").is_failure());
    }
}
