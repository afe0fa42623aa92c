//! OpenAI Responses API client and output text extraction

use crate::error::{ensure_success, ReviewResult};
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

const SERVICE: &str = "OpenAI";

pub struct OpenAiClient {
    http: Client,
    api_base: String,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(api_base: &str, api_key: &str) -> ReviewResult<Self> {
        let http = Client::builder()
            .user_agent(concat!("prsieve/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Create a response and return the raw JSON payload
    pub async fn create_response(&self, model: &str, input: &str) -> ReviewResult<Value> {
        let url = format!("{}/responses", self.api_base);
        debug!("POST {} (model {})", url, model);

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&json!({ "model": model, "input": input }))
            .send()
            .await?;

        Ok(ensure_success(response, SERVICE).await?.json().await?)
    }
}

/// Collect the generated text from a Responses API payload.
///
/// A non-blank top-level `output_text` wins. Otherwise every content part of
/// every `output` item is inspected and the text parts are joined by newlines.
/// Returns an empty string when nothing usable is found.
pub fn extract_output_text(data: &Value) -> String {
    if let Some(text) = data.get("output_text").and_then(Value::as_str) {
        if !text.trim().is_empty() {
            return text.trim().to_string();
        }
    }

    let Some(output) = data.get("output").and_then(Value::as_array) else {
        return String::new();
    };

    let mut texts = Vec::new();
    for item in output {
        let Some(content) = item.get("content").and_then(Value::as_array) else {
            continue;
        };

        for part in content {
            let kind = part.get("type").and_then(Value::as_str);
            let text = part.get("text");
            match (kind, text) {
                (Some("output_text") | Some("text"), Some(Value::String(s))) => {
                    texts.push(s.clone());
                }
                (Some("output_text"), Some(obj)) => {
                    if let Some(value) = obj.get("value").filter(|v| is_truthy(v)) {
                        texts.push(value_to_string(value));
                    }
                }
                _ => {}
            }
        }
    }

    texts.join("\n").trim().to_string()
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
