pub mod analyze;
pub mod parse;

mod error;
pub use error::{Error, Result};

use std::time::Duration;

use reqwest::{
	Client,
	header::{AUTHORIZATION, HeaderMap, HeaderName},
};
use serde_json::{Map, Value};

pub fn auth_headers(api_key: &str, default_headers: &Map<String, Value>) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();

	headers.insert(AUTHORIZATION, format!("Bearer {api_key}").parse()?);

	for (key, value) in default_headers {
		let Some(raw) = value.as_str() else {
			return Err(Error::InvalidConfig {
				message: "Default header values must be strings.".to_string(),
			});
		};

		headers.insert(HeaderName::from_bytes(key.as_bytes())?, raw.parse()?);
	}

	Ok(headers)
}

/// Token counts reported by a provider, when it reports any.
#[derive(Clone, Copy, Debug, Default, serde::Deserialize, serde::Serialize)]
pub struct Usage {
	#[serde(default)]
	pub prompt_tokens: u64,
	#[serde(default)]
	pub completion_tokens: u64,
}
impl Usage {
	pub fn merge(&mut self, other: Self) {
		self.prompt_tokens += other.prompt_tokens;
		self.completion_tokens += other.completion_tokens;
	}
}

async fn chat(cfg: &tasq_config::LlmProviderConfig, messages: &[Value]) -> Result<Value> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"model": cfg.model,
		"temperature": cfg.temperature,
		"messages": messages,
	});
	let res = client
		.post(&url)
		.headers(auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json = res.error_for_status()?.json().await?;

	Ok(json)
}

fn content_of(json: &Value) -> Result<&str> {
	json.get("choices")
		.and_then(|v| v.as_array())
		.and_then(|arr| arr.first())
		.and_then(|choice| choice.get("message"))
		.and_then(|msg| msg.get("content"))
		.and_then(|c| c.as_str())
		.ok_or_else(|| Error::InvalidResponse {
			message: "Chat response is missing message content.".to_string(),
		})
}

fn usage_of(json: &Value) -> Option<Usage> {
	json.get("usage").and_then(|usage| serde_json::from_value(usage.clone()).ok())
}

/// Strips a Markdown code fence around the content, if any. Models wrap JSON
/// in ```json fences often enough that this cannot be treated as a failure.
fn strip_fences(content: &str) -> &str {
	let trimmed = content.trim();
	let Some(rest) = trimmed.strip_prefix("```") else { return trimmed };
	let rest = rest.strip_prefix("json").unwrap_or(rest);
	let rest = rest.strip_suffix("```").unwrap_or(rest);

	rest.trim()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn extracts_choice_content_and_usage() {
		let json = serde_json::json!({
			"choices": [{ "message": { "content": "hello" } }],
			"usage": { "prompt_tokens": 12, "completion_tokens": 3 },
		});

		assert_eq!(content_of(&json).expect("content missing"), "hello");

		let usage = usage_of(&json).expect("usage missing");

		assert_eq!(usage.prompt_tokens, 12);
		assert_eq!(usage.completion_tokens, 3);
	}

	#[test]
	fn missing_content_is_an_invalid_response() {
		let json = serde_json::json!({ "choices": [] });

		assert!(matches!(content_of(&json), Err(Error::InvalidResponse { .. })));
		assert!(usage_of(&json).is_none());
	}

	#[test]
	fn fences_are_stripped() {
		assert_eq!(strip_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
		assert_eq!(strip_fences("```\n{}\n```"), "{}");
		assert_eq!(strip_fences("{\"a\": 1}"), "{\"a\": 1}");
	}

	#[test]
	fn rejects_non_string_default_headers() {
		let mut headers = serde_json::Map::new();

		headers.insert("x-count".to_string(), serde_json::json!(3));

		assert!(matches!(
			auth_headers("key", &headers),
			Err(Error::InvalidConfig { .. })
		));
	}
}
