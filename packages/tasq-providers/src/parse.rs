use serde_json::Value;

use crate::{Error, Result, Usage};

/// Sends the query-parse messages to the configured model and returns the raw
/// JSON payload plus any usage accounting. One attempt only: a failure here is
/// a signal the caller degrades on, not something to paper over with retries.
pub async fn parse_query(
	cfg: &tasq_config::LlmProviderConfig,
	messages: &[Value],
) -> Result<(Value, Option<Usage>)> {
	let json = crate::chat(cfg, messages).await?;
	let usage = crate::usage_of(&json);
	let content = crate::content_of(&json)?;
	let payload: Value =
		serde_json::from_str(crate::strip_fences(content)).map_err(|_| Error::InvalidResponse {
			message: "Parser content is not valid JSON.".to_string(),
		})?;

	if !payload.is_object() {
		return Err(Error::InvalidResponse {
			message: "Parser content is not a JSON object.".to_string(),
		});
	}

	Ok((payload, usage))
}
