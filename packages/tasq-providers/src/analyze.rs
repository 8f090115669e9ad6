use serde_json::Value;

use crate::{Error, Result, Usage};

/// Sends the analysis messages to the configured model and returns its prose
/// answer plus any usage accounting.
pub async fn analyze(
	cfg: &tasq_config::LlmProviderConfig,
	messages: &[Value],
) -> Result<(String, Option<Usage>)> {
	let json = crate::chat(cfg, messages).await?;
	let usage = crate::usage_of(&json);
	let content = crate::content_of(&json)?.trim().to_string();

	if content.is_empty() {
		return Err(Error::InvalidResponse {
			message: "Analysis content is empty.".to_string(),
		});
	}

	Ok((content, usage))
}
