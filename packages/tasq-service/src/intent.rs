use std::collections::HashMap;

use serde_json::Value;
use tracing::warn;

use crate::{Error, Result};
use tasq_config::StatusCategory;
use tasq_domain::{Intent, Vocabulary, dedup_overlapping};

const EXPECTED_KEYS: &[&str] =
	&["keywords", "core_keywords", "expanded_keywords", "priority", "due", "status", "folder", "tags"];

/// Maps a model's JSON payload onto an [`Intent`], repairing what can be
/// repaired: missing core keywords are re-inserted into the expansion, due
/// phrases are canonicalized, unknown status keys are dropped, and a
/// diverging time context yields to the due filter. A payload carrying none
/// of the expected keys is a parser failure, not a repairable one.
pub fn intent_from_payload(
	payload: &Value,
	vocab: &Vocabulary,
	statuses: &HashMap<String, StatusCategory>,
	model: &str,
) -> Result<Intent> {
	let Some(object) = payload.as_object() else {
		return Err(Error::ParserFailure {
			message: "Payload is not a JSON object.".to_string(),
			model: model.to_string(),
		});
	};

	if !object.keys().any(|key| EXPECTED_KEYS.contains(&key.as_str())) {
		return Err(Error::ParserFailure {
			message: "Payload carries none of the expected intent keys.".to_string(),
			model: model.to_string(),
		});
	}

	let mut intent = Intent::default();

	intent.core_keywords = dedup_overlapping(string_list(
		object.get("keywords").or_else(|| object.get("core_keywords")),
	));
	intent.priority = object.get("priority").and_then(parse_priority);

	if let Some(due) = object.get("due").and_then(Value::as_str) {
		intent.due = vocab.canonical_due(due);

		if intent.due.is_none() {
			warn!("Dropping unrecognized due phrase from the model: {due}.");
		}
	}

	for status in string_list(object.get("status")) {
		let key = status.to_lowercase();

		if statuses.contains_key(&key) {
			intent.status.push(key);
		} else {
			warn!("Dropping unknown status category from the model: {status}.");
		}
	}

	intent.status.sort();
	intent.status.dedup();
	intent.folder = object
		.get("folder")
		.and_then(Value::as_str)
		.map(|folder| folder.trim().trim_end_matches('/').to_string())
		.filter(|folder| !folder.is_empty());
	intent.tags = string_list(object.get("tags"))
		.into_iter()
		.map(|tag| tag.trim_start_matches('#').to_lowercase())
		.filter(|tag| !tag.is_empty())
		.collect();
	intent.expanded_keywords = repair_expansion(
		&intent.core_keywords,
		string_list(object.get("expanded_keywords")),
	);

	intent.diagnostics.used_natural_language = true;
	intent.diagnostics.detected_language = object
		.get("detected_language")
		.or_else(|| object.get("language"))
		.and_then(Value::as_str)
		.map(str::to_string);
	intent.diagnostics.corrections = string_list(object.get("corrections"));
	intent.diagnostics.time_context =
		object.get("time_context").and_then(Value::as_str).map(str::to_string);

	if let Some(confidence) = object.get("confidence").and_then(Value::as_object) {
		for (field, value) in confidence {
			if let Some(value) = value.as_f64() {
				intent.diagnostics.confidence.insert(field.clone(), value as f32);
			}
		}
	}

	if let Some(displaced) = intent.reconcile_time_context() {
		warn!("Time context {displaced} disagreed with the due filter; the filter wins.");
	}

	Ok(intent)
}

/// Expanded keywords must contain every core keyword; anything the model
/// dropped is re-inserted. Only exact duplicates are removed here, since an
/// expansion legitimately carries both a phrase and its parts.
fn repair_expansion(core: &[String], expanded: Vec<String>) -> Vec<String> {
	if expanded.is_empty() {
		return Vec::new();
	}

	let mut repaired: Vec<String> = Vec::new();

	for keyword in expanded.into_iter().map(|kw| kw.trim().to_string()) {
		if !keyword.is_empty() && !repaired.iter().any(|kept| kept.eq_ignore_ascii_case(&keyword)) {
			repaired.push(keyword);
		}
	}

	for keyword in core {
		if !repaired.iter().any(|kept| kept.eq_ignore_ascii_case(keyword)) {
			repaired.push(keyword.clone());
		}
	}

	repaired
}

fn string_list(value: Option<&Value>) -> Vec<String> {
	value
		.and_then(Value::as_array)
		.map(|items| {
			items
				.iter()
				.filter_map(Value::as_str)
				.map(|item| item.trim().to_string())
				.filter(|item| !item.is_empty())
				.collect()
		})
		.unwrap_or_default()
}

fn parse_priority(value: &Value) -> Option<u8> {
	let level = match value {
		Value::Number(number) => u8::try_from(number.as_u64()?).ok()?,
		Value::String(text) => {
			let text = text.trim().to_lowercase();

			text.strip_prefix('p').unwrap_or(&text).parse().ok()?
		},
		_ => return None,
	};

	(1..=4).contains(&level).then_some(level)
}
