use serde_json::Value;

use crate::scoring::ScoredTask;
use tasq_config::Config;

/// Builds the query-parse conversation: a schema-bound system prompt carrying
/// the vocabulary and the configured status categories, plus the raw query.
pub fn build_parse_messages(query: &str, cfg: &Config) -> Vec<Value> {
	let schema = serde_json::json!({
		"keywords": ["string"],
		"expanded_keywords": ["string"],
		"priority": "number|null",
		"due": "string|null",
		"status": ["string"],
		"folder": "string|null",
		"tags": ["string"],
		"detected_language": "string|null",
		"time_context": "string|null",
		"corrections": ["string"],
		"confidence": { "keywords": "number" },
	});
	let schema_text = serde_json::to_string_pretty(&schema)
		.unwrap_or_else(|_| "{\"keywords\": [\"string\"]}".to_string());
	let mut status_keys: Vec<&str> = cfg.statuses.keys().map(String::as_str).collect();

	status_keys.sort_unstable();

	let system_prompt = "You are a query understanding engine for a task search system. \
Output must be valid JSON only and must match the provided schema exactly. \
Extract search keywords and structured filters from the user's query in any language. \
Keywords must be content terms only; never include filter phrases, stop words, or polite filler. \
Expanded keywords must include every core keyword plus semantically equivalent terms. \
Do not add explanations or extra fields.";
	let user_prompt = format!(
		"Return JSON matching this exact schema:\n{schema}\nConstraints:\n\
- 'due' must be one of: today, tomorrow, overdue, this-week, next-week, +Nd, or null.\n\
- 'status' values must come from: [{statuses}].\n\
- 'priority' is 1 (highest) to 4 (lowest) or null.\n\
- Provide up to {expansions} equivalent terms per keyword for each of: [{languages}].\n\
Query:\n{query}",
		schema = schema_text,
		statuses = status_keys.join(", "),
		expansions = cfg.search.max_expansions_per_language,
		languages = cfg.search.languages.join(", "),
		query = query,
	);

	vec![
		serde_json::json!({ "role": "system", "content": system_prompt }),
		serde_json::json!({ "role": "user", "content": user_prompt }),
	]
}

/// Builds the analysis conversation: the ranked context rendered as indexed
/// `[TASK-n]` lines, and instructions to cite tasks by those indices only.
pub fn build_analysis_messages(query: &str, context: &[&ScoredTask]) -> Vec<Value> {
	let mut lines = String::new();

	for (position, scored) in context.iter().enumerate() {
		lines.push_str(&render_context_line(position + 1, scored));
		lines.push('\n');
	}

	let system_prompt = "You are a task assistant. Answer the user's question using only \
the numbered task list provided. Reference every task you mention by its exact [TASK-n] \
marker. If none of the tasks answer the question, say so without inventing tasks.";
	let user_prompt = format!("Tasks:\n{lines}\nQuestion:\n{query}");

	vec![
		serde_json::json!({ "role": "system", "content": system_prompt }),
		serde_json::json!({ "role": "user", "content": user_prompt }),
	]
}

fn render_context_line(index: usize, scored: &ScoredTask) -> String {
	let task = &scored.task;
	let mut line = format!("[TASK-{index}] {}", task.text);

	if let Some(priority) = task.priority {
		line.push_str(&format!(" | priority p{priority}"));
	}
	if let Some(due) = task.due_date {
		line.push_str(&format!(" | due {due}"));
	}

	line.push_str(&format!(" | status {}", task.status_category));

	line
}
