//! Shared fixtures for service tests: canned configurations and a chainable
//! task builder. No I/O.

use std::collections::HashMap;

use time::Date;

use tasq_config::{
	Config, LlmProviderConfig, Providers, Ranking, Scoring, Search, StatusCategory, Vocabulary,
};
use tasq_domain::Task;

pub fn llm_provider(model: &str) -> LlmProviderConfig {
	LlmProviderConfig {
		provider_id: "p".to_string(),
		api_base: "http://localhost".to_string(),
		api_key: "key".to_string(),
		path: "/v1/chat/completions".to_string(),
		model: model.to_string(),
		temperature: 0.1,
		timeout_ms: 1_000,
		default_headers: serde_json::Map::new(),
	}
}

/// A complete valid configuration with "open", "important", and "done"
/// status categories and default scoring, ranking, and vocabulary.
pub fn config() -> Config {
	let mut statuses = HashMap::new();

	statuses.insert("open".to_string(), StatusCategory {
		symbols: vec![" ".to_string()],
		score: 0.8,
		display_name: "Open".to_string(),
		display_priority: 1,
	});
	statuses.insert("important".to_string(), StatusCategory {
		symbols: vec!["!".to_string()],
		score: 1.0,
		display_name: "Important".to_string(),
		display_priority: 0,
	});
	statuses.insert("done".to_string(), StatusCategory {
		symbols: vec!["x".to_string()],
		score: 0.0,
		display_name: "Completed".to_string(),
		display_priority: 9,
	});

	Config {
		search: Search::default(),
		scoring: Scoring::default(),
		ranking: Ranking::default(),
		providers: Providers {
			query_parser: llm_provider("parser-model"),
			analysis: llm_provider("analysis-model"),
		},
		vocabulary: Vocabulary::default(),
		statuses,
	}
}

/// Chainable task fixture. Starts open, unprioritized, undated.
pub struct TaskBuilder {
	task: Task,
}
impl TaskBuilder {
	pub fn new(id: &str, text: &str) -> Self {
		Self {
			task: Task {
				id: id.to_string(),
				text: text.to_string(),
				file_path: "inbox/todo.md".to_string(),
				line_number: 1,
				priority: None,
				due_date: None,
				created_date: None,
				status_category: "open".to_string(),
				tags: Vec::new(),
			},
		}
	}

	pub fn file_path(mut self, file_path: &str) -> Self {
		self.task.file_path = file_path.to_string();
		self
	}

	pub fn priority(mut self, priority: u8) -> Self {
		self.task.priority = Some(priority);
		self
	}

	pub fn due(mut self, due: Date) -> Self {
		self.task.due_date = Some(due);
		self
	}

	pub fn created(mut self, created: Date) -> Self {
		self.task.created_date = Some(created);
		self
	}

	pub fn status(mut self, category: &str) -> Self {
		self.task.status_category = category.to_string();
		self
	}

	pub fn tags(mut self, tags: &[&str]) -> Self {
		self.task.tags = tags.iter().map(|tag| tag.to_string()).collect();
		self
	}

	pub fn build(self) -> Task {
		self.task
	}
}

pub fn task(id: &str, text: &str) -> TaskBuilder {
	TaskBuilder::new(id, text)
}
