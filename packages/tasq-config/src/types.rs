use std::collections::HashMap;

use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub search: Search,
	#[serde(default)]
	pub scoring: Scoring,
	#[serde(default)]
	pub ranking: Ranking,
	pub providers: Providers,
	#[serde(default)]
	pub vocabulary: Vocabulary,
	/// Keyed by an arbitrary category name, e.g. "open", "important", "bookmark".
	/// The key set of this map is the complete set of valid task status categories.
	pub statuses: HashMap<String, StatusCategory>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Search {
	/// Languages keyword expansion is requested in, as lowercase tags, e.g. ["en", "zh"].
	pub languages: Vec<String>,
	/// Semantically equivalent terms requested per core keyword per language.
	pub max_expansions_per_language: u32,
	/// Fraction of the maximum possible composite score a task must reach to
	/// survive the quality filter.
	pub quality_filter_percentage: f32,
	/// Result cap for Simple and Smart mode responses, and for the Chat mode
	/// fallback list.
	pub max_results: u32,
	/// Number of ranked tasks handed to the analysis step as context in Chat mode.
	pub max_context_tasks: u32,
}
impl Default for Search {
	fn default() -> Self {
		Self {
			languages: vec!["en".to_string()],
			max_expansions_per_language: 5,
			quality_filter_percentage: 0.3,
			max_results: 50,
			max_context_tasks: 20,
		}
	}
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Scoring {
	pub coefficients: Coefficients,
	pub urgency: Urgency,
}

/// Relative importance of the four scoring components. A coefficient of zero
/// removes that component from the weighted average entirely.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Coefficients {
	pub relevance: f32,
	pub due_date: f32,
	pub priority: f32,
	pub status: f32,
}
impl Default for Coefficients {
	fn default() -> Self {
		Self { relevance: 20.0, due_date: 4.0, priority: 1.0, status: 1.0 }
	}
}

/// Due-date urgency curve. The defaults are tuning choices, not contracts.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Urgency {
	pub missing: f32,
	pub today: f32,
	pub within_week: f32,
	pub within_month: f32,
	pub later: f32,
	pub overdue_floor: f32,
	pub overdue_slope_days: f32,
}
impl Default for Urgency {
	fn default() -> Self {
		Self {
			missing: 0.1,
			today: 1.0,
			within_week: 0.8,
			within_month: 0.5,
			later: 0.2,
			overdue_floor: 0.5,
			overdue_slope_days: 30.0,
		}
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Ranking {
	/// Ordered tie-break criteria. "relevance" is always present and always
	/// first; validation rejects anything else.
	pub criteria: Vec<String>,
}
impl Default for Ranking {
	fn default() -> Self {
		Self {
			criteria: vec![
				"relevance".to_string(),
				"due-date".to_string(),
				"priority".to_string(),
			],
		}
	}
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub query_parser: LlmProviderConfig,
	pub analysis: LlmProviderConfig,
}

#[derive(Debug, Deserialize)]
pub struct LlmProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub temperature: f32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

/// User-supplied vocabulary merged on top of the built-in term tables.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
	/// Phrase to priority level (1-4), e.g. "asap" = 1.
	pub priority_terms: HashMap<String, u8>,
	/// Phrase to canonical due token, e.g. "deadline" = "today".
	pub due_terms: HashMap<String, String>,
	/// Extra stop words removed before keyword extraction.
	pub stop_words: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusCategory {
	/// Raw checkbox markers that map to this category, e.g. [" ", "/"].
	pub symbols: Vec<String>,
	/// Scoring weight in the range 0.0-1.0.
	pub score: f32,
	pub display_name: String,
	/// Tie-break ordering for display only.
	pub display_priority: i32,
}
