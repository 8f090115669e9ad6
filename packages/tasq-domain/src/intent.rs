use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use time::{Date, Duration};

/// Canonical due-date bucket. Always carried as an English token
/// ("today", "overdue", "+3d", ...) regardless of the query language.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum DueFilter {
	Today,
	Tomorrow,
	Overdue,
	ThisWeek,
	NextWeek,
	InDays(u16),
}
impl DueFilter {
	pub fn parse(token: &str) -> Option<Self> {
		match token.trim() {
			"today" => Some(Self::Today),
			"tomorrow" => Some(Self::Tomorrow),
			"overdue" => Some(Self::Overdue),
			"this-week" => Some(Self::ThisWeek),
			"next-week" => Some(Self::NextWeek),
			other => other
				.strip_prefix('+')
				.and_then(|rest| rest.strip_suffix('d'))
				.and_then(|days| days.parse::<u16>().ok())
				.map(Self::InDays),
		}
	}

	pub fn as_token(&self) -> String {
		match self {
			Self::Today => "today".to_string(),
			Self::Tomorrow => "tomorrow".to_string(),
			Self::Overdue => "overdue".to_string(),
			Self::ThisWeek => "this-week".to_string(),
			Self::NextWeek => "next-week".to_string(),
			Self::InDays(days) => format!("+{days}d"),
		}
	}

	/// Whether a task's due date falls inside this bucket. Tasks without a due
	/// date never match a due filter.
	pub fn matches(&self, due: Option<Date>, today: Date) -> bool {
		let Some(due) = due else { return false };

		match self {
			Self::Today => due == today,
			Self::Tomorrow => due == today + Duration::days(1),
			Self::Overdue => due < today,
			Self::ThisWeek => due >= today && due < today + Duration::days(7),
			Self::NextWeek =>
				due >= today + Duration::days(7) && due < today + Duration::days(14),
			Self::InDays(days) => due >= today && due <= today + Duration::days(i64::from(*days)),
		}
	}
}
impl From<DueFilter> for String {
	fn from(value: DueFilter) -> Self {
		value.as_token()
	}
}
impl TryFrom<String> for DueFilter {
	type Error = String;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::parse(&value).ok_or_else(|| format!("Unknown due token: {value}."))
	}
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct IntentDiagnostics {
	pub detected_language: Option<String>,
	#[serde(default)]
	pub corrections: Vec<String>,
	/// Per-field confidence reported by the AI parser, 0.0-1.0.
	#[serde(default)]
	pub confidence: HashMap<String, f32>,
	pub used_natural_language: bool,
	/// Canonical due token the parser inferred from phrasing, kept in sync
	/// with the due filter (see [`Intent::reconcile_time_context`]).
	pub time_context: Option<String>,
}

/// Normalized representation of a query: keywords plus structured filters.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Intent {
	/// Terms literally extracted from the query, overlap-deduplicated.
	pub core_keywords: Vec<String>,
	/// Semantic widening of the core keywords. Empty unless the AI parser ran
	/// and succeeded; always a superset of the core keywords when present.
	#[serde(default)]
	pub expanded_keywords: Vec<String>,
	pub priority: Option<u8>,
	pub due: Option<DueFilter>,
	/// Status category keys; valid values are exactly the configured key set.
	#[serde(default)]
	pub status: Vec<String>,
	pub folder: Option<String>,
	#[serde(default)]
	pub tags: Vec<String>,
	#[serde(default)]
	pub diagnostics: IntentDiagnostics,
}
impl Intent {
	pub fn has_filters(&self) -> bool {
		self.priority.is_some()
			|| self.due.is_some()
			|| !self.status.is_empty()
			|| self.folder.is_some()
			|| !self.tags.is_empty()
	}

	/// Keyword list scoring should match against: the expanded set when the AI
	/// parser produced one, otherwise the core set.
	pub fn search_keywords(&self) -> &[String] {
		if self.expanded_keywords.is_empty() {
			&self.core_keywords
		} else {
			&self.expanded_keywords
		}
	}

	/// Forces the diagnostic time context to agree with the due filter. When a
	/// filter is set the filter wins; the displaced diagnostic token is
	/// returned so the caller can log the mismatch. Two different truths are
	/// never kept.
	pub fn reconcile_time_context(&mut self) -> Option<String> {
		let Some(due) = self.due else { return None };
		let token = due.as_token();

		match self.diagnostics.time_context.take() {
			Some(context) if context != token => {
				self.diagnostics.time_context = Some(token);

				Some(context)
			},
			_ => {
				self.diagnostics.time_context = Some(token);

				None
			},
		}
	}
}

/// Deduplicates a keyword list by overlap: candidates are considered
/// longest-first and kept only when they are not a substring of an already
/// kept keyword. The result never contains an element that is a substring of
/// another, so the scoring engine cannot double-count.
pub fn dedup_overlapping(keywords: Vec<String>) -> Vec<String> {
	let mut candidates: Vec<String> =
		keywords.into_iter().map(|kw| kw.trim().to_string()).filter(|kw| !kw.is_empty()).collect();

	candidates.sort_by(|a, b| {
		b.chars().count().cmp(&a.chars().count()).then_with(|| a.cmp(b))
	});

	let mut kept: Vec<String> = Vec::new();

	for candidate in candidates {
		let lowered = candidate.to_lowercase();

		if !kept.iter().any(|existing| existing.to_lowercase().contains(&lowered)) {
			kept.push(candidate);
		}
	}

	kept
}

#[cfg(test)]
mod tests {
	use super::{DueFilter, Intent, dedup_overlapping};
	use time::macros::date;

	#[test]
	fn due_tokens_round_trip() {
		for token in ["today", "tomorrow", "overdue", "this-week", "next-week", "+3d"] {
			let filter = DueFilter::parse(token).expect("parse failed");

			assert_eq!(filter.as_token(), token);
		}

		assert_eq!(DueFilter::parse("next month"), None);
	}

	#[test]
	fn due_buckets_match_dates() {
		let today = date!(2026 - 03 - 02);

		assert!(DueFilter::Today.matches(Some(today), today));
		assert!(DueFilter::Overdue.matches(Some(date!(2026 - 02 - 27)), today));
		assert!(!DueFilter::Overdue.matches(Some(today), today));
		assert!(DueFilter::ThisWeek.matches(Some(date!(2026 - 03 - 08)), today));
		assert!(!DueFilter::ThisWeek.matches(Some(date!(2026 - 03 - 09)), today));
		assert!(DueFilter::NextWeek.matches(Some(date!(2026 - 03 - 09)), today));
		assert!(DueFilter::InDays(3).matches(Some(date!(2026 - 03 - 05)), today));
		assert!(!DueFilter::InDays(3).matches(Some(date!(2026 - 03 - 06)), today));
		assert!(!DueFilter::Today.matches(None, today));
	}

	#[test]
	fn dedup_removes_substrings() {
		let kept = dedup_overlapping(vec![
			"report".to_string(),
			"quarterly report".to_string(),
			"port".to_string(),
			"budget".to_string(),
		]);

		assert_eq!(kept, vec!["quarterly report".to_string(), "budget".to_string()]);

		for (i, a) in kept.iter().enumerate() {
			for (j, b) in kept.iter().enumerate() {
				assert!(i == j || !a.contains(b.as_str()), "{b} is a substring of {a}");
			}
		}
	}

	#[test]
	fn reconcile_prefers_the_filter_value() {
		let mut intent = Intent {
			due: Some(DueFilter::Overdue),
			diagnostics: super::IntentDiagnostics {
				time_context: Some("today".to_string()),
				..Default::default()
			},
			..Default::default()
		};
		let displaced = intent.reconcile_time_context();

		assert_eq!(displaced, Some("today".to_string()));
		assert_eq!(intent.diagnostics.time_context.as_deref(), Some("overdue"));

		// Already consistent: nothing displaced.
		assert_eq!(intent.reconcile_time_context(), None);
	}

	#[test]
	fn search_keywords_prefer_expansion() {
		let mut intent = Intent { core_keywords: vec!["chair".to_string()], ..Default::default() };

		assert_eq!(intent.search_keywords(), ["chair".to_string()]);

		intent.expanded_keywords = vec!["chair".to_string(), "seat".to_string()];

		assert_eq!(intent.search_keywords().len(), 2);
	}
}
