use std::collections::HashMap;

use time::Date;
use tracing::debug;

use crate::ranking::Criterion;
use tasq_config::{Coefficients, Scoring, StatusCategory, Urgency};
use tasq_domain::{Intent, Task};

/// Which score components participate in the weighted average for a query.
/// Relevance participates when the query carries keywords; a due, priority,
/// or status component joins when the intent filters on it or the ranking
/// criteria reference it. A keyword-less filter query is judged on its
/// filters alone, so the quality threshold cannot starve it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActiveComponents {
	pub relevance: bool,
	pub due_date: bool,
	pub priority: bool,
	pub status: bool,
}
impl ActiveComponents {
	pub fn for_query(intent: &Intent, criteria: &[Criterion]) -> Self {
		Self {
			relevance: !intent.search_keywords().is_empty(),
			due_date: intent.due.is_some() || criteria.contains(&Criterion::DueDate),
			priority: intent.priority.is_some() || criteria.contains(&Criterion::Priority),
			status: !intent.status.is_empty(),
		}
	}
}

/// A task with its per-component scores and composite. Lives for one request.
#[derive(Clone, Debug, serde::Serialize)]
pub struct ScoredTask {
	pub task: Task,
	pub relevance: f32,
	pub due_date: f32,
	pub priority: f32,
	pub status: f32,
	pub final_score: f32,
}

pub fn score_tasks(
	tasks: &[Task],
	intent: &Intent,
	scoring: &Scoring,
	statuses: &HashMap<String, StatusCategory>,
	active: ActiveComponents,
	today: Date,
) -> Vec<ScoredTask> {
	tasks
		.iter()
		.map(|task| {
			let relevance = relevance_score(task, intent);
			let due_date = urgency_score(task.due_date, today, &scoring.urgency);
			let priority = priority_score(task.priority);
			let status = status_score(&task.status_category, statuses);
			let weighted = weighted_sum(
				&scoring.coefficients,
				active,
				[relevance, due_date, priority, status],
			);
			let max_possible = max_possible_score(&scoring.coefficients, active);
			let final_score = if max_possible > 0.0 { weighted / max_possible } else { 0.0 };

			ScoredTask { task: task.clone(), relevance, due_date, priority, status, final_score }
		})
		.collect()
}

/// Keyword match quality in [0, 1]. Core keywords contribute a 0.2-weighted
/// bonus on top of the full (expanded when available) keyword ratio, so a
/// task hitting the user's literal terms outranks one hitting only synonyms.
pub fn relevance_score(task: &Task, intent: &Intent) -> f32 {
	let all = intent.search_keywords();

	if all.is_empty() {
		return 0.0;
	}

	let mut haystack = task.text.to_lowercase();

	for tag in &task.tags {
		haystack.push(' ');
		haystack.push_str(&tag.to_lowercase());
	}

	let matches = |keyword: &String| haystack.contains(&keyword.to_lowercase());
	let core = &intent.core_keywords;
	let core_ratio = if core.is_empty() {
		0.0
	} else {
		core.iter().filter(|kw| matches(kw)).count() as f32 / core.len() as f32
	};
	let all_ratio = all.iter().filter(|kw| matches(kw)).count() as f32 / all.len() as f32;

	(core_ratio * 0.2 + all_ratio).clamp(0.0, 1.0)
}

/// Due-date urgency. Overdue tasks decay linearly from the today value toward
/// the floor as they age, so a task one day late still screams louder than a
/// task due next month.
pub fn urgency_score(due: Option<Date>, today: Date, curve: &Urgency) -> f32 {
	let Some(due) = due else { return curve.missing };
	let days = (due - today).whole_days();

	if days < 0 {
		(1.0 + days as f32 / curve.overdue_slope_days).max(curve.overdue_floor)
	} else if days == 0 {
		curve.today
	} else if days <= 7 {
		curve.within_week
	} else if days <= 30 {
		curve.within_month
	} else {
		curve.later
	}
}

pub fn priority_score(priority: Option<u8>) -> f32 {
	match priority {
		Some(1) => 0.9,
		Some(2) => 0.7,
		Some(3) => 0.5,
		Some(4) => 0.3,
		_ => 0.0,
	}
}

/// Status weight from configuration. An unknown category key is a config gap,
/// not a failure: it scores neutral and is logged.
pub fn status_score(category: &str, statuses: &HashMap<String, StatusCategory>) -> f32 {
	match statuses.get(category) {
		Some(status) => status.score,
		None => {
			debug!("Unknown status category {category}; scoring it neutral.");

			0.5
		},
	}
}

pub fn max_possible_score(coefficients: &Coefficients, active: ActiveComponents) -> f32 {
	weighted_sum(coefficients, active, [1.0, 1.0, 1.0, 1.0])
}

/// Drops tasks whose composite falls below the configured fraction of the
/// maximum possible score for the active component set. Scores are already
/// normalized by that maximum, so the fraction applies directly.
pub fn apply_quality_filter(scored: Vec<ScoredTask>, percentage: f32) -> Vec<ScoredTask> {
	scored.into_iter().filter(|task| task.final_score >= percentage).collect()
}

fn weighted_sum(
	coefficients: &Coefficients,
	active: ActiveComponents,
	[relevance, due_date, priority, status]: [f32; 4],
) -> f32 {
	let mut sum = 0.0;

	if active.relevance {
		sum += relevance * coefficients.relevance;
	}
	if active.due_date {
		sum += due_date * coefficients.due_date;
	}
	if active.priority {
		sum += priority * coefficients.priority;
	}
	if active.status {
		sum += status * coefficients.status;
	}

	sum
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use super::*;
	use tasq_domain::Intent;
	use time::macros::date;

	fn task(text: &str) -> Task {
		Task {
			id: "t1".to_string(),
			text: text.to_string(),
			file_path: "todo.md".to_string(),
			line_number: 1,
			priority: None,
			due_date: None,
			created_date: None,
			status_category: "open".to_string(),
			tags: Vec::new(),
		}
	}

	fn intent(core: &[&str], expanded: &[&str]) -> Intent {
		Intent {
			core_keywords: core.iter().map(|kw| kw.to_string()).collect(),
			expanded_keywords: expanded.iter().map(|kw| kw.to_string()).collect(),
			..Default::default()
		}
	}

	const ALL_ACTIVE: ActiveComponents =
		ActiveComponents { relevance: true, due_date: true, priority: true, status: true };

	#[test]
	fn relevance_rewards_core_hits_over_synonyms() {
		let literal = task("buy a comfortable chair");
		let synonym = task("buy comfy seating");
		let intent = intent(&["comfortable chair"], &["comfortable chair", "comfy seating"]);

		let literal_score = relevance_score(&literal, &intent);
		let synonym_score = relevance_score(&synonym, &intent);

		assert!(literal_score > synonym_score);
		assert!(literal_score <= 1.0);
		assert!(synonym_score > 0.0);
	}

	#[test]
	fn relevance_is_zero_without_keywords() {
		assert_eq!(relevance_score(&task("anything"), &Intent::default()), 0.0);
	}

	#[test]
	fn urgency_decays_with_lateness_and_distance() {
		let curve = Urgency::default();
		let today = date!(2026 - 05 - 10);

		assert_eq!(urgency_score(None, today, &curve), 0.1);
		assert_eq!(urgency_score(Some(today), today, &curve), 1.0);

		let one_late = urgency_score(Some(date!(2026 - 05 - 09)), today, &curve);
		let month_late = urgency_score(Some(date!(2026 - 04 - 01)), today, &curve);

		assert!(one_late > 0.9 && one_late < 1.0);
		assert_eq!(month_late, 0.5);
		assert_eq!(urgency_score(Some(date!(2026 - 05 - 15)), today, &curve), 0.8);
		assert_eq!(urgency_score(Some(date!(2026 - 06 - 05)), today, &curve), 0.5);
		assert_eq!(urgency_score(Some(date!(2026 - 07 - 01)), today, &curve), 0.2);
	}

	#[test]
	fn final_scores_stay_in_unit_range() {
		let mut due_soon = task("urgent report");

		due_soon.priority = Some(1);
		due_soon.due_date = Some(date!(2026 - 05 - 10));

		let mut statuses = HashMap::new();

		statuses.insert("open".to_string(), StatusCategory {
			symbols: vec![" ".to_string()],
			score: 1.0,
			display_name: "Open".to_string(),
			display_priority: 0,
		});

		let scored = score_tasks(
			&[due_soon],
			&intent(&["report"], &[]),
			&Scoring::default(),
			&statuses,
			ALL_ACTIVE,
			date!(2026 - 05 - 10),
		);

		assert_eq!(scored.len(), 1);
		assert!(scored[0].final_score > 0.0 && scored[0].final_score <= 1.0);
	}

	#[test]
	fn max_possible_reacts_to_the_active_set() {
		let coefficients = Coefficients::default();
		let without_status = ActiveComponents { status: false, ..ALL_ACTIVE };

		assert_eq!(max_possible_score(&coefficients, ALL_ACTIVE), 26.0);
		assert_eq!(max_possible_score(&coefficients, without_status), 25.0);
	}

	#[test]
	fn zero_coefficients_leave_the_active_set_harmless() {
		let coefficients = Coefficients { status: 0.0, ..Coefficients::default() };
		let without_status = ActiveComponents { status: false, ..ALL_ACTIVE };

		assert_eq!(
			max_possible_score(&coefficients, ALL_ACTIVE),
			max_possible_score(&coefficients, without_status),
		);
	}

	#[test]
	fn keyword_less_queries_drop_relevance_from_the_active_set() {
		let criteria = [Criterion::Relevance, Criterion::DueDate, Criterion::Priority];
		let active = ActiveComponents::for_query(&Intent::default(), &criteria);

		assert!(!active.relevance);
		assert!(active.due_date);
		assert!(active.priority);
		assert!(!active.status);
	}

	#[test]
	fn unknown_status_scores_neutral() {
		assert_eq!(status_score("mystery", &HashMap::new()), 0.5);
	}

	#[test]
	fn quality_filter_drops_below_the_fraction() {
		let strong = ScoredTask {
			task: task("strong"),
			relevance: 1.0,
			due_date: 1.0,
			priority: 0.9,
			status: 1.0,
			final_score: 0.9,
		};
		let weak = ScoredTask { final_score: 0.1, ..strong.clone() };
		let kept = apply_quality_filter(vec![strong, weak], 0.3);

		assert_eq!(kept.len(), 1);
		assert_eq!(kept[0].task.text, "strong");
	}
}
