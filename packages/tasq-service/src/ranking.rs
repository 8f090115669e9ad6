use std::cmp::Ordering;

use tracing::warn;

use crate::scoring::ScoredTask;

/// One ranking criterion. Comparison directions are fixed: callers order the
/// criteria, never reverse them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Criterion {
	/// Composite score, descending. Always the primary criterion.
	Relevance,
	/// Earlier due date first; tasks without one last.
	DueDate,
	/// Higher priority (lower level number) first; tasks without one last.
	Priority,
	/// Newer creation date first; tasks without one last.
	Created,
	/// Case-insensitive text order.
	Alphabetical,
}
impl Criterion {
	pub fn parse(name: &str) -> Option<Self> {
		match name {
			"relevance" => Some(Self::Relevance),
			"due-date" => Some(Self::DueDate),
			"priority" => Some(Self::Priority),
			"created" => Some(Self::Created),
			"alphabetical" => Some(Self::Alphabetical),
			_ => None,
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Relevance => "relevance",
			Self::DueDate => "due-date",
			Self::Priority => "priority",
			Self::Created => "created",
			Self::Alphabetical => "alphabetical",
		}
	}
}

/// Parses configured criterion names into the ordered criteria list. Config
/// validation already guarantees a well-formed list; unknown names and a
/// demoted relevance are still repaired here so a hand-built list cannot
/// produce a ranking that ignores match quality.
pub fn normalize_criteria(names: &[String]) -> Vec<Criterion> {
	let mut criteria = Vec::new();

	for name in names {
		match Criterion::parse(name) {
			Some(criterion) if !criteria.contains(&criterion) => criteria.push(criterion),
			Some(_) => warn!("Duplicate ranking criterion {name} ignored."),
			None => warn!("Unknown ranking criterion {name} ignored."),
		}
	}

	if criteria.first() != Some(&Criterion::Relevance) {
		criteria.retain(|criterion| *criterion != Criterion::Relevance);
		criteria.insert(0, Criterion::Relevance);
	}

	criteria
}

/// Stable multi-criteria sort: the first criterion that distinguishes two
/// tasks decides, and a full tie preserves the input order.
pub fn rank(mut scored: Vec<ScoredTask>, criteria: &[Criterion]) -> Vec<ScoredTask> {
	scored.sort_by(|a, b| compare(a, b, criteria));

	scored
}

fn compare(a: &ScoredTask, b: &ScoredTask, criteria: &[Criterion]) -> Ordering {
	for criterion in criteria {
		let ordering = match criterion {
			Criterion::Relevance =>
				b.final_score.partial_cmp(&a.final_score).unwrap_or(Ordering::Equal),
			Criterion::DueDate => none_last_asc(a.task.due_date, b.task.due_date),
			Criterion::Priority => none_last_asc(a.task.priority, b.task.priority),
			Criterion::Created => none_last_desc(a.task.created_date, b.task.created_date),
			Criterion::Alphabetical =>
				a.task.text.to_lowercase().cmp(&b.task.text.to_lowercase()),
		};

		if ordering != Ordering::Equal {
			return ordering;
		}
	}

	Ordering::Equal
}

fn none_last_asc<T>(a: Option<T>, b: Option<T>) -> Ordering
where
	T: Ord,
{
	match (a, b) {
		(Some(a), Some(b)) => a.cmp(&b),
		(Some(_), None) => Ordering::Less,
		(None, Some(_)) => Ordering::Greater,
		(None, None) => Ordering::Equal,
	}
}

fn none_last_desc<T>(a: Option<T>, b: Option<T>) -> Ordering
where
	T: Ord,
{
	match (a, b) {
		(Some(a), Some(b)) => b.cmp(&a),
		(Some(_), None) => Ordering::Less,
		(None, Some(_)) => Ordering::Greater,
		(None, None) => Ordering::Equal,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use tasq_domain::Task;
	use time::{Date, macros::date};

	fn scored(id: &str, final_score: f32, priority: Option<u8>, due: Option<Date>) -> ScoredTask {
		ScoredTask {
			task: Task {
				id: id.to_string(),
				text: id.to_string(),
				file_path: "todo.md".to_string(),
				line_number: 1,
				priority,
				due_date: due,
				created_date: None,
				status_category: "open".to_string(),
				tags: Vec::new(),
			},
			relevance: final_score,
			due_date: 0.0,
			priority: 0.0,
			status: 0.0,
			final_score,
		}
	}

	fn ids(ranked: &[ScoredTask]) -> Vec<&str> {
		ranked.iter().map(|task| task.task.id.as_str()).collect()
	}

	#[test]
	fn relevance_decides_before_anything_else() {
		let criteria = normalize_criteria(&tasq_config::Ranking::default().criteria);
		let ranked = rank(
			vec![
				scored("low", 0.2, Some(1), Some(date!(2026 - 01 - 01))),
				scored("high", 0.9, Some(4), None),
			],
			&criteria,
		);

		assert_eq!(ids(&ranked), ["high", "low"]);
	}

	#[test]
	fn ties_fall_through_to_due_then_priority() {
		let criteria = normalize_criteria(&tasq_config::Ranking::default().criteria);
		let ranked = rank(
			vec![
				scored("no-due", 0.5, Some(1), None),
				scored("later", 0.5, Some(3), Some(date!(2026 - 02 - 01))),
				scored("sooner-p2", 0.5, Some(2), Some(date!(2026 - 01 - 01))),
				scored("sooner-p1", 0.5, Some(1), Some(date!(2026 - 01 - 01))),
			],
			&criteria,
		);

		assert_eq!(ids(&ranked), ["sooner-p1", "sooner-p2", "later", "no-due"]);
	}

	#[test]
	fn full_ties_preserve_input_order() {
		let criteria = vec![Criterion::Relevance];
		let ranked = rank(
			vec![scored("first", 0.5, None, None), scored("second", 0.5, None, None)],
			&criteria,
		);

		assert_eq!(ids(&ranked), ["first", "second"]);
	}

	#[test]
	fn relevance_is_forced_to_the_front() {
		let criteria = normalize_criteria(&[
			"priority".to_string(),
			"relevance".to_string(),
			"nonsense".to_string(),
			"priority".to_string(),
		]);

		assert_eq!(criteria, [Criterion::Relevance, Criterion::Priority]);
	}
}
