use std::collections::HashMap;

use tasq_config::StatusCategory;
use tasq_domain::{DueFilter, Vocabulary, dedup_overlapping, parse_deterministic};
use time::macros::date;

fn vocabulary() -> Vocabulary {
	Vocabulary::from_config(&tasq_config::Vocabulary::default())
}

fn statuses() -> HashMap<String, StatusCategory> {
	let mut statuses = HashMap::new();

	statuses.insert("open".to_string(), StatusCategory {
		symbols: vec![" ".to_string()],
		score: 0.8,
		display_name: "Open".to_string(),
		display_priority: 1,
	});
	statuses.insert("done".to_string(), StatusCategory {
		symbols: vec!["x".to_string()],
		score: 0.0,
		display_name: "Completed".to_string(),
		display_priority: 9,
	});

	statuses
}

#[test]
fn shorthand_and_vocabulary_agree_on_priority() {
	let shorthand = parse_deterministic("p2 garden chores", &vocabulary(), &statuses());
	let phrased = parse_deterministic("high garden chores", &vocabulary(), &statuses());

	assert_eq!(shorthand.priority, Some(2));
	assert_eq!(phrased.priority, Some(2));
	assert_eq!(shorthand.core_keywords, phrased.core_keywords);
}

#[test]
fn filters_never_leak_into_keywords() {
	let intent = parse_deterministic(
		"urgent overdue #finance folder:work/reports quarterly numbers",
		&vocabulary(),
		&statuses(),
	);

	assert_eq!(intent.priority, Some(1));
	assert_eq!(intent.due, Some(DueFilter::Overdue));
	assert_eq!(intent.tags, vec!["finance".to_string()]);
	assert_eq!(intent.folder.as_deref(), Some("work/reports"));

	for keyword in &intent.core_keywords {
		assert!(!["urgent", "overdue", "finance"].contains(&keyword.as_str()), "{keyword} leaked");
	}
	assert!(intent.core_keywords.contains(&"quarterly".to_string()));
	assert!(intent.core_keywords.contains(&"numbers".to_string()));
}

#[test]
fn status_display_names_match_case_insensitively() {
	let intent = parse_deterministic("completed shopping", &vocabulary(), &statuses());

	assert_eq!(intent.status, vec!["done".to_string()]);
	assert_eq!(intent.core_keywords, vec!["shopping".to_string()]);
}

#[test]
fn chinese_query_parses_like_its_english_twin() {
	let english = parse_deterministic("urgent tasks due today", &vocabulary(), &statuses());
	let chinese = parse_deterministic("今天的紧急任务", &vocabulary(), &statuses());

	assert_eq!(english.priority, chinese.priority);
	assert_eq!(english.due, chinese.due);
	assert_eq!(chinese.due, Some(DueFilter::Today));
	assert!(chinese.core_keywords.is_empty());
}

#[test]
fn due_buckets_use_half_open_week_windows() {
	let today = date!(2026 - 08 - 23);

	assert!(DueFilter::ThisWeek.matches(Some(date!(2026 - 08 - 29)), today));
	assert!(!DueFilter::ThisWeek.matches(Some(date!(2026 - 08 - 30)), today));
	assert!(DueFilter::NextWeek.matches(Some(date!(2026 - 08 - 30)), today));
	assert!(!DueFilter::NextWeek.matches(Some(date!(2026 - 09 - 06)), today));
}

#[test]
fn dedup_is_case_insensitive_across_scripts() {
	let kept = dedup_overlapping(vec![
		"Report".to_string(),
		"quarterly report".to_string(),
		"舒适".to_string(),
		"舒适椅子".to_string(),
	]);

	assert!(kept.contains(&"quarterly report".to_string()));
	assert!(kept.contains(&"舒适椅子".to_string()));
	assert!(!kept.contains(&"Report".to_string()));
	assert!(!kept.contains(&"舒适".to_string()));
}
