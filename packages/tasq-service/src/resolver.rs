use std::sync::LazyLock;

use regex::Regex;

static TASK_REF_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\[TASK-(\d+)\]").expect("Reference pattern must compile."));

/// Extracts the context positions an analysis references, as zero-based
/// indices in first-mention order. Resolution is purely positional: a task
/// appearing twice in the context is two distinct references, so duplicates
/// in the list can never be confused. Out-of-range and repeated markers are
/// dropped.
pub fn resolve_references(analysis: &str, context_len: usize) -> Vec<usize> {
	let mut indices = Vec::new();

	for capture in TASK_REF_RE.captures_iter(analysis) {
		let Some(number) = capture.get(1).and_then(|m| m.as_str().parse::<usize>().ok()) else {
			continue;
		};

		if number == 0 || number > context_len {
			continue;
		}

		let index = number - 1;

		if !indices.contains(&index) {
			indices.push(index);
		}
	}

	indices
}

#[cfg(test)]
mod tests {
	use super::resolve_references;

	#[test]
	fn references_resolve_in_mention_order_without_repeats() {
		let analysis = "Start with [TASK-3], then [TASK-1]. [TASK-3] again is the key.";

		assert_eq!(resolve_references(analysis, 5), vec![2, 0]);
	}

	#[test]
	fn out_of_range_markers_are_dropped() {
		let analysis = "[TASK-0] and [TASK-9] do not exist, [TASK-2] does.";

		assert_eq!(resolve_references(analysis, 3), vec![1]);
	}

	#[test]
	fn prose_without_markers_resolves_to_nothing() {
		assert!(resolve_references("Nothing here matches your question.", 3).is_empty());
	}

	#[test]
	fn duplicate_tasks_resolve_by_position() {
		// Two identical tasks at positions 3 and 7: citing [TASK-7] must yield
		// index 6, never the earlier twin.
		assert_eq!(resolve_references("See [TASK-7].", 10), vec![6]);
	}
}
