use std::{collections::HashMap, sync::LazyLock};

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::{
	cjk,
	intent::{Intent, dedup_overlapping},
	vocabulary::Vocabulary,
};
use tasq_config::StatusCategory;

static TAG_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"#([\p{L}\p{N}_\-/]+)").expect("Tag pattern must compile."));
static FOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"(?i)(?:\bfolder:\s*|\bin folder\s+)([^\s]+)")
		.expect("Folder pattern must compile.")
});
static PRIORITY_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?i)\bp([1-4])\b").expect("Priority pattern must compile."));

/// Parses a query with term tables and patterns alone. Extracted fragments are
/// removed before keyword tokenization so filters are never double-counted as
/// keywords. Never fails: with no matches the result is an empty-filter intent
/// carrying whatever keywords remain.
pub fn parse_deterministic(
	query: &str,
	vocab: &Vocabulary,
	statuses: &HashMap<String, StatusCategory>,
) -> Intent {
	let mut intent = Intent::default();
	let mut remainder = query.to_string();

	intent.diagnostics.detected_language =
		whatlang::detect(query).map(|info| info.lang().code().to_string());

	for capture in TAG_RE.captures_iter(&remainder) {
		if let Some(tag) = capture.get(1) {
			intent.tags.push(tag.as_str().to_lowercase());
		}
	}

	remainder = TAG_RE.replace_all(&remainder, " ").into_owned();

	if let Some(capture) = FOLDER_RE.captures(&remainder)
		&& let Some(folder) = capture.get(1)
	{
		intent.folder = Some(folder.as_str().trim_end_matches('/').to_string());
		remainder = FOLDER_RE.replace_all(&remainder, " ").into_owned();
	}

	if let Some(capture) = PRIORITY_RE.captures(&remainder)
		&& let Some(level) = capture.get(1)
	{
		intent.priority = level.as_str().parse().ok();
		remainder = PRIORITY_RE.replace_all(&remainder, " ").into_owned();
	}

	// The first matched term (longest-first) fixes the filter value, but every
	// synonym is still stripped so a redundant one cannot leak into keywords.
	for (term, level) in vocab.priority_terms() {
		if strip_term(&mut remainder, term) && intent.priority.is_none() {
			intent.priority = Some(*level);
		}
	}

	for (term, filter) in vocab.due_terms() {
		if strip_term(&mut remainder, term) && intent.due.is_none() {
			intent.due = Some(*filter);
		}
	}

	// Status terms come from configuration only; no category name is special.
	for (key, category) in statuses {
		let key_matched = strip_term(&mut remainder, key);
		let name_matched = strip_term(&mut remainder, &category.display_name.to_lowercase());

		if key_matched || name_matched {
			intent.status.push(key.clone());
		}
	}

	intent.status.sort();

	intent.core_keywords = tokenize(&remainder, vocab);

	// Seeds the time context from the due filter; nothing to displace here
	// since the deterministic parser never guesses a separate context.
	intent.reconcile_time_context();

	intent
}

/// Removes every occurrence of a term from the remainder, replacing it with a
/// space. ASCII terms match on word boundaries, case-insensitively; CJK terms
/// match as substrings since CJK text carries no word boundaries.
fn strip_term(remainder: &mut String, term: &str) -> bool {
	if term.trim().is_empty() {
		return false;
	}
	if cjk::contains_cjk(term) {
		let mut stripped = false;

		while let Some(start) = remainder.find(term) {
			remainder.replace_range(start..start + term.len(), " ");

			stripped = true;
		}

		return stripped;
	}

	let Ok(pattern) = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(term))) else {
		return false;
	};

	if !pattern.is_match(remainder) {
		return false;
	}

	*remainder = pattern.replace_all(remainder, " ").into_owned();

	true
}

/// Splits the filter-stripped remainder into keywords: contiguous CJK runs are
/// kept as whole multi-character tokens, the rest is word-segmented, stop
/// words are removed, and the final list is overlap-deduplicated.
fn tokenize(remainder: &str, vocab: &Vocabulary) -> Vec<String> {
	// CJK stop words carry no surrounding whitespace, so they must be cut out
	// of the text before run extraction or they stay glued to real keywords.
	let mut text = remainder.to_string();

	for word in vocab.stop_words().filter(|word| cjk::contains_cjk(word)) {
		while let Some(start) = text.find(word) {
			text.replace_range(start..start + word.len(), " ");
		}
	}

	let mut tokens: Vec<String> = cjk::cjk_runs(&text)
		.into_iter()
		.filter(|run| run.chars().count() > 1 && !vocab.is_stop_word(run))
		.collect();
	let masked = cjk::mask_cjk(&text);

	for word in masked.unicode_words() {
		let lowered = word.to_lowercase();

		if lowered.chars().count() < 2 {
			continue;
		}
		if lowered.chars().all(char::is_numeric) {
			continue;
		}
		if vocab.is_stop_word(&lowered) {
			continue;
		}

		tokens.push(lowered);
	}

	dedup_overlapping(tokens)
}
