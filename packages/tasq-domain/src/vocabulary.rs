use std::collections::HashSet;

use crate::intent::DueFilter;

/// Built-in priority phrases. User-configured terms are merged on top and win
/// on conflict.
const BUILTIN_PRIORITY_TERMS: &[(&str, u8)] = &[
	("highest", 1),
	("urgent", 1),
	("critical", 1),
	("紧急", 1),
	("最高", 1),
	("high", 2),
	("高", 2),
	("medium", 3),
	("normal", 3),
	("中", 3),
	("low", 4),
	("lowest", 4),
	("低", 4),
];

/// Built-in due-date phrases mapped to canonical tokens.
const BUILTIN_DUE_TERMS: &[(&str, &str)] = &[
	("past due", "overdue"),
	("overdue", "overdue"),
	("late", "overdue"),
	("过期", "overdue"),
	("逾期", "overdue"),
	("today", "today"),
	("tonight", "today"),
	("今天", "today"),
	("今日", "today"),
	("tomorrow", "tomorrow"),
	("明天", "tomorrow"),
	("明日", "tomorrow"),
	("this week", "this-week"),
	("本周", "this-week"),
	("这周", "this-week"),
	("next week", "next-week"),
	("下周", "next-week"),
];

const BUILTIN_STOP_WORDS: &[&str] = &[
	// English
	"a", "an", "the", "and", "or", "of", "to", "in", "on", "at", "for", "with", "is", "are",
	"be", "do", "does", "i", "me", "my", "you", "it", "all", "any", "that", "this", "these",
	"those", "what", "which", "show", "find", "list", "need", "want", "have", "has", "please",
	"about", "task", "tasks", "todo", "todos",
	// Chinese
	"的", "了", "吗", "呢", "我", "你", "他", "她", "它", "请", "所有", "一个", "什么", "哪些",
	"显示", "查找", "列出", "任务", "和", "或", "在", "是", "有", "要", "需要", "想",
];

/// Term tables mapping natural-language phrases to structured concepts.
/// Pure data plus lookup; built once per request from configuration.
#[derive(Clone, Debug)]
pub struct Vocabulary {
	priority_terms: Vec<(String, u8)>,
	due_terms: Vec<(String, DueFilter)>,
	stop_words: HashSet<String>,
}
impl Vocabulary {
	pub fn from_config(cfg: &tasq_config::Vocabulary) -> Self {
		let mut priority_terms: Vec<(String, u8)> = BUILTIN_PRIORITY_TERMS
			.iter()
			.filter(|(term, _)| !cfg.priority_terms.contains_key(*term))
			.map(|(term, level)| (term.to_string(), *level))
			.collect();

		priority_terms
			.extend(cfg.priority_terms.iter().map(|(term, level)| (term.clone(), *level)));

		// Config tokens are validated at load; a malformed one is simply skipped.
		let mut due_terms: Vec<(String, DueFilter)> = BUILTIN_DUE_TERMS
			.iter()
			.filter(|(term, _)| !cfg.due_terms.contains_key(*term))
			.filter_map(|(term, token)| {
				DueFilter::parse(token).map(|filter| (term.to_string(), filter))
			})
			.collect();

		due_terms.extend(cfg.due_terms.iter().filter_map(|(term, token)| {
			DueFilter::parse(token).map(|filter| (term.clone(), filter))
		}));

		// Longest-first so greedy matching prefers "next week" over "week" and
		// "过期" over any shorter user term it contains.
		sort_longest_first(&mut priority_terms);
		sort_longest_first(&mut due_terms);

		let mut stop_words: HashSet<String> =
			BUILTIN_STOP_WORDS.iter().map(|word| word.to_string()).collect();

		stop_words.extend(cfg.stop_words.iter().cloned());

		Self { priority_terms, due_terms, stop_words }
	}

	pub fn priority_terms(&self) -> &[(String, u8)] {
		&self.priority_terms
	}

	pub fn due_terms(&self) -> &[(String, DueFilter)] {
		&self.due_terms
	}

	pub fn is_stop_word(&self, word: &str) -> bool {
		self.stop_words.contains(word)
	}

	pub fn stop_words(&self) -> impl Iterator<Item = &str> {
		self.stop_words.iter().map(String::as_str)
	}

	/// Canonicalizes a due phrase in any configured language to its token,
	/// accepting canonical tokens themselves as-is.
	pub fn canonical_due(&self, phrase: &str) -> Option<DueFilter> {
		let trimmed = phrase.trim();

		if let Some(filter) = DueFilter::parse(&trimmed.to_lowercase()) {
			return Some(filter);
		}

		let lowered = trimmed.to_lowercase();

		self.due_terms
			.iter()
			.find(|(term, _)| term.as_str() == lowered)
			.map(|(_, filter)| *filter)
	}
}

fn sort_longest_first<T>(terms: &mut [(String, T)]) {
	terms.sort_by(|(a, _), (b, _)| {
		b.chars().count().cmp(&a.chars().count()).then_with(|| a.cmp(b))
	});
}

#[cfg(test)]
mod tests {
	use super::Vocabulary;
	use crate::intent::DueFilter;

	fn vocabulary() -> Vocabulary {
		Vocabulary::from_config(&tasq_config::Vocabulary::default())
	}

	#[test]
	fn builtin_terms_are_longest_first() {
		let vocab = vocabulary();
		let lengths: Vec<usize> =
			vocab.due_terms().iter().map(|(term, _)| term.chars().count()).collect();
		let mut sorted = lengths.clone();

		sorted.sort_by(|a, b| b.cmp(a));

		assert_eq!(lengths, sorted);
	}

	#[test]
	fn user_terms_override_builtins() {
		let mut cfg = tasq_config::Vocabulary::default();

		cfg.priority_terms.insert("urgent".to_string(), 2);

		let vocab = Vocabulary::from_config(&cfg);
		let level = vocab
			.priority_terms()
			.iter()
			.find(|(term, _)| term == "urgent")
			.map(|(_, level)| *level);

		assert_eq!(level, Some(2));
	}

	#[test]
	fn canonical_due_accepts_tokens_and_phrases() {
		let vocab = vocabulary();

		assert_eq!(vocab.canonical_due("overdue"), Some(DueFilter::Overdue));
		assert_eq!(vocab.canonical_due("明天"), Some(DueFilter::Tomorrow));
		assert_eq!(vocab.canonical_due("+5d"), Some(DueFilter::InDays(5)));
		assert_eq!(vocab.canonical_due("whenever"), None);
	}
}
