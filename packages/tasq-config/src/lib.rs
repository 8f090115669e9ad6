mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Coefficients, Config, LlmProviderConfig, Providers, Ranking, Scoring, Search, StatusCategory,
	Urgency, Vocabulary,
};

use std::{fs, path::Path};

pub const KNOWN_CRITERIA: [&str; 5] =
	["relevance", "due-date", "priority", "created", "alphabetical"];

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.search.languages.is_empty() {
		return Err(Error::Validation {
			message: "search.languages must be non-empty.".to_string(),
		});
	}
	if cfg.search.max_expansions_per_language == 0 {
		return Err(Error::Validation {
			message: "search.max_expansions_per_language must be greater than zero.".to_string(),
		});
	}
	if !cfg.search.quality_filter_percentage.is_finite() {
		return Err(Error::Validation {
			message: "search.quality_filter_percentage must be a finite number.".to_string(),
		});
	}
	if !(0.0..=1.0).contains(&cfg.search.quality_filter_percentage) {
		return Err(Error::Validation {
			message: "search.quality_filter_percentage must be in the range 0.0-1.0.".to_string(),
		});
	}
	if cfg.search.max_results == 0 {
		return Err(Error::Validation {
			message: "search.max_results must be greater than zero.".to_string(),
		});
	}
	if cfg.search.max_context_tasks == 0 {
		return Err(Error::Validation {
			message: "search.max_context_tasks must be greater than zero.".to_string(),
		});
	}

	for (label, value) in [
		("scoring.coefficients.relevance", cfg.scoring.coefficients.relevance),
		("scoring.coefficients.due_date", cfg.scoring.coefficients.due_date),
		("scoring.coefficients.priority", cfg.scoring.coefficients.priority),
		("scoring.coefficients.status", cfg.scoring.coefficients.status),
	] {
		if !value.is_finite() {
			return Err(Error::Validation {
				message: format!("{label} must be a finite number."),
			});
		}
		if value < 0.0 {
			return Err(Error::Validation { message: format!("{label} must be zero or greater.") });
		}
	}
	if cfg.scoring.coefficients.relevance <= 0.0 {
		return Err(Error::Validation {
			message: "scoring.coefficients.relevance must be greater than zero.".to_string(),
		});
	}

	let urgency = &cfg.scoring.urgency;

	for (label, value) in [
		("scoring.urgency.missing", urgency.missing),
		("scoring.urgency.today", urgency.today),
		("scoring.urgency.within_week", urgency.within_week),
		("scoring.urgency.within_month", urgency.within_month),
		("scoring.urgency.later", urgency.later),
		("scoring.urgency.overdue_floor", urgency.overdue_floor),
	] {
		if !value.is_finite() || !(0.0..=1.0).contains(&value) {
			return Err(Error::Validation {
				message: format!("{label} must be in the range 0.0-1.0."),
			});
		}
	}
	if !(urgency.overdue_slope_days > 0.0) || !urgency.overdue_slope_days.is_finite() {
		return Err(Error::Validation {
			message: "scoring.urgency.overdue_slope_days must be greater than zero.".to_string(),
		});
	}

	validate_criteria(&cfg.ranking.criteria)?;

	if cfg.statuses.is_empty() {
		return Err(Error::Validation { message: "statuses must be non-empty.".to_string() });
	}

	for (key, status) in &cfg.statuses {
		if key.trim().is_empty() {
			return Err(Error::Validation {
				message: "statuses keys cannot be blank or whitespace-only.".to_string(),
			});
		}
		if !status.score.is_finite() || !(0.0..=1.0).contains(&status.score) {
			return Err(Error::Validation {
				message: format!("statuses.{key}.score must be in the range 0.0-1.0."),
			});
		}
		if status.display_name.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("statuses.{key}.display_name must be non-empty."),
			});
		}
	}

	for (term, level) in &cfg.vocabulary.priority_terms {
		if !(1..=4).contains(level) {
			return Err(Error::Validation {
				message: format!("vocabulary.priority_terms.{term} must be in the range 1-4."),
			});
		}
	}

	for (term, token) in &cfg.vocabulary.due_terms {
		if !is_canonical_due_token(token) {
			return Err(Error::Validation {
				message: format!(
					"vocabulary.due_terms.{term} must map to a canonical due token (today, tomorrow, overdue, this-week, next-week, or +Nd)."
				),
			});
		}
	}

	for (label, provider) in
		[("query_parser", &cfg.providers.query_parser), ("analysis", &cfg.providers.analysis)]
	{
		if provider.api_key.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("Provider {label} api_key must be non-empty."),
			});
		}
		if provider.timeout_ms == 0 {
			return Err(Error::Validation {
				message: format!("Provider {label} timeout_ms must be greater than zero."),
			});
		}
		if !provider.temperature.is_finite() || provider.temperature < 0.0 {
			return Err(Error::Validation {
				message: format!("Provider {label} temperature must be zero or greater."),
			});
		}
	}

	Ok(())
}

pub fn validate_criteria(criteria: &[String]) -> Result<()> {
	if criteria.is_empty() {
		return Err(Error::Validation {
			message: "ranking.criteria must be non-empty.".to_string(),
		});
	}
	if criteria[0] != "relevance" {
		return Err(Error::Validation {
			message: "ranking.criteria must start with relevance.".to_string(),
		});
	}

	for (idx, name) in criteria.iter().enumerate() {
		if !KNOWN_CRITERIA.contains(&name.as_str()) {
			return Err(Error::Validation {
				message: format!(
					"ranking.criteria must be drawn from relevance, due-date, priority, created, and alphabetical. Got {name}."
				),
			});
		}
		if criteria[..idx].contains(name) {
			return Err(Error::Validation {
				message: format!("ranking.criteria contains a duplicate entry {name}."),
			});
		}
	}

	Ok(())
}

pub fn is_canonical_due_token(token: &str) -> bool {
	if matches!(token, "today" | "tomorrow" | "overdue" | "this-week" | "next-week") {
		return true;
	}

	token
		.strip_prefix('+')
		.and_then(|rest| rest.strip_suffix('d'))
		.map(|days| !days.is_empty() && days.bytes().all(|b| b.is_ascii_digit()))
		.unwrap_or(false)
}

fn normalize(cfg: &mut Config) {
	cfg.search.languages =
		cfg.search.languages.iter().map(|lang| lang.trim().to_lowercase()).collect();
	cfg.vocabulary.priority_terms = cfg
		.vocabulary
		.priority_terms
		.iter()
		.map(|(term, level)| (term.trim().to_lowercase(), *level))
		.collect();
	cfg.vocabulary.due_terms = cfg
		.vocabulary
		.due_terms
		.iter()
		.map(|(term, token)| (term.trim().to_lowercase(), token.trim().to_string()))
		.collect();
	cfg.vocabulary.stop_words =
		cfg.vocabulary.stop_words.iter().map(|word| word.trim().to_lowercase()).collect();
}

#[cfg(test)]
mod tests {
	use super::is_canonical_due_token;

	#[test]
	fn canonical_due_tokens_include_relative_days() {
		assert!(is_canonical_due_token("today"));
		assert!(is_canonical_due_token("overdue"));
		assert!(is_canonical_due_token("+3d"));
		assert!(!is_canonical_due_token("+d"));
		assert!(!is_canonical_due_token("manana"));
		assert!(!is_canonical_due_token("+3w"));
	}
}
