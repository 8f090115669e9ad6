use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use tracing::warn;

use crate::{
	Error, Result, TasqService, filter, intent, prompt, ranking, resolver,
	scoring::{self, ActiveComponents, ScoredTask},
};
use tasq_domain::{Intent, Task, parse_deterministic};
use tasq_providers::Usage;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryMode {
	/// Deterministic parsing only; no model calls.
	Simple,
	/// AI parsing with deterministic fallback.
	Smart,
	/// Smart plus a second analysis phase over the ranked results.
	Chat,
}

#[derive(Clone, Debug, Deserialize)]
pub struct QueryRequest {
	pub query: String,
	pub mode: QueryMode,
	pub tasks: Vec<Task>,
	/// Reference date for due-filter and urgency evaluation. Defaults to the
	/// current UTC date; tests pin it.
	#[serde(default, with = "tasq_domain::date_serde::option")]
	pub today: Option<Date>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DegradationKind {
	ParserFallback,
	AnalysisFallback,
}

/// Marker that a step failed and a substitute answered instead. At most one
/// descriptor per response; when several steps degrade, the detail explains
/// each substitution. Results stay usable.
#[derive(Clone, Debug, Serialize)]
pub struct Degradation {
	pub kind: DegradationKind,
	pub detail: String,
}

#[derive(Debug, Serialize)]
pub struct QueryResponse {
	pub tasks: Vec<ScoredTask>,
	pub intent: Intent,
	pub degradation: Option<Degradation>,
	pub analysis: Option<String>,
	pub usage: Option<Usage>,
}

impl TasqService {
	/// Runs one query end to end: parse, filter, score, threshold, rank, and
	/// for Chat mode a second analysis pass. Parser and analysis failures are
	/// absorbed as degradations; only an empty query is an error.
	pub async fn run_query(&self, request: QueryRequest) -> Result<QueryResponse> {
		let query = request.query.trim();

		if query.is_empty() {
			return Err(Error::InvalidRequest { message: "Query must not be empty.".to_string() });
		}

		let today = request.today.unwrap_or_else(|| OffsetDateTime::now_utc().date());
		let mut usage = None;
		let mut degradation = None;
		let intent = match request.mode {
			QueryMode::Simple =>
				parse_deterministic(query, &self.vocabulary, &self.cfg.statuses),
			QueryMode::Smart | QueryMode::Chat => match self.parse_with_model(query, &mut usage).await
			{
				Ok(intent) => intent,
				Err(err) => {
					warn!("AI query parsing degraded: {err}");

					degradation = Some(Degradation {
						kind: DegradationKind::ParserFallback,
						detail: format!(
							"AI query parsing failed ({err}); deterministic parsing answered instead. \
Keyword expansion is unavailable for this response; check the query_parser \
provider configuration if this persists."
						),
					});

					parse_deterministic(query, &self.vocabulary, &self.cfg.statuses)
				},
			},
		};
		let candidates = filter::filter_tasks(&request.tasks, &intent, today);
		let criteria = ranking::normalize_criteria(&self.cfg.ranking.criteria);
		let active = ActiveComponents::for_query(&intent, &criteria);
		let scored = scoring::score_tasks(
			&candidates,
			&intent,
			&self.cfg.scoring,
			&self.cfg.statuses,
			active,
			today,
		);
		let kept = scoring::apply_quality_filter(scored, self.cfg.search.quality_filter_percentage);
		let mut ranked = ranking::rank(kept, &criteria);

		ranked.truncate(self.cfg.search.max_results as usize);

		let mut analysis = None;

		if request.mode == QueryMode::Chat {
			match self.analyze_ranked(query, &ranked, &mut usage).await {
				Ok((text, mut indices)) => {
					// Recommended subset, kept in phase-one rank order.
					indices.sort_unstable();

					ranked = indices.into_iter().map(|index| ranked[index].clone()).collect();
					analysis = Some(text);
				},
				Err(err) => {
					warn!("Analysis degraded: {err}");

					let mut detail = if ranked.is_empty() {
						"Task analysis was skipped: no task cleared the quality threshold, \
so the result list is empty. Broaden the query or lower \
search.quality_filter_percentage."
							.to_string()
					} else {
						format!(
							"Task analysis failed ({err}); the ranked search results answered \
instead. Re-ask with a narrower question to get a cited answer."
						)
					};

					// A parser fallback from phase one must stay explained.
					if let Some(earlier) = degradation.take() {
						detail.push(' ');
						detail.push_str(&earlier.detail);
					}

					degradation =
						Some(Degradation { kind: DegradationKind::AnalysisFallback, detail });
				},
			}
		}

		Ok(QueryResponse { tasks: ranked, intent, degradation, analysis, usage })
	}

	async fn parse_with_model(&self, query: &str, usage: &mut Option<Usage>) -> Result<Intent> {
		let cfg = &self.cfg.providers.query_parser;
		let messages = prompt::build_parse_messages(query, &self.cfg);
		let (payload, call_usage) =
			self.providers.query_parser.parse_query(cfg, &messages).await.map_err(|err| {
				Error::ParserFailure { message: err.to_string(), model: cfg.model.clone() }
			})?;

		merge_usage(usage, call_usage);

		intent::intent_from_payload(&payload, &self.vocabulary, &self.cfg.statuses, &cfg.model)
	}

	async fn analyze_ranked(
		&self,
		query: &str,
		ranked: &[ScoredTask],
		usage: &mut Option<Usage>,
	) -> Result<(String, Vec<usize>)> {
		if ranked.is_empty() {
			return Err(Error::AnalysisNoReference {
				message: "No tasks survived the quality threshold.".to_string(),
			});
		}

		let context: Vec<&ScoredTask> =
			ranked.iter().take(self.cfg.search.max_context_tasks as usize).collect();
		let messages = prompt::build_analysis_messages(query, &context);
		let (text, call_usage) = self
			.providers
			.analysis
			.analyze(&self.cfg.providers.analysis, &messages)
			.await
			.map_err(|err| Error::Provider { message: err.to_string() })?;

		merge_usage(usage, call_usage);

		let indices = resolver::resolve_references(&text, context.len());

		if indices.is_empty() {
			return Err(Error::AnalysisNoReference {
				message: "The analysis referenced no task from the context.".to_string(),
			});
		}

		Ok((text, indices))
	}
}

fn merge_usage(total: &mut Option<Usage>, call: Option<Usage>) {
	if let Some(call) = call {
		total.get_or_insert_with(Usage::default).merge(call);
	}
}
