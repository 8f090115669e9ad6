pub mod error;
pub mod filter;
pub mod intent;
pub mod prompt;
pub mod query;
pub mod ranking;
pub mod resolver;
pub mod scoring;

use std::{future::Future, pin::Pin, sync::Arc};

use serde_json::Value;

pub use error::{Error, Result};
pub use query::{Degradation, DegradationKind, QueryMode, QueryRequest, QueryResponse};
pub use scoring::ScoredTask;

use tasq_config::{Config, LlmProviderConfig};
use tasq_domain::Vocabulary;
use tasq_providers::{Usage, analyze, parse};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait QueryParserProvider
where
	Self: Send + Sync,
{
	fn parse_query<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		messages: &'a [Value],
	) -> BoxFuture<'a, tasq_providers::Result<(Value, Option<Usage>)>>;
}

pub trait AnalysisProvider
where
	Self: Send + Sync,
{
	fn analyze<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		messages: &'a [Value],
	) -> BoxFuture<'a, tasq_providers::Result<(String, Option<Usage>)>>;
}

#[derive(Clone)]
pub struct Providers {
	pub query_parser: Arc<dyn QueryParserProvider>,
	pub analysis: Arc<dyn AnalysisProvider>,
}

struct DefaultProviders;

impl QueryParserProvider for DefaultProviders {
	fn parse_query<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		messages: &'a [Value],
	) -> BoxFuture<'a, tasq_providers::Result<(Value, Option<Usage>)>> {
		Box::pin(parse::parse_query(cfg, messages))
	}
}

impl AnalysisProvider for DefaultProviders {
	fn analyze<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		messages: &'a [Value],
	) -> BoxFuture<'a, tasq_providers::Result<(String, Option<Usage>)>> {
		Box::pin(analyze::analyze(cfg, messages))
	}
}

impl Providers {
	pub fn new(query_parser: Arc<dyn QueryParserProvider>, analysis: Arc<dyn AnalysisProvider>) -> Self {
		Self { query_parser, analysis }
	}
}

impl Default for Providers {
	fn default() -> Self {
		let provider = Arc::new(DefaultProviders);
		Self { query_parser: provider.clone(), analysis: provider }
	}
}

pub struct TasqService {
	pub cfg: Config,
	pub vocabulary: Vocabulary,
	pub providers: Providers,
}

impl TasqService {
	pub fn new(cfg: Config) -> Self {
		Self::with_providers(cfg, Providers::default())
	}

	pub fn with_providers(cfg: Config, providers: Providers) -> Self {
		let vocabulary = Vocabulary::from_config(&cfg.vocabulary);

		Self { cfg, vocabulary, providers }
	}
}
