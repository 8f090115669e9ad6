pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Configuration error: {message}")]
	Configuration { message: String },
	/// Recoverable: the orchestrator falls back to the deterministic parser.
	#[error("Query parser ({model}) failed: {message}")]
	ParserFailure { message: String, model: String },
	/// Recoverable: the orchestrator keeps the ranked list from phase one.
	#[error("Analysis produced no usable reference: {message}")]
	AnalysisNoReference { message: String },
	#[error("Provider error: {message}")]
	Provider { message: String },
}
impl From<tasq_providers::Error> for Error {
	fn from(err: tasq_providers::Error) -> Self {
		Self::Provider { message: err.to_string() }
	}
}
