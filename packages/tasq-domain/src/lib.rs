pub mod cjk;
pub mod date_serde;
pub mod intent;
pub mod parser;
pub mod task;
pub mod vocabulary;

pub use intent::{DueFilter, Intent, IntentDiagnostics, dedup_overlapping};
pub use parser::parse_deterministic;
pub use task::Task;
pub use vocabulary::Vocabulary;
