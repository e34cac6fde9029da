pub mod aliases;
pub mod assemble;
pub mod config;
pub mod derive;
pub mod error;
pub mod form;
pub mod h2h;
pub mod record;
pub mod resolve;
pub mod walk;

pub use assemble::{NormalizedMatch, assemble, normalize, normalize_batch, normalize_json};
pub use config::NormalizerConfig;
pub use error::{NormalizeIssue, Role};
pub use record::{H2HRecord, MatchContext, Record, StatRecord, StatValue};
