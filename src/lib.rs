pub mod config;
pub mod error;
pub mod fake_data;
pub mod ingest;
pub mod keywords;
pub mod metrics;
pub mod needs;
pub mod position;
pub mod recommender;
pub mod records;
pub mod report;
pub mod schema;
pub mod scorer;
pub mod snapshot;
pub mod source;
pub mod table;

pub use error::{DataQualityWarning, SchemaValidationError};
pub use keywords::{KeywordCategory, KeywordExtractor};
pub use needs::{NeedsAnalyzer, PrimaryNeed};
pub use position::Position;
pub use recommender::{RecommendationResponse, Recommender};
pub use records::{PlayerRecord, TeamRecord};
pub use snapshot::DatasetHandle;

use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
