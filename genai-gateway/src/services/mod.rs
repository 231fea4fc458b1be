pub mod metrics;
pub mod normalizer;
pub mod providers;

pub use metrics::init_metrics;
pub use providers::{ContentProvider, ProviderError, ProviderResponse};
