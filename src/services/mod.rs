pub mod age_gate;
pub mod analytics;
pub mod category_filter;
pub mod classifier;
pub mod selection;
pub mod share_links;

pub use age_gate::{validate_age, validate_age_value, AgeBand, ValidatedAge};
pub use analytics::{AnalyticsEvent, AnalyticsSink, EventName, MemorySink, NoopSink, TracingSink};
pub use category_filter::filter;
pub use classifier::{classify, SessionSummary, VerdictCounts, VerdictGroups};
pub use selection::SelectionSet;
pub use share_links::{validate_israeli_phone, ShareLinks};
