pub mod metric;

pub use metric::{MetricKind, ParsedMetric};
