use crate::models::{MetricKind, ParsedMetric};
use crate::parser::{self, ParseError};
use log::{debug, trace, warn};

/// Receives parsed readings, one call per accepted line.
pub trait MetricSink {
    fn update(&mut self, metric: &ParsedMetric);
}

/// What became of a single reading line.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    Updated(ParsedMetric),
    Dropped(ParseError),
}

impl Dispatch {
    pub fn updated_kind(&self) -> Option<MetricKind> {
        match self {
            Dispatch::Updated(metric) => Some(metric.kind),
            Dispatch::Dropped(_) => None,
        }
    }
}

/// Parse `line` and hand the result to `sink`.
///
/// Malformed and unrecognised lines vanish quietly. Bad numbers are logged
/// and skipped the same way for every metric.
pub fn dispatch_line<S: MetricSink + ?Sized>(line: &str, sink: &mut S) -> Dispatch {
    match parser::parse_line(line) {
        Ok(metric) => {
            debug!("{} = {}", metric.kind, metric.value);
            sink.update(&metric);
            Dispatch::Updated(metric)
        }
        Err(err @ ParseError::InvalidNumber { .. }) => {
            warn!("{err}");
            Dispatch::Dropped(err)
        }
        Err(err) => {
            trace!("Dropping line {line:?}: {err}");
            Dispatch::Dropped(err)
        }
    }
}
