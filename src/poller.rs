use log::trace;

use crate::dashboard::DashboardState;
use crate::dispatch::{self, Dispatch};
use crate::models::MetricKind;
use crate::parser::ParseError;
use crate::serial::{LineSource, SerialError};

/// Result of one poll tick.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Nothing to read, or only part of a line arrived.
    Idle,
    Updated(MetricKind),
    Dropped(ParseError),
}

/// Owns the line source and the dashboard it feeds.
pub struct Poller<S> {
    source: S,
    dashboard: DashboardState,
}

impl<S: LineSource> Poller<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            dashboard: DashboardState::new(),
        }
    }

    /// Read at most one line and apply it. A backlog drains one line per tick.
    pub fn tick(&mut self) -> Result<TickOutcome, SerialError> {
        if !self.source.line_available()? {
            trace!("No input this tick");
            return Ok(TickOutcome::Idle);
        }

        let Some(line) = self.source.read_line()? else {
            return Ok(TickOutcome::Idle);
        };

        Ok(match dispatch::dispatch_line(&line, &mut self.dashboard) {
            Dispatch::Updated(metric) => TickOutcome::Updated(metric.kind),
            Dispatch::Dropped(reason) => TickOutcome::Dropped(reason),
        })
    }

    pub fn dashboard(&self) -> &DashboardState {
        &self.dashboard
    }

    pub fn dashboard_mut(&mut self) -> &mut DashboardState {
        &mut self.dashboard
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
