use image::Rgba;
use std::time::{Duration, Instant};

pub const HIGHLIGHT_DURATION: Duration = Duration::from_millis(500);

/// Colour pulse played on a label after it changes: resting colour, then the
/// highlight colour at the midpoint, then back.
#[derive(Debug, Clone)]
pub struct Highlight {
    started_at: Option<Instant>,
    duration: Duration,
    resting: Rgba<u8>,
    peak: Rgba<u8>,
}

impl Highlight {
    pub fn new(resting: Rgba<u8>, peak: Rgba<u8>) -> Self {
        Self {
            started_at: None,
            duration: HIGHLIGHT_DURATION,
            resting,
            peak,
        }
    }

    /// Start the pulse, restarting it if one is already playing.
    pub fn start(&mut self, now: Instant) {
        self.started_at = Some(now);
    }

    pub fn cancel(&mut self) {
        self.started_at = None;
    }

    pub fn is_active(&self, now: Instant) -> bool {
        match self.started_at {
            Some(start) => now.saturating_duration_since(start) < self.duration,
            None => false,
        }
    }

    /// A pulse has run out but has not been settled yet, so the last frame
    /// drawn may still show a blended colour.
    pub fn has_expired(&self, now: Instant) -> bool {
        self.started_at.is_some() && !self.is_active(now)
    }

    /// Forget a finished pulse. A running one is left alone.
    pub fn settle(&mut self, now: Instant) {
        if self.has_expired(now) {
            self.started_at = None;
        }
    }

    pub fn colour_at(&self, now: Instant) -> Rgba<u8> {
        let Some(start) = self.started_at else {
            return self.resting;
        };
        let elapsed = now.saturating_duration_since(start);
        if elapsed >= self.duration {
            return self.resting;
        }

        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        // Triangle: 0 -> 1 over the first half, 1 -> 0 over the second.
        let weight = if t <= 0.5 { t * 2.0 } else { (1.0 - t) * 2.0 };
        blend(self.resting, self.peak, weight)
    }
}

fn blend(from: Rgba<u8>, to: Rgba<u8>, weight: f32) -> Rgba<u8> {
    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * weight).round() as u8;
    Rgba([
        mix(from[0], to[0]),
        mix(from[1], to[1]),
        mix(from[2], to[2]),
        mix(from[3], to[3]),
    ])
}
