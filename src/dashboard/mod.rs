use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use image::{DynamicImage, RgbaImage};
use std::time::Instant;

use crate::config::AppConfig;
use crate::dispatch::MetricSink;
use crate::models::{MetricKind, ParsedMetric};
use crate::renderer::colours::Colours;
use crate::renderer::fonts::Fonts;
use crate::renderer::{drawing, widgets};

pub mod highlight;

use highlight::Highlight;

pub const TITLE: &str = "Air Quality and Noise Monitoring System";

/// Label text, progress value and pulse state for one metric.
#[derive(Debug, Clone)]
pub struct MetricPanel {
    text: String,
    progress: i64,
    value: Option<f64>,
    highlight: Highlight,
}

impl MetricPanel {
    fn new(kind: MetricKind, colours: &Colours) -> Self {
        Self {
            text: kind.placeholder_text(),
            progress: 0,
            value: None,
            highlight: Highlight::new(colours.text, colours.highlight),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Raw progress value. Values past 100 are kept; only the drawn bar is clamped.
    pub fn progress(&self) -> i64 {
        self.progress
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    pub fn highlight(&self) -> &Highlight {
        &self.highlight
    }

    /// Share of the bar to fill, in [0, 1].
    pub fn fill_fraction(&self) -> f32 {
        (self.progress as f32 / 100.0).clamp(0.0, 1.0)
    }
}

/// Everything the dashboard shows. Each reading overwrites one panel.
#[derive(Debug, Clone)]
pub struct DashboardState {
    panels: [MetricPanel; 3],
    last_update: Option<DateTime<Local>>,
    dirty: bool,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardState {
    pub fn new() -> Self {
        let colours = Colours::default();
        Self {
            panels: MetricKind::ALL.map(|kind| MetricPanel::new(kind, &colours)),
            last_update: None,
            // Draw the empty dashboard once at startup.
            dirty: true,
        }
    }

    pub fn panel(&self, kind: MetricKind) -> &MetricPanel {
        &self.panels[kind.index()]
    }

    pub fn panels(&self) -> &[MetricPanel] {
        &self.panels
    }

    pub fn last_update(&self) -> Option<DateTime<Local>> {
        self.last_update
    }

    pub fn apply(&mut self, metric: &ParsedMetric, now: Instant) {
        let panel = &mut self.panels[metric.kind.index()];
        panel.text = metric.display_text();
        panel.progress = metric.progress();
        panel.value = Some(metric.value);
        panel.highlight.start(now);
        self.last_update = Some(Local::now());
        self.dirty = true;
    }

    pub fn cancel_highlights(&mut self) {
        for panel in &mut self.panels {
            panel.highlight.cancel();
        }
        self.dirty = true;
    }

    /// True when the last frame is stale, a pulse is still playing, or a
    /// pulse has just ended and its label must be drawn back at rest.
    pub fn needs_redraw(&self, now: Instant) -> bool {
        self.dirty
            || self
                .panels
                .iter()
                .any(|p| p.highlight.is_active(now) || p.highlight.has_expired(now))
    }

    /// Record that a frame for `now` was drawn.
    pub fn mark_drawn(&mut self, now: Instant) {
        self.dirty = false;
        for panel in &mut self.panels {
            panel.highlight.settle(now);
        }
    }
}

impl MetricSink for DashboardState {
    fn update(&mut self, metric: &ParsedMetric) {
        self.apply(metric, Instant::now());
    }
}

// Create a dashboard image from the current panel state
pub fn create_image(
    config: &AppConfig,
    state: &DashboardState,
    fonts: Option<&Fonts>,
    now: Instant,
) -> DynamicImage {
    let width = config.dashboard.width as u32;
    let height = config.dashboard.height as u32;
    let colours = Colours::default();

    let mut image = RgbaImage::from_pixel(width, height, colours.background);

    let y_header = 8u32;
    let y_separator = 40u32;

    let mut header_ctx = widgets::RenderContext {
        state,
        fonts,
        colours: &colours,
        image: &mut image,
        x: 0,
        y: y_header,
        width,
        now,
    };
    widgets::render_header(&mut header_ctx);

    drawing::horizontal_line(&mut image, 0, y_separator, width);

    let mut panels_ctx = widgets::RenderContext {
        state,
        fonts,
        colours: &colours,
        image: &mut image,
        x: 0,
        y: y_separator + 10,
        width,
        now,
    };
    widgets::render_metric_panels(&mut panels_ctx, height.saturating_sub(y_separator + 10));

    DynamicImage::ImageRgba8(image)
}

pub fn save_image(config: &AppConfig, image: &DynamicImage) -> Result<()> {
    let target_file = &config.dashboard.file;

    image
        .save(target_file)
        .context(format!("Failed to save dashboard to {}", target_file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::dispatch_line;
    use std::time::Duration;

    #[test]
    fn starts_with_placeholders() {
        let state = DashboardState::new();
        assert_eq!(state.panel(MetricKind::Co2).text(), "CO2 (PPM): ");
        assert_eq!(state.panel(MetricKind::HeatIndex).text(), "Heat Index (C): ");
        assert_eq!(state.panel(MetricKind::SoundLevel).progress(), 0);
        assert!(state.last_update().is_none());
    }

    #[test]
    fn co2_line_updates_only_co2() {
        let mut state = DashboardState::new();
        dispatch_line("CO2: 412 ppm", &mut state);

        let co2 = state.panel(MetricKind::Co2);
        assert_eq!(co2.text(), "CO2 (PPM): 412.0");
        assert_eq!(co2.progress(), 412);
        assert_eq!(co2.value(), Some(412.0));
        assert!(co2.highlight().is_active(Instant::now()));

        let heat = state.panel(MetricKind::HeatIndex);
        assert_eq!(heat.text(), "Heat Index (C): ");
        assert!(!heat.highlight().is_active(Instant::now()));
    }

    #[test]
    fn heat_index_shows_degree_suffix() {
        let mut state = DashboardState::new();
        dispatch_line("Heat Index: 28.5\u{00B0}C", &mut state);

        let heat = state.panel(MetricKind::HeatIndex);
        assert_eq!(heat.text(), "Heat Index (C): 28.5\u{00B0}C");
        assert_eq!(heat.progress(), 28);
    }

    #[test]
    fn bad_lines_leave_state_untouched() {
        let mut state = DashboardState::new();
        dispatch_line("Heat Index: 30", &mut state);
        let before: Vec<(String, i64)> = state
            .panels()
            .iter()
            .map(|p| (p.text().to_string(), p.progress()))
            .collect();

        for line in ["Heat Index 31", "Pressure: 1013 hPa", "Heat Index: abc"] {
            dispatch_line(line, &mut state);
        }

        let after: Vec<(String, i64)> = state
            .panels()
            .iter()
            .map(|p| (p.text().to_string(), p.progress()))
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn repeated_line_is_idempotent() {
        let mut state = DashboardState::new();
        dispatch_line("Sound Level: 45.7dB", &mut state);
        let first = state.panel(MetricKind::SoundLevel).clone();
        dispatch_line("Sound Level: 45.7dB", &mut state);
        let second = state.panel(MetricKind::SoundLevel);

        assert_eq!(first.text(), second.text());
        assert_eq!(first.progress(), second.progress());
        assert_eq!(second.text(), "Sound Level (dB): 45.7");
        assert_eq!(second.progress(), 45);
    }

    #[test]
    fn fill_fraction_is_clamped() {
        let mut state = DashboardState::new();
        let now = Instant::now();
        state.apply(&ParsedMetric::new(MetricKind::Co2, 412.0), now);
        state.apply(&ParsedMetric::new(MetricKind::SoundLevel, 45.7), now);

        assert_eq!(state.panel(MetricKind::Co2).fill_fraction(), 1.0);
        assert!((state.panel(MetricKind::SoundLevel).fill_fraction() - 0.45).abs() < 1e-6);
        assert_eq!(state.panel(MetricKind::HeatIndex).fill_fraction(), 0.0);
    }

    #[test]
    fn redraw_follows_dirty_flag_and_pulse() {
        let mut state = DashboardState::new();
        let now = Instant::now();
        assert!(state.needs_redraw(now));
        state.mark_drawn(now);
        assert!(!state.needs_redraw(now));

        state.apply(&ParsedMetric::new(MetricKind::Co2, 500.0), now);
        state.mark_drawn(now);
        assert!(state.needs_redraw(now + Duration::from_millis(100)));
        // One more frame once the pulse ends, then quiet.
        let after = now + Duration::from_millis(600);
        assert!(state.needs_redraw(after));
        state.mark_drawn(after);
        assert!(!state.needs_redraw(after + Duration::from_millis(100)));

        state.apply(&ParsedMetric::new(MetricKind::Co2, 501.0), after);
        state.cancel_highlights();
        assert!(state.needs_redraw(after));
        state.mark_drawn(after);
        assert!(!state.needs_redraw(after + Duration::from_millis(100)));
    }

    #[test]
    fn last_frame_of_a_pulse_is_at_rest() {
        let mut state = DashboardState::new();
        let start = Instant::now();
        state.apply(&ParsedMetric::new(MetricKind::HeatIndex, 30.0), start);

        let mut last_drawn = None;
        for i in 0..20 {
            let now = start + Duration::from_millis(50 + 100 * i);
            if state.needs_redraw(now) {
                last_drawn = Some(state.panel(MetricKind::HeatIndex).highlight().colour_at(now));
                state.mark_drawn(now);
            }
        }

        assert_eq!(last_drawn, Some(Colours::default().text));
    }

    #[test]
    fn image_matches_configured_size() {
        let mut config = AppConfig::default();
        config.dashboard.width = 320;
        config.dashboard.height = 240;
        let state = DashboardState::new();

        let image = create_image(&config, &state, None, Instant::now());

        assert_eq!(image.width(), 320);
        assert_eq!(image.height(), 240);
    }

    #[test]
    fn save_image_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.dashboard.file = dir.path().join("out.png").to_string_lossy().into_owned();
        let image = create_image(&config, &DashboardState::new(), None, Instant::now());

        save_image(&config, &image).unwrap();

        assert!(dir.path().join("out.png").exists());
    }
}
