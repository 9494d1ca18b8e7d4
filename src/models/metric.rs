use std::fmt;

/// One of the three quantities reported by the sensor board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Co2,
    HeatIndex,
    SoundLevel,
}

impl MetricKind {
    /// Match order for reading labels. The first hit wins.
    pub const ALL: [MetricKind; 3] = [MetricKind::Co2, MetricKind::HeatIndex, MetricKind::SoundLevel];

    /// Substring that identifies this metric in a reading label.
    pub fn label_pattern(self) -> &'static str {
        match self {
            MetricKind::Co2 => "CO2",
            MetricKind::HeatIndex => "Heat Index",
            MetricKind::SoundLevel => "Sound Level",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MetricKind::Co2 => "CO2",
            MetricKind::HeatIndex => "Heat Index",
            MetricKind::SoundLevel => "Sound Level",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            MetricKind::Co2 => "PPM",
            MetricKind::HeatIndex => "C",
            MetricKind::SoundLevel => "dB",
        }
    }

    /// Appended after the value in the label text.
    pub fn value_suffix(self) -> &'static str {
        match self {
            MetricKind::HeatIndex => "\u{00B0}C",
            _ => "",
        }
    }

    pub fn index(self) -> usize {
        match self {
            MetricKind::Co2 => 0,
            MetricKind::HeatIndex => 1,
            MetricKind::SoundLevel => 2,
        }
    }

    /// Find the metric a reading label refers to.
    pub fn from_label(label: &str) -> Option<MetricKind> {
        Self::ALL
            .into_iter()
            .find(|kind| label.contains(kind.label_pattern()))
    }

    /// Label text shown before any reading has arrived.
    pub fn placeholder_text(self) -> String {
        format!("{} ({}): ", self.name(), self.unit())
    }

    pub fn display_text(self, value: f64) -> String {
        format!(
            "{} ({}): {}{}",
            self.name(),
            self.unit(),
            format_value(value),
            self.value_suffix()
        )
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A reading that matched a known metric and carried a valid number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedMetric {
    pub kind: MetricKind,
    pub value: f64,
}

impl ParsedMetric {
    pub fn new(kind: MetricKind, value: f64) -> Self {
        Self { kind, value }
    }

    /// Integer value fed to the progress bar. Truncates toward zero, no clamping.
    pub fn progress(&self) -> i64 {
        self.value.trunc() as i64
    }

    pub fn display_text(&self) -> String {
        self.kind.display_text(self.value)
    }
}

/// Prints a reading the way the board's values have always been shown:
/// whole numbers keep one decimal place ("412.0"), other values print their
/// shortest exact form ("28.5"), and magnitudes from 1e16 up or below 1e-4
/// switch to exponent form with a signed two digit exponent ("1e+16", "1e-05").
pub fn format_value(value: f64) -> String {
    let magnitude = value.abs();
    if value.is_finite() && value != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        return exponent_form(value);
    }
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

fn exponent_form(value: f64) -> String {
    let formatted = format!("{value:e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exponent.abs())
        }
        None => formatted,
    }
}
