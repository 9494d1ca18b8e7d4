use crate::models::{MetricKind, ParsedMetric};
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Reasons a reading line produced no update.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("line has no ':' separator")]
    MalformedLine,

    #[error("label '{0}' names no known metric")]
    UnrecognizedMetric(String),

    #[error("invalid {kind} value: {raw}")]
    InvalidNumber { kind: MetricKind, raw: String },
}

fn non_numeric() -> &'static Regex {
    static NON_NUMERIC: OnceLock<Regex> = OnceLock::new();
    NON_NUMERIC.get_or_init(|| Regex::new(r"[^0-9.]").expect("static pattern compiles"))
}

/// Drop everything but ASCII digits and '.', so "28.5°C" becomes "28.5".
pub fn clean_value(raw: &str) -> String {
    non_numeric().replace_all(raw.trim(), "").into_owned()
}

/// Parse one `"<Label>: <value><unit>"` line.
pub fn parse_line(line: &str) -> Result<ParsedMetric, ParseError> {
    let (label, raw_value) = line.split_once(':').ok_or(ParseError::MalformedLine)?;

    let cleaned = clean_value(raw_value);

    let kind = MetricKind::from_label(label)
        .ok_or_else(|| ParseError::UnrecognizedMetric(label.to_string()))?;

    let value = cleaned
        .parse::<f64>()
        .map_err(|_| ParseError::InvalidNumber {
            kind,
            raw: raw_value.to_string(),
        })?;

    Ok(ParsedMetric::new(kind, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_reference_lines() {
        assert_eq!(
            parse_line("CO2: 412 ppm").unwrap(),
            ParsedMetric::new(MetricKind::Co2, 412.0)
        );
        assert_eq!(
            parse_line("Heat Index: 28.5\u{00B0}C").unwrap(),
            ParsedMetric::new(MetricKind::HeatIndex, 28.5)
        );
        assert_eq!(
            parse_line("Sound Level: 63.2 dB").unwrap(),
            ParsedMetric::new(MetricKind::SoundLevel, 63.2)
        );
    }

    #[test]
    fn cleaning_strips_units() {
        assert_eq!(clean_value(" 45.7dB"), "45.7");
        assert_eq!(clean_value("412 PPM"), "412");
        assert_eq!(clean_value("28.5\u{00B0}C "), "28.5");
        assert_eq!(clean_value("abc"), "");
        // Non-ASCII digits are not kept.
        assert_eq!(clean_value("\u{0663}2"), "2");
    }

    #[test]
    fn sound_level_with_glued_unit() {
        let parsed = parse_line("Sound Level: 45.7dB").unwrap();
        assert_eq!(parsed.kind, MetricKind::SoundLevel);
        assert_eq!(parsed.value, 45.7);
        assert_eq!(parsed.progress(), 45);
    }

    #[test]
    fn missing_colon_is_malformed() {
        assert_eq!(parse_line("CO2 412 ppm"), Err(ParseError::MalformedLine));
        assert_eq!(parse_line(""), Err(ParseError::MalformedLine));
    }

    #[test]
    fn splits_on_first_colon_only() {
        // The value segment keeps its later colons, which cleaning then drops.
        let parsed = parse_line("CO2: 4:12").unwrap();
        assert_eq!(parsed.value, 412.0);
    }

    #[test]
    fn unknown_label_is_unrecognized() {
        assert_eq!(
            parse_line("Humidity: 40 %"),
            Err(ParseError::UnrecognizedMetric("Humidity".to_string()))
        );
        assert!(matches!(
            parse_line("co2: 400"),
            Err(ParseError::UnrecognizedMetric(_))
        ));
    }

    #[test]
    fn label_is_matched_before_number() {
        // An unknown label with a bad number is still just unrecognized.
        assert!(matches!(
            parse_line("Pressure: n/a"),
            Err(ParseError::UnrecognizedMetric(_))
        ));
    }

    #[test]
    fn invalid_numbers_are_reported_for_every_metric() {
        assert_eq!(
            parse_line("Heat Index: abc"),
            Err(ParseError::InvalidNumber {
                kind: MetricKind::HeatIndex,
                raw: " abc".to_string(),
            })
        );
        assert!(matches!(
            parse_line("CO2: 1.2.3"),
            Err(ParseError::InvalidNumber { kind: MetricKind::Co2, .. })
        ));
        assert!(matches!(
            parse_line("Sound Level: ."),
            Err(ParseError::InvalidNumber { kind: MetricKind::SoundLevel, .. })
        ));
    }

    #[test]
    fn priority_prefers_co2() {
        let parsed = parse_line("Heat Index CO2: 30").unwrap();
        assert_eq!(parsed.kind, MetricKind::Co2);
    }
}
