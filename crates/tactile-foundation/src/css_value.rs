//! Reading configuration defaults from CSS custom properties.
//!
//! Only omitted config fields are resolved this way, once per resolved
//! config. Unparseable values fall back to the built-in defaults.

/// Custom property holding the default long-press threshold.
pub const LONG_PRESS_THRESHOLD_VAR: &str = "--tactile-long-press-threshold";
/// Custom property holding the default long-press cancel distance.
pub const LONG_PRESS_CANCEL_DISTANCE_VAR: &str = "--tactile-long-press-cancel-distance";
/// Custom property holding the default long-press haptic duration.
pub const LONG_PRESS_HAPTIC_VAR: &str = "--tactile-long-press-haptic";
/// Custom property holding the default snap threshold.
pub const SNAP_THRESHOLD_VAR: &str = "--tactile-snap-threshold";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CssValueError {
    Empty,
    InvalidNumber { value: String },
    UnsupportedUnit { value: String, expected: &'static str },
    Negative { value: String },
}

impl std::fmt::Display for CssValueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CssValueError::Empty => write!(f, "empty custom property value"),
            CssValueError::InvalidNumber { value } => write!(f, "`{value}` is not a number"),
            CssValueError::UnsupportedUnit { value, expected } => {
                write!(f, "`{value}` has an unsupported unit; expected {expected}")
            }
            CssValueError::Negative { value } => write!(f, "`{value}` must not be negative"),
        }
    }
}

impl std::error::Error for CssValueError {}

fn split_unit(value: &str) -> (&str, &str) {
    let end = value
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+' || c == 'e'))
        .unwrap_or(value.len());
    value.split_at(end)
}

fn parse_number(number: &str, original: &str) -> Result<f32, CssValueError> {
    number
        .parse::<f32>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| CssValueError::InvalidNumber {
            value: original.to_string(),
        })
}

/// Parses a length in pixels: `12px` or a bare `12`.
pub fn parse_px(value: &str) -> Result<f32, CssValueError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CssValueError::Empty);
    }
    let (number, unit) = split_unit(trimmed);
    let px = match unit.trim() {
        "" | "px" => parse_number(number, trimmed)?,
        _ => {
            return Err(CssValueError::UnsupportedUnit {
                value: trimmed.to_string(),
                expected: "px",
            })
        }
    };
    if px < 0.0 {
        return Err(CssValueError::Negative {
            value: trimmed.to_string(),
        });
    }
    Ok(px)
}

/// Parses a duration into milliseconds: `500ms`, `0.5s` or a bare `500`.
pub fn parse_ms(value: &str) -> Result<u64, CssValueError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CssValueError::Empty);
    }
    let (number, unit) = split_unit(trimmed);
    let millis = match unit.trim() {
        "" | "ms" => parse_number(number, trimmed)?,
        "s" => parse_number(number, trimmed)? * 1000.0,
        _ => {
            return Err(CssValueError::UnsupportedUnit {
                value: trimmed.to_string(),
                expected: "ms or s",
            })
        }
    };
    if millis < 0.0 {
        return Err(CssValueError::Negative {
            value: trimmed.to_string(),
        });
    }
    Ok(millis.round() as u64)
}

/// Reads computed custom properties from the host document.
pub trait CssVarReader {
    /// Raw computed value of `name`, `None` when unset.
    fn read_css_var(&self, name: &str) -> Option<String>;

    fn read_css_px(&self, name: &str) -> Option<f32> {
        let raw = self.read_css_var(name)?;
        match parse_px(&raw) {
            Ok(px) => Some(px),
            Err(err) => {
                log::warn!("ignoring {name}: {err}");
                None
            }
        }
    }

    fn read_css_ms(&self, name: &str) -> Option<u64> {
        let raw = self.read_css_var(name)?;
        match parse_ms(&raw) {
            Ok(ms) => Some(ms),
            Err(err) => {
                log::warn!("ignoring {name}: {err}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pixels() {
        assert_eq!(parse_px("12px"), Ok(12.0));
        assert_eq!(parse_px(" 7.5 "), Ok(7.5));
        assert_eq!(parse_px(""), Err(CssValueError::Empty));
        assert!(matches!(parse_px("3em"), Err(CssValueError::UnsupportedUnit { .. })));
        assert!(matches!(parse_px("-4px"), Err(CssValueError::Negative { .. })));
        assert!(matches!(parse_px("px"), Err(CssValueError::InvalidNumber { .. })));
    }

    #[test]
    fn parses_durations() {
        assert_eq!(parse_ms("500ms"), Ok(500));
        assert_eq!(parse_ms("0.5s"), Ok(500));
        assert_eq!(parse_ms("250"), Ok(250));
        assert!(matches!(parse_ms("2min"), Err(CssValueError::UnsupportedUnit { .. })));
    }

    struct Fixed(&'static str);

    impl CssVarReader for Fixed {
        fn read_css_var(&self, _name: &str) -> Option<String> {
            Some(self.0.to_string())
        }
    }

    #[test]
    fn reader_falls_back_on_garbage() {
        assert_eq!(Fixed("oops").read_css_ms(LONG_PRESS_THRESHOLD_VAR), None);
        assert_eq!(Fixed("1.2s").read_css_ms(LONG_PRESS_THRESHOLD_VAR), Some(1200));
        assert_eq!(Fixed("9px").read_css_px(SNAP_THRESHOLD_VAR), Some(9.0));
    }
}
