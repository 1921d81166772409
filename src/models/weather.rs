use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One day of ASOS observations for a station.
///
/// Values are kept as the strings the upstream sends; the chart layer
/// converts them with [`parse_float`].
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct WeatherObservation {
    /// Observation date
    #[serde(deserialize_with = "lenient_string")]
    pub tm: String,
    /// Station name
    #[serde(deserialize_with = "lenient_string")]
    pub stn_nm: String,
    /// Average temperature in Celsius
    #[serde(deserialize_with = "lenient_string")]
    pub avg_ta: String,
    /// Minimum temperature in Celsius
    #[serde(deserialize_with = "lenient_string")]
    pub min_ta: String,
    /// Maximum temperature in Celsius
    #[serde(deserialize_with = "lenient_string")]
    pub max_ta: String,
    /// Daily precipitation in mm, empty when no rain was recorded
    #[serde(deserialize_with = "lenient_string")]
    pub sum_rn: String,
}

impl WeatherObservation {
    #[must_use]
    pub fn average_temperature(&self) -> Option<f64> {
        parse_float(&self.avg_ta)
    }

    #[must_use]
    pub fn minimum_temperature(&self) -> Option<f64> {
        parse_float(&self.min_ta)
    }

    #[must_use]
    pub fn maximum_temperature(&self) -> Option<f64> {
        parse_float(&self.max_ta)
    }

    #[must_use]
    pub fn precipitation(&self) -> Option<f64> {
        parse_float(&self.sum_rn)
    }
}

/// Accepts strings as-is, numbers in their JSON form and `null` as empty.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Lenient number parsing: skips leading whitespace and reads the longest
/// numeric prefix, so `"12.5mm"` is `12.5`. Returns `None` when there is no
/// numeric prefix at all, including for the empty string.
#[must_use]
pub fn parse_float(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        let value = if bytes.first() == Some(&b'-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        return Some(value);
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    // exponent only counts when at least one digit follows it
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}
