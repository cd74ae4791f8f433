/// Marker token identifying hashcat's per-device throughput report line,
/// e.g. `Speed.#1.........:  1337.5 kH/s (52.43ms)`.
pub const SPEED_MARKER: &str = "Speed.#";

/// Find the first throughput report line in captured tool output.
pub fn find_speed_line(output: &str) -> Option<&str> {
    output.lines().find(|line| line.contains(SPEED_MARKER))
}

/// Parse a throughput report line into `(raw text, normalized H/s)`.
///
/// The raw text is everything after the first colon, trimmed, and is kept
/// even when it cannot be parsed so it remains available for diagnostics.
/// Malformed input never fails; it degrades to a `None` normalized value.
pub fn parse_speed(line: Option<&str>) -> (String, Option<f64>) {
    let Some(line) = line else {
        return ("N/A".to_string(), None);
    };

    let Some((_, rest)) = line.split_once(':') else {
        return ("N/A".to_string(), None);
    };

    let raw = rest.trim().to_string();

    let mut tokens = rest.split_whitespace();
    let (Some(value_token), Some(unit)) = (tokens.next(), tokens.next()) else {
        return (raw, None);
    };

    let Ok(value) = value_token.parse::<f64>() else {
        return (raw, None);
    };

    if unit_multiplier(unit).is_none() {
        eprintln!("  [!] Unrecognized unit '{unit}', assuming H/s");
    }

    (raw, Some(normalize(value, unit)))
}

/// Convert a throughput value in the given unit to H/s, rounded to two
/// decimal places. Unrecognized units are treated as already being H/s.
pub fn normalize(value: f64, unit: &str) -> f64 {
    let multiplier = unit_multiplier(unit).unwrap_or(1.0);
    crate::types::round2(value * multiplier)
}

fn unit_multiplier(unit: &str) -> Option<f64> {
    match unit {
        "H/s" => Some(1.0),
        "kH/s" => Some(1e3),
        "MH/s" => Some(1e6),
        "GH/s" => Some(1e9),
        "TH/s" => Some(1e12),
        _ => None,
    }
}
