use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

use crate::errors::HcbenchError;
use crate::types::{Sample, SummaryRow, round2};

/// Write the full sample sequence to a CSV file.
///
/// Header is `name,mode,speed_raw,speed_hps,duration`; absent numeric
/// fields serialize as empty, never as zero.
pub fn write_csv(path: &Path, samples: &[Sample]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).map_err(|err| HcbenchError::ResultsWriteError {
            path: path.to_path_buf(),
            detail: err.to_string(),
        })?;

    for sample in samples {
        writer
            .serialize(sample)
            .map_err(|err| HcbenchError::ResultsWriteError {
                path: path.to_path_buf(),
                detail: err.to_string(),
            })?;
    }

    writer.flush().map_err(|err| HcbenchError::ResultsWriteError {
        path: path.to_path_buf(),
        detail: err.to_string(),
    })?;

    Ok(())
}

/// Read a sample sequence back from a results CSV.
pub fn read_samples(path: &Path) -> Result<Vec<Sample>> {
    if !path.is_file() {
        return Err(HcbenchError::ResultsNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }

    let mut reader =
        csv::Reader::from_path(path).map_err(|err| HcbenchError::ResultsReadError {
            path: path.to_path_buf(),
            detail: err.to_string(),
        })?;

    let mut samples = Vec::new();
    for record in reader.deserialize() {
        let sample: Sample = record.map_err(|err| HcbenchError::ResultsReadError {
            path: path.to_path_buf(),
            detail: err.to_string(),
        })?;
        samples.push(sample);
    }

    Ok(samples)
}

/// Format an H/s value back into a unit-suffixed string, e.g. `2.50 MH/s`.
pub fn format_hps(hps: f64) -> String {
    if hps >= 1e12 {
        format!("{:.2} TH/s", hps / 1e12)
    } else if hps >= 1e9 {
        format!("{:.2} GH/s", hps / 1e9)
    } else if hps >= 1e6 {
        format!("{:.2} MH/s", hps / 1e6)
    } else if hps >= 1e3 {
        format!("{:.2} kH/s", hps / 1e3)
    } else {
        format!("{:.2} H/s", hps)
    }
}

/// Aligned summary table with header and footer.
pub fn format_summary(rows: &[SummaryRow]) -> String {
    let mut out = String::new();

    let header = "Benchmark summary (mean over usable runs):";
    out.push_str(
        &header
            .if_supports_color(Stream::Stdout, |s| s.dimmed())
            .to_string(),
    );
    out.push_str("\n\n");

    if !rows.is_empty() {
        let max_name_width = rows.iter().map(|r| r.name.len()).max().unwrap_or(0);

        for row in rows {
            let name_padded = format!("{:<width$}", row.name, width = max_name_width);
            let name_colored = name_padded
                .if_supports_color(Stream::Stdout, |s| s.green())
                .to_string();

            // Speed: right-aligned 12 chars, cyan
            let speed_padded = format!("{:>12}", format_hps(row.avg_speed_hps));
            let speed_colored = speed_padded
                .if_supports_color(Stream::Stdout, |s| s.cyan())
                .to_string();

            // Duration: right-aligned, yellow
            let duration_padded = format!("{:>8}", format!("{:.2}s", row.avg_duration));
            let duration_colored = duration_padded
                .if_supports_color(Stream::Stdout, |s| s.yellow())
                .to_string();

            out.push_str(&format!(
                "  {}  {}  {}\n",
                name_colored, speed_colored, duration_colored
            ));
        }

        out.push('\n');
    }

    let footer = format!("{} algorithm(s) with usable runs", rows.len());
    out.push_str(
        &footer
            .if_supports_color(Stream::Stdout, |s| s.dimmed())
            .to_string(),
    );
    out.push('\n');

    out
}

/// JSON output format.
#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    algorithms: Vec<JsonRow<'a>>,
}

#[derive(Serialize)]
struct JsonRow<'a> {
    name: &'a str,
    avg_speed_hps: f64,
    avg_speed_display: String,
    avg_duration: f64,
}

pub fn format_json(rows: &[SummaryRow], generated_at: DateTime<Utc>) -> String {
    let report = JsonReport {
        generated_at: generated_at.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        algorithms: rows
            .iter()
            .map(|row| JsonRow {
                name: &row.name,
                avg_speed_hps: round2(row.avg_speed_hps),
                avg_speed_display: format_hps(row.avg_speed_hps),
                avg_duration: round2(row.avg_duration),
            })
            .collect(),
    };

    serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample(name: &str, speed_hps: Option<f64>, duration: Option<f64>) -> Sample {
        Sample {
            name: name.to_string(),
            mode: 0,
            speed_raw: speed_hps
                .map(|v| format!("{v} H/s"))
                .unwrap_or_else(|| "Error".to_string()),
            speed_hps,
            duration,
        }
    }

    fn row(name: &str, avg_speed_hps: f64, avg_duration: f64) -> SummaryRow {
        SummaryRow {
            name: name.to_string(),
            avg_speed_hps,
            avg_duration,
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    // ---- CSV ----

    #[test]
    fn csv_absent_fields_serialize_as_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("results.csv");

        write_csv(&path, &[sample("MD5", None, None)]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("name,mode,speed_raw,speed_hps,duration"));
        // Empty trailing fields, not zeros.
        assert_eq!(lines.next(), Some("MD5,0,Error,,"));
    }

    #[test]
    fn csv_roundtrip_preserves_absence() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("results.csv");

        let original = vec![
            sample("MD5", Some(1_337_500.0), Some(3.25)),
            sample("SHA1", None, None),
        ];
        write_csv(&path, &original).unwrap();

        let restored = read_samples(&path).unwrap();
        assert_eq!(restored.len(), 2);
        assert_eq!(restored[0].speed_hps, Some(1_337_500.0));
        assert_eq!(restored[0].duration, Some(3.25));
        assert_eq!(restored[1].speed_raw, "Error");
        assert_eq!(restored[1].speed_hps, None);
        assert_eq!(restored[1].duration, None);
    }

    #[test]
    fn read_missing_results_errors() {
        let tmp = tempfile::tempdir().unwrap();
        let result = read_samples(&tmp.path().join("absent.csv"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("No results found"));
    }

    #[test]
    fn read_malformed_results_errors() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("results.csv");
        std::fs::write(
            &path,
            "name,mode,speed_raw,speed_hps,duration\nMD5,not-a-mode,x,1.0,1.0\n",
        )
        .unwrap();

        let result = read_samples(&path);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read results")
        );
    }

    // ---- format_hps ----

    #[test]
    fn format_hps_unit_ladder() {
        assert_eq!(format_hps(12.0), "12.00 H/s");
        assert_eq!(format_hps(1_337.5), "1.34 kH/s");
        assert_eq!(format_hps(2_500_000.0), "2.50 MH/s");
        assert_eq!(format_hps(25_300_000_000.0), "25.30 GH/s");
        assert_eq!(format_hps(1.2e12), "1.20 TH/s");
    }

    #[test]
    fn format_hps_boundaries() {
        assert_eq!(format_hps(0.0), "0.00 H/s");
        assert_eq!(format_hps(1e3), "1.00 kH/s");
        assert_eq!(format_hps(999.99), "999.99 H/s");
    }

    // ---- format_summary ----

    #[test]
    fn summary_contains_rows_and_footer() {
        let rows = vec![row("MD5", 2.5e9, 3.2), row("SHA1", 9.0e8, 4.1)];
        let out = format_summary(&rows);

        assert!(out.contains("Benchmark summary"));
        assert!(out.contains("MD5"));
        assert!(out.contains("SHA1"));
        assert!(out.contains("2.50 GH/s"));
        assert!(out.contains("900.00 MH/s"));
        assert!(out.contains("3.20s"));
        assert!(out.contains("2 algorithm(s)"));
    }

    #[test]
    fn summary_empty_rows() {
        let out = format_summary(&[]);
        assert!(out.contains("0 algorithm(s)"));
    }

    // ---- format_json ----

    #[test]
    fn json_report_schema() {
        let rows = vec![row("MD5", 2_500_000.0, 3.256)];
        let out = format_json(&rows, fixed_now());

        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["generated_at"], "2025-06-15T12:00:00Z");

        let algorithms = parsed["algorithms"].as_array().unwrap();
        assert_eq!(algorithms.len(), 1);
        assert_eq!(algorithms[0]["name"], "MD5");
        assert_eq!(algorithms[0]["avg_speed_hps"], 2_500_000.0);
        assert_eq!(algorithms[0]["avg_speed_display"], "2.50 MH/s");
        assert_eq!(algorithms[0]["avg_duration"], 3.26);
    }

    #[test]
    fn json_empty_rows() {
        let out = format_json(&[], fixed_now());
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert!(parsed["algorithms"].as_array().unwrap().is_empty());
    }
}
