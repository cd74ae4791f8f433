use crate::types::{Sample, SummaryRow};

/// Reduce a sample sequence to one row per algorithm with at least one
/// usable sample.
///
/// A sample is usable when both `speed_hps` and `duration` are present.
/// Groups whose samples are all unusable are omitted entirely rather than
/// emitted as zero or NaN. Row order is first-seen order of usable groups.
pub fn aggregate(samples: &[Sample]) -> Vec<SummaryRow> {
    let mut groups: Vec<(&str, Vec<(f64, f64)>)> = Vec::new();

    for sample in samples {
        let (Some(speed_hps), Some(duration)) = (sample.speed_hps, sample.duration) else {
            continue;
        };

        match groups.iter_mut().find(|(name, _)| *name == sample.name) {
            Some((_, values)) => values.push((speed_hps, duration)),
            None => groups.push((sample.name.as_str(), vec![(speed_hps, duration)])),
        }
    }

    groups
        .into_iter()
        .map(|(name, values)| {
            let count = values.len() as f64;
            SummaryRow {
                name: name.to_string(),
                avg_speed_hps: values.iter().map(|(speed, _)| speed).sum::<f64>() / count,
                avg_duration: values.iter().map(|(_, duration)| duration).sum::<f64>() / count,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usable(name: &str, speed_hps: f64, duration: f64) -> Sample {
        Sample {
            name: name.to_string(),
            mode: 0,
            speed_raw: format!("{speed_hps} H/s"),
            speed_hps: Some(speed_hps),
            duration: Some(duration),
        }
    }

    fn error_sample(name: &str) -> Sample {
        Sample {
            name: name.to_string(),
            mode: 0,
            speed_raw: "Error".to_string(),
            speed_hps: None,
            duration: None,
        }
    }

    #[test]
    fn means_over_usable_samples() {
        let samples = vec![
            usable("MD5", 1e6, 1.0),
            usable("MD5", 2e6, 2.0),
            usable("MD5", 3e6, 3.0),
        ];

        let rows = aggregate(&samples);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "MD5");
        assert_eq!(rows[0].avg_speed_hps, 2e6);
        assert_eq!(rows[0].avg_duration, 2.0);
    }

    #[test]
    fn unusable_samples_are_filtered_within_a_group() {
        let samples = vec![
            usable("MD5", 1e6, 1.0),
            error_sample("MD5"),
            usable("MD5", 3e6, 3.0),
        ];

        let rows = aggregate(&samples);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].avg_speed_hps, 2e6);
        assert_eq!(rows[0].avg_duration, 2.0);
    }

    #[test]
    fn fully_unusable_group_is_omitted() {
        let samples = vec![
            usable("MD5", 1e6, 1.0),
            error_sample("SHA1"),
            error_sample("SHA1"),
            error_sample("SHA1"),
        ];

        let rows = aggregate(&samples);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "MD5");
    }

    #[test]
    fn appending_unusable_sample_leaves_summary_unchanged() {
        let mut samples = vec![usable("MD5", 1e6, 1.5), usable("SHA1", 5e8, 2.5)];
        let before = aggregate(&samples);

        samples.push(error_sample("MD5"));
        samples.push(error_sample("NTLM"));
        let after = aggregate(&samples);

        assert_eq!(before, after);
    }

    #[test]
    fn empty_input_yields_empty_summary() {
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn partial_sample_is_unusable() {
        // Only one of the two numeric fields present: still unusable.
        let half = Sample {
            name: "MD5".to_string(),
            mode: 0,
            speed_raw: "N/A".to_string(),
            speed_hps: None,
            duration: Some(1.2),
        };
        assert!(aggregate(&[half]).is_empty());
    }

    #[test]
    fn interleaved_groups_keep_first_seen_order() {
        let samples = vec![
            usable("SHA1", 2e6, 1.0),
            usable("MD5", 1e6, 1.0),
            usable("SHA1", 4e6, 3.0),
            usable("MD5", 3e6, 3.0),
        ];

        let rows = aggregate(&samples);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "SHA1");
        assert_eq!(rows[0].avg_speed_hps, 3e6);
        assert_eq!(rows[1].name, "MD5");
        assert_eq!(rows[1].avg_speed_hps, 2e6);
    }
}
