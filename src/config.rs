use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

use crate::errors::HcbenchError;
use crate::types::AlgorithmSpec;

pub const DEFAULT_CONFIG_NAME: &str = "algorithms.toml";

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    algorithms: Vec<AlgorithmSpec>,
}

/// Resolve the config path to load.
///
/// An explicit `--config` path wins unconditionally (even if missing, so the
/// user gets an error about the file they named). Otherwise prefer
/// `./algorithms.toml`, then `<config dir>/hcbench/algorithms.toml`. Falls
/// back to the local name when neither exists, letting `load_algorithms`
/// report the not-found error against a predictable path.
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    let local = PathBuf::from(DEFAULT_CONFIG_NAME);
    if local.is_file() {
        return local;
    }

    if let Some(config_dir) = dirs::config_dir() {
        let fallback = config_dir.join("hcbench").join(DEFAULT_CONFIG_NAME);
        if fallback.is_file() {
            return fallback;
        }
    }

    local
}

/// Load the ordered algorithm list from a TOML config file.
///
/// The file holds `[[algorithms]]` tables with `name` and `mode` keys.
/// Order in the file is the order algorithms are benchmarked in.
pub fn load_algorithms(path: &Path) -> Result<Vec<AlgorithmSpec>> {
    if !path.is_file() {
        return Err(HcbenchError::ConfigNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }

    let text = std::fs::read_to_string(path).map_err(|source| HcbenchError::ConfigReadError {
        path: path.to_path_buf(),
        source,
    })?;

    let config: ConfigFile =
        toml::from_str(&text).map_err(|err| HcbenchError::ConfigParseError {
            path: path.to_path_buf(),
            detail: err.to_string(),
        })?;

    if config.algorithms.is_empty() {
        return Err(HcbenchError::NoAlgorithms {
            path: path.to_path_buf(),
        }
        .into());
    }

    Ok(config.algorithms)
}

/// Filter the configured algorithms by a comma-separated selector list.
///
/// Each selector is either an algorithm name (case-insensitive) or a mode
/// number. Config order is preserved and duplicates collapse. A selector
/// matching nothing is an error, so a typo cannot silently shrink the run.
pub fn select_algorithms(
    algorithms: Vec<AlgorithmSpec>,
    selectors: &str,
) -> Result<Vec<AlgorithmSpec>> {
    let mut wanted: Vec<bool> = vec![false; algorithms.len()];

    for selector in selectors.split(',') {
        let selector = selector.trim();
        if selector.is_empty() {
            continue;
        }

        let mode: Option<u32> = selector.parse().ok();
        let mut matched = false;

        for (i, algorithm) in algorithms.iter().enumerate() {
            if algorithm.name.eq_ignore_ascii_case(selector) || Some(algorithm.mode) == mode {
                wanted[i] = true;
                matched = true;
            }
        }

        if !matched {
            return Err(HcbenchError::UnknownAlgorithm {
                selector: selector.to_string(),
            }
            .into());
        }
    }

    Ok(algorithms
        .into_iter()
        .zip(wanted)
        .filter_map(|(algorithm, keep)| keep.then_some(algorithm))
        .collect())
}
