use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum HcbenchError {
    #[error("No algorithm config found at {path}. Create one or pass --config.")]
    ConfigNotFound { path: PathBuf },

    #[error("Failed to read config {path}: {source}")]
    ConfigReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {detail}")]
    ConfigParseError { path: PathBuf, detail: String },

    #[error("Config {path} defines no algorithms")]
    NoAlgorithms { path: PathBuf },

    #[error("'{selector}' matches no configured algorithm name or mode")]
    UnknownAlgorithm { selector: String },

    #[error("No results found at {path}. Run `hcbench` first to produce them.")]
    ResultsNotFound { path: PathBuf },

    #[error("Failed to write results to {path}: {detail}")]
    ResultsWriteError { path: PathBuf, detail: String },

    #[error("Failed to read results from {path}: {detail}")]
    ResultsReadError { path: PathBuf, detail: String },
}
