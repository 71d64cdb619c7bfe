use std::path::PathBuf;

use thiserror::Error;

/// Why a dataset could not be loaded.
#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("failed to read {dataset} data from {}: {error}", .path.display())]
    Io {
        dataset: &'static str,
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    #[error("failed to parse {dataset} data: {error}")]
    Parse {
        dataset: &'static str,
        #[source]
        error: serde_json::Error,
    },

    #[error("unexpected {dataset} data layout: {reason}")]
    Layout {
        dataset: &'static str,
        reason: String,
    },
}
