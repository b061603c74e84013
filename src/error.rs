use std::path::PathBuf;

use thiserror::Error;

/// Fatal conditions of a report run. Per-cell parse failures never reach
/// this type; they are skipped during aggregation.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Could not find {file_name} (searched: {})", display_paths(.searched))]
    DatasetNotFound {
        file_name: String,
        searched: Vec<PathBuf>,
    },

    #[error("No numeric columns to plot in {}", .source_path.display())]
    NoNumericColumns { source_path: PathBuf },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
