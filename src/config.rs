use std::path::PathBuf;

use crate::chart::ChartVariant;

/// File name of the survey dataset.
pub const DATASET_FILE: &str = "StressLevelDataset.csv";

// ---------------------------------------------------------------------------
// Report configuration
// ---------------------------------------------------------------------------

/// Everything a run needs to know. The binary always uses `Default`; tests
/// point the paths at a scratch directory.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Candidate input locations, checked in order; first existing wins.
    pub dataset_candidates: Vec<PathBuf>,
    /// Directory receiving the HTML artifact.
    pub output_dir: PathBuf,
    /// Which of the chart layouts to produce.
    pub variant: ChartVariant,
    /// Open the interactive viewer after the artifact is written.
    pub open_viewer: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            dataset_candidates: vec![
                PathBuf::from(DATASET_FILE),
                PathBuf::from("data").join(DATASET_FILE),
            ],
            output_dir: PathBuf::from("."),
            variant: ChartVariant::Categorized,
            open_viewer: true,
        }
    }
}

impl ReportConfig {
    /// Full path of the HTML artifact for the configured variant.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(self.variant.output_file())
    }
}
