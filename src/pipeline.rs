use std::path::PathBuf;

use anyhow::Result;

use crate::chart::{html, Chart};
use crate::config::ReportConfig;
use crate::data::loader::{load_csv, locate_dataset};
use crate::data::model::Summary;
use crate::data::stats::summarize;

/// Result of one successful run.
#[derive(Debug, Clone)]
pub struct Report {
    pub summary: Summary,
    pub chart: Chart,
    pub output_path: PathBuf,
}

/// Locate → load → summarize → write the HTML artifact.
///
/// Nothing touches the output path until the statistics are complete, so a
/// failing run leaves no file behind.
pub fn run(config: &ReportConfig) -> Result<Report> {
    let source = locate_dataset(&config.dataset_candidates)?;
    let dataset = load_csv(&source)?;
    let summary = summarize(&dataset, &source)?;

    let chart = Chart::from_summary(&summary, config.variant);
    let output_path = config.output_path();
    html::write_html(&chart, &output_path)?;

    Ok(Report {
        summary,
        chart,
        output_path,
    })
}
