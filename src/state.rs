use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::chart::{html, Chart, ChartVariant};
use crate::config::ReportConfig;
use crate::data::loader::load_csv;
use crate::data::model::Summary;
use crate::data::stats::summarize;
use crate::pipeline::Report;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full viewer state, independent of rendering.
pub struct AppState {
    /// Statistics of the loaded dataset (None until a file is loaded).
    pub summary: Option<Summary>,

    /// Presentation model derived from `summary` for `variant` (cached).
    pub chart: Option<Chart>,

    /// Active chart layout.
    pub variant: ChartVariant,

    /// Directory that "Export HTML" writes into.
    pub output_dir: PathBuf,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            summary: None,
            chart: None,
            variant: config.variant,
            output_dir: config.output_dir.clone(),
            status_message: None,
        }
    }

    /// Start from the report the pipeline already produced.
    pub fn from_report(config: &ReportConfig, report: Report) -> Self {
        let mut state = Self::new(config);
        state.status_message = Some(format!("Wrote {}", report.output_path.display()));
        state.chart = Some(report.chart);
        state.summary = Some(report.summary);
        state
    }

    /// Ingest freshly computed statistics and rebuild the chart.
    pub fn set_summary(&mut self, summary: Summary) {
        self.chart = Some(Chart::from_summary(&summary, self.variant));
        self.summary = Some(summary);
        self.status_message = None;
    }

    /// Load and summarize another CSV file. The current data is kept when
    /// this fails.
    pub fn load_path(&mut self, path: &Path) -> Result<()> {
        let dataset = load_csv(path)?;
        let summary = summarize(&dataset, path)?;
        self.set_summary(summary);
        Ok(())
    }

    /// Switch layout and rebuild the chart.
    pub fn set_variant(&mut self, variant: ChartVariant) {
        self.variant = variant;
        if let Some(summary) = &self.summary {
            self.chart = Some(Chart::from_summary(summary, variant));
        }
    }

    /// Write the current chart to the variant's HTML file.
    pub fn export_html(&mut self) -> Result<Option<PathBuf>> {
        let Some(chart) = &self.chart else {
            return Ok(None);
        };
        let path = self.output_dir.join(self.variant.output_file());
        html::write_html(chart, &path)?;
        self.status_message = Some(format!("Wrote {}", path.display()));
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_state(dir: &Path) -> AppState {
        let config = ReportConfig {
            output_dir: dir.to_path_buf(),
            open_viewer: false,
            ..ReportConfig::default()
        };
        AppState::new(&config)
    }

    #[test]
    fn load_path_builds_chart() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("survey.csv");
        std::fs::write(&csv, "study_load,stress_level\n15,1\n15,1\n").unwrap();

        let mut state = scratch_state(dir.path());
        state.load_path(&csv).unwrap();
        let chart = state.chart.as_ref().unwrap();
        assert_eq!(chart.variant, ChartVariant::Categorized);
        assert_eq!(chart.points.len(), 2);
        assert_eq!(state.summary.as_ref().unwrap().source, csv);
    }

    #[test]
    fn failed_load_keeps_previous_data() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.csv");
        let bad = dir.path().join("bad.csv");
        std::fs::write(&good, "bullying\n3\n").unwrap();
        std::fs::write(&bad, "name\nann\n").unwrap();

        let mut state = scratch_state(dir.path());
        state.load_path(&good).unwrap();
        assert!(state.load_path(&bad).is_err());
        assert_eq!(state.summary.as_ref().unwrap().source, good);
    }

    #[test]
    fn switching_variant_rebuilds_chart() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("survey.csv");
        std::fs::write(&csv, "study_load\n30\n").unwrap();

        let mut state = scratch_state(dir.path());
        state.load_path(&csv).unwrap();
        state.set_variant(ChartVariant::Basic);
        let chart = state.chart.as_ref().unwrap();
        assert_eq!(chart.variant, ChartVariant::Basic);
        assert_eq!(chart.points[0].size, 12.0);
    }

    #[test]
    fn export_writes_variant_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = scratch_state(dir.path());
        assert_eq!(state.export_html().unwrap(), None);

        let csv = dir.path().join("survey.csv");
        std::fs::write(&csv, "study_load\n30\n").unwrap();
        state.load_path(&csv).unwrap();
        state.set_variant(ChartVariant::Basic);
        let written = state.export_html().unwrap().unwrap();
        assert_eq!(written, dir.path().join("scatter_plot.html"));
        assert!(written.exists());
    }
}
