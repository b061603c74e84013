use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::model::Dataset;
use crate::error::PipelineError;

/// Header names treated as identifiers/metadata, never analysed.
/// Compared after trimming and lowercasing.
pub const SKIP_COLUMNS: [&str; 6] = ["id", "index", "row", "timestamp", "time", "date"];

// ---------------------------------------------------------------------------
// Locating the input
// ---------------------------------------------------------------------------

/// Return the first candidate path that exists.
pub fn locate_dataset(candidates: &[PathBuf]) -> Result<PathBuf, PipelineError> {
    if let Some(found) = candidates.iter().find(|p| p.exists()) {
        log::debug!("Using dataset at {}", found.display());
        return Ok(found.clone());
    }

    let file_name = candidates
        .first()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset".to_string());

    Err(PipelineError::DatasetNotFound {
        file_name,
        searched: candidates.to_vec(),
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Load a CSV file with a header row.
pub fn load_csv(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening CSV {}", path.display()))?;
    read_csv(file).with_context(|| format!("reading CSV {}", path.display()))
}

/// Parse CSV text from any reader.
///
/// Rows may be ragged: all cells are kept as raw text and interpreted later,
/// so a record's length is not checked against the header.
pub fn read_csv<R: Read>(input: R) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);

    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    let dataset = Dataset::from_records(headers, records);
    log::info!(
        "Loaded {} rows with columns {:?}",
        dataset.len(),
        dataset.headers
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Column selection
// ---------------------------------------------------------------------------

/// Whether a header names a metadata column.
pub fn is_skipped(header: &str) -> bool {
    let key = header.trim().to_lowercase();
    SKIP_COLUMNS.contains(&key.as_str())
}

/// Header names eligible for numeric analysis, in file order.
///
/// Blank headers and the skip-list are excluded; a repeated name is
/// listed once.
pub fn candidate_columns(headers: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(headers.len());
    for h in headers {
        if h.is_empty() || is_skipped(h) || out.contains(h) {
            continue;
        }
        out.push(h.clone());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_header_and_rows_as_raw_text() {
        let csv = "id,anxiety_level,stress_level\n1,14,1\n2, 15 ,2\n";
        let ds = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(ds.headers, vec!["id", "anxiety_level", "stress_level"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.rows[1]["anxiety_level"], " 15 ");
    }

    #[test]
    fn ragged_rows_are_accepted() {
        let csv = "a,b,c\n1,2\n1,2,3,4\n";
        let ds = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(ds.rows[0]["c"], "");
        assert_eq!(ds.rows[1]["c"], "3");
    }

    #[test]
    fn invalid_utf8_is_an_error() {
        let bytes: &[u8] = b"a,b\n1,\xff\n";
        assert!(read_csv(bytes).is_err());
    }

    #[test]
    fn skip_list_ignores_case_and_whitespace() {
        assert!(is_skipped("ID"));
        assert!(is_skipped(" Timestamp "));
        assert!(is_skipped("date"));
        assert!(!is_skipped("study_load"));
        assert!(!is_skipped("identity"));
    }

    #[test]
    fn candidate_columns_drop_metadata_and_blanks() {
        let headers: Vec<String> = ["Index", "", "sleep_quality", "Row", "bullying", "bullying"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(candidate_columns(&headers), vec!["sleep_quality", "bullying"]);
    }

    #[test]
    fn locate_prefers_first_existing_candidate() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("StressLevelDataset.csv");
        let nested = dir.path().join("data");
        std::fs::create_dir(&nested).unwrap();
        let second = nested.join("StressLevelDataset.csv");
        std::fs::write(&second, "a\n1\n").unwrap();

        let candidates = vec![first.clone(), second.clone()];
        assert_eq!(locate_dataset(&candidates).unwrap(), second);

        std::fs::write(&first, "a\n1\n").unwrap();
        assert_eq!(locate_dataset(&candidates).unwrap(), first);
    }

    #[test]
    fn locate_reports_all_searched_paths() {
        let dir = tempfile::tempdir().unwrap();
        let candidates = vec![
            dir.path().join("StressLevelDataset.csv"),
            dir.path().join("data").join("StressLevelDataset.csv"),
        ];
        match locate_dataset(&candidates) {
            Err(PipelineError::DatasetNotFound {
                file_name,
                searched,
            }) => {
                assert_eq!(file_name, "StressLevelDataset.csv");
                assert_eq!(searched, candidates);
            }
            other => panic!("expected DatasetNotFound, got {other:?}"),
        }
    }

    #[test]
    fn load_csv_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.csv");
        std::fs::write(&path, "x,stress_level\n3,1\n").unwrap();
        let ds = load_csv(&path).unwrap();
        assert_eq!(ds.rows[0]["x"], "3");
    }
}
