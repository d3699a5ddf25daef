//! Sequential batch generation from a CSV list of URL suffixes.
//!
//! Each non-blank row contributes one label. Processing stops at the first
//! failure; labels already written stay on disk.

use std::io::Read;
use std::path::{Path, PathBuf};

use label_engine::{ErrorCorrection, FontSet, LabelError, LabelRequest, Layout, render};

use super::output::batch_file_name;

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Batch item {index} ({url}) failed: {source}")]
    Item {
        index: usize,
        url: String,
        #[source]
        source: LabelError,
    },
}

/// Settings shared by every label of a batch.
#[derive(Debug, Clone)]
pub struct BatchJob {
    pub base_url: String,
    pub layout: Layout,
    pub qr_version: u32,
    pub error_correction: ErrorCorrection,
    pub output_dir: PathBuf,
}

impl BatchJob {
    fn request_for(&self, suffix: &str) -> LabelRequest {
        LabelRequest::new(format!("{}{}", self.base_url, suffix), self.layout.clone())
            .with_qr_version(self.qr_version)
            .with_error_correction(self.error_correction)
    }
}

/// Read URL suffixes from the first column of a header-less CSV.
/// Blank rows are skipped.
pub fn read_suffixes<R: Read>(reader: R) -> Result<Vec<String>, BatchError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut suffixes = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let Some(first) = record.get(0).map(str::trim) else {
            continue;
        };
        if !first.is_empty() {
            suffixes.push(first.to_string());
        }
    }
    Ok(suffixes)
}

/// Read suffixes from a CSV file on disk.
pub fn read_suffix_file(path: &Path) -> Result<Vec<String>, BatchError> {
    let file = std::fs::File::open(path)?;
    read_suffixes(file)
}

/// Render and save one label per suffix, in order.
///
/// Returns the paths written. The first failing item aborts the batch.
pub fn run_batch(
    job: &BatchJob,
    suffixes: &[String],
    fonts: &FontSet,
) -> Result<Vec<PathBuf>, BatchError> {
    std::fs::create_dir_all(&job.output_dir)?;

    let mut written = Vec::with_capacity(suffixes.len());
    for (i, suffix) in suffixes.iter().enumerate() {
        let index = i + 1;
        let request = job.request_for(suffix);
        let path = job.output_dir.join(batch_file_name(index, &request.url));

        render(&request, fonts)
            .and_then(|label| label.save_png(&path))
            .map_err(|source| BatchError::Item {
                index,
                url: request.url.clone(),
                source,
            })?;

        tracing::debug!(index, url = %request.url, "Batch item written");
        written.push(path);
    }

    tracing::info!(count = written.len(), dir = %job.output_dir.display(), "Batch complete");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffixes_skip_blank_rows_and_trim() {
        let input = "dev-1\n\n  dev-2  \n,\ndev-3,extra\n";
        let suffixes = read_suffixes(input.as_bytes()).unwrap();
        assert_eq!(suffixes, vec!["dev-1", "dev-2", "dev-3"]);
    }

    #[test]
    fn request_joins_base_and_suffix() {
        let job = BatchJob {
            base_url: "https://x.com/d?deviceId=".into(),
            layout: Layout::Square { size_px: 200 },
            qr_version: 99,
            error_correction: ErrorCorrection::Q,
            output_dir: PathBuf::from("out"),
        };
        let req = job.request_for("A1");
        assert_eq!(req.url, "https://x.com/d?deviceId=A1");
        assert_eq!(req.qr_version, label_engine::DEFAULT_QR_VERSION);
        assert_eq!(req.error_correction, ErrorCorrection::Q);
    }
}
