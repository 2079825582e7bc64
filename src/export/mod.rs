//! JSON result export.
//!
//! Results are written as one pretty-printed JSON array:
//!
//! ```json
//! [{"domain": "example.com", "issues": [{"code": 7, "title": "No DMARC", "detail": "..."}]}]
//! ```

mod pipe;

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use crate::scan::ScanResult;
use pipe::IgnoreBrokenPipe;

/// Writes `results` to `output`, or to stdout when `output` is `-`.
///
/// # Errors
///
/// Fails if the output file cannot be created or written.
pub async fn write_results(output: &Path, results: &[ScanResult]) -> Result<()> {
    if output.as_os_str() == "-" {
        let stdout = io::stdout();
        return write_results_to(IgnoreBrokenPipe::new(stdout.lock()), results);
    }

    let file = tokio::fs::File::create(output)
        .await
        .with_context(|| format!("Failed to create output file: {}", output.display()))?
        .into_std()
        .await;
    write_results_to(io::BufWriter::new(file), results)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!("saved output in {}", output.display());
    Ok(())
}

/// Serializes `results` as a pretty-printed JSON array followed by a newline.
pub fn write_results_to<W: Write>(mut writer: W, results: &[ScanResult]) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, results).context("Failed to serialize results")?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
