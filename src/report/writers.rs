use std::io::Write as _;
use std::path::{Path, PathBuf};

use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::info;

use crate::args::OutputFormat;
use crate::error::{AppError, AppResult, SinkError};

use super::RunReport;
use super::render::{render_console, render_csv, render_html, render_json, render_markdown};

/// Prints the console table, or writes `apiping.<ext>` into `out_dir` for the
/// file formats. Returns the written path, if any.
///
/// # Errors
///
/// Returns an error when rendering fails or the output cannot be written.
pub async fn write_report(
    report: &RunReport,
    format: OutputFormat,
    out_dir: &Path,
    title: &str,
) -> AppResult<Option<PathBuf>> {
    let content = match format {
        OutputFormat::Console => {
            let table = render_console(report)?;
            print_console(&table)?;
            return Ok(None);
        }
        OutputFormat::Csv => render_csv(report)?,
        OutputFormat::Html => render_html(report, title)?,
        OutputFormat::Md => render_markdown(report)?,
        OutputFormat::Json => render_json(report)?,
    };
    let extension = format.file_extension().unwrap_or("txt");
    let path = out_dir.join(format!("apiping.{}", extension));
    write_file(&path, content.as_bytes()).await?;
    info!("Results written to {}", path.display());
    Ok(Some(path))
}

fn print_console(table: &str) -> AppResult<()> {
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(table.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(|err| AppError::sink(SinkError::PrintReport { source: err }))
}

async fn write_file(path: &Path, content: &[u8]) -> AppResult<()> {
    let map_write = |err: std::io::Error| {
        AppError::sink(SinkError::WriteReport {
            path: path.to_path_buf(),
            source: err,
        })
    };
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(map_write)?;
    }
    let file = tokio::fs::File::create(path).await.map_err(map_write)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(content).await.map_err(map_write)?;
    writer.flush().await.map_err(map_write)?;
    Ok(())
}
