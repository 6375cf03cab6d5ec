//! Python subprocess host for generated analysis code.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::ExecutionOutcome;

const PY_HARNESS: &str = include_str!("harness.py");

#[derive(Debug, Clone)]
pub struct ExecOptions {
    pub python_bin: String,
    pub preview_rows: usize,
}

/// Run one generated snippet against the dataset at `csv_path`.
///
/// The subprocess binds exactly `df` and `plt` for the snippet; nothing else
/// from the host crosses the boundary. The wait is unbounded: a snippet that
/// loops forever holds the interaction open.
pub async fn execute(code: &str, csv_path: &Path, opts: &ExecOptions) -> Result<ExecutionOutcome> {
    let chart_path = tempfile::Builder::new()
        .prefix("csvgpt-chart-")
        .suffix(".png")
        .tempfile()
        .context("creating chart output file")?
        .into_temp_path()
        .keep()
        .context("keeping chart output file")?;

    let payload = serde_json::json!({
        "code": code,
        "csv_path": csv_path,
        "preview_rows": opts.preview_rows,
        "chart_path": chart_path,
    });

    let mut cmd = Command::new(&opts.python_bin);
    cmd.arg("-u")
        .arg("-c")
        .arg(PY_HARNESS)
        .stdin(std::process::Stdio::piped())
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped());

    let mut child = cmd
        .spawn()
        .with_context(|| format!("failed to spawn interpreter: {}", opts.python_bin))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(serde_json::to_string(&payload)?.as_bytes())
            .await
            .context("writing execution payload")?;
        // drop closes the pipe so the harness sees EOF
    }

    let out = child
        .wait_with_output()
        .await
        .context("waiting for interpreter")?;

    if !out.status.success() {
        let _ = std::fs::remove_file(&chart_path);
        let stderr = String::from_utf8_lossy(&out.stderr);
        return Err(anyhow!(
            "interpreter exited with {}: {}",
            out.status,
            stderr.trim()
        ));
    }

    let stdout = String::from_utf8_lossy(&out.stdout);
    let outcome: ExecutionOutcome = serde_json::from_str(stdout.trim())
        .map_err(|e| anyhow!("unreadable execution outcome: {} (raw: {})", e, stdout.trim()))?;

    // the harness only fills the chart slot when a figure was drawn
    if outcome.chart.is_none() {
        let _ = std::fs::remove_file(&chart_path);
    }

    Ok(outcome)
}
