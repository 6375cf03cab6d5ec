//! End-to-end tests for the Python execution harness.
//!
//! These spawn a real interpreter; when python3 with pandas/matplotlib is not
//! available the tests print a warning and pass without asserting.

use std::io::Write as _;
use std::path::Path;
use std::process::Stdio;

use anyhow::Result;
use serde_json::Value;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

const PY_HARNESS: &str = include_str!("../src/execution/harness.py");

fn python_bin() -> String {
    std::env::var("PYTHON_BIN").unwrap_or_else(|_| "python3".into())
}

async fn python_ready() -> bool {
    Command::new(python_bin())
        .args(["-c", "import pandas, matplotlib"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map(|s| s.success())
        .unwrap_or(false)
}

fn sample_csv() -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().expect("temp csv");
    f.write_all(b"dept,attrition\nsales,yes\nhr,no\nsales,no\n")
        .expect("write csv");
    f
}

async fn run_harness(
    code: &str,
    csv_path: &Path,
    chart_path: &Path,
    preview_rows: usize,
) -> Result<Value> {
    let payload = serde_json::json!({
        "code": code,
        "csv_path": csv_path,
        "preview_rows": preview_rows,
        "chart_path": chart_path,
    });
    let mut child = Command::new(python_bin())
        .arg("-u")
        .arg("-c")
        .arg(PY_HARNESS)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(serde_json::to_string(&payload)?.as_bytes())
            .await?;
    }
    let out = child.wait_with_output().await?;
    assert!(
        out.status.success(),
        "harness failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    Ok(serde_json::from_slice(&out.stdout)?)
}

#[tokio::test]
async fn captures_prints_in_order() -> Result<()> {
    if !python_ready().await {
        println!("Warning: {} with pandas/matplotlib not available, skipping", python_bin());
        return Ok(());
    }
    let csv = sample_csv();
    let chart = tempfile::Builder::new().suffix(".png").tempfile()?;
    let outcome = run_harness(
        "print('a')\nprint(len(df))\nprint('b')",
        csv.path(),
        chart.path(),
        5,
    )
    .await?;
    assert_eq!(outcome["ok"], true);
    assert_eq!(outcome["stdout"], "a\n3\nb\n");
    assert!(outcome["table"].is_null());
    assert!(outcome["chart"].is_null());
    Ok(())
}

#[tokio::test]
async fn surfaces_result_head_as_table() -> Result<()> {
    if !python_ready().await {
        println!("Warning: {} with pandas/matplotlib not available, skipping", python_bin());
        return Ok(());
    }
    let csv = sample_csv();
    let chart = tempfile::Builder::new().suffix(".png").tempfile()?;
    let code = "result = df.groupby('dept').size().reset_index(name='count')\nprint(result.head())";
    let outcome = run_harness(code, csv.path(), chart.path(), 5).await?;
    assert_eq!(outcome["ok"], true);
    assert_eq!(outcome["table"]["columns"], serde_json::json!(["dept", "count"]));
    let rows = outcome["table"]["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], serde_json::json!(["hr", "1"]));
    assert_eq!(rows[1], serde_json::json!(["sales", "2"]));
    // the printed head lands in the captured text as well
    assert!(outcome["stdout"].as_str().unwrap().contains("hr"));
    Ok(())
}

#[tokio::test]
async fn table_is_capped_at_preview_rows() -> Result<()> {
    if !python_ready().await {
        println!("Warning: {} with pandas/matplotlib not available, skipping", python_bin());
        return Ok(());
    }
    let csv = sample_csv();
    let chart = tempfile::Builder::new().suffix(".png").tempfile()?;
    let outcome = run_harness("result = df", csv.path(), chart.path(), 2).await?;
    assert_eq!(outcome["ok"], true);
    assert_eq!(outcome["table"]["rows"].as_array().unwrap().len(), 2);
    Ok(())
}

#[tokio::test]
async fn exception_reports_error_and_nothing_else() -> Result<()> {
    if !python_ready().await {
        println!("Warning: {} with pandas/matplotlib not available, skipping", python_bin());
        return Ok(());
    }
    let csv = sample_csv();
    let chart = tempfile::Builder::new().suffix(".png").tempfile()?;
    let code = "print('before')\nraise ValueError('boom')";
    let outcome = run_harness(code, csv.path(), chart.path(), 5).await?;
    assert_eq!(outcome["ok"], false);
    assert_eq!(outcome["error"], "ValueError: boom");
    // output captured before the failure is not surfaced
    assert_eq!(outcome["stdout"], "");
    assert!(outcome["table"].is_null());
    assert!(outcome["chart"].is_null());
    Ok(())
}

#[tokio::test]
async fn syntax_error_is_caught() -> Result<()> {
    if !python_ready().await {
        println!("Warning: {} with pandas/matplotlib not available, skipping", python_bin());
        return Ok(());
    }
    let csv = sample_csv();
    let chart = tempfile::Builder::new().suffix(".png").tempfile()?;
    let outcome = run_harness("def (:", csv.path(), chart.path(), 5).await?;
    assert_eq!(outcome["ok"], false);
    assert!(outcome["error"].as_str().unwrap().starts_with("SyntaxError"));
    Ok(())
}

#[tokio::test]
async fn saves_current_figure() -> Result<()> {
    if !python_ready().await {
        println!("Warning: {} with pandas/matplotlib not available, skipping", python_bin());
        return Ok(());
    }
    let csv = sample_csv();
    let chart = tempfile::Builder::new().suffix(".png").tempfile()?;
    let code = "df.groupby('dept').size().plot(kind='bar')";
    let outcome = run_harness(code, csv.path(), chart.path(), 5).await?;
    assert_eq!(outcome["ok"], true);
    assert_eq!(
        outcome["chart"].as_str().unwrap(),
        chart.path().to_str().unwrap()
    );
    assert!(chart.path().metadata()?.len() > 0);
    Ok(())
}
