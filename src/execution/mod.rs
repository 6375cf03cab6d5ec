//! Execution engine: outcome types for generated-code runs.

use std::path::PathBuf;

use serde::Deserialize;

pub mod python;

/// First rows of the snippet's `result` DataFrame.
#[derive(Debug, Clone, Deserialize)]
pub struct TablePreview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Everything one execution produced.
///
/// `ok == false` means the snippet raised; `error` carries the message and
/// the other fields are empty.
#[derive(Debug, Clone, Deserialize)]
pub struct ExecutionOutcome {
    pub ok: bool,
    #[serde(default)]
    pub stdout: String,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub table: Option<TablePreview>,
    #[serde(default)]
    pub chart: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_parses_success_shape() {
        let raw = r#"{"ok": true, "stdout": "42\n", "error": null,
                      "table": {"columns": ["dept", "n"], "rows": [["sales", "2"]]},
                      "chart": "/tmp/c.png"}"#;
        let outcome: ExecutionOutcome = serde_json::from_str(raw).unwrap();
        assert!(outcome.ok);
        assert_eq!(outcome.stdout, "42\n");
        let table = outcome.table.unwrap();
        assert_eq!(table.columns, vec!["dept", "n"]);
        assert_eq!(table.rows, vec![vec!["sales", "2"]]);
        assert!(outcome.chart.is_some());
    }

    #[test]
    fn outcome_parses_error_shape() {
        let raw = r#"{"ok": false, "stdout": "", "error": "ValueError: boom",
                      "table": null, "chart": null}"#;
        let outcome: ExecutionOutcome = serde_json::from_str(raw).unwrap();
        assert!(!outcome.ok);
        assert_eq!(outcome.error.as_deref(), Some("ValueError: boom"));
        assert!(outcome.table.is_none());
        assert!(outcome.chart.is_none());
    }
}
