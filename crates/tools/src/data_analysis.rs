//! Data analysis tool — descriptive statistics over user-supplied data.
//!
//! Accepts inline JSON or CSV and runs one of three analyses. Parse and
//! computation failures are reported as error-describing text so the model
//! can recover; they never abort the session.

use async_trait::async_trait;
use loreseek_core::error::ToolError;
use loreseek_core::tool::{Tool, ToolOutcome};
use tracing::debug;

use crate::frame::Frame;

const COMPARISON_ROWS: usize = 10;

pub struct DataAnalysisTool;

#[async_trait]
impl Tool for DataAnalysisTool {
    fn name(&self) -> &str {
        "data_analysis"
    }

    fn description(&self) -> &str {
        "Analyze structured data (JSON or CSV) and compute statistics. Supports 'summary' for descriptive statistics, 'trends' for correlations, and 'comparison' for a row preview."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "data": {
                    "type": "string",
                    "description": "The data to analyze, as a JSON object of columns, a JSON array of records, or CSV text with a header row"
                },
                "analysis_type": {
                    "type": "string",
                    "enum": ["summary", "trends", "comparison"],
                    "description": "The analysis to run"
                }
            },
            "required": ["data", "analysis_type"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
    ) -> std::result::Result<ToolOutcome, ToolError> {
        let data = arguments["data"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'data' argument".into()))?;
        let analysis_type = arguments["analysis_type"].as_str().ok_or_else(|| {
            ToolError::InvalidArguments("Missing 'analysis_type' argument".into())
        })?;

        debug!(analysis_type, "Running data analysis");

        Ok(analyze(data, analysis_type))
    }
}

fn analyze(data: &str, analysis_type: &str) -> ToolOutcome {
    let frame = match Frame::parse(data) {
        Ok(frame) => frame,
        Err(e) => return ToolOutcome::error(format!("Error analyzing data: {e}")),
    };

    match analysis_type {
        "summary" => ToolOutcome::ok(format!("Data summary:\n{}", frame.describe())),
        "trends" => match frame.correlation_matrix() {
            Some(matrix) => ToolOutcome::ok(format!("Correlation matrix:\n{matrix}")),
            None => ToolOutcome::ok(
                "Trend analysis needs at least two numeric columns; the provided data does not have enough.",
            ),
        },
        "comparison" => ToolOutcome::ok(format!(
            "First {} rows:\n{}",
            COMPARISON_ROWS.min(frame.row_count()),
            frame.head(COMPARISON_ROWS)
        )),
        other => ToolOutcome::ok(format!("Unknown analysis type: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn summary_covers_every_column() {
        let tool = DataAnalysisTool;
        let outcome = tool
            .execute(serde_json::json!({
                "data": r#"{"a": [1, 2, 3], "b": [4, 5, 6]}"#,
                "analysis_type": "summary"
            }))
            .await
            .unwrap();
        assert!(outcome.success);
        assert!(outcome.output.contains("a:"));
        assert!(outcome.output.contains("b:"));
    }

    #[tokio::test]
    async fn trends_with_one_numeric_column_explains_instead_of_failing() {
        let tool = DataAnalysisTool;
        let outcome = tool
            .execute(serde_json::json!({
                "data": r#"{"a": [1, 2, 3]}"#,
                "analysis_type": "trends"
            }))
            .await
            .unwrap();
        assert!(outcome.success);
        assert!(outcome.output.contains("at least two numeric columns"));
    }

    #[tokio::test]
    async fn trends_with_two_numeric_columns() {
        let tool = DataAnalysisTool;
        let outcome = tool
            .execute(serde_json::json!({
                "data": r#"{"x": [1, 2, 3], "y": [2, 4, 6]}"#,
                "analysis_type": "trends"
            }))
            .await
            .unwrap();
        assert!(outcome.success);
        assert!(outcome.output.contains("Correlation matrix"));
    }

    #[tokio::test]
    async fn comparison_previews_first_rows() {
        let tool = DataAnalysisTool;
        let outcome = tool
            .execute(serde_json::json!({
                "data": "name,score\nalice,90\nbob,85\n",
                "analysis_type": "comparison"
            }))
            .await
            .unwrap();
        assert!(outcome.success);
        assert!(outcome.output.contains("alice"));
        assert!(outcome.output.contains("First 2 rows"));
    }

    #[tokio::test]
    async fn unknown_analysis_type_is_a_text_message() {
        let tool = DataAnalysisTool;
        let outcome = tool
            .execute(serde_json::json!({
                "data": r#"{"a": [1]}"#,
                "analysis_type": "forecast"
            }))
            .await
            .unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.output, "Unknown analysis type: forecast");
    }

    #[tokio::test]
    async fn unparseable_data_becomes_error_text() {
        let tool = DataAnalysisTool;
        let outcome = tool
            .execute(serde_json::json!({
                "data": "{{{not data",
                "analysis_type": "summary"
            }))
            .await
            .unwrap();
        assert!(!outcome.success);
        assert!(outcome.output.starts_with("Error analyzing data:"));
    }

    #[tokio::test]
    async fn missing_arguments_are_invalid() {
        let tool = DataAnalysisTool;
        let result = tool
            .execute(serde_json::json!({"analysis_type": "summary"}))
            .await;
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));

        let result = tool.execute(serde_json::json!({"data": "a,b\n1,2"})).await;
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }

    #[test]
    fn tool_definition() {
        let tool = DataAnalysisTool;
        let def = tool.to_definition();
        assert_eq!(def.name, "data_analysis");
        assert!(def.parameters["required"]
            .as_array()
            .unwrap()
            .iter()
            .any(|v| v == "analysis_type"));
    }
}
