use serde::{Deserialize, Serialize};

use crate::core::SkipReason;
use crate::error::{BulletGraphError, BulletGraphResult};

pub const RENDER_REPORT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecordStatus {
    /// Drawn with its bar starting at `row_top`.
    Rendered { row_top: f64 },
    Skipped { reason: SkipReason },
}

/// What happened to one chart definition, by input position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordOutcome {
    pub index: usize,
    pub title: String,
    #[serde(flatten)]
    pub status: RecordStatus,
}

impl RecordOutcome {
    #[must_use]
    pub fn is_rendered(&self) -> bool {
        matches!(self.status, RecordStatus::Rendered { .. })
    }

    #[must_use]
    pub fn skip_reason(&self) -> Option<&SkipReason> {
        match &self.status {
            RecordStatus::Skipped { reason } => Some(reason),
            RecordStatus::Rendered { .. } => None,
        }
    }
}

/// Per-record diagnostics of one render call.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RenderReport {
    pub outcomes: Vec<RecordOutcome>,
    /// Vertical cursor after the last emitted element.
    pub final_y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderReportJsonContractV1 {
    pub schema_version: u32,
    pub report: RenderReport,
}

impl RenderReport {
    #[must_use]
    pub fn rendered_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_rendered()).count()
    }

    pub fn skipped(&self) -> impl Iterator<Item = &RecordOutcome> {
        self.outcomes.iter().filter(|o| !o.is_rendered())
    }

    #[must_use]
    pub fn has_skips(&self) -> bool {
        self.skipped().next().is_some()
    }

    pub fn to_json_contract_v1_pretty(&self) -> BulletGraphResult<String> {
        let payload = RenderReportJsonContractV1 {
            schema_version: RENDER_REPORT_JSON_SCHEMA_V1,
            report: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            BulletGraphError::InvalidData(format!("failed to serialize render report v1: {e}"))
        })
    }

    /// Accepts either a bare report or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> BulletGraphResult<Self> {
        if let Ok(report) = serde_json::from_str::<RenderReport>(input) {
            return Ok(report);
        }
        let payload: RenderReportJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            BulletGraphError::InvalidData(format!("failed to parse render report json: {e}"))
        })?;
        if payload.schema_version != RENDER_REPORT_JSON_SCHEMA_V1 {
            return Err(BulletGraphError::InvalidData(format!(
                "unsupported render report schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RenderReport {
        RenderReport {
            outcomes: vec![
                RecordOutcome {
                    index: 0,
                    title: "Revenue".to_owned(),
                    status: RecordStatus::Rendered { row_top: 50.0 },
                },
                RecordOutcome {
                    index: 1,
                    title: "Broken".to_owned(),
                    status: RecordStatus::Skipped {
                        reason: SkipReason::ScaleArity { found: 2 },
                    },
                },
            ],
            final_y: 128.0,
        }
    }

    #[test]
    fn counts_rendered_and_skipped() {
        let report = sample();
        assert_eq!(report.rendered_count(), 1);
        assert!(report.has_skips());
        assert_eq!(
            report.skipped().next().and_then(RecordOutcome::skip_reason),
            Some(&SkipReason::ScaleArity { found: 2 })
        );
    }

    #[test]
    fn json_contract_is_versioned_and_readable() {
        let json = sample().to_json_contract_v1_pretty().expect("json");
        assert!(json.contains("\"schema_version\": 1"));
        assert!(json.contains("\"status\": \"skipped\""));
        let back = RenderReport::from_json_compat_str(&json).expect("parse contract");
        assert_eq!(back, sample());
    }

    #[test]
    fn unknown_schema_version_is_rejected() {
        let json = r#"{"schema_version": 7, "report": {"outcomes": [], "final_y": 0.0}}"#;
        assert!(RenderReport::from_json_compat_str(json).is_err());
    }
}
