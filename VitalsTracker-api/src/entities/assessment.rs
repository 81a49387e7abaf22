use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use vitals_tracker_domain::entities::assessment::{Assessment, Finding};

use super::reading::ReadingResponse;

/// Triage result for one set of vital signs
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssessmentResponse {
    /// The reading that was assessed, when it came from storage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading: Option<ReadingResponse>,

    /// True when any finding calls for immediate care
    pub urgent: bool,

    /// One line per evaluated vital sign: blood pressure, glucose, temperature, SpO2
    pub assessments: Vec<String>,

    /// Tips from every abnormal band, in the same order
    pub lifestyle_tips: Vec<String>,

    /// Structured form of the assessment lines
    pub findings: Vec<Finding>,
}

impl AssessmentResponse {
    pub fn new(assessment: Assessment, reading: Option<ReadingResponse>) -> Self {
        Self {
            reading,
            urgent: assessment.is_urgent(),
            assessments: assessment.assessments(),
            lifestyle_tips: assessment.lifestyle_tips,
            findings: assessment.findings,
        }
    }
}
