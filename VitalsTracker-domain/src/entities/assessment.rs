use std::fmt;

use serde::{Deserialize, Serialize};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// The vital signs the classifier evaluates, in output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum VitalSign {
    BloodPressure,
    Glucose,
    Temperature,
    OxygenSaturation,
}

impl fmt::Display for VitalSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VitalSign::BloodPressure => "Blood Pressure",
            VitalSign::Glucose => "Glucose",
            VitalSign::Temperature => "Temperature",
            VitalSign::OxygenSaturation => "Oxygen Saturation",
        };
        write!(f, "{}", name)
    }
}

/// How far a measurement sits from its normal band
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Normal,
    Low,
    Elevated,
    High,
    Critical,
}

impl Severity {
    pub fn is_normal(self) -> bool {
        self == Severity::Normal
    }
}

/// One classified vital sign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct Finding {
    pub vital: VitalSign,
    pub severity: Severity,
    /// Human-readable assessment line, glyph included
    pub message: String,
}

/// Classifier output for a single reading
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct Assessment {
    /// One finding per evaluated vital sign, in evaluation order
    pub findings: Vec<Finding>,

    /// Tips from every non-normal band, concatenated in evaluation order
    pub lifestyle_tips: Vec<String>,
}

impl Assessment {
    /// The assessment lines alone, in evaluation order
    pub fn assessments(&self) -> Vec<String> {
        self.findings.iter().map(|f| f.message.clone()).collect()
    }

    /// Whether any finding calls for immediate care
    pub fn is_urgent(&self) -> bool {
        self.findings.iter().any(|f| f.severity == Severity::Critical)
    }

    /// Number of findings outside their normal band
    pub fn abnormal_count(&self) -> usize {
        self.findings.iter().filter(|f| !f.severity.is_normal()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }
}
