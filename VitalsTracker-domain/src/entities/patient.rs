use std::borrow::Cow;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// Accepted values for a patient's sex
pub const SEX_OPTIONS: [&str; 3] = ["Male", "Female", "Other"];

/// Date format for dates of birth
pub const DOB_FORMAT: &str = "%Y-%m-%d";

/// Domain model for a patient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct Patient {
    /// Unique identifier for the patient
    pub id: String,

    /// Display name
    pub name: String,

    /// Optional date of birth (YYYY-MM-DD)
    pub dob: Option<String>,

    /// Optional sex (Male, Female or Other)
    pub sex: Option<String>,

    /// Optional free-text notes
    pub notes: Option<String>,
}

impl Patient {
    /// Label used when listing patients, e.g. `Ada Lovelace (id:…)`
    pub fn display_label(&self) -> String {
        format!("{} (id:{})", self.name, self.id)
    }
}

/// Request payload for registering a patient
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct CreatePatientRequest {
    /// Display name, required
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: String,

    /// Optional date of birth (YYYY-MM-DD)
    #[validate(custom = "validate_date_of_birth")]
    pub dob: Option<String>,

    /// Optional sex (Male, Female or Other)
    #[validate(custom = "validate_sex")]
    pub sex: Option<String>,

    /// Optional free-text notes
    #[validate(length(max = 2000, message = "Notes cannot exceed 2000 characters"))]
    pub notes: Option<String>,
}

impl CreatePatientRequest {
    /// Trim the name and drop blank optional fields
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            dob: non_blank(self.dob),
            sex: non_blank(self.sex),
            notes: self.notes.filter(|n| !n.trim().is_empty()),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn invalid(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::from(message));
    error
}

fn validate_date_of_birth(dob: &str) -> Result<(), ValidationError> {
    NaiveDate::parse_from_str(dob, DOB_FORMAT)
        .map(|_| ())
        .map_err(|_| invalid("date_of_birth", format!("Date of birth must be YYYY-MM-DD, got {:?}", dob)))
}

fn validate_sex(sex: &str) -> Result<(), ValidationError> {
    if SEX_OPTIONS.contains(&sex) {
        Ok(())
    } else {
        Err(invalid(
            "sex",
            format!("Sex must be one of {}, got {:?}", SEX_OPTIONS.join(", "), sex),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str) -> CreatePatientRequest {
        CreatePatientRequest {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_normalized_trims_and_drops_blanks() {
        let normalized = CreatePatientRequest {
            name: "  Ada Lovelace ".to_string(),
            dob: Some("   ".to_string()),
            sex: Some("".to_string()),
            notes: Some("\n".to_string()),
        }
        .normalized();

        assert_eq!(normalized.name, "Ada Lovelace");
        assert_eq!(normalized.dob, None);
        assert_eq!(normalized.sex, None);
        assert_eq!(normalized.notes, None);
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let result = request("   ").normalized().validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().field_errors().contains_key("name"));
    }

    #[test]
    fn test_date_of_birth_format() {
        let valid = CreatePatientRequest {
            dob: Some("1990-07-15".to_string()),
            ..request("Ada")
        };
        assert!(valid.validate().is_ok());

        let invalid = CreatePatientRequest {
            dob: Some("15/07/1990".to_string()),
            ..request("Ada")
        };
        let errors = invalid.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("dob"));
    }

    #[test]
    fn test_sex_must_be_a_known_option() {
        for sex in SEX_OPTIONS {
            let request = CreatePatientRequest {
                sex: Some(sex.to_string()),
                ..request("Ada")
            };
            assert!(request.validate().is_ok(), "{} should be accepted", sex);
        }

        let unknown = CreatePatientRequest {
            sex: Some("unknown".to_string()),
            ..request("Ada")
        };
        assert!(unknown.validate().is_err());
    }

    #[test]
    fn test_display_label() {
        let patient = Patient {
            id: "42".to_string(),
            name: "Ada".to_string(),
            dob: None,
            sex: None,
            notes: None,
        };
        assert_eq!(patient.display_label(), "Ada (id:42)");
    }
}
