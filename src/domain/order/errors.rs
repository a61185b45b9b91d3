// ============================================================================
// Order Validation Errors
// ============================================================================

pub const MISSING_FIELDS_MESSAGE: &str = "Validation Failed: Missing required fields.";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Validation Failed: Request body must be a JSON object.")]
    NotAnObject,

    #[error("{}", MISSING_FIELDS_MESSAGE)]
    MissingFields(Vec<&'static str>),

    #[error("Validation Failed: '{field}' {reason}.")]
    InvalidField { field: String, reason: String },
}

impl ValidationError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Names of the offending fields, for the response body.
    pub fn fields(&self) -> Vec<String> {
        match self {
            ValidationError::NotAnObject => Vec::new(),
            ValidationError::MissingFields(fields) => {
                fields.iter().map(|f| f.to_string()).collect()
            }
            ValidationError::InvalidField { field, .. } => vec![field.clone()],
        }
    }

    /// Short label used for the validation failure counter.
    pub fn reason(&self) -> &'static str {
        match self {
            ValidationError::NotAnObject => "not_an_object",
            ValidationError::MissingFields(_) => "missing_fields",
            ValidationError::InvalidField { .. } => "invalid_field",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_message() {
        let err = ValidationError::MissingFields(vec!["total"]);
        assert_eq!(err.to_string(), MISSING_FIELDS_MESSAGE);
        assert_eq!(err.fields(), vec!["total".to_string()]);
    }

    #[test]
    fn test_invalid_field_message() {
        let err = ValidationError::invalid("items[0].qty", "must be a positive integer");
        assert_eq!(
            err.to_string(),
            "Validation Failed: 'items[0].qty' must be a positive integer."
        );
        assert_eq!(err.reason(), "invalid_field");
    }
}
