use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::protocol::GraphqlErrorEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Unauthorized,
    NotFound,
    Validation,
    Conflict,
    Internal,
}

impl ErrorCode {
    /// Maps a GraphQL `errorType` onto a coarse code. Unknown or missing
    /// types are treated as internal faults.
    pub fn from_error_type(error_type: Option<&str>) -> Self {
        let Some(error_type) = error_type else {
            return ErrorCode::Internal;
        };
        let lower = error_type.to_ascii_lowercase();
        if lower.contains("unauthorized") || lower.contains("unauthenticated") {
            ErrorCode::Unauthorized
        } else if lower.contains("conditionalcheckfailed") {
            ErrorCode::Conflict
        } else if lower.contains("notfound") {
            ErrorCode::NotFound
        } else if lower.contains("validation")
            || lower.contains("badrequest")
            || lower.contains("mappingtemplate")
        {
            ErrorCode::Validation
        } else {
            ErrorCode::Internal
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{code:?}: {message}")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl From<GraphqlErrorEntry> for ApiError {
    fn from(value: GraphqlErrorEntry) -> Self {
        Self {
            code: ErrorCode::from_error_type(value.error_type.as_deref()),
            message: value.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_common_error_types() {
        assert_eq!(
            ErrorCode::from_error_type(Some("Unauthorized")),
            ErrorCode::Unauthorized
        );
        assert_eq!(
            ErrorCode::from_error_type(Some("DynamoDB:ConditionalCheckFailedException")),
            ErrorCode::Conflict
        );
        assert_eq!(
            ErrorCode::from_error_type(Some("MappingTemplate")),
            ErrorCode::Validation
        );
        assert_eq!(ErrorCode::from_error_type(None), ErrorCode::Internal);
    }

    #[test]
    fn converts_wire_entry_into_api_error() {
        let entry = GraphqlErrorEntry {
            message: "Variable 'mark1' has an invalid value".to_string(),
            error_type: Some("BadRequestException".to_string()),
            path: Vec::new(),
        };

        let err = ApiError::from(entry);
        assert_eq!(err.code, ErrorCode::Validation);
        assert_eq!(err.to_string(), "Validation: Variable 'mark1' has an invalid value");
    }
}
