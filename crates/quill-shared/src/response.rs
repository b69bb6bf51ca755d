//! Response envelopes. Every body carries a `success` flag; failures add a
//! message and, for validation failures, the offending fields.

use serde::{Deserialize, Serialize};

/// Page position reported alongside list results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u64,
    pub total_pages: u64,
    pub total: u64,
}

/// Standard successful API response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            pagination: None,
        }
    }

    pub fn paged(data: T, pagination: Pagination) -> Self {
        Self {
            pagination: Some(pagination),
            ..Self::ok(data)
        }
    }
}

impl ApiResponse<()> {
    /// Success without a payload.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
            pagination: None,
        }
    }
}

/// One rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub field: String,
    pub message: String,
}

/// Failure envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorDetail>>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: None,
        }
    }

    pub fn with_errors(mut self, errors: Vec<ErrorDetail>) -> Self {
        self.errors = Some(errors);
        self
    }

    pub fn validation(errors: Vec<ErrorDetail>) -> Self {
        Self::new("Validation failed").with_errors(errors)
    }

    pub fn unauthorized() -> Self {
        Self::new("Not authorized")
    }

    pub fn internal_error() -> Self {
        Self::new("Server error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_paged_envelope_shape() {
        let body = ApiResponse::paged(
            vec![1, 2],
            Pagination {
                page: 1,
                total_pages: 3,
                total: 25,
            },
        );
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({
                "success": true,
                "data": [1, 2],
                "pagination": { "page": 1, "totalPages": 3, "total": 25 }
            })
        );
    }

    #[test]
    fn test_message_only_envelope() {
        let body = ApiResponse::message("Post deleted successfully");
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({ "success": true, "message": "Post deleted successfully" })
        );
    }

    #[test]
    fn test_validation_failure_envelope() {
        let body = ErrorResponse::validation(vec![ErrorDetail {
            field: "content".to_string(),
            message: "Content must be at least 50 characters long".to_string(),
        }]);
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({
                "success": false,
                "message": "Validation failed",
                "errors": [{
                    "field": "content",
                    "message": "Content must be at least 50 characters long"
                }]
            })
        );
    }
}
