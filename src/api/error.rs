//! Backend API-specific error types.

/// Message shown when a rejected request carries no readable explanation.
///
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Errors that can occur during backend API operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error (status {status}): {message}")]
    Status { status: u16, message: String },

    /// Failed to deserialize API response
    #[error("Failed to deserialize API response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// Base URL cannot carry request paths
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Generic API error
    #[error("API error: {0}")]
    Other(String),
}

impl ApiError {
    /// Build a status error from a rejected response body, pulling the first
    /// of `message`, `detail` or `error` out of a JSON body.
    ///
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                ["message", "detail", "error"]
                    .iter()
                    .find_map(|key| value.get(key).and_then(|v| v.as_str()).map(str::to_owned))
            })
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());
        ApiError::Status { status, message }
    }

    /// Human-readable text for a toast.
    ///
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { message, .. } => message.clone(),
            ApiError::Other(message) => message.clone(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let error = ApiError::Other("Test error".to_string());
        assert!(error.to_string().contains("API error"));
        assert!(error.to_string().contains("Test error"));

        let error = ApiError::Status {
            status: 404,
            message: "Not found".to_string(),
        };
        let error_str = error.to_string();
        assert!(error_str.contains("404"));
        assert!(error_str.contains("Not found"));
    }

    #[test]
    fn test_from_response_extracts_message() {
        let error = ApiError::from_response(409, r#"{"message": "Department has members"}"#);
        assert_eq!(error.user_message(), "Department has members");

        let error = ApiError::from_response(422, r#"{"detail": "Name is required"}"#);
        assert_eq!(error.user_message(), "Name is required");

        let error = ApiError::from_response(400, r#"{"error": "Bad input"}"#);
        assert_eq!(error.user_message(), "Bad input");
    }

    #[test]
    fn test_from_response_falls_back_to_generic_message() {
        for body in ["<html>oops</html>", "", r#"{"code": 7}"#, r#"{"message": "  "}"#] {
            let error = ApiError::from_response(500, body);
            assert_eq!(error.user_message(), GENERIC_ERROR_MESSAGE);
            assert!(matches!(error, ApiError::Status { status: 500, .. }));
        }
    }

    #[test]
    fn test_deserialization_user_message_is_generic() {
        let json_error = serde_json::from_str::<u32>("nope").unwrap_err();
        let error: ApiError = json_error.into();
        assert_eq!(error.user_message(), GENERIC_ERROR_MESSAGE);
    }
}
