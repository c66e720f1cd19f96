use thiserror::Error;

/// Errors returned by the search, auth, and store clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote service answered with a non-2xx status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Build a `Status` error from a response, using the error body's
    /// message fields when the service provides them.
    pub fn from_response(response: reqwest::blocking::Response) -> ApiError {
        let status = response.status().as_u16();
        let body = response.text().unwrap_or_default();
        let message = extract_error_message(&body)
            .unwrap_or_else(|| format!("request failed with status {status}"));
        ApiError::Status { status, message }
    }
}

/// Pull a human-readable message out of a JSON error body.
///
/// The auth service answers with `error_description` or `msg`, the table
/// REST layer with `message`.
fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    for key in ["error_description", "msg", "message"] {
        if let Some(message) = value.get(key).and_then(|v| v.as_str()) {
            return Some(message.to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_error_message_variants() {
        assert_eq!(
            extract_error_message(r#"{"error_description": "Invalid login credentials"}"#),
            Some("Invalid login credentials".to_string())
        );
        assert_eq!(
            extract_error_message(r#"{"msg": "Password should be at least 6 characters"}"#),
            Some("Password should be at least 6 characters".to_string())
        );
        assert_eq!(
            extract_error_message(r#"{"message": "permission denied"}"#),
            Some("permission denied".to_string())
        );
        assert_eq!(extract_error_message("gateway timeout"), None);
    }
}
