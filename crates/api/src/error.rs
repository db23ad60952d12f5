//! Normalized failures for calls against the n8n API.

use thiserror::Error;

pub(crate) const AUTHENTICATION_FAILED_MESSAGE: &str = "Authentication failed. Please check your API key.";
pub(crate) const NOT_FOUND_MESSAGE: &str = "Resource not found.";
pub(crate) const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error occurred";

/// Every failure an [`crate::N8nClient`] operation can produce.
///
/// The `Display` output is the message surfaced to tool callers, so the
/// authentication and not-found variants never carry upstream detail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Upstream answered 401.
    #[error("{}", AUTHENTICATION_FAILED_MESSAGE)]
    AuthenticationFailed,

    /// Upstream answered 404.
    #[error("{}", NOT_FOUND_MESSAGE)]
    NotFound,

    /// Any other HTTP, network, or body decoding failure.
    #[error("{message}")]
    Upstream { message: String },

    /// A successful response did not match the expected resource shape.
    #[error("Invalid {resource} response from n8n: {reason}")]
    ResponseShape { resource: &'static str, reason: String },
}

impl ApiError {
    /// Pick the most specific message available.
    ///
    /// Preference order: the message the upstream put in its error body, then
    /// the transport-level error text, then a generic fallback.
    pub fn upstream(upstream_message: Option<&str>, transport_message: Option<&str>) -> Self {
        let message = [upstream_message, transport_message]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|message| !message.is_empty())
            .unwrap_or(UNKNOWN_ERROR_MESSAGE)
            .to_string();
        Self::Upstream { message }
    }

    pub fn response_shape(resource: &'static str, reason: impl Into<String>) -> Self {
        Self::ResponseShape {
            resource,
            reason: reason.into(),
        }
    }

    /// Whether the failure came from the upstream answering 401.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(self, Self::AuthenticationFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_messages() {
        assert_eq!(ApiError::AuthenticationFailed.to_string(), AUTHENTICATION_FAILED_MESSAGE);
        assert_eq!(ApiError::NotFound.to_string(), NOT_FOUND_MESSAGE);
    }

    #[test]
    fn upstream_prefers_body_message() {
        let error = ApiError::upstream(Some("workflow has no trigger"), Some("Request failed with status code 400"));
        assert_eq!(error.to_string(), "workflow has no trigger");
    }

    #[test]
    fn upstream_falls_back_to_transport_text() {
        let error = ApiError::upstream(Some("   "), Some("Request failed with status code 500"));
        assert_eq!(error.to_string(), "Request failed with status code 500");

        let error = ApiError::upstream(None, Some("connection refused"));
        assert_eq!(error.to_string(), "connection refused");
    }

    #[test]
    fn upstream_falls_back_to_generic_message() {
        assert_eq!(ApiError::upstream(None, None).to_string(), UNKNOWN_ERROR_MESSAGE);
        assert_eq!(ApiError::upstream(Some(""), Some("")).to_string(), UNKNOWN_ERROR_MESSAGE);
    }

    #[test]
    fn response_shape_names_resource() {
        let error = ApiError::response_shape("execution", "missing field `finished`");
        assert_eq!(error.to_string(), "Invalid execution response from n8n: missing field `finished`");
    }
}
