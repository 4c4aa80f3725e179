use contracts::shared::form::FieldErrors;
use contracts::shared::metadata::CoercionError;
use thiserror::Error;

/// Everything a list screen operation can fail with
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResourceError {
    #[error("Please fix the highlighted fields")]
    Validation(FieldErrors),

    #[error("Not Found - The requested resource was not found")]
    NotFound,

    #[error("Conflict - A record with this information already exists")]
    Conflict,

    #[error("Network error - Please check your connection ({0})")]
    Network(String),

    #[error("Error {status} - {message}")]
    Http { status: u16, message: String },

    #[error("There is no form open")]
    NoDraft,

    #[error("There is no delete awaiting confirmation")]
    NoPendingDelete,

    #[error("Unknown field '{0}'")]
    UnknownField(String),

    #[error("Another save is still in progress")]
    Busy,

    #[error("Only inactive records can be restored")]
    RestoreUnavailable,

    #[error("Complete the required fields of this step first")]
    StepIncomplete,

    #[error("The form can only be submitted from the last step")]
    NotAtFinalStep,

    #[error(transparent)]
    Coercion(#[from] CoercionError),

    #[error("The screen was closed before the request finished")]
    Disposed,
}

impl ResourceError {
    /// Map a non-2xx response. A blank body falls back to the standard text for the status.
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            404 => Self::NotFound,
            409 => Self::Conflict,
            _ => {
                let body = body.trim();
                let message = if body.is_empty() {
                    status_message(status).to_string()
                } else {
                    body.to_string()
                };
                Self::Http { status, message }
            }
        }
    }

    /// Errors that come from the backend or the transport, shown in the top-level banner
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::NotFound | Self::Conflict | Self::Network(_) | Self::Http { .. }
        )
    }
}

/// Standard text for an HTTP status
pub fn status_message(status: u16) -> &'static str {
    match status {
        400 => "Bad Request - Invalid data provided",
        401 => "Unauthorized - Please login again",
        403 => "Forbidden - You do not have permission to perform this action",
        404 => "Not Found - The requested resource was not found",
        409 => "Conflict - A record with this information already exists",
        500 => "Internal Server Error - Please try again later",
        503 => "Service Unavailable - Please try again later",
        _ => "An unexpected error occurred",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status() {
        assert_eq!(ResourceError::from_status(409, "duplicate"), ResourceError::Conflict);
        assert_eq!(ResourceError::from_status(404, ""), ResourceError::NotFound);
        assert_eq!(
            ResourceError::from_status(500, "  "),
            ResourceError::Http {
                status: 500,
                message: "Internal Server Error - Please try again later".into()
            }
        );
        assert_eq!(
            ResourceError::from_status(400, "Vendor code exists").to_string(),
            "Error 400 - Vendor code exists"
        );
    }

    #[test]
    fn test_remote_errors() {
        assert!(ResourceError::Network("offline".into()).is_remote());
        assert!(!ResourceError::Busy.is_remote());
        assert!(!ResourceError::Validation(FieldErrors::new()).is_remote());
    }
}
