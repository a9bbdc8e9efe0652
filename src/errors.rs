use serde::Serialize;

use crate::domain::errors::DomainError;

/// Client-facing rendering of a failed operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

impl From<&DomainError> for ErrorBody {
    fn from(e: &DomainError) -> Self {
        let message = match e {
            DomainError::Internal(msg) => {
                log::error!("internal error: {}", msg);
                "Unexpected error".to_string()
            }
            other => other.to_string(),
        };
        Self {
            code: e.code(),
            message,
        }
    }
}

impl From<DomainError> for ErrorBody {
    fn from(e: DomainError) -> Self {
        Self::from(&e)
    }
}

impl ErrorBody {
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "code": self.code,
            "message": self.message,
        })
    }
}
