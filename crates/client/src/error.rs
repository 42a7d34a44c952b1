use thiserror::Error;

/// Failures a remote call can report.
///
/// The split matters to callers: `Transport` is worth retrying on the next
/// poll or recording as a partial stage failure, while `Rejected` and
/// `Protocol` mean the remote side gave a definitive answer.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport failure: {reason}")]
    Transport { reason: String },

    #[error("request rejected: status={status} message={message}")]
    Rejected { status: u16, message: String },

    #[error("protocol violation: {detail}")]
    Protocol { detail: String },
}

impl ClientError {
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
        }
    }

    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    pub fn protocol(detail: impl Into<String>) -> Self {
        Self::Protocol {
            detail: detail.into(),
        }
    }

    /// True for failures that may succeed if the same request is repeated.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_transport_is_transient() {
        assert!(ClientError::transport("connection reset").is_transient());
        assert!(!ClientError::rejected(503, "service busy").is_transient());
        assert!(!ClientError::protocol("missing remote id").is_transient());
    }

    #[test]
    fn test_error_display_includes_context() {
        let err = ClientError::rejected(400, "invalid phone number");
        assert_eq!(
            err.to_string(),
            "request rejected: status=400 message=invalid phone number"
        );
    }
}
