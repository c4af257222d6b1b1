//! Notification error types.

use crate::errors::SunshineError;

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("No notification backend available on this system")]
    NoBackend,

    #[error("Notification tool not found: {tool}")]
    ToolNotFound { tool: String },

    #[error("Notification channel '{channel_id}' was not created before dispatch")]
    ChannelMissing { channel_id: String },

    #[error("Could not build notification: {message}")]
    BuildFailed { message: String },

    #[error("Notification failed: {message}")]
    SendFailed { message: String },
}

impl SunshineError for NotifyError {
    fn error_code(&self) -> &'static str {
        match self {
            NotifyError::NoBackend => "NOTIFY_NO_BACKEND",
            NotifyError::ToolNotFound { .. } => "NOTIFY_TOOL_NOT_FOUND",
            NotifyError::ChannelMissing { .. } => "NOTIFY_CHANNEL_MISSING",
            NotifyError::BuildFailed { .. } => "NOTIFY_BUILD_FAILED",
            NotifyError::SendFailed { .. } => "NOTIFY_SEND_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            NotifyError::NoBackend | NotifyError::ToolNotFound { .. }
        )
    }
}
