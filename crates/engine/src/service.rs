//! Outbound notification seam to the platform status service.
//!
//! The bar only ever makes one call: asking the service to restore full
//! system-UI visibility when the user touches the lights-out overlay. The
//! call is best-effort; callers discard errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("status service unavailable")]
    Unavailable,
    #[error("status service call failed: {0}")]
    Call(String),
}

/// Receives system-UI visibility requests from the bar.
pub trait SystemUiNotifier {
    /// Requests the given system-UI visibility; `0` means fully visible.
    fn set_system_ui_visibility(&self, visibility: u32) -> Result<(), ServiceError>;
}

/// Notifier that drops every request. Used by the dump mode and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl SystemUiNotifier for NullNotifier {
    fn set_system_ui_visibility(&self, _visibility: u32) -> Result<(), ServiceError> {
        Ok(())
    }
}
