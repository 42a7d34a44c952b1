use thiserror::Error;

use rentflow_types::PhoneError;

#[derive(Debug, Error)]
pub enum FlowError {
    /// A non-terminal attempt owns the controller; finish or cancel it first.
    #[error("another checkout attempt is already in flight")]
    AttemptInFlight,

    /// The payer phone failed validation; nothing was sent anywhere.
    #[error("invalid payer phone: {0}")]
    InvalidPhone(#[from] PhoneError),

    #[error("invalid flow config: {reason}")]
    InvalidConfig { reason: String },
}
