use async_trait::async_trait;
use rentflow_types::{InitiateAck, PaymentIntent, RemoteAttemptId, StatusReport};

use crate::error::ClientError;

/// Mobile-money collection gateway.
///
/// `initiate` pushes a payment prompt to the payer's handset; the returned
/// ack only means the prompt went out, not that money moved. The transport
/// must map an accepted response that lacks a remote id to
/// [`ClientError::Protocol`], so a successful `initiate` always yields a
/// pollable handle.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Start a collection and return the handle for status queries.
    async fn initiate(&self, intent: &PaymentIntent) -> Result<InitiateAck, ClientError>;

    /// Current remote state of a previously initiated collection.
    async fn status_of(&self, remote_id: &RemoteAttemptId) -> Result<StatusReport, ClientError>;
}
