use serde::{Deserialize, Serialize};

use crate::{Amount, LeaseId, Msisdn, RemoteAttemptId};

/// What a checkout attempt asks the payment gateway to collect.
///
/// Built once when the attempt starts and never mutated afterwards; a retry
/// is a new intent, not an edit of this one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentIntent {
    pub lease_id: LeaseId,
    /// Whole major currency units; the gateway accepts no fractional part.
    pub amount: Amount,
    pub payer: Msisdn,
}

impl PaymentIntent {
    pub fn new(lease_id: LeaseId, amount: Amount, payer: Msisdn) -> Self {
        Self {
            lease_id,
            amount,
            payer,
        }
    }
}

/// Remote lifecycle of a payment.
///
/// The backend is loose about wording, so deserialization accepts its
/// synonyms (`initiated`, `success`, `cancelled`); serialization always emits
/// the canonical lowercase name.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[serde(alias = "initiated")]
    Pending,
    #[serde(alias = "success")]
    Completed,
    #[serde(alias = "cancelled")]
    Failed,
}

impl PaymentStatus {
    /// Case-insensitive parse of a raw status string.
    ///
    /// Returns `None` for anything outside the known vocabulary; the
    /// transport maps that to a protocol error rather than guessing.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" | "initiated" => Some(Self::Pending),
            "completed" | "success" => Some(Self::Completed),
            "failed" | "cancelled" => Some(Self::Failed),
            _ => None,
        }
    }

    /// Terminal statuses stop the polling loop.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// One observation of a payment's remote state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusReport {
    pub status: PaymentStatus,
    /// Gateway receipt number; present once the payment completed.
    pub reference: Option<String>,
}

impl StatusReport {
    pub fn pending() -> Self {
        Self {
            status: PaymentStatus::Pending,
            reference: None,
        }
    }

    pub fn completed(reference: impl Into<String>) -> Self {
        Self {
            status: PaymentStatus::Completed,
            reference: Some(reference.into()),
        }
    }

    pub fn failed() -> Self {
        Self {
            status: PaymentStatus::Failed,
            reference: None,
        }
    }
}

/// Gateway acknowledgement that a collection prompt was pushed to the payer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InitiateAck {
    /// Handle for all later status queries about this attempt.
    pub remote_id: RemoteAttemptId,
    /// Text the gateway wants shown to the payer, e.g. "Enter your PIN".
    pub customer_message: Option<String>,
}

impl InitiateAck {
    pub fn new(remote_id: RemoteAttemptId, customer_message: Option<String>) -> Self {
        Self {
            remote_id,
            customer_message,
        }
    }
}
