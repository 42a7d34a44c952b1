use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! resource_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            pub fn new(value: i64) -> Self {
                Self(value)
            }

            pub fn value(&self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

resource_id!(
    /// Remote identifier of a property.
    PropertyId
);
resource_id!(
    /// Remote identifier of a rentable unit within a property.
    UnitId
);
resource_id!(
    /// Remote identifier of a lease binding a tenant to a unit.
    LeaseId
);
resource_id!(
    /// Remote identifier of a payment record.
    PaymentId
);
resource_id!(
    /// Remote identifier of a tenant account.
    TenantId
);

/// Identifier the payment gateway assigns to an in-flight checkout.
///
/// Opaque to this core; the original backend stores the mobile-money
/// checkout request id here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct RemoteAttemptId(pub String);

impl RemoteAttemptId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RemoteAttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_transparent_in_json() {
        let id = LeaseId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");

        let back: LeaseId = serde_json::from_str("42").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_remote_attempt_id_display() {
        let id = RemoteAttemptId::new("ws_CO_27112024");
        assert_eq!(id.to_string(), "ws_CO_27112024");
        assert_eq!(id.as_str(), "ws_CO_27112024");
    }
}
