//! Newtype wrappers for identifiers.

use std::fmt;
use uuid::Uuid;

/// Identifier of one relay invocation, used to correlate its log lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a new random RequestId.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_generate() {
        let id1 = RequestId::generate();
        let id2 = RequestId::generate();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_id_display_is_uuid() {
        let id = RequestId::generate();
        assert!(Uuid::parse_str(&id.to_string()).is_ok());
    }
}
