//! Actor identity models consumed by the role-gated workflow.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of the current actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// End user who creates collection requests and earns points.
    Requester,
    /// Collector who claims, performs and validates pickups.
    Collector,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Requester => write!(f, "requester"),
            Role::Collector => write!(f, "collector"),
        }
    }
}

/// An already-authenticated actor as supplied by the identity collaborator.
///
/// The core never authenticates; it only authorizes against the role here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Actor {
    pub id: Uuid,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_display() {
        assert_eq!(Role::Requester.to_string(), "requester");
        assert_eq!(Role::Collector.to_string(), "collector");
    }

    #[test]
    fn test_role_serde() {
        assert_eq!(serde_json::to_string(&Role::Collector).unwrap(), r#""collector""#);
        let role: Role = serde_json::from_str(r#""requester""#).unwrap();
        assert_eq!(role, Role::Requester);
    }
}
