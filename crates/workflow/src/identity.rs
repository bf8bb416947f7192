//! Identity collaborator contract.
//!
//! The core never authenticates. An external session layer resolves who is
//! acting and hands the workflow an [`Actor`]; the workflow only authorizes
//! against the role carried on it.

use std::sync::{Mutex, PoisonError};

use domain::models::Actor;

/// Supplies the current actor to the role-gated workflow.
pub trait IdentityProvider: Send + Sync {
    /// The acting identity, or `None` when no session is active.
    fn current_actor(&self) -> Option<Actor>;
}

/// A settable identity for tests and the demo binary.
#[derive(Debug, Default)]
pub struct StaticIdentity {
    actor: Mutex<Option<Actor>>,
}

impl StaticIdentity {
    /// Starts without an active session.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Starts with the given actor signed in.
    pub fn signed_in(actor: Actor) -> Self {
        Self {
            actor: Mutex::new(Some(actor)),
        }
    }

    /// Replaces the current session.
    pub fn set(&self, actor: Option<Actor>) {
        let mut current = self.actor.lock().unwrap_or_else(PoisonError::into_inner);
        *current = actor;
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_actor(&self) -> Option<Actor> {
        *self.actor.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::models::Role;
    use uuid::Uuid;

    #[test]
    fn test_anonymous_has_no_actor() {
        assert!(StaticIdentity::anonymous().current_actor().is_none());
    }

    #[test]
    fn test_set_switches_sessions() {
        let identity = StaticIdentity::anonymous();
        let actor = Actor {
            id: Uuid::new_v4(),
            role: Role::Collector,
        };
        identity.set(Some(actor));
        assert_eq!(identity.current_actor(), Some(actor));

        identity.set(None);
        assert!(identity.current_actor().is_none());
    }
}
