//! Actor value carrying the caller's identity and capabilities.
//!
//! Identity is established by the external auth collaborator; use cases
//! receive an explicit `Actor` instead of inspecting a shared user object.

use serde::{Deserialize, Serialize};

use super::{ErrorCode, UserId};

/// The authenticated caller of a use case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Identity issued by the auth provider.
    pub id: UserId,

    /// Whether this user may create and manage surveys.
    pub can_author: bool,
}

impl Actor {
    /// Creates an actor with authoring capability.
    pub fn author(id: UserId) -> Self {
        Self {
            id,
            can_author: true,
        }
    }

    /// Creates a respondent-only actor.
    pub fn respondent(id: UserId) -> Self {
        Self {
            id,
            can_author: false,
        }
    }

    /// Requires the authoring capability.
    pub fn require_author(&self) -> Result<(), ErrorCode> {
        if self.can_author {
            Ok(())
        } else {
            Err(ErrorCode::Forbidden)
        }
    }

    /// Checks whether this actor is the given owner.
    pub fn is_owner_of(&self, owner_id: &UserId) -> bool {
        &self.id == owner_id
    }
}
