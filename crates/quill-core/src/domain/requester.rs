use uuid::Uuid;

use super::Role;

/// Whoever is calling an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requester {
    Anonymous,
    Authenticated { user_id: Uuid, role: Role },
}

impl Requester {
    pub fn user(user_id: Uuid) -> Self {
        Requester::Authenticated {
            user_id,
            role: Role::User,
        }
    }

    pub fn admin(user_id: Uuid) -> Self {
        Requester::Authenticated {
            user_id,
            role: Role::Admin,
        }
    }

    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Requester::Anonymous => None,
            Requester::Authenticated { user_id, .. } => Some(*user_id),
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(
            self,
            Requester::Authenticated {
                role: Role::Admin,
                ..
            }
        )
    }
}
