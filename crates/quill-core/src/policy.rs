//! Access policy - who may see and change what.
//!
//! Pure predicates over a [`Requester`]; nothing here touches storage.

use crate::domain::{Post, PostStatus, Requester, Role};

/// Status restriction applied to post listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusVisibility {
    /// Any requested status filter is honored.
    Unrestricted,
    /// Only posts with this status may be listed.
    Forced(PostStatus),
}

impl StatusVisibility {
    /// Combine with the status the caller asked for.
    pub fn resolve(self, requested: Option<PostStatus>) -> Option<PostStatus> {
        match self {
            StatusVisibility::Unrestricted => requested,
            StatusVisibility::Forced(status) => Some(status),
        }
    }
}

pub struct AccessPolicy;

impl AccessPolicy {
    /// Authors may change their own posts; admins may change any post.
    pub fn can_write(requester: &Requester, post: &Post) -> bool {
        match requester {
            Requester::Anonymous => false,
            Requester::Authenticated { user_id, role } => {
                *user_id == post.author_id || *role == Role::Admin
            }
        }
    }

    /// Non-admins only ever see published posts in listings.
    pub fn visible_status_filter(requester: &Requester) -> StatusVisibility {
        if requester.is_admin() {
            StatusVisibility::Unrestricted
        } else {
            StatusVisibility::Forced(PostStatus::Published)
        }
    }

    pub fn can_manage_categories(requester: &Requester) -> bool {
        requester.is_admin()
    }
}
