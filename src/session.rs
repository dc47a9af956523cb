use crate::storage::repository::ProfileDto;
use serde::{Deserialize, Serialize};

/// Explicit session context passed to the management services, replacing
/// the prop-drilled "current user" object. `can_manage` is computed once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub profile: ProfileDto,
    pub can_manage: bool,
}

impl Session {
    pub fn new(profile: ProfileDto) -> Self {
        let can_manage = profile.is_approved || profile.role == "admin";
        Self {
            profile,
            can_manage,
        }
    }
}
