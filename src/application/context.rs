//! Explicit request context for editor operations

use crate::domain::UserRole;

/// The signed-in account an editor operation runs on behalf of.
///
/// Built by the HTTP layer from a verified token and passed to every
/// [`EditorService`](super::services::EditorService) call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorContext {
    pub user_id: String,
    pub email: String,
    pub display_name: String,
    pub role: UserRole,
}

impl EditorContext {
    pub fn new(
        user_id: impl Into<String>,
        email: impl Into<String>,
        display_name: impl Into<String>,
        role: UserRole,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
            display_name: display_name.into(),
            role,
        }
    }
}
