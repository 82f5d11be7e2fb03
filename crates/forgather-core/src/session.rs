use std::sync::RwLock;

use uuid::Uuid;

/// The authenticated user as known to the client. Token issuance and refresh
/// are handled by the external auth service; this is a read-mostly holder.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub display_name: String,
    pub access_token: String,
}

/// Login state for the process. Workflows consult this before any mutating
/// call and short-circuit when nobody is signed in.
#[derive(Default)]
pub struct AuthSession {
    user: RwLock<Option<CurrentUser>>,
}

impl AuthSession {
    pub fn sign_in(&self, user: CurrentUser) {
        let mut guard = match self.user.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Some(user);
    }

    pub fn sign_out(&self) {
        let mut guard = match self.user.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = None;
    }

    pub fn current_user(&self) -> Option<CurrentUser> {
        match self.user.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }
}
