//! Who is using the app: demo login and the persisted session.

mod auth;
mod file;

use serde::{Deserialize, Serialize};

use crate::model::{Actor, Role};

pub use auth::{find_demo_user, login, AuthError, DemoUser, DEMO_TOKEN, DEMO_USERS};
pub use file::{SessionError, SessionFile};

/// Identity of the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub name: String,
    pub role: Role,
    pub email: String,
}

impl Session {
    /// The part of the session the state container looks at.
    pub fn actor(&self) -> Actor {
        Actor::new(self.name.clone(), self.role)
    }
}
