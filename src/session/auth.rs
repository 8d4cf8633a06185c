//! Demo login against a fixed user table.

use thiserror::Error;

use crate::model::Role;
use crate::session::Session;

/// Token stored for every demo login.
pub const DEMO_TOKEN: &str = "demo-token";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoUser {
    pub email: &'static str,
    pub password: &'static str,
    pub name: &'static str,
    pub role: Role,
}

pub const DEMO_USERS: &[DemoUser] = &[
    DemoUser {
        email: "nikita@gmail.com",
        password: "123456",
        name: "Nikita",
        role: Role::Student,
    },
    DemoUser {
        email: "helper@gmail.com",
        password: "123456",
        name: "Helper",
        role: Role::Helper,
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Same message for unknown email and wrong password.
    #[error("Wrong email or password. Use one of the demo accounts.")]
    InvalidCredentials,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn find_demo_user(email: &str) -> Option<&'static DemoUser> {
    let email = normalize_email(email);
    DEMO_USERS.iter().find(|u| u.email == email)
}

pub fn login(email: &str, password: &str) -> Result<Session, AuthError> {
    let user = find_demo_user(email)
        .filter(|u| u.password == password)
        .ok_or(AuthError::InvalidCredentials)?;
    tracing::info!(name = user.name, role = %user.role, "Logged in");
    Ok(Session {
        token: DEMO_TOKEN.to_string(),
        name: user.name.to_string(),
        role: user.role,
        email: user.email.to_string(),
    })
}
