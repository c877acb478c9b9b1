//! Views of domain records as they appear in RPC responses.
//!
//! Field names are camelCase on the wire. Password hashes never leave the
//! server.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Session, User};

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub username: Option<String>,
    /// `Admin`, `Teacher` or `User`
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            username: user.username.clone(),
            role: user.role.as_str().to_string(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub id: String,
    pub user_id: String,
    pub expires_at: DateTime<Utc>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id.clone(),
            user_id: session.user_id.clone(),
            expires_at: session.expires_at,
            ip_address: session.ip_address.clone(),
            user_agent: session.user_agent.clone(),
            created_at: session.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;

    #[test]
    fn user_view_hides_password_hash() {
        let now = Utc::now();
        let user = User {
            id: "u1".into(),
            name: "Somchai".into(),
            email: "somchai@msl.ac.th".into(),
            username: Some("somchai".into()),
            password_hash: "$2b$12$secret".into(),
            role: UserRole::Teacher,
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(UserView::from(&user)).unwrap();
        assert_eq!(json["role"], "Teacher");
        assert!(json.get("createdAt").is_some());
        assert!(!json.to_string().contains("secret"));
    }
}
