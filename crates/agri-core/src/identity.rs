use chrono::{DateTime, TimeDelta, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Authenticated user identity.
///
/// Produced by `agri-auth` from the auth provider's user record, consumed by
/// the storage, listing and publish crates as the owner of records.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuthUser {
    /// Provider user id. Every listing and storage key is scoped to it.
    pub id: String,
    pub email: Option<String>,
    /// Profile metadata captured at sign-up.
    pub full_name: Option<String>,
    pub farm_name: Option<String>,
}

impl AuthUser {
    /// Name shown in greetings: the local part of the email, upper-cased,
    /// or `FARMER` when no email is known.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.email
            .as_deref()
            .and_then(|email| email.split('@').next())
            .filter(|local| !local.is_empty())
            .map_or_else(|| String::from("FARMER"), str::to_uppercase)
    }
}

/// An active auth session: the bearer credential plus the identity it
/// belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub user: AuthUser,
}

impl Session {
    /// Owner id used to scope listings and storage keys.
    #[must_use]
    pub fn owner_id(&self) -> &str {
        &self.user.id
    }

    /// Check if the access token is expired or expires within `buffer_secs`.
    #[must_use]
    pub fn is_near_expiry(&self, buffer_secs: i64) -> bool {
        let threshold = Utc::now() + TimeDelta::seconds(buffer_secs);
        self.expires_at <= threshold
    }

    /// Check if the access token is already expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_near_expiry(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_session(expires_at: DateTime<Utc>) -> Session {
        Session {
            access_token: "access".into(),
            refresh_token: "refresh".into(),
            expires_at,
            user: AuthUser {
                id: "user-1".into(),
                email: Some("grower@farm.test".into()),
                full_name: None,
                farm_name: None,
            },
        }
    }

    #[test]
    fn expiry_checks_respect_buffer() {
        let session = make_session(Utc::now() + TimeDelta::seconds(30));
        assert!(!session.is_expired());
        assert!(session.is_near_expiry(60));
        assert!(!session.is_near_expiry(10));
    }

    #[test]
    fn past_expiry_is_expired() {
        let session = make_session(Utc::now() - TimeDelta::seconds(1));
        assert!(session.is_expired());
    }

    #[test]
    fn display_name_uses_email_local_part() {
        let session = make_session(Utc::now());
        assert_eq!(session.user.display_name(), "GROWER");
        assert_eq!(session.owner_id(), "user-1");
    }

    #[test]
    fn display_name_falls_back_without_email() {
        let user = AuthUser {
            id: "user-2".into(),
            email: None,
            full_name: None,
            farm_name: None,
        };
        assert_eq!(user.display_name(), "FARMER");
    }
}
