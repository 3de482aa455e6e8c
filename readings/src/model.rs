//! Typed records for the `users` and `readings` collections.

use std::fmt;

use bson::{DateTime, oid::ObjectId};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A registered user.
///
/// Decoded from a normalized `users` document, so `id` is always the hex form of `_id`.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing)]
    pub native_id: ObjectId,
    pub id: String,
    pub email: String,
    /// The shared secret login tokens are signed with.
    #[serde(default)]
    pub password: String,
}

impl User {
    /// Returns a copy safe to log or print, with every password character masked.
    pub fn scrubbed(&self) -> User {
        User {
            password: "*".repeat(self.password.chars().count()),
            ..self.clone()
        }
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A saved article link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    #[serde(rename = "_id")]
    pub native_id: ObjectId,
    /// The owning user's string `id`.
    pub user_id: String,
    pub title: String,
    /// The external link to the article.
    pub link: String,
    /// When the reading was added.
    pub when: DateTime,
}

impl Reading {
    /// Canonical path of this reading relative to the service root.
    pub fn path(&self) -> String {
        format!("/{}", self.native_id.to_hex())
    }

    /// Renders the listing entry for this reading, with `link` absolute under `base_url`.
    pub fn view(&self, base_url: &str) -> ReadingView {
        ReadingView {
            link: format!("{}{}", base_url.trim_end_matches('/'), self.path()),
            href: self.link.clone(),
            title: self.title.clone(),
            added: self.when.to_chrono(),
        }
    }
}

/// One entry of the reading list as served to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingView {
    /// Canonical link to the reading inside the service.
    pub link: String,
    /// External link to the reading content.
    pub href: String,
    pub title: String,
    /// When the reading was added, in UTC.
    pub added: chrono::DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn view_builds_absolute_link() {
        let oid = ObjectId::new();
        let reading = Reading {
            native_id: oid,
            user_id: "u1".into(),
            title: "Rust async book".into(),
            link: "https://rust-lang.github.io/async-book/".into(),
            when: DateTime::from_millis(1_500_000_000_000),
        };

        let view = reading.view("https://readings.example.com/");

        assert_eq!(view.link, format!("https://readings.example.com/{}", oid.to_hex()));
        assert_eq!(view.href, "https://rust-lang.github.io/async-book/");
        assert_eq!(view.added, Utc.timestamp_millis_opt(1_500_000_000_000).unwrap());
    }

    #[test]
    fn scrubbed_user_masks_password() {
        let user = User {
            native_id: ObjectId::new(),
            id: "abc".into(),
            email: "a@example.com".into(),
            password: "hunter2".into(),
        };

        assert_eq!(user.scrubbed().password, "*******");
        assert!(!format!("{user:?}").contains("hunter2"));
        assert!(!serde_json::to_string(&user.scrubbed()).unwrap().contains("hunter2"));
    }
}
