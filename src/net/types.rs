//! Wire DTOs for the library API.
//!
//! DESIGN
//! ======
//! `Profile` enumerates the fields the consoles actually read and keeps
//! everything else the server sends in `extra`, so a merge never loses data
//! the UI doesn't know about yet. The typed slots are read leniently: a
//! number or bool where text is expected is kept as its JSON text, so a
//! loosely typed backend never turns a successful `/me` into a failure.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Authorization role of the signed-in account.
///
/// Anything other than `"admin"` is treated as a regular reader.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    #[serde(other)]
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    /// Parse a stored role string; unknown or empty values map to `User`.
    pub fn parse(raw: &str) -> Self {
        if raw.trim() == "admin" { Self::Admin } else { Self::User }
    }
}

/// User identifier as returned by the server (numeric or string keys).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Int(i64),
    Text(String),
}

/// Account profile returned by `GET /me` and the login endpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, deserialize_with = "lenient_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, deserialize_with = "lenient_role", skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// Fields the client has no typed slot for.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Scalars become text; `null`, arrays and objects read as absent.
fn lenient_text<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(de)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

fn lenient_id<'de, D: Deserializer<'de>>(de: D) -> Result<Option<UserId>, D::Error> {
    Ok(match Value::deserialize(de)? {
        Value::Number(n) => Some(n.as_i64().map_or_else(|| UserId::Text(n.to_string()), UserId::Int)),
        Value::String(s) => Some(UserId::Text(s)),
        Value::Bool(b) => Some(UserId::Text(b.to_string())),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

/// Only the string `"admin"` grants admin; any other present value is a reader.
fn lenient_role<'de, D: Deserializer<'de>>(de: D) -> Result<Option<Role>, D::Error> {
    Ok(match Value::deserialize(de)? {
        Value::Null => None,
        Value::String(s) => Some(Role::parse(&s)),
        _ => Some(Role::User),
    })
}

impl Profile {
    /// Shallow merge: fields present in `incoming` replace ours, absent
    /// fields are kept.
    pub fn merge(&mut self, incoming: Profile) {
        let Profile { id, username, name, email, phone, avatar, role, extra } = incoming;
        if id.is_some() {
            self.id = id;
        }
        if username.is_some() {
            self.username = username;
        }
        if name.is_some() {
            self.name = name;
        }
        if email.is_some() {
            self.email = email;
        }
        if phone.is_some() {
            self.phone = phone;
        }
        if avatar.is_some() {
            self.avatar = avatar;
        }
        if role.is_some() {
            self.role = role;
        }
        self.extra.extend(extra);
    }

    /// Name shown in greetings and layout headers.
    pub fn display_name(&self) -> &str {
        [self.name.as_deref(), self.username.as_deref()]
            .into_iter()
            .flatten()
            .find(|v| !v.trim().is_empty())
            .unwrap_or("Reader")
    }
}

/// Body of `POST /login` and `POST /register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Successful `POST /login` response.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default, alias = "userInfo")]
    pub user: Profile,
}

/// Headline numbers for the admin dashboard, keyed by stat name.
pub type DashboardStats = BTreeMap<String, Value>;

/// One day of borrowing activity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    #[serde(alias = "day")]
    pub date: String,
    #[serde(default)]
    pub count: u64,
}
