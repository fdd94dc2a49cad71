//! Profile entity: typed well-known columns plus an open attribute bag.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use super::ProfileFields;
use crate::domain::foundation::{Timestamp, UserId};

/// Column names shared by the remote table and the local cache.
pub mod keys {
    pub const ID: &str = "id";
    pub const FULL_NAME: &str = "full_name";
    pub const USERNAME: &str = "username";
    pub const AVATAR_URL: &str = "avatar_url";
    pub const BIO: &str = "bio";
    pub const WEBSITE: &str = "website";
    pub const CREATED_AT: &str = "created_at";
    pub const UPDATED_AT: &str = "updated_at";
}

const DISPLAY_NAME_FALLBACK: &str = "Authenticated user";

/// The user's profile as exposed to presentation code.
///
/// `id` is always the id of the user the profile was resolved for. Columns
/// this crate does not know about are kept verbatim in `extra`; a well-known
/// column whose value has an unexpected shape is kept there too, under its
/// own name, instead of being dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: UserId,
    pub full_name: Option<String>,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
    pub extra: Map<String, Value>,
}

impl Profile {
    /// Creates an empty profile for `id`.
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            full_name: None,
            username: None,
            avatar_url: None,
            bio: None,
            website: None,
            created_at: None,
            updated_at: None,
            extra: Map::new(),
        }
    }

    /// Builds a profile from a loose record, binding it to `id`.
    ///
    /// Any `id` inside the record is ignored. Never fails.
    pub fn from_fields(id: &UserId, fields: ProfileFields) -> Self {
        let mut extra = fields.into_map();
        extra.remove(keys::ID);

        let mut profile = Profile::new(id.clone());
        profile.full_name = take_text(&mut extra, keys::FULL_NAME);
        profile.username = take_text(&mut extra, keys::USERNAME);
        profile.avatar_url = take_text(&mut extra, keys::AVATAR_URL);
        profile.bio = take_text(&mut extra, keys::BIO);
        profile.website = take_text(&mut extra, keys::WEBSITE);
        profile.created_at = take_timestamp(&mut extra, keys::CREATED_AT);
        profile.updated_at = take_timestamp(&mut extra, keys::UPDATED_AT);
        profile.extra = extra;
        profile
    }

    /// Flattens back into a loose record. Unset columns are omitted.
    pub fn to_fields(&self) -> ProfileFields {
        let mut map = self.extra.clone();
        map.insert(keys::ID.to_string(), Value::String(self.id.to_string()));

        let text = [
            (keys::FULL_NAME, &self.full_name),
            (keys::USERNAME, &self.username),
            (keys::AVATAR_URL, &self.avatar_url),
            (keys::BIO, &self.bio),
            (keys::WEBSITE, &self.website),
        ];
        for (key, value) in text {
            if let Some(value) = value {
                map.insert(key.to_string(), Value::String(value.clone()));
            }
        }

        let stamps = [
            (keys::CREATED_AT, &self.created_at),
            (keys::UPDATED_AT, &self.updated_at),
        ];
        for (key, value) in stamps {
            if let Some(value) = value {
                map.insert(key.to_string(), Value::String(value.to_rfc3339()));
            }
        }

        ProfileFields::from_map(map)
    }

    /// Looks up an attribute outside the well-known columns.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Name shown in headers: full name, then username, then the account
    /// email, then a generic label.
    pub fn display_name<'a>(&'a self, email: Option<&'a str>) -> &'a str {
        display_name(Some(self), email)
    }

    /// Single upper-case letter for the avatar placeholder.
    pub fn initials(&self, email: Option<&str>) -> String {
        initials(Some(self), email)
    }
}

/// Display name for a possibly missing profile.
pub fn display_name<'a>(profile: Option<&'a Profile>, email: Option<&'a str>) -> &'a str {
    profile
        .and_then(|p| non_empty(p.full_name.as_deref()))
        .or_else(|| profile.and_then(|p| non_empty(p.username.as_deref())))
        .or_else(|| non_empty(email))
        .unwrap_or(DISPLAY_NAME_FALLBACK)
}

/// Avatar placeholder letter for a possibly missing profile.
pub fn initials(profile: Option<&Profile>, email: Option<&str>) -> String {
    let first_upper = |s: &str| s.chars().next().map(|c| c.to_uppercase().collect::<String>());

    first_upper(display_name(profile, email).trim())
        .or_else(|| email.and_then(first_upper))
        .unwrap_or_else(|| "?".to_string())
}

impl Serialize for Profile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_fields().serialize(serializer)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

fn take_text(map: &mut Map<String, Value>, key: &str) -> Option<String> {
    match map.remove(key) {
        Some(Value::String(s)) => Some(s),
        Some(Value::Null) | None => None,
        Some(other) => {
            map.insert(key.to_string(), other);
            None
        }
    }
}

fn take_timestamp(map: &mut Map<String, Value>, key: &str) -> Option<Timestamp> {
    match map.remove(key) {
        Some(Value::String(s)) => match Timestamp::parse_rfc3339(&s) {
            Some(ts) => Some(ts),
            None => {
                map.insert(key.to_string(), Value::String(s));
                None
            }
        },
        Some(Value::Null) | None => None,
        Some(other) => {
            map.insert(key.to_string(), other);
            None
        }
    }
}
