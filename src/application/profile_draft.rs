//! Edit form model for the profile edit screen.

use crate::application::handlers::SaveProfileCommand;
use crate::application::profile_store::LocalProfileStore;
use crate::domain::profile::{keys, Profile, ProfileFields};

const DRAFT_NAME_FALLBACK: &str = "User";

/// Values currently shown in the edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDraft {
    pub full_name: String,
    pub username: String,
    pub bio: String,
    pub website: String,
    pub avatar_url: Option<String>,
}

impl ProfileDraft {
    /// Seeds from a raw record. Missing or non-text columns become blank.
    pub fn from_fields(fields: &ProfileFields) -> Self {
        let text = |key: &str| fields.get_str(key).unwrap_or_default().to_string();
        Self {
            full_name: text(keys::FULL_NAME),
            username: text(keys::USERNAME),
            bio: text(keys::BIO),
            website: text(keys::WEBSITE),
            avatar_url: fields
                .get_str(keys::AVATAR_URL)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        }
    }

    /// Overrides the draft with a reconciled profile. Columns the profile
    /// lacks keep their current draft value.
    pub fn apply_profile(&mut self, profile: &Profile) {
        let apply = |target: &mut String, value: &Option<String>| {
            if let Some(value) = value {
                *target = value.clone();
            }
        };
        apply(&mut self.full_name, &profile.full_name);
        apply(&mut self.username, &profile.username);
        apply(&mut self.bio, &profile.bio);
        apply(&mut self.website, &profile.website);

        if let Some(avatar) = profile.avatar_url.as_ref().filter(|s| !s.is_empty()) {
            self.avatar_url = Some(avatar.clone());
        }
    }

    /// Builds the draft shown when the edit screen opens: the cached record
    /// first, then the reconciled profile on top.
    pub async fn load(cache: &LocalProfileStore, profile: Option<&Profile>) -> Self {
        let mut draft = cache
            .get()
            .await
            .map(|fields| Self::from_fields(&fields))
            .unwrap_or_default();

        if let Some(profile) = profile {
            draft.apply_profile(profile);
        }
        draft
    }

    pub fn set_avatar(&mut self, url: impl Into<String>) {
        self.avatar_url = Some(url.into());
    }

    pub fn remove_avatar(&mut self) {
        self.avatar_url = None;
    }

    /// Name shown above the form.
    pub fn display_name<'a>(&'a self, email: Option<&'a str>) -> &'a str {
        [self.full_name.as_str(), self.username.as_str()]
            .into_iter()
            .chain(email)
            .find(|s| !s.is_empty())
            .unwrap_or(DRAFT_NAME_FALLBACK)
    }

    /// Avatar placeholder letter.
    pub fn initials(&self, email: Option<&str>) -> String {
        self.display_name(email)
            .trim()
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "?".to_string())
    }

    pub fn into_command(self) -> SaveProfileCommand {
        SaveProfileCommand {
            full_name: Some(self.full_name),
            username: Some(self.username),
            bio: Some(self.bio),
            website: Some(self.website),
            avatar_url: self.avatar_url,
        }
    }
}
