//! Local-over-remote reconciliation rule.
//!
//! Edits are stored locally before (or instead of) reaching the remote
//! table, so any column present in the local record wins. Columns the user
//! never touched locally keep their remote value. The id is always the
//! current user's.

use super::{Profile, ProfileFields};
use crate::domain::foundation::UserId;

/// Overlays `local` on top of `remote` and binds the result to `user_id`.
pub fn merge(user_id: &UserId, remote: ProfileFields, local: Option<&ProfileFields>) -> Profile {
    let mut merged = remote;
    if let Some(local) = local {
        merged.overlay(local);
    }
    Profile::from_fields(user_id, merged)
}

/// Promotes a cached record to a profile for `user_id` when no remote row exists.
pub fn rebase(user_id: &UserId, local: ProfileFields) -> Profile {
    Profile::from_fields(user_id, local)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::{json, Value};

    fn uid(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[test]
    fn local_field_overrides_remote_field() {
        let remote = ProfileFields::new()
            .with("id", "u1")
            .with("bio", "old")
            .with("username", "ann");
        let local = ProfileFields::new().with("bio", "new");

        let profile = merge(&uid("u1"), remote, Some(&local));

        assert_eq!(profile.bio.as_deref(), Some("new"));
        assert_eq!(profile.username.as_deref(), Some("ann"));
    }

    #[test]
    fn remote_only_fields_survive_the_merge() {
        let remote = ProfileFields::new()
            .with("website", "https://remote.example")
            .with("tutor_notes", "set by instructor");
        let local = ProfileFields::new().with("full_name", "Ann");

        let profile = merge(&uid("u1"), remote, Some(&local));

        assert_eq!(profile.website.as_deref(), Some("https://remote.example"));
        assert_eq!(profile.attribute("tutor_notes"), Some(&json!("set by instructor")));
        assert_eq!(profile.full_name.as_deref(), Some("Ann"));
    }

    #[test]
    fn local_null_clears_remote_value() {
        let remote = ProfileFields::new().with("avatar_url", "https://cdn/old.png");
        let local = ProfileFields::new().with("avatar_url", Value::Null);

        let profile = merge(&uid("u1"), remote, Some(&local));

        assert!(profile.avatar_url.is_none());
    }

    #[test]
    fn id_is_forced_even_if_both_sources_disagree() {
        let remote = ProfileFields::new().with("id", "remote-id");
        let local = ProfileFields::new().with("id", "stale-local-id");

        let profile = merge(&uid("u1"), remote, Some(&local));

        assert_eq!(profile.id.as_str(), "u1");
    }

    #[test]
    fn merge_without_local_returns_remote_unchanged() {
        let remote = ProfileFields::new().with("id", "u1").with("bio", "remote");

        let profile = merge(&uid("u1"), remote.clone(), None);

        assert_eq!(profile, Profile::from_fields(&uid("u1"), remote));
    }

    #[test]
    fn rebase_binds_cached_record_to_current_user() {
        let local = ProfileFields::new().with("full_name", "Ann");

        let profile = rebase(&uid("u7"), local);

        assert_eq!(profile.id.as_str(), "u7");
        assert_eq!(profile.full_name.as_deref(), Some("Ann"));
    }

    fn small_record() -> impl Strategy<Value = Vec<(String, String)>> {
        prop::collection::vec(("[a-e]", "[a-z]{0,4}"), 0..6)
    }

    fn fields_of(pairs: &[(String, String)]) -> ProfileFields {
        pairs
            .iter()
            .fold(ProfileFields::new(), |f, (k, v)| f.with(k.clone(), v.clone()))
    }

    proptest! {
        #[test]
        fn every_local_key_wins_and_every_remote_only_key_survives(
            remote in small_record(),
            local in small_record(),
        ) {
            let remote = fields_of(&remote);
            let local = fields_of(&local);

            let merged = merge(&uid("u1"), remote.clone(), Some(&local)).to_fields();

            for key in local.keys() {
                prop_assert_eq!(merged.get(key), local.get(key));
            }
            for key in remote.keys().filter(|k| !local.contains_key(k)) {
                prop_assert_eq!(merged.get(key), remote.get(key));
            }
            prop_assert_eq!(merged.get_str("id"), Some("u1"));
        }
    }
}
