use serde::{Deserialize, Serialize};

/// The user's local profile. One record per installation (fixed id),
/// created with defaults on first read and overwritten wholesale on save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default = "Profile::default_id")]
    pub id: i64,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub avatar_uri: String,
    #[serde(default)]
    pub resume_url: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub email: String,
    /// Reminder time as "HH:mm", or empty when no reminder is set
    #[serde(default)]
    pub favorite_class_time: String,
}

impl Profile {
    fn default_id() -> i64 {
        1
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            id: Self::default_id(),
            full_name: String::new(),
            avatar_uri: String::new(),
            resume_url: String::new(),
            position: String::new(),
            email: String::new(),
            favorite_class_time: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_is_empty_with_fixed_id() {
        let profile = Profile::default();
        assert_eq!(profile.id, 1);
        assert!(profile.full_name.is_empty());
        assert!(profile.favorite_class_time.is_empty());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let profile: Profile = serde_json::from_str(r#"{"full_name":"Ada"}"#).unwrap();
        assert_eq!(profile.id, 1);
        assert_eq!(profile.full_name, "Ada");
        assert!(profile.email.is_empty());
    }
}
