//! Public profile records

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Usernames: 3-30 ASCII letters, digits, `_`, `-` or `.`
static USERNAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.\-]{3,30}$").expect("Username regex pattern is valid"));

pub const USERNAME_MESSAGE: &str =
    "Usernames are 3-30 characters: letters, numbers, underscores, hyphens and dots";

/// A user's public-facing identity record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub user_id: String,
    pub username: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon_url: Option<String>,
}

impl Profile {
    pub fn new(
        id: impl Into<String>,
        user_id: impl Into<String>,
        username: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            username: username.into(),
            display_name: String::new(),
            bio: String::new(),
            avatar_url: None,
            favicon_url: None,
        }
    }

    /// Display name, falling back to `@username`
    pub fn title(&self) -> String {
        if self.display_name.trim().is_empty() {
            format!("@{}", self.username)
        } else {
            self.display_name.clone()
        }
    }

    /// Up to two initials for avatar placeholders
    pub fn initials(&self) -> String {
        let source = if self.display_name.trim().is_empty() {
            &self.username
        } else {
            &self.display_name
        };
        source
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// Which profile image a media upload replaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Avatar,
    Favicon,
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Avatar => write!(f, "avatar"),
            MediaKind::Favicon => write!(f, "favicon"),
        }
    }
}

/// Check a username against the allowed character set
pub fn validate_username(username: &str) -> Result<()> {
    if USERNAME_PATTERN.is_match(username) {
        Ok(())
    } else {
        Err(Error::validation(USERNAME_MESSAGE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_usernames() {
        for name in ["ada", "ada_lovelace", "ada-l.1815", "ABC"] {
            assert!(validate_username(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_invalid_usernames() {
        let too_long = "x".repeat(31);
        let names: [&str; 6] = ["ab", "has space", "emoji😀", "slash/name", "", &too_long];
        for name in names {
            let err = validate_username(name).unwrap_err();
            assert!(err.is_validation(), "{name}");
        }
    }

    #[test]
    fn test_title_falls_back_to_username() {
        let mut profile = Profile::new("p1", "u1", "ada");
        assert_eq!(profile.title(), "@ada");
        profile.display_name = "Ada Lovelace".into();
        assert_eq!(profile.title(), "Ada Lovelace");
    }

    #[test]
    fn test_initials() {
        let mut profile = Profile::new("p1", "u1", "ada");
        assert_eq!(profile.initials(), "A");
        profile.display_name = "ada byron lovelace".into();
        assert_eq!(profile.initials(), "AB");
    }
}
