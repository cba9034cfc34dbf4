use std::fmt::Write;

use crate::{
    error::{AppError, AppResult},
    models::UserProfile,
};

const MAX_NAME_CHARS: usize = 128;

/// Durable per-user profile storage
///
/// Implementations must give atomic per-key overwrite: a `load` racing a `save` sees either
/// the previous record or the new one, never a partially written record.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ProfileStore: Send + Sync {
    /// Loads the stored profile for `name`, or a fresh unsaved profile if none exists
    ///
    /// Fails with `AppError::CorruptProfile` when a record exists but cannot be parsed.
    async fn load(&self, name: &str) -> AppResult<UserProfile>;

    /// Overwrites the stored record for `profile.name()`
    async fn save(&self, profile: &UserProfile) -> AppResult<()>;

    /// Whether a record has ever been saved for `name`
    async fn exists(&self, name: &str) -> AppResult<bool>;

    /// Store name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Derives a filesystem- and key-safe identifier from a user name.
///
/// Lowercase ASCII letters, digits, `-` and `_` pass through; every other byte, uppercase
/// letters included, is percent-encoded with uppercase hex digits. The mapping is injective
/// and stays injective after case folding, so `"Alice"` and `"alice"` never share a file
/// on a case-insensitive filesystem. The result never contains `/`, `\`, `.` or control
/// characters.
pub fn storage_key(name: &str) -> AppResult<String> {
    if name.trim().is_empty() {
        return Err(AppError::Validation("User name cannot be empty".to_string()));
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(AppError::Validation(format!(
            "User name cannot exceed {} characters",
            MAX_NAME_CHARS
        )));
    }

    let mut key = String::with_capacity(name.len());
    for byte in name.bytes() {
        match byte {
            b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' => key.push(byte as char),
            _ => {
                let _ = write!(key, "%{:02X}", byte);
            }
        }
    }

    Ok(key)
}

/// Parses a stored record and checks it belongs to `name`
pub(crate) fn parse_profile(name: &str, bytes: &[u8]) -> AppResult<UserProfile> {
    let corrupt = |reason: String| AppError::CorruptProfile {
        name: name.to_string(),
        reason,
    };

    let profile: UserProfile = serde_json::from_slice(bytes).map_err(|e| corrupt(e.to_string()))?;
    profile.validate().map_err(corrupt)?;

    if profile.name() != name {
        return Err(corrupt(format!(
            "record belongs to '{}'",
            profile.name()
        )));
    }

    Ok(profile)
}
