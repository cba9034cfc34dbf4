use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

use crate::error::AppError;

pub mod profile;
pub mod recommendation;

pub use profile::{ShownItem, UserProfile};
pub use recommendation::{ContentItem, RecommendationOutcome};

/// Discrete mood category derived from free text or supplied directly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Sad,
    Neutral,
    Stressed,
    Unmotivated,
    Anxious,
}

impl Emotion {
    pub const ALL: [Emotion; 6] = [
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Neutral,
        Emotion::Stressed,
        Emotion::Unmotivated,
        Emotion::Anxious,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Neutral => "neutral",
            Emotion::Stressed => "stressed",
            Emotion::Unmotivated => "unmotivated",
            Emotion::Anxious => "anxious",
        }
    }
}

impl Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Emotion {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_lowercase();
        Emotion::ALL
            .into_iter()
            .find(|emotion| emotion.as_str() == label)
            .ok_or_else(|| AppError::Validation(format!("Unknown emotion label '{}'", s)))
    }
}

/// A content item returned by a search provider, not yet filtered against history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Candidate {
    /// Provider-specific item id (a YouTube video id)
    pub id: String,
    pub title: String,
}

impl Candidate {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emotion_display() {
        assert_eq!(format!("{}", Emotion::Unmotivated), "unmotivated");
    }

    #[test]
    fn test_emotion_serde_lowercase() {
        let json = serde_json::to_string(&Emotion::Anxious).unwrap();
        assert_eq!(json, "\"anxious\"");

        let parsed: Emotion = serde_json::from_str("\"stressed\"").unwrap();
        assert_eq!(parsed, Emotion::Stressed);
    }

    #[test]
    fn test_emotion_from_str_is_case_insensitive() {
        assert_eq!("Happy".parse::<Emotion>().unwrap(), Emotion::Happy);
        assert_eq!(" sad ".parse::<Emotion>().unwrap(), Emotion::Sad);
    }

    #[test]
    fn test_emotion_from_str_rejects_unknown() {
        let err = "furious".parse::<Emotion>().unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_unknown_label_fails_to_deserialize() {
        assert!(serde_json::from_str::<Emotion>("\"elated\"").is_err());
    }
}
