use serde::{Deserialize, Serialize};

use super::Emotion;

/// A candidate with its derived reference URL, ready for history filtering
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentItem {
    pub title: String,
    pub reference_url: String,
}

/// Terminal result of one recommendation cycle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecommendationOutcome {
    /// A new item was chosen and added to the user's history
    Recommended {
        emotion: Emotion,
        title: String,
        reference_url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        wish: Option<String>,
    },
    /// Every candidate for the mapped query was already shown to the user
    Exhausted {
        emotion: Emotion,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        wish: Option<String>,
    },
}

impl RecommendationOutcome {
    pub fn emotion(&self) -> Emotion {
        match self {
            RecommendationOutcome::Recommended { emotion, .. }
            | RecommendationOutcome::Exhausted { emotion, .. } => *emotion,
        }
    }

    /// Reference URL of the recommended item, if any
    pub fn reference_url(&self) -> Option<&str> {
        match self {
            RecommendationOutcome::Recommended { reference_url, .. } => {
                Some(reference_url.as_str())
            }
            RecommendationOutcome::Exhausted { .. } => None,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, RecommendationOutcome::Exhausted { .. })
    }
}
