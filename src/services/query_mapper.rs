use std::collections::HashMap;

use crate::models::Emotion;

/// Query used for any emotion missing from the table
pub const DEFAULT_FALLBACK_QUERY: &str = "motivational videos";

const DEFAULT_QUERIES: [(Emotion, &str); 6] = [
    (Emotion::Happy, "motivational success stories"),
    (Emotion::Sad, "uplifting and comforting videos"),
    (Emotion::Neutral, "general motivational videos"),
    (Emotion::Stressed, "stress relief and relaxation videos"),
    (Emotion::Unmotivated, "high energy motivational speeches"),
    (Emotion::Anxious, "calm and soothing videos"),
];

/// Maps an emotion label to a provider search query
#[derive(Debug, Clone)]
pub struct QueryMapper {
    table: HashMap<Emotion, String>,
    fallback: String,
}

impl Default for QueryMapper {
    fn default() -> Self {
        Self::with_fallback(DEFAULT_FALLBACK_QUERY)
    }
}

impl QueryMapper {
    pub fn new(table: HashMap<Emotion, String>, fallback: impl Into<String>) -> Self {
        Self {
            table,
            fallback: fallback.into(),
        }
    }

    /// Default table with a custom fallback query
    pub fn with_fallback(fallback: impl Into<String>) -> Self {
        let table = DEFAULT_QUERIES
            .iter()
            .map(|(emotion, query)| (*emotion, query.to_string()))
            .collect();
        Self::new(table, fallback)
    }

    pub fn to_query(&self, emotion: Emotion) -> &str {
        self.table
            .get(&emotion)
            .map(String::as_str)
            .unwrap_or(self.fallback.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let mapper = QueryMapper::default();
        assert_eq!(mapper.to_query(Emotion::Happy), "motivational success stories");
        assert_eq!(mapper.to_query(Emotion::Sad), "uplifting and comforting videos");
        assert_eq!(mapper.to_query(Emotion::Neutral), "general motivational videos");
        assert_eq!(
            mapper.to_query(Emotion::Stressed),
            "stress relief and relaxation videos"
        );
        assert_eq!(
            mapper.to_query(Emotion::Unmotivated),
            "high energy motivational speeches"
        );
        assert_eq!(mapper.to_query(Emotion::Anxious), "calm and soothing videos");
    }

    #[test]
    fn test_every_emotion_has_a_default_entry() {
        let mapper = QueryMapper::default();
        for emotion in Emotion::ALL {
            assert_ne!(mapper.to_query(emotion), DEFAULT_FALLBACK_QUERY);
        }
    }

    #[test]
    fn test_missing_entry_uses_fallback() {
        let mut table = HashMap::new();
        table.insert(Emotion::Happy, "happy things".to_string());
        let mapper = QueryMapper::new(table, DEFAULT_FALLBACK_QUERY);

        assert_eq!(mapper.to_query(Emotion::Happy), "happy things");
        assert_eq!(mapper.to_query(Emotion::Anxious), "motivational videos");
    }
}
