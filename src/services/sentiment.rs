use std::{collections::HashMap, sync::Arc};

use crate::models::Emotion;

/// Polarity above which text is classified as happy
pub const POSITIVE_THRESHOLD: f64 = 0.1;
/// Polarity below which text is classified as sad
pub const NEGATIVE_THRESHOLD: f64 = -0.1;

/// Scores free text on a polarity scale from -1.0 (negative) to 1.0 (positive)
pub trait PolarityScorer: Send + Sync {
    fn polarity(&self, text: &str) -> f64;
}

/// Maps a polarity score onto an emotion label.
///
/// The thresholds are exclusive: exactly 0.1 and exactly -0.1 are neutral.
pub fn emotion_for_polarity(score: f64) -> Emotion {
    if score > POSITIVE_THRESHOLD {
        Emotion::Happy
    } else if score < NEGATIVE_THRESHOLD {
        Emotion::Sad
    } else {
        Emotion::Neutral
    }
}

/// Classifies free text into happy, sad or neutral
#[derive(Clone)]
pub struct SentimentClassifier {
    scorer: Arc<dyn PolarityScorer>,
}

impl Default for SentimentClassifier {
    fn default() -> Self {
        Self::new(Arc::new(LexiconScorer::default()))
    }
}

impl SentimentClassifier {
    pub fn new(scorer: Arc<dyn PolarityScorer>) -> Self {
        Self { scorer }
    }

    /// Raw polarity of `text`, clamped to [-1, 1]
    pub fn polarity(&self, text: &str) -> f64 {
        self.scorer.polarity(text).clamp(-1.0, 1.0)
    }

    /// Callers reject empty text before classifying
    pub fn classify(&self, text: &str) -> Emotion {
        emotion_for_polarity(self.polarity(text))
    }
}

const LEXICON: &[(&str, f64)] = &[
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("beautiful", 0.85),
    ("best", 1.0),
    ("blessed", 0.6),
    ("calm", 0.3),
    ("cheerful", 0.6),
    ("confident", 0.5),
    ("excellent", 1.0),
    ("excited", 0.4),
    ("fantastic", 0.4),
    ("fine", 0.4),
    ("fun", 0.3),
    ("glad", 0.5),
    ("good", 0.7),
    ("grateful", 0.6),
    ("great", 0.8),
    ("happy", 0.8),
    ("hopeful", 0.5),
    ("joy", 0.8),
    ("love", 0.5),
    ("lucky", 0.4),
    ("nice", 0.6),
    ("okay", 0.5),
    ("peaceful", 0.5),
    ("proud", 0.8),
    ("relaxed", 0.4),
    ("wonderful", 1.0),
    ("afraid", -0.6),
    ("angry", -0.5),
    ("annoyed", -0.4),
    ("anxious", -0.3),
    ("awful", -1.0),
    ("bad", -0.7),
    ("bored", -0.5),
    ("depressed", -0.7),
    ("disappointed", -0.75),
    ("exhausted", -0.4),
    ("frustrated", -0.7),
    ("horrible", -1.0),
    ("hopeless", -0.8),
    ("hurt", -0.5),
    ("lonely", -0.5),
    ("lost", -0.3),
    ("miserable", -1.0),
    ("nervous", -0.3),
    ("overwhelmed", -0.5),
    ("sad", -0.5),
    ("scared", -0.6),
    ("sick", -0.7),
    ("stressed", -0.4),
    ("terrible", -1.0),
    ("tired", -0.4),
    ("unhappy", -0.6),
    ("upset", -0.5),
    ("worried", -0.4),
    ("worst", -1.0),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("extremely", 1.5),
    ("incredibly", 1.4),
    ("really", 1.3),
    ("so", 1.2),
    ("super", 1.4),
    ("very", 1.3),
    ("quite", 1.1),
    ("somewhat", 0.7),
    ("slightly", 0.5),
    ("little", 0.6),
];

const NEGATIONS: &[&str] = &["not", "no", "never", "nothing", "hardly", "without"];

/// How many tokens a negation or intensifier reaches forward
const MODIFIER_REACH: usize = 3;

/// Polarity scorer that averages word polarities from a fixed lexicon
///
/// A preceding negation flips and halves a word's polarity, and intensifiers scale it.
/// Text with no lexicon words scores 0.0.
pub struct LexiconScorer {
    words: HashMap<&'static str, f64>,
    intensifiers: HashMap<&'static str, f64>,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self {
            words: LEXICON.iter().copied().collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
        }
    }
}

impl LexiconScorer {
    fn is_negation(token: &str) -> bool {
        NEGATIONS.contains(&token) || token.ends_with("n't")
    }
}

impl PolarityScorer for LexiconScorer {
    fn polarity(&self, text: &str) -> f64 {
        let lowered = text.to_lowercase();
        let tokens = lowered
            .split(|c: char| !(c.is_alphanumeric() || c == '\''))
            .filter(|t| !t.is_empty());

        let mut scores = Vec::new();
        let mut negated_for = 0usize;
        let mut intensity = 1.0;
        let mut intensity_for = 0usize;

        for token in tokens {
            if let Some(&score) = self.words.get(token) {
                let mut score = score;
                if intensity_for > 0 {
                    score *= intensity;
                }
                if negated_for > 0 {
                    score *= -0.5;
                }
                scores.push(score.clamp(-1.0, 1.0));
                negated_for = 0;
                intensity_for = 0;
                continue;
            }

            negated_for = negated_for.saturating_sub(1);
            intensity_for = intensity_for.saturating_sub(1);

            if Self::is_negation(token) {
                negated_for = MODIFIER_REACH;
            } else if let Some(&factor) = self.intensifiers.get(token) {
                intensity = factor;
                intensity_for = MODIFIER_REACH;
            }
        }

        if scores.is_empty() {
            return 0.0;
        }

        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        mean.clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedScorer(f64);

    impl PolarityScorer for FixedScorer {
        fn polarity(&self, _text: &str) -> f64 {
            self.0
        }
    }

    fn classify_score(score: f64) -> Emotion {
        SentimentClassifier::new(Arc::new(FixedScorer(score))).classify("anything")
    }

    #[test]
    fn test_thresholds_are_exclusive() {
        assert_eq!(classify_score(0.1), Emotion::Neutral);
        assert_eq!(classify_score(-0.1), Emotion::Neutral);
        assert_eq!(classify_score(0.0), Emotion::Neutral);
    }

    #[test]
    fn test_just_past_thresholds() {
        assert_eq!(classify_score(0.1000001), Emotion::Happy);
        assert_eq!(classify_score(-0.1000001), Emotion::Sad);
    }

    #[test]
    fn test_extremes() {
        assert_eq!(classify_score(1.0), Emotion::Happy);
        assert_eq!(classify_score(-1.0), Emotion::Sad);
    }

    #[test]
    fn test_out_of_range_scores_are_clamped() {
        let classifier = SentimentClassifier::new(Arc::new(FixedScorer(7.5)));
        assert_eq!(classifier.polarity("x"), 1.0);
        assert_eq!(classifier.classify("x"), Emotion::Happy);
    }

    #[test]
    fn test_lexicon_positive_text() {
        let classifier = SentimentClassifier::default();
        assert_eq!(classifier.classify("I feel great today"), Emotion::Happy);
    }

    #[test]
    fn test_lexicon_negative_text() {
        let classifier = SentimentClassifier::default();
        assert_eq!(
            classifier.classify("I'm tired and lonely, work was awful"),
            Emotion::Sad
        );
    }

    #[test]
    fn test_lexicon_unknown_words_are_neutral() {
        let scorer = LexiconScorer::default();
        assert_eq!(scorer.polarity("the train leaves at noon"), 0.0);
        assert_eq!(
            SentimentClassifier::default().classify("the train leaves at noon"),
            Emotion::Neutral
        );
    }

    #[test]
    fn test_lexicon_negation_flips_and_dampens() {
        let scorer = LexiconScorer::default();
        let plain = scorer.polarity("good");
        let negated = scorer.polarity("not good");
        assert!((negated - plain * -0.5).abs() < 1e-9);
        assert_eq!(
            SentimentClassifier::default().classify("I don't feel good"),
            Emotion::Sad
        );
    }

    #[test]
    fn test_lexicon_intensifier_scales() {
        let scorer = LexiconScorer::default();
        assert!(scorer.polarity("very sad") < scorer.polarity("sad"));
        assert!(scorer.polarity("slightly happy") < scorer.polarity("happy"));
    }

    #[test]
    fn test_lexicon_modifier_reach_is_limited() {
        let scorer = LexiconScorer::default();
        // "not" is too far away to affect "great"
        assert!(scorer.polarity("not that I mind at all, today was great") > 0.0);
    }

    #[test]
    fn test_lexicon_is_case_insensitive() {
        let scorer = LexiconScorer::default();
        assert_eq!(scorer.polarity("GREAT"), scorer.polarity("great"));
    }
}
