use std::{sync::Arc, time::Duration};

use crate::{
    config::Config,
    db::{storage_key, ProfileStore},
    error::{AppError, AppResult},
    models::{Candidate, ContentItem, Emotion, RecommendationOutcome, ShownItem},
    services::{
        history::{filter_unseen, select, RandomSelector, Selector},
        providers::SearchProvider,
        query_mapper::QueryMapper,
        sentiment::SentimentClassifier,
        user_locks::UserLocks,
    },
};

/// Encouraging messages returned after a gratitude entry is recorded
pub const DEFAULT_WISHES: [&str; 5] = [
    "That's great! May your day be filled with positivity and joy!",
    "Good for you! Wishing you a day full of success and happiness!",
    "Awesome! May your hard work bring fruitful results today!",
    "Great! Hope you find peace and fulfillment in everything you do today!",
    "Love it! Sending you good vibes for a fantastic day ahead!",
];

/// Tunables for a recommendation cycle
#[derive(Debug, Clone)]
pub struct RecommendationSettings {
    /// Candidates requested per search; headroom for items filtered out by history
    pub max_results: u32,
    pub provider_timeout: Duration,
    /// Joined with a candidate id to form its reference URL
    pub reference_url_prefix: String,
    pub wishes: Vec<String>,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            max_results: 10,
            provider_timeout: Duration::from_secs(10),
            reference_url_prefix: "https://www.youtube.com/watch?v=".to_string(),
            wishes: DEFAULT_WISHES.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl RecommendationSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_results: config.max_results,
            provider_timeout: Duration::from_secs(config.provider_timeout_secs),
            reference_url_prefix: config.reference_url_prefix.clone(),
            ..Self::default()
        }
    }
}

/// Runs classify → query → search → filter → select → record → persist cycles
///
/// Cycles for the same user are serialized from profile load through save, so two
/// concurrent requests can never both pick the same unseen item.
pub struct RecommendationEngine {
    classifier: SentimentClassifier,
    query_mapper: QueryMapper,
    provider: Arc<dyn SearchProvider>,
    store: Arc<dyn ProfileStore>,
    selector: Arc<dyn Selector>,
    settings: RecommendationSettings,
    locks: UserLocks,
}

impl RecommendationEngine {
    /// Creates an engine with the lexicon classifier, the default query table and an
    /// entropy-seeded selector
    pub fn new(
        provider: Arc<dyn SearchProvider>,
        store: Arc<dyn ProfileStore>,
        settings: RecommendationSettings,
    ) -> Self {
        Self {
            classifier: SentimentClassifier::default(),
            query_mapper: QueryMapper::default(),
            provider,
            store,
            selector: Arc::new(RandomSelector::from_entropy()),
            settings,
            locks: UserLocks::new(),
        }
    }

    pub fn with_classifier(mut self, classifier: SentimentClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_query_mapper(mut self, query_mapper: QueryMapper) -> Self {
        self.query_mapper = query_mapper;
        self
    }

    pub fn with_selector(mut self, selector: Arc<dyn Selector>) -> Self {
        self.selector = selector;
        self
    }

    pub fn classifier(&self) -> &SentimentClassifier {
        &self.classifier
    }

    pub fn store(&self) -> &Arc<dyn ProfileStore> {
        &self.store
    }

    /// Runs one cycle for free-text emotion input.
    ///
    /// On `AppError::Persistence` the returned error carries the computed outcome; the
    /// item was not durably recorded and a retry may recommend it again.
    pub async fn recommend(
        &self,
        user_name: &str,
        gratitude_text: &str,
        emotion_text: &str,
    ) -> AppResult<RecommendationOutcome> {
        let user_name = require_user_name(user_name)?;
        let emotion_text = emotion_text.trim();
        if emotion_text.is_empty() {
            return Err(AppError::Validation(
                "Emotion text cannot be empty".to_string(),
            ));
        }

        let emotion = self.classifier.classify(emotion_text);
        tracing::info!(user = %user_name, emotion = %emotion, "Classified emotion text");

        self.run_cycle(user_name, gratitude_text, emotion).await
    }

    /// Runs one cycle for an emotion label supplied directly, skipping classification
    pub async fn recommend_for_emotion(
        &self,
        user_name: &str,
        gratitude_text: &str,
        emotion: Emotion,
    ) -> AppResult<RecommendationOutcome> {
        let user_name = require_user_name(user_name)?;
        self.run_cycle(user_name, gratitude_text, emotion).await
    }

    #[tracing::instrument(skip(self, gratitude_text), fields(provider = self.provider.name()))]
    async fn run_cycle(
        &self,
        user_name: &str,
        gratitude_text: &str,
        emotion: Emotion,
    ) -> AppResult<RecommendationOutcome> {
        let key = storage_key(user_name)?;
        let _guard = self.locks.acquire(&key).await;

        let mut profile = self.store.load(user_name).await?;

        let query = self.query_mapper.to_query(emotion);
        let candidates = self.fetch_candidates(query).await?;
        let candidate_count = candidates.len();

        let items: Vec<ContentItem> = candidates
            .into_iter()
            .map(|candidate| self.to_item(candidate))
            .collect();
        let fresh = filter_unseen(items, &profile.shown_references());

        tracing::info!(
            query = %query,
            candidates = candidate_count,
            fresh = fresh.len(),
            "Filtered candidates against history"
        );

        let chosen = if fresh.is_empty() {
            None
        } else {
            select(self.selector.as_ref(), &fresh).cloned()
        };

        if let Some(item) = &chosen {
            let recorded = profile.record_shown(ShownItem {
                emotion,
                title: item.title.clone(),
                reference_url: item.reference_url.clone(),
            });
            if !recorded {
                return Err(AppError::Internal(format!(
                    "selected item {} was already shown",
                    item.reference_url
                )));
            }
        }

        profile.record_emotion(emotion);
        let wish = if profile.record_gratitude(gratitude_text) {
            self.pick_wish()
        } else {
            None
        };

        let outcome = match chosen {
            Some(item) => RecommendationOutcome::Recommended {
                emotion,
                title: item.title,
                reference_url: item.reference_url,
                wish,
            },
            None => {
                tracing::info!("All candidates already shown");
                RecommendationOutcome::Exhausted { emotion, wish }
            }
        };

        if let Err(e) = self.store.save(&profile).await {
            tracing::error!(
                error = %e,
                store = self.store.name(),
                "Recommendation computed but profile was not saved"
            );
            return Err(AppError::Persistence {
                reason: e.to_string(),
                outcome: Box::new(outcome),
            });
        }

        tracing::info!(
            recommended = outcome.reference_url().unwrap_or("none"),
            "Recommendation cycle completed"
        );

        Ok(outcome)
    }

    /// Calls the provider under the configured timeout; every failure becomes a
    /// provider error
    async fn fetch_candidates(&self, query: &str) -> AppResult<Vec<Candidate>> {
        let search = self.provider.search(query, self.settings.max_results);

        match tokio::time::timeout(self.settings.provider_timeout, search).await {
            Ok(Ok(candidates)) => Ok(candidates),
            Ok(Err(AppError::Provider(msg))) => {
                tracing::warn!(provider = self.provider.name(), error = %msg, "Search failed");
                Err(AppError::Provider(msg))
            }
            Ok(Err(e)) => {
                tracing::warn!(provider = self.provider.name(), error = %e, "Search failed");
                Err(AppError::Provider(e.to_string()))
            }
            Err(_) => {
                tracing::warn!(
                    provider = self.provider.name(),
                    timeout_ms = self.settings.provider_timeout.as_millis() as u64,
                    "Search timed out"
                );
                Err(AppError::Provider(format!(
                    "{} search timed out after {:?}",
                    self.provider.name(),
                    self.settings.provider_timeout
                )))
            }
        }
    }

    fn to_item(&self, candidate: Candidate) -> ContentItem {
        ContentItem {
            reference_url: format!("{}{}", self.settings.reference_url_prefix, candidate.id),
            title: candidate.title,
        }
    }

    fn pick_wish(&self) -> Option<String> {
        select(self.selector.as_ref(), &self.settings.wishes).cloned()
    }
}

fn require_user_name(user_name: &str) -> AppResult<&str> {
    let user_name = user_name.trim();
    if user_name.is_empty() {
        return Err(AppError::Validation("User name cannot be empty".to_string()));
    }
    Ok(user_name)
}
