use std::{
    collections::HashSet,
    sync::{Mutex, PoisonError},
};

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::models::ContentItem;

/// Keeps the candidates whose reference URL is not in `shown`, in their original order
pub fn filter_unseen(candidates: Vec<ContentItem>, shown: &HashSet<&str>) -> Vec<ContentItem> {
    candidates
        .into_iter()
        .filter(|item| !shown.contains(item.reference_url.as_str()))
        .collect()
}

/// Chooses among candidates
pub trait Selector: Send + Sync {
    /// Picks an index in `0..len`, or `None` when `len` is zero
    fn pick(&self, len: usize) -> Option<usize>;
}

/// Picks one item from `items` using `selector`
pub fn select<'a, T>(selector: &dyn Selector, items: &'a [T]) -> Option<&'a T> {
    selector.pick(items.len()).and_then(|index| items.get(index))
}

/// Uniform random selector over an injected RNG
pub struct RandomSelector {
    rng: Mutex<StdRng>,
}

impl RandomSelector {
    /// Deterministic selector; the same seed yields the same picks
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }
}

impl Selector for RandomSelector {
    fn pick(&self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        Some(rng.gen_range(0..len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(n: usize) -> ContentItem {
        ContentItem {
            title: format!("Video {}", n),
            reference_url: format!("https://www.youtube.com/watch?v=v{}", n),
        }
    }

    #[test]
    fn test_filter_preserves_order() {
        let candidates: Vec<_> = (0..5).map(item).collect();
        let shown_urls = [item(1).reference_url, item(3).reference_url];
        let shown: HashSet<&str> = shown_urls.iter().map(String::as_str).collect();

        let fresh = filter_unseen(candidates, &shown);
        assert_eq!(fresh, vec![item(0), item(2), item(4)]);
    }

    #[test]
    fn test_filter_all_shown() {
        let candidates: Vec<_> = (0..3).map(item).collect();
        let shown_urls: Vec<String> = candidates.iter().map(|c| c.reference_url.clone()).collect();
        let shown: HashSet<&str> = shown_urls.iter().map(String::as_str).collect();

        assert!(filter_unseen(candidates, &shown).is_empty());
    }

    #[test]
    fn test_filter_empty_history_keeps_everything() {
        let candidates: Vec<_> = (0..3).map(item).collect();
        assert_eq!(filter_unseen(candidates.clone(), &HashSet::new()), candidates);
    }

    #[test]
    fn test_select_empty_is_none() {
        let selector = RandomSelector::seeded(7);
        let empty: Vec<ContentItem> = Vec::new();
        assert!(select(&selector, &empty).is_none());
    }

    #[test]
    fn test_seeded_selector_is_deterministic() {
        let a = RandomSelector::seeded(42);
        let b = RandomSelector::seeded(42);
        let picks_a: Vec<_> = (0..20).map(|_| a.pick(10)).collect();
        let picks_b: Vec<_> = (0..20).map(|_| b.pick(10)).collect();
        assert_eq!(picks_a, picks_b);
    }

    #[test]
    fn test_selector_covers_every_index() {
        let selector = RandomSelector::seeded(1);
        let mut counts = [0usize; 4];
        for _ in 0..4000 {
            counts[selector.pick(4).unwrap()] += 1;
        }
        // Roughly uniform: each bucket expects 1000
        for count in counts {
            assert!((800..1200).contains(&count), "skewed counts: {:?}", counts);
        }
    }

    #[test]
    fn test_select_single_item() {
        let selector = RandomSelector::from_entropy();
        let items = vec![item(9)];
        assert_eq!(select(&selector, &items), Some(&item(9)));
    }
}
