pub mod history;
pub mod providers;
pub mod query_mapper;
pub mod recommendations;
pub mod sentiment;
pub mod user_locks;

pub use recommendations::{RecommendationEngine, RecommendationSettings};
