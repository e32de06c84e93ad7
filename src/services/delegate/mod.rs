//! External recommendation delegates
//!
//! A delegate hands the preferences to an outside generator (a hosted
//! language model today) and returns whatever recommendation-shaped records
//! come back. Delegates may fail; callers decide how to degrade.
use crate::{
    error::AppResult,
    models::{Recommendation, RecommendationRequest},
};

pub mod openai;

pub use openai::OpenAiDelegate;

/// Most records accepted from a delegate in one response
pub const DELEGATE_LIMIT: usize = 15;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationDelegate: Send + Sync {
    /// Generate recommendations for the given preferences
    async fn recommend(&self, request: &RecommendationRequest) -> AppResult<Vec<Recommendation>>;
}
