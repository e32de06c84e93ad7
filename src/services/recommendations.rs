use crate::{
    models::{Recommendation, RecommendationRequest, RecommendationSource},
    services::{
        delegate::{RecommendationDelegate, DELEGATE_LIMIT},
        synthesizer,
    },
};

/// Recommendations plus the engine that produced them
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationOutcome {
    pub recommendations: Vec<Recommendation>,
    pub source: RecommendationSource,
}

impl RecommendationOutcome {
    fn local(request: &RecommendationRequest) -> Self {
        Self {
            recommendations: synthesizer::synthesize(request),
            source: RecommendationSource::Local,
        }
    }

    fn empty() -> Self {
        Self {
            recommendations: Vec::new(),
            source: RecommendationSource::None,
        }
    }
}

/// Chooses between the delegate and the local synthesizer
///
/// Without a delegate the local synthesizer answers. With one, its records are
/// returned as-is (capped at [`DELEGATE_LIMIT`]); when it fails or returns
/// nothing the result is an empty list, unless `fallback_to_local` is set.
/// Delegate failures are logged and never surface as errors.
pub async fn recommend(
    delegate: Option<&dyn RecommendationDelegate>,
    request: &RecommendationRequest,
    fallback_to_local: bool,
) -> RecommendationOutcome {
    let Some(delegate) = delegate else {
        return RecommendationOutcome::local(request);
    };

    match delegate.recommend(request).await {
        Ok(mut recommendations) if !recommendations.is_empty() => {
            recommendations.truncate(DELEGATE_LIMIT);
            RecommendationOutcome {
                recommendations,
                source: RecommendationSource::Delegate,
            }
        }
        Ok(_) => {
            tracing::info!(fallback_to_local, "Delegate returned no recommendations");
            degrade(request, fallback_to_local)
        }
        Err(e) => {
            tracing::warn!(error = %e, fallback_to_local, "Delegate failed");
            degrade(request, fallback_to_local)
        }
    }
}

fn degrade(request: &RecommendationRequest, fallback_to_local: bool) -> RecommendationOutcome {
    if fallback_to_local {
        RecommendationOutcome::local(request)
    } else {
        RecommendationOutcome::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::AppError, models::Location, services::delegate::MockRecommendationDelegate};

    fn request() -> RecommendationRequest {
        RecommendationRequest::new(["beach", "food"], [Location::from("Galle")])
    }

    fn delegated(title: &str) -> Recommendation {
        Recommendation {
            title: title.to_string(),
            location: "Galle".to_string(),
            category: "beach".to_string(),
            estimated_cost: 12.0,
            estimated_distance_km: 4.5,
            duration_hours: 2,
            score: 0.95,
        }
    }

    #[tokio::test]
    async fn test_without_delegate_uses_synthesizer() {
        let outcome = recommend(None, &request(), false).await;

        assert_eq!(outcome.source, RecommendationSource::Local);
        assert_eq!(outcome.recommendations, synthesizer::synthesize(&request()));
    }

    #[tokio::test]
    async fn test_delegate_results_returned() {
        let mut delegate = MockRecommendationDelegate::new();
        delegate
            .expect_recommend()
            .times(1)
            .returning(|_| Ok(vec![delegated("Unawatuna snorkeling")]));

        let outcome = recommend(Some(&delegate), &request(), false).await;

        assert_eq!(outcome.source, RecommendationSource::Delegate);
        assert_eq!(outcome.recommendations, vec![delegated("Unawatuna snorkeling")]);
    }

    #[tokio::test]
    async fn test_delegate_results_capped() {
        let mut delegate = MockRecommendationDelegate::new();
        delegate
            .expect_recommend()
            .returning(|_| Ok((0..40).map(|i| delegated(&format!("Stop {}", i))).collect()));

        let outcome = recommend(Some(&delegate), &request(), false).await;
        assert_eq!(outcome.recommendations.len(), DELEGATE_LIMIT);
    }

    #[tokio::test]
    async fn test_delegate_failure_yields_empty_list() {
        let mut delegate = MockRecommendationDelegate::new();
        delegate
            .expect_recommend()
            .returning(|_| Err(AppError::Delegate("status 500".to_string())));

        let outcome = recommend(Some(&delegate), &request(), false).await;

        assert_eq!(outcome.source, RecommendationSource::None);
        assert!(outcome.recommendations.is_empty());
    }

    #[tokio::test]
    async fn test_delegate_empty_yields_empty_list() {
        let mut delegate = MockRecommendationDelegate::new();
        delegate.expect_recommend().returning(|_| Ok(Vec::new()));

        let outcome = recommend(Some(&delegate), &request(), false).await;
        assert_eq!(outcome, RecommendationOutcome::empty());
    }

    #[tokio::test]
    async fn test_delegate_failure_with_fallback_uses_synthesizer() {
        let mut delegate = MockRecommendationDelegate::new();
        delegate
            .expect_recommend()
            .returning(|_| Err(AppError::Delegate("timeout".to_string())));

        let outcome = recommend(Some(&delegate), &request(), true).await;

        assert_eq!(outcome.source, RecommendationSource::Local);
        assert!(!outcome.recommendations.is_empty());
    }

    #[test]
    fn test_delegate_receives_request() {
        let mut delegate = MockRecommendationDelegate::new();
        delegate
            .expect_recommend()
            .withf(|req| req.categories == vec!["beach", "food"])
            .returning(|_| Ok(vec![delegated("Sunset cruise")]));

        let outcome = tokio_test::block_on(recommend(Some(&delegate), &request(), false));
        assert_eq!(outcome.recommendations[0].title, "Sunset cruise");
    }
}
