mod geo;
mod preferences;
mod recommendation;

pub use geo::{GeoPoint, Location, UNKNOWN_LOCATION};
pub use preferences::{PreferencePayload, RecommendationRequest};
pub use recommendation::{
    Recommendation, RecommendationResponse, RecommendationSource, RecommendationSummary,
};
