pub mod delegate;
pub mod distance;
pub mod recommendations;
pub mod synthesizer;
pub mod users;

pub use delegate::{OpenAiDelegate, RecommendationDelegate};
pub use distance::haversine_km;
pub use synthesizer::synthesize;
pub use users::{HttpUserDirectory, UserDirectory};
