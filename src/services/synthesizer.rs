use std::collections::HashSet;

use crate::models::{Location, Recommendation, RecommendationRequest};

use super::distance::{haversine_km, round1};

/// Upper bound on records returned by a single synthesis call
pub const MAX_RECOMMENDATIONS: usize = 12;

const MAX_LOCATIONS: usize = 3;
const MAX_CATEGORIES: usize = 4;

/// Floor applied to client-supplied distance and budget ceilings
const MIN_CEILING: f64 = 5.0;

const DEFAULT_CATEGORIES: [&str; 3] = ["culture", "nature", "food"];
const DEFAULT_LOCATION: &str = "Colombo";
const SEED_SEPARATOR: &str = ",";

const GENERIC_TITLES: [&str; 3] = [
    "Explore local market",
    "Try regional cuisine",
    "City highlights",
];

/// Candidate activity titles for a category, matched case-insensitively
fn title_pool(category: &str) -> &'static [&'static str] {
    match category.to_lowercase().as_str() {
        "culture" => &[
            "Visit an ancient temple",
            "Explore the heritage museum",
            "Walk the colonial fort",
        ],
        "nature" => &[
            "Hike a scenic trail",
            "Stroll the botanical gardens",
            "Waterfall excursion",
        ],
        "beach" => &["Relax on the beach", "Snorkeling trip", "Sunset beach walk"],
        "food" => &["Street food tour", "Home cooking class", "Tea estate tasting"],
        "adventure" => &["White-water rafting", "Zip-lining", "Rock climbing"],
        _ => &GENERIC_TITLES,
    }
}

/// Linear congruential generator owned by one synthesis call
///
/// `state = (state * 9301 + 49297) mod 233280`, and each draw is
/// `state / 233280` in `[0, 1)`.
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    const MULTIPLIER: u64 = 9301;
    const INCREMENT: u64 = 49297;
    const MODULUS: u64 = 233_280;

    pub fn new(seed: u64) -> Self {
        // (s mod m) yields the same draws as s
        Self {
            state: seed % Self::MODULUS,
        }
    }

    /// Next value in `[0, 1)`
    pub fn next_f64(&mut self) -> f64 {
        self.state = (self.state * Self::MULTIPLIER + Self::INCREMENT) % Self::MODULUS;
        self.state as f64 / Self::MODULUS as f64
    }

    /// Next value in `[low, high)`
    pub fn next_in(&mut self, low: f64, high: f64) -> f64 {
        low + self.next_f64() * (high - low)
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        let index = (self.next_f64() * items.len() as f64).floor() as usize % items.len();
        &items[index]
    }
}

/// Seed derived from the preferences: the UTF-16 length of the joined
/// category list followed by the joined location names, matching what
/// JavaScript clients compute for the same input
fn seed_for(categories: &[String], locations: &[Location]) -> u64 {
    let names: Vec<&str> = locations.iter().map(Location::name).collect();
    let joined = format!(
        "{}{}",
        categories.join(SEED_SEPARATOR),
        names.join(SEED_SEPARATOR)
    );
    joined.encode_utf16().count() as u64
}

fn clamp_to_ceiling(value: f64, ceiling: Option<f64>) -> f64 {
    match ceiling {
        Some(max) => value.min(max.max(MIN_CEILING)),
        None => value,
    }
}

/// Produces ranked recommendations from preferences alone
///
/// Fully deterministic: identical requests always yield identical output.
/// Empty category or location lists are replaced with defaults, so this never
/// fails. At most the first three locations and four categories are used.
pub fn synthesize(request: &RecommendationRequest) -> Vec<Recommendation> {
    let categories: Vec<String> = if request.categories.is_empty() {
        DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
    } else {
        request.categories.clone()
    };
    let locations: Vec<Location> = if request.locations.is_empty() {
        vec![Location::from(DEFAULT_LOCATION)]
    } else {
        request.locations.clone()
    };

    let mut rng = SeededRng::new(seed_for(&categories, &locations));

    let mut candidates = Vec::with_capacity(MAX_LOCATIONS * MAX_CATEGORIES);
    for location in locations.iter().take(MAX_LOCATIONS) {
        for category in categories.iter().take(MAX_CATEGORIES) {
            candidates.push(generate(&mut rng, request, location, category));
        }
    }

    let mut ranked = dedup(candidates);
    // Stable: equal scores keep generation order
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(MAX_RECOMMENDATIONS);

    tracing::debug!(
        categories = categories.len(),
        locations = locations.len(),
        results = ranked.len(),
        "Synthesized local recommendations"
    );

    ranked
}

/// Builds one record; draw order is title, distance, cost, duration, score
fn generate(
    rng: &mut SeededRng,
    request: &RecommendationRequest,
    location: &Location,
    category: &str,
) -> Recommendation {
    let title = rng.pick(title_pool(category)).to_string();

    let baseline_km = round1(rng.next_in(10.0, 150.0));
    let distance_km = match (request.home, location.point()) {
        (Some(home), Some(point)) => haversine_km(home, point),
        _ => baseline_km,
    };

    let cost = round1(rng.next_in(15.0, 100.0));
    let duration = (1.0 + rng.next_f64() * 6.0).round().max(1.0) as u32;
    let score = (rng.next_in(0.6, 1.0) * 100.0).round() / 100.0;

    Recommendation {
        title,
        location: location.name().to_string(),
        category: category.to_string(),
        estimated_cost: clamp_to_ceiling(cost, request.max_budget),
        estimated_distance_km: clamp_to_ceiling(distance_km, request.max_distance_km),
        duration_hours: duration,
        score,
    }
}

/// Keeps the first record for each `title|location|category` key
fn dedup(candidates: Vec<Recommendation>) -> Vec<Recommendation> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|rec| seen.insert(rec.dedup_key()))
        .collect()
}
